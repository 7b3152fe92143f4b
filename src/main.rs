#[tokio::main]
async fn main() {
    club_backend::run().await;
}
