use chrono_tz::Tz;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub jwt_secret: String,
    pub auth_issuer: String,
    pub club_timezone: String,
    pub booking_release_hour: u8,
    pub admin_email: String,
    pub admin_password: String,
    pub default_student_password: String,
    pub notify_url: Option<String>,
    pub notify_token: String,
    pub image_upload_url: Option<String>,
    pub placeholder_image_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty()),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            jwt_secret: env::var("JWT_SECRET").unwrap_or_else(|_| "club-dev-secret-do-not-use-in-prod".to_string()),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.club.local".to_string()),
            club_timezone: env::var("CLUB_TIMEZONE").unwrap_or_else(|_| "UTC".to_string()),
            booking_release_hour: env::var("BOOKING_RELEASE_HOUR")
                .ok()
                .and_then(|v| v.parse::<u8>().ok())
                .filter(|h| *h <= 23)
                .unwrap_or(8),
            admin_email: env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@club.local".to_string()),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "mudar@123".to_string()),
            default_student_password: env::var("DEFAULT_STUDENT_PASSWORD").unwrap_or_else(|_| "mudar@123".to_string()),
            notify_url: env::var("NOTIFY_SERVICE_URL").ok().filter(|v| !v.trim().is_empty()),
            notify_token: env::var("NOTIFY_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            image_upload_url: env::var("IMAGE_UPLOAD_URL").ok().filter(|v| !v.trim().is_empty()),
            placeholder_image_url: env::var("PLACEHOLDER_IMAGE_URL")
                .unwrap_or_else(|_| "https://placehold.co/600x400".to_string()),
        }
    }

    /// Falls back to UTC when CLUB_TIMEZONE is not a valid IANA name.
    pub fn timezone(&self) -> Tz {
        self.club_timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}
