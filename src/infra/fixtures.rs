use chrono::{Duration, Utc};
use tracing::info;

use crate::domain::models::auth::Credential;
use crate::domain::models::modality::Modality;
use crate::domain::models::session::{ClassSession, NewSessionParams};
use crate::domain::models::user::User;
use crate::error::AppError;
use crate::state::AppState;

/// Demo data for local mode: a couple of modalities, tomorrow's sessions and one
/// student account, so the app is browsable without any backend configured.
pub async fn seed_demo_data(state: &AppState) -> Result<(), AppError> {
    let swimming = Modality::new(
        "Swimming".into(),
        "Lap swimming for all levels".into(),
        state.config.placeholder_image_url.clone(),
    );
    let beach_tennis = Modality::new(
        "Beach Tennis".into(),
        "Doubles play on the sand courts".into(),
        state.config.placeholder_image_url.clone(),
    );
    state.modality_repo.create(&swimming).await?;
    state.modality_repo.create(&beach_tennis).await?;

    let tomorrow = Utc::now() + Duration::days(1);
    let sessions = vec![
        ClassSession::new(NewSessionParams {
            modality_id: swimming.id.clone(),
            instructor: "Carla Mendes".into(),
            start_time: tomorrow.date_naive().and_hms_opt(7, 0, 0).unwrap().and_utc(),
            duration_min: 60,
            capacity: 12,
            category: Some("Iniciante".into()),
        }),
        ClassSession::new(NewSessionParams {
            modality_id: beach_tennis.id.clone(),
            instructor: "Diego Rocha".into(),
            start_time: tomorrow.date_naive().and_hms_opt(18, 0, 0).unwrap().and_utc(),
            duration_min: 60,
            capacity: 4,
            category: None,
        }),
    ];
    state.session_repo.create_many(&sessions).await?;

    let student = User {
        must_change_password: false,
        ..User::new_student(
            "Joana Lima".into(),
            "student@club.local".into(),
            Some("11999990000".into()),
        )
    };
    let hash = state.auth_service.hash_password(&state.config.default_student_password)?;
    state.credential_repo.create(&Credential::new(student.email.clone(), hash)).await?;
    state.user_repo.create(&student).await?;

    info!("Seeded demo fixtures: 2 modalities, {} sessions, 1 student", sessions.len());
    Ok(())
}
