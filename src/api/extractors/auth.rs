use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use crate::domain::models::auth::Claims;
use crate::domain::models::user::Role;
use crate::state::AppState;
use std::sync::Arc;
use tower_cookies::Cookies;
use tracing::Span;

pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let access_token = cookies.get("access_token")
            .ok_or(StatusCode::UNAUTHORIZED)?
            .value()
            .to_string();

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = app_state.auth_service.decode_token(&access_token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Span::current().record("user_id", claims.sub.as_str());

        Ok(AuthUser(claims))
    }
}

/// Same as AuthUser but only admits the ADMIN role.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        match claims.role {
            Role::Admin => Ok(AdminUser(claims)),
            Role::Teacher | Role::Student | Role::Inactive => Err(StatusCode::FORBIDDEN),
        }
    }
}
