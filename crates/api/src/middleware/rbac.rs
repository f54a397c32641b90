//! Admin access control.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use coachly_core::error::CoreError;

use super::auth::AuthUser;
use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Whether the caller's token email is in the configured admin list.
pub fn is_admin(user: &AuthUser, config: &ServerConfig) -> bool {
    user.email
        .as_deref()
        .is_some_and(|email| config.is_admin_email(email))
}

/// Requires a caller whose token email is in the configured admin list.
/// Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !is_admin(&user, &state.config) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
