use axum::routing::{get, post};
use axum::Router;

use crate::handlers::certifications;
use crate::state::AppState;

/// Certification routes mounted at `/certifications`.
///
/// ```text
/// POST   /recommend              -> recommend
/// POST   /study-plan             -> study_plan
/// POST   /simulate               -> simulate
/// POST   /career-coach           -> career_advice
/// GET    /user-recommendations   -> user_recommendations
/// GET    /user-profile           -> user_profile
/// POST   /save-profile           -> save_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(certifications::recommend))
        .route("/study-plan", post(certifications::study_plan))
        .route("/simulate", post(certifications::simulate))
        .route("/career-coach", post(certifications::career_advice))
        .route(
            "/user-recommendations",
            get(certifications::user_recommendations),
        )
        .route("/user-profile", get(certifications::user_profile))
        .route("/save-profile", post(certifications::save_profile))
}
