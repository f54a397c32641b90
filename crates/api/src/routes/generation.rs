//! Route definitions for the single-request generators, the router and the
//! raw model endpoints. Mounted at the root.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{coach, generation, intent, llm, simulation};
use crate::state::AppState;

/// ```text
/// GET    /concepts           -> concepts (public)
/// POST   /micro-lesson       -> micro_lesson
/// GET    /simulation         -> start_simulation
/// POST   /simulation-step    -> simulation_step
/// POST   /recommendation     -> recommendation
/// POST   /career-coach       -> career_coach
/// POST   /skills-forecast    -> skills_forecast
/// POST   /video-quiz         -> video_quiz
/// POST   /web-search         -> web_search
/// POST   /classify-intent    -> classify_intent
/// POST   /route              -> route_prompt
/// POST   /llm                -> complete
/// POST   /llm-stream         -> complete_stream
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/concepts", get(generation::concepts))
        .route("/micro-lesson", post(generation::micro_lesson))
        .route("/simulation", get(simulation::start_simulation))
        .route("/simulation-step", post(simulation::simulation_step))
        .route("/recommendation", post(generation::recommendation))
        .route("/career-coach", post(coach::career_coach))
        .route("/skills-forecast", post(generation::skills_forecast))
        .route("/video-quiz", post(generation::video_quiz))
        .route("/web-search", post(generation::web_search))
        .route("/classify-intent", post(intent::classify_intent))
        .route("/route", post(intent::route_prompt))
        .route("/llm", post(llm::complete))
        .route("/llm-stream", post(llm::complete_stream))
}
