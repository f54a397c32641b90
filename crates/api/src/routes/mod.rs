pub mod certifications;
pub mod generation;
pub mod health;
pub mod ideas;
pub mod lessons;
pub mod teams;
pub mod voice;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree. Everything is served at the root.
///
/// Route hierarchy:
///
/// ```text
/// /                                                liveness message (public)
/// /health                                          service and store health (public)
/// /concepts                                        concept explanations (public)
///
/// /micro-lesson                                    generate and save a lesson
/// /simulation                                      open a customer simulation
/// /simulation-step                                 continue a simulation
/// /recommendation                                  learning recommendation
/// /career-coach                                    coaching conversation turn
/// /skills-forecast                                 skills forecast
/// /video-quiz                                      quiz from a video summary
/// /web-search                                      free-form question
/// /classify-intent                                 classify a request
/// /route                                           classify, route and run
/// /llm                                             raw completion
/// /llm-stream                                      raw streamed completion
///
/// /lessons                                         list, create
/// /lessons/{id}                                    get, update, delete
///
/// /teams                                           list, create
/// /teams/{id}                                      get, delete
/// /teams/{id}/members                              list, add
/// /teams/{id}/members/{member_id}                  remove
/// /teams/{id}/analytics                            AI analytics (POST)
///
/// /certifications/recommend                        recommendations (saves profile)
/// /certifications/study-plan                       study plan
/// /certifications/simulate                         interview simulation
/// /certifications/career-coach                     career advice
/// /certifications/user-recommendations             recommendation history
/// /certifications/user-profile                     saved profile
/// /certifications/save-profile                     save profile
///
/// /admin/unknown-intents                           list ideas
/// /admin/unknown-intents/{id}                      delete (admin only)
/// /admin/unknown-intents/{id}/upvote               upvote
/// /admin/unknown-intents/{id}/subscribe            follow by email
/// /admin/unknown-intents/{id}/status               set status (admin only)
///
/// /voice-cloning/upload-sample                     upload a sample (multipart)
/// /voice-cloning/train                             start training
/// /voice-cloning/training-status/{id}              training progress
/// /voice-cloning/models                            list voice models
/// /voice-cloning/synthesize                        synthesize speech
/// /voice-cloning/model                             delete voice model
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(generation::router())
        .nest("/lessons", lessons::router())
        .nest("/teams", teams::router())
        .nest("/certifications", certifications::router())
        .nest("/admin/unknown-intents", ideas::router())
        .nest("/voice-cloning", voice::router())
}
