use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::ideas;
use crate::state::AppState;

/// Unknown-intent roadmap routes mounted at `/admin/unknown-intents`.
///
/// Listing, upvoting and subscribing are open to any signed-in user.
///
/// ```text
/// GET    /                  -> list_ideas
/// DELETE /{id}              -> delete_idea (admin only)
/// POST   /{id}/upvote       -> upvote_idea
/// POST   /{id}/subscribe    -> subscribe_idea
/// POST   /{id}/status       -> set_idea_status (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(ideas::list_ideas))
        .route("/{id}", delete(ideas::delete_idea))
        .route("/{id}/upvote", post(ideas::upvote_idea))
        .route("/{id}/subscribe", post(ideas::subscribe_idea))
        .route("/{id}/status", post(ideas::set_idea_status))
}
