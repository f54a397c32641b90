use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::teams;
use crate::state::AppState;

/// Team routes mounted at `/teams`. Every route is scoped to teams the
/// caller owns.
///
/// ```text
/// GET    /                          -> list_teams
/// POST   /                          -> create_team
/// GET    /{id}                      -> get_team
/// DELETE /{id}                      -> delete_team
/// GET    /{id}/members              -> list_members
/// POST   /{id}/members              -> add_member
/// DELETE /{id}/members/{member_id}  -> remove_member
/// POST   /{id}/analytics            -> team_analytics
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(teams::list_teams).post(teams::create_team))
        .route("/{id}", get(teams::get_team).delete(teams::delete_team))
        .route(
            "/{id}/members",
            get(teams::list_members).post(teams::add_member),
        )
        .route("/{id}/members/{member_id}", delete(teams::remove_member))
        .route("/{id}/analytics", post(teams::team_analytics))
}
