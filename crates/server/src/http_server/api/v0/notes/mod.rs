use axum::routing::{get, put};
use axum::Router;

pub mod create;
pub mod delete_note;
pub mod list;
pub mod update;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(create::handler))
        .route(
            "/:note_id",
            put(update::handler).delete(delete_note::handler),
        )
        .with_state(state)
}
