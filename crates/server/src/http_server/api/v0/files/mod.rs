use axum::routing::{delete, get, put};
use axum::Router;

pub mod delete_file;
pub mod download;
pub mod list;
pub mod rename;
pub mod upload;

use crate::ServiceState;

pub fn router(state: ServiceState) -> Router<ServiceState> {
    Router::new()
        .route("/", get(list::handler).post(upload::handler))
        .route("/:file_id", delete(delete_file::handler))
        .route("/:file_id/rename", put(rename::handler))
        .route("/:file_id/download", get(download::handler))
        .with_state(state)
}
