// Service modules
pub mod auth;
pub(crate) mod database;
pub mod guard;
pub mod http_server;
pub mod process;
pub mod service_config;
pub mod service_state;
pub mod vault;

// Re-exports for consumers (tests, embedding)
pub use database::models;
pub use database::types::ShareKind;
pub use database::{Database, DatabaseSetupError};
pub use process::{spawn_service, start_service, ShutdownHandle};
pub use service_config::Config as ServiceConfig;
pub use service_state::State as ServiceState;
