//! Application layer - Use cases and orchestration

pub mod api;
pub mod auth;
pub mod config_store;
pub mod guard;
pub mod init;
pub mod manage_config;

pub use api::{decode_response, ApiClient, ApiRequest, Method};
pub use auth::AuthService;
pub use config_store::{
    export_configuration, import_configuration, import_from_reader, ConfigurationStore,
};
pub use guard::{navigate, Navigation};
pub use manage_config::ConfigService;
