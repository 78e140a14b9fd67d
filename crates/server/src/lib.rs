mod config;
mod cors;
mod request_id;
mod routes;

pub use config::{
    BackendConfig, Config, CorsConfig, ServerConfig, BACKEND_URL_ENV, BIND_ADDRESS_ENV, PORT_ENV,
};
pub use cors::CorsPolicy;
pub use routes::{router, AppState};
