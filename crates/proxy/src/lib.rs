pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use routes::router;
pub use state::{AlertBroadcast, AppState};
