pub mod app;
pub mod config;
pub mod input;
pub mod keybinds;
pub mod onboarding;
pub mod proxy_client;
pub mod sync;
pub mod ui;

pub use config::Config;
pub use proxy_client::ProxyClient;
