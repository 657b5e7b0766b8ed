pub mod config;
pub mod prompt;
pub mod relay;
pub mod server;
pub mod upstream;

pub use config::RelayConfig;
pub use relay::ChatRelay;
pub use server::router;
