pub mod config;
pub mod lookup;

pub use config::{AppConfig, ConfigError, StoreBackend};
pub use lookup::{LookupClient, ProductLookup};
