pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{InventoryService, StoreSummary};
pub use domain::error::{InventoryError, InventoryResult};
pub use domain::model::{Category, ExternalProduct, Product, ResolvedProduct, Source, DEFAULT_CATEGORY};
pub use infra::{AppConfig, LookupClient, ProductLookup, StoreBackend};
pub use storage::{InventoryStore, MemoryStore, PostgresStore};
