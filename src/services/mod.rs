// Service exports
pub mod memory;
pub mod postgres;
pub mod processor;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;
pub use processor::{Processor, ProcessError};
pub use store::{MatchStore, StoreError};
