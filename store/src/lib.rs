pub mod error;
pub mod models;
pub mod store;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{Identity, IdentityInfo, Note};
pub use store::Store;
