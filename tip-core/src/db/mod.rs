pub mod codec;
pub mod factory;
pub mod memory;
pub mod repository;

pub use codec::{CUSTOM_TIPS_KEY, decode_custom_tips, encode_custom_tips};
pub use factory::{DbConfig, RepositoryFactory, RepositoryRegistry};
pub use memory::{MemoryRepository, MemoryRepositoryFactory};
pub use repository::{RepositoryError, TipRepository};
