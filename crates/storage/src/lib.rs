#![forbid(unsafe_code)]

pub mod catalog;
pub mod repository;

pub use catalog::{Catalog, CatalogLoadError};
pub use repository::{CategoryRepository, InMemoryRepository, QuizRepository, Storage, StorageError};
