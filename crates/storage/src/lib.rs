#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{BundledRepository, JsonFileRepository, parse_dictionary};
pub use repository::{InMemoryRepository, StorageError, VerbRecord, VerbRepository};
