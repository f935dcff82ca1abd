#![forbid(unsafe_code)]

pub mod repository;

pub use repository::{
    ContentRepository, InMemoryRepository, ProgressRepository, Storage, StorageError,
};
