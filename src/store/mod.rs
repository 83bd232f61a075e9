//! Note collection and the storage port it persists through

mod json_file;
mod note_store;
mod storage;

pub use json_file::JsonFileStorage;
pub use note_store::{NoteStore, StoreError};
pub use storage::{MemoryStorage, NoteStorage, Snapshot, StorageError};
