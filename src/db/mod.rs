//! Storage layer (JSON documents on the local filesystem).

pub mod records;

pub use records::RecordStore;
