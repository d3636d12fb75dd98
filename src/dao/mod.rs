/// Key-value store abstraction and its backends.
pub mod kv_store;
/// Repository reading and writing the persisted snapshot and sync markers.
pub mod snapshot;
/// Storage keys and errors shared by every backend.
pub mod storage;
