mod directory_store;
mod errors;
mod http_store;
#[cfg(test)]
mod memory_store;
mod object_store;
mod publisher;
mod target;

pub use directory_store::DirectoryObjectStore;
pub use errors::PublishError;
pub use http_store::HttpObjectStore;
#[cfg(test)]
pub use memory_store::MemoryObjectStore;
pub use object_store::ObjectStore;
pub use publisher::{publish_partition, PublishedObject};
pub use target::StoreTarget;
