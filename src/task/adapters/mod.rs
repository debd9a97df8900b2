//! Adapter implementations of the task ports.

pub mod kv;
pub mod memory;
pub mod record;
pub mod redis;

pub use kv::KvTaskRepository;
pub use memory::InMemoryKeyValueStore;
pub use record::TaskRecord;
pub use self::redis::RedisKeyValueStore;
