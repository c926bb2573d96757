//! Durable key-value persistence for the funnel session.

pub mod answers;
pub mod libsql_backend;
pub mod memory;
pub mod traits;

pub use answers::AnswerStore;
pub use libsql_backend::LibSqlStorage;
pub use memory::MemoryStorage;
pub use traits::{Storage, keys};
