//! In-process backend implementations

pub mod in_memory;

pub use in_memory::InMemoryApi;
