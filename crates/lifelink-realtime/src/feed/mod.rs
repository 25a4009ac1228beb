//! Change-feed implementations.

pub mod memory;

pub use memory::MemoryChangeFeed;
