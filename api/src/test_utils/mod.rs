//! Test utilities
//!
//! Fixtures for unit tests. Services under test are wired onto a fresh
//! [`InMemoryStore`](crate::adapters::memory::InMemoryStore), which doubles
//! as the repository and unit-of-work mock; the synchronous security ports
//! use mockall's generated mocks where a test needs to steer them.

pub mod fixtures;

pub use fixtures::*;
