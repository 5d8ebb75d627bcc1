//! Domain logic shared by the club backend crates.
//!
//! Nothing in here performs I/O. The DB layer persists what these types
//! describe, the API layer maps [`error::CoreError`] onto HTTP responses, and
//! the client crate reuses the task form rules before sending anything.

pub mod dates;
pub mod error;
pub mod participants;
pub mod profile;
pub mod review;
pub mod roles;
pub mod task;
pub mod types;
