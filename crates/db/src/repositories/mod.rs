//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod faculty_repo;
pub mod member_repo;
pub mod participant_repo;
pub mod review_repo;
pub mod task_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use faculty_repo::FacultyRepo;
pub use member_repo::MemberRepo;
pub use participant_repo::ParticipantRepo;
pub use review_repo::{Reaction, ReviewRepo};
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
