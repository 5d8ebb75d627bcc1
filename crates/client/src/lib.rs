//! Typed HTTP client for the club backend, plus the task assignment form.
//!
//! - [`api`] -- [`ClubClient`], one method per REST call the admin tools use.
//! - [`form`] -- [`TaskForm`], the per-category assignment editor. A form with
//!   an unassigned category is rejected before any request is sent.
//! - [`roster`] -- [`RosterView`], the member picker shown next to the form.
//! - [`editor`] -- [`TaskEditor`], loads a task and roster for one event and
//!   submits the form as a create or an update.

pub mod api;
pub mod editor;
pub mod error;
pub mod form;
pub mod models;
pub mod roster;

pub use api::ClubClient;
pub use editor::{EditorMode, TaskEditor};
pub use error::ClientError;
pub use form::TaskForm;
pub use roster::RosterView;
