pub mod admin;
pub mod auth;
pub mod event;
pub mod faculty;
pub mod member;
pub mod participants;
pub mod review;
pub mod task;
pub mod upload;
