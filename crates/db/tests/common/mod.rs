#![allow(dead_code)]

use chrono::NaiveDate;
use sqlx::PgPool;
use clubhub_core::types::DbId;
use clubhub_db::models::event::{CreateEvent, Event};
use clubhub_db::models::member::{CreateMember, Member};
use clubhub_db::models::user::{CreateUser, User};
use clubhub_db::repositories::{EventRepo, MemberRepo, UserRepo};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub async fn create_event(pool: &PgPool, title: &str) -> Event {
    EventRepo::create(
        pool,
        &CreateEvent {
            title: title.to_string(),
            description: None,
            event_date: date("2025-03-01"),
            event_time: None,
            location: None,
            registration_link: None,
            online_poster_url: None,
            offline_poster_url: None,
            is_live: None,
        },
    )
    .await
    .unwrap()
}

pub async fn create_member(pool: &PgPool, name: &str, code: &str) -> Member {
    MemberRepo::create(
        pool,
        &CreateMember {
            name: name.to_string(),
            email: format!("{}@college.edu", code.to_lowercase()),
            student_id: code.to_string(),
            picture_url: format!("/uploads/{code}.png"),
            description: None,
            hobbies: vec![],
            phone_number: Some("9876543210".into()),
            is_active: None,
            join_date: None,
        },
    )
    .await
    .unwrap()
}

pub async fn create_user(pool: &PgPool, code: &str) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            student_id: code.to_string(),
            name: format!("Student {code}"),
            email: format!("{}@students.edu", code.to_lowercase()),
            password_hash: "not-a-real-hash".into(),
            role: "student".into(),
        },
    )
    .await
    .unwrap()
}

pub fn ids<T>(items: &[T], id: impl Fn(&T) -> DbId) -> Vec<DbId> {
    items.iter().map(id).collect()
}
