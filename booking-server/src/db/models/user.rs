//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use std::fmt;
use surrealdb::RecordId;
use validator::Validate;

/// User role
///
/// Only travelers may hold reservations; the staff roles manage the
/// catalog. Stored in the original wire format (SCREAMING_SNAKE_CASE).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    BackOfficer,
    TravelAgent,
    Traveler,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UserRole::BackOfficer => "BACK_OFFICER",
            UserRole::TravelAgent => "TRAVEL_AGENT",
            UserRole::Traveler => "TRAVELER",
        };
        f.write_str(s)
    }
}

/// User entity, keyed by NIC (`user:<nic>`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub nic: String,
    pub user_name: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub activation_pending: bool,
    /// Back-reference list of live reservation ids
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub reservation_ids: Vec<RecordId>,
}

fn default_true() -> bool {
    true
}

/// NIC format check: 12 digits, or 9 digits followed by 'v'
pub fn is_valid_nic(nic: &str) -> bool {
    let bytes = nic.as_bytes();
    match bytes.len() {
        12 => bytes.iter().all(|b| b.is_ascii_digit()),
        10 => bytes[..9].iter().all(|b| b.is_ascii_digit()) && bytes[9] == b'v',
        _ => false,
    }
}

/// Create user payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserCreate {
    pub nic: String,
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
}

/// Update user payload (profile fields only; activation state and the
/// reservation list go through their own operations)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1))]
    pub user_name: String,
    #[validate(email)]
    pub email: String,
    pub role: UserRole,
}
