//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - tbl_weight(id, created_at, weight)
//! - tbl_water(id, created_at, ounces)
//! - tbl_distance(id, created_at, miles)
//! - tbl_user_profile(id = 1, first_name, last_name, gender, age, height_inches)

pub mod schema;
pub mod sqlite;

pub use sqlite::{DbStats, SqliteStore};
