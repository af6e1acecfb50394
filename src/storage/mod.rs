//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - teams(name)
//! - drivers(name, nationality)
//! - races(grand_prix, date, circuit)
//! - results(race_id, driver_id, team_id, position, points)

pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStore, DbStats};
