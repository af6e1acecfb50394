//! Entity types - the championship data model
//!
//! Three reference entities are keyed by their natural name:
//! - `Team`: constructor, identified by name
//! - `Driver`: identified by name, carries a nationality
//! - `Race`: identified by grand prix name, carries date and circuit
//!
//! A `RaceResult` ties one of each together with a position and its points.

use serde::{Deserialize, Serialize};

/// Placeholder for optional text attributes missing from the input.
pub const UNKNOWN: &str = "Unknown";

/// Kinds of reference entity, used for lookups and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Team,
    Driver,
    Race,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Team => "team",
            EntityKind::Driver => "driver",
            EntityKind::Race => "race",
        }
    }

    /// Table holding this entity
    pub(crate) fn table(&self) -> &'static str {
        match self {
            EntityKind::Team => "teams",
            EntityKind::Driver => "drivers",
            EntityKind::Race => "races",
        }
    }

    /// Column holding the natural key
    pub(crate) fn key_column(&self) -> &'static str {
        match self {
            EntityKind::Team | EntityKind::Driver => "name",
            EntityKind::Race => "grand_prix",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EntityKind::Team => "Team",
            EntityKind::Driver => "Driver",
            EntityKind::Race => "Race",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Driver {
    pub id: i64,
    pub name: String,
    pub nationality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: i64,
    pub grand_prix: String,
    pub date: String,
    pub circuit: String,
}

/// A scored result, unique per (race, driver, team).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_id: i64,
    pub driver_id: i64,
    pub team_id: i64,
    pub position: i64,
    pub points: i64,
}
