//! Championship standings
//!
//! Drivers and constructors are ranked by total points, highest first.
//! Equal totals are ordered by name ascending so the output is stable
//! regardless of storage iteration order.

use serde::Serialize;
use crate::storage::SqliteStore;
use crate::Result;

/// One line of a standings table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub rank: usize,
    pub name: String,
    pub points: i64,
}

/// Both championships together
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Standings {
    pub drivers: Vec<Standing>,
    pub constructors: Vec<Standing>,
}

pub struct StandingsReporter<'a> {
    store: &'a SqliteStore,
}

impl<'a> StandingsReporter<'a> {
    pub fn new(store: &'a SqliteStore) -> Self {
        Self { store }
    }

    /// Drivers' championship. Drivers without results are not listed.
    pub fn driver_standings(&self) -> Result<Vec<Standing>> {
        Ok(ranked(self.store.driver_totals()?))
    }

    /// Constructors' championship. Teams without results are not listed.
    pub fn constructor_standings(&self) -> Result<Vec<Standing>> {
        Ok(ranked(self.store.team_totals()?))
    }

    pub fn all(&self) -> Result<Standings> {
        Ok(Standings {
            drivers: self.driver_standings()?,
            constructors: self.constructor_standings()?,
        })
    }
}

fn ranked(totals: Vec<(String, i64)>) -> Vec<Standing> {
    totals
        .into_iter()
        .enumerate()
        .map(|(i, (name, points))| Standing { rank: i + 1, name, points })
        .collect()
}
