//! Result recording
//!
//! Turns a (race, driver, team, position) quadruple into a scored result row.
//! Points are always derived from the points table at write time.

use crate::entity::RaceResult;
use crate::points::PointsTable;
use crate::storage::SqliteStore;
use crate::Result;

/// Records scored results against existing entities
pub struct ResultRecorder<'a> {
    store: &'a SqliteStore,
    points: &'a PointsTable,
}

impl<'a> ResultRecorder<'a> {
    pub fn new(store: &'a SqliteStore, points: &'a PointsTable) -> Self {
        Self { store, points }
    }

    /// Write the result for a race/driver/team triple, replacing any previous
    /// one. All three entities must already exist.
    pub fn record_result(
        &self,
        race_name: &str,
        driver_name: &str,
        team_name: &str,
        position: i64,
    ) -> Result<RaceResult> {
        let result = RaceResult {
            race_id: self.store.resolve_race_id(race_name)?,
            driver_id: self.store.resolve_driver_id(driver_name)?,
            team_id: self.store.resolve_team_id(team_name)?,
            position,
            points: self.points.points(position),
        };
        self.store.upsert_result(&result)?;

        tracing::debug!(
            "Recorded {} / {} / {}: P{} = {} pts",
            race_name, driver_name, team_name, position, result.points
        );
        Ok(result)
    }
}
