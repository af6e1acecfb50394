//! Loader context
//!
//! A `Season` bundles everything an ingestion run needs: the store handle,
//! the points table and the row failure policy. Operations take it
//! explicitly, so tests can swap in an in-memory store or another scale.

use crate::ingest::RowPolicy;
use crate::points::PointsTable;
use crate::recorder::ResultRecorder;
use crate::standings::StandingsReporter;
use crate::storage::SqliteStore;

pub struct Season<'a> {
    pub(crate) store: &'a SqliteStore,
    pub(crate) points: PointsTable,
    pub(crate) policy: RowPolicy,
}

impl<'a> Season<'a> {
    /// Default points scale, aborting on malformed rows
    pub fn new(store: &'a SqliteStore) -> Self {
        Self {
            store,
            points: PointsTable::default(),
            policy: RowPolicy::default(),
        }
    }

    pub fn with_points(mut self, points: PointsTable) -> Self {
        self.points = points;
        self
    }

    pub fn with_row_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn recorder(&self) -> ResultRecorder<'_> {
        ResultRecorder::new(self.store, &self.points)
    }

    pub fn standings(&self) -> StandingsReporter<'a> {
        StandingsReporter::new(self.store)
    }
}
