//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::entity::{Driver, EntityKind, Race, RaceResult, Team};
use super::schema;

/// SQLite-backed storage for the championship
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a fresh database at `path`, discarding any previous file,
    /// and run the given schema script against it.
    pub fn create(path: &Path, schema_sql: &str) -> Result<Self> {
        if path.exists() {
            tracing::debug!("Removing previous database {}", path.display());
            std::fs::remove_file(path)?;
        }
        let store = Self::configure(Connection::open(path)?)?;
        store.initialize_schema(schema_sql)?;
        Ok(store)
    }

    /// Open an existing database file
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("database not found: {}", path.display()),
            )));
        }
        Self::configure(Connection::open(path)?)
    }

    /// Open an in-memory database with the built-in schema (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let store = Self::configure(Connection::open_in_memory()?)?;
        store.initialize_schema(schema::DEFAULT_SCHEMA)?;
        Ok(store)
    }

    fn configure(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        Ok(Self { conn })
    }

    /// Execute a schema script verbatim
    pub fn initialize_schema(&self, schema_sql: &str) -> Result<()> {
        self.conn.execute_batch(schema_sql)?;
        Ok(())
    }

    // ========== Entity Operations ==========

    /// Insert a team unless one with this name exists. Returns true if created.
    pub fn ensure_team(&self, name: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO teams (name) VALUES (?1)",
            [name],
        )?;
        Ok(changed > 0)
    }

    /// Insert a driver unless one with this name exists.
    /// An existing driver keeps its original nationality.
    pub fn ensure_driver(&self, name: &str, nationality: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO drivers (name, nationality) VALUES (?1, ?2)",
            params![name, nationality],
        )?;
        Ok(changed > 0)
    }

    /// Insert a race unless one with this grand prix name exists.
    /// An existing race keeps its original date and circuit.
    pub fn ensure_race(&self, grand_prix: &str, date: &str, circuit: &str) -> Result<bool> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO races (grand_prix, date, circuit) VALUES (?1, ?2, ?3)",
            params![grand_prix, date, circuit],
        )?;
        Ok(changed > 0)
    }

    /// Look up an entity id by natural key
    pub fn find_id(&self, kind: EntityKind, name: &str) -> Result<Option<i64>> {
        let sql = format!(
            "SELECT id FROM {} WHERE {} = ?1",
            kind.table(),
            kind.key_column()
        );
        self.conn
            .query_row(&sql, [name], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Look up an entity id by natural key, failing if it does not exist
    pub fn resolve_id(&self, kind: EntityKind, name: &str) -> Result<i64> {
        self.find_id(kind, name)?.ok_or_else(|| Error::NotFound {
            kind,
            name: name.to_string(),
        })
    }

    pub fn resolve_team_id(&self, name: &str) -> Result<i64> {
        self.resolve_id(EntityKind::Team, name)
    }

    pub fn resolve_driver_id(&self, name: &str) -> Result<i64> {
        self.resolve_id(EntityKind::Driver, name)
    }

    pub fn resolve_race_id(&self, grand_prix: &str) -> Result<i64> {
        self.resolve_id(EntityKind::Race, grand_prix)
    }

    /// Get a team by name
    pub fn get_team(&self, name: &str) -> Result<Option<Team>> {
        self.conn
            .query_row(
                "SELECT id, name FROM teams WHERE name = ?1",
                [name],
                |row| Ok(Team { id: row.get(0)?, name: row.get(1)? }),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a driver by name
    pub fn get_driver(&self, name: &str) -> Result<Option<Driver>> {
        self.conn
            .query_row(
                "SELECT id, name, nationality FROM drivers WHERE name = ?1",
                [name],
                |row| {
                    Ok(Driver {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        nationality: row.get(2)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    /// Get a race by grand prix name
    pub fn get_race(&self, grand_prix: &str) -> Result<Option<Race>> {
        self.conn
            .query_row(
                "SELECT id, grand_prix, date, circuit FROM races WHERE grand_prix = ?1",
                [grand_prix],
                |row| {
                    Ok(Race {
                        id: row.get(0)?,
                        grand_prix: row.get(1)?,
                        date: row.get(2)?,
                        circuit: row.get(3)?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Result Operations ==========

    /// Insert a result, replacing any existing row for the same
    /// (race, driver, team) triple.
    pub fn upsert_result(&self, result: &RaceResult) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT OR REPLACE INTO results (race_id, driver_id, team_id, position, points)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                result.race_id,
                result.driver_id,
                result.team_id,
                result.position,
                result.points,
            ],
        )?;
        Ok(())
    }

    /// Get the result stored for a triple of entity ids
    pub fn get_result(&self, race_id: i64, driver_id: i64, team_id: i64) -> Result<Option<RaceResult>> {
        self.conn
            .query_row(
                "SELECT race_id, driver_id, team_id, position, points FROM results
                 WHERE race_id = ?1 AND driver_id = ?2 AND team_id = ?3",
                params![race_id, driver_id, team_id],
                |row| self.row_to_result(row),
            )
            .optional()
            .map_err(Into::into)
    }

    fn row_to_result(&self, row: &rusqlite::Row) -> rusqlite::Result<RaceResult> {
        Ok(RaceResult {
            race_id: row.get(0)?,
            driver_id: row.get(1)?,
            team_id: row.get(2)?,
            position: row.get(3)?,
            points: row.get(4)?,
        })
    }

    // ========== Aggregates ==========

    /// Total points per driver, highest first, ties by name ascending
    pub fn driver_totals(&self) -> Result<Vec<(String, i64)>> {
        self.totals(
            r#"
            SELECT d.name, SUM(r.points) AS total_points
            FROM results r
            JOIN drivers d ON d.id = r.driver_id
            GROUP BY d.id
            ORDER BY total_points DESC, d.name ASC
            "#,
        )
    }

    /// Total points per team, highest first, ties by name ascending
    pub fn team_totals(&self) -> Result<Vec<(String, i64)>> {
        self.totals(
            r#"
            SELECT t.name, SUM(r.points) AS total_points
            FROM results r
            JOIN teams t ON t.id = r.team_id
            GROUP BY t.id
            ORDER BY total_points DESC, t.name ASC
            "#,
        )
    }

    fn totals(&self, sql: &str) -> Result<Vec<(String, i64)>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    // ========== Statistics ==========

    fn count(&self, table: &str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn count_teams(&self) -> Result<usize> {
        self.count("teams")
    }

    pub fn count_drivers(&self) -> Result<usize> {
        self.count("drivers")
    }

    pub fn count_races(&self) -> Result<usize> {
        self.count("races")
    }

    pub fn count_results(&self) -> Result<usize> {
        self.count("results")
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats> {
        Ok(DbStats {
            teams: self.count_teams()?,
            drivers: self.count_drivers()?,
            races: self.count_races()?,
            results: self.count_results()?,
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DbStats {
    pub teams: usize,
    pub drivers: usize,
    pub races: usize,
    pub results: usize,
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Teams: {}", self.teams)?;
        writeln!(f, "  Drivers: {}", self.drivers)?;
        writeln!(f, "  Races: {}", self.races)?;
        writeln!(f, "  Results: {}", self.results)
    }
}
