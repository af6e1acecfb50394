use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::ingest::RowPolicy;
use crate::points::PointsTable;

pub const DEFAULT_DATABASE: &str = "f1.db";
pub const DEFAULT_SCHEMA: &str = "schema.sql";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PaddockConfig {
    pub database: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub on_bad_row: Option<RowPolicy>,
    /// Points per finishing position, winner first
    pub points: Option<Vec<i64>>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub database: PathBuf,
    pub schema: PathBuf,
    pub data: PathBuf,
    pub on_bad_row: RowPolicy,
    pub points: PointsTable,
}

impl PaddockConfig {
    /// Config written by `paddock init`
    pub fn starter() -> Self {
        Self {
            database: Some(PathBuf::from(DEFAULT_DATABASE)),
            schema: Some(PathBuf::from(DEFAULT_SCHEMA)),
            data: Some(PathBuf::from(DEFAULT_DATA_DIR)),
            on_bad_row: Some(RowPolicy::Abort),
            points: Some(crate::points::DEFAULT_SCALE.to_vec()),
        }
    }

    /// Apply overrides on top of this config, then built-in defaults
    pub fn resolve(&self, overrides: &PaddockConfig) -> crate::Result<RunSettings> {
        let pick = |cli: &Option<PathBuf>, file: &Option<PathBuf>, default: &str| {
            cli.clone()
                .or_else(|| file.clone())
                .unwrap_or_else(|| PathBuf::from(default))
        };

        let points = match overrides.points.as_ref().or(self.points.as_ref()) {
            Some(scale) => PointsTable::from_scale(scale.clone())?,
            None => PointsTable::default(),
        };

        Ok(RunSettings {
            database: pick(&overrides.database, &self.database, DEFAULT_DATABASE),
            schema: pick(&overrides.schema, &self.schema, DEFAULT_SCHEMA),
            data: pick(&overrides.data, &self.data, DEFAULT_DATA_DIR),
            on_bad_row: overrides.on_bad_row.or(self.on_bad_row).unwrap_or_default(),
            points,
        })
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("paddock.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<PaddockConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: PaddockConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &PaddockConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config(Some(&dir.path().join("paddock.toml"))).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paddock.toml");
        let config = PaddockConfig::starter();

        write_config(&path, &config, false).unwrap();
        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();

        let loaded = load_config(Some(&path)).unwrap().unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_resolution_order() {
        let file: PaddockConfig = toml::from_str(
            r#"
            database = "out/season.db"
            data = "results"
            on_bad_row = "skip"
            points = [10, 6, 4, 3, 2, 1]
            "#,
        )
        .unwrap();
        let cli = PaddockConfig {
            data: Some(PathBuf::from("cli-data")),
            ..Default::default()
        };

        let settings = file.resolve(&cli).unwrap();
        assert_eq!(settings.database, PathBuf::from("out/season.db"));
        assert_eq!(settings.data, PathBuf::from("cli-data"));
        assert_eq!(settings.schema, PathBuf::from(DEFAULT_SCHEMA));
        assert_eq!(settings.on_bad_row, RowPolicy::Skip);
        assert_eq!(settings.points.points(1), 10);
    }

    #[test]
    fn test_defaults_without_config() {
        let settings = PaddockConfig::default().resolve(&PaddockConfig::default()).unwrap();
        assert_eq!(settings.database, PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(settings.on_bad_row, RowPolicy::Abort);
        assert_eq!(settings.points, PointsTable::default());
    }

    #[test]
    fn test_empty_points_rejected() {
        let file: PaddockConfig = toml::from_str("points = []").unwrap();
        assert!(file.resolve(&PaddockConfig::default()).is_err());
    }

    #[test]
    fn test_ensure_db_dir_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("f1.db");
        ensure_db_dir(&db_path).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }
}
