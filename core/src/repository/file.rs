use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::resolve_data_dir;
use crate::model::workout::PlanTable;
use crate::repository::traits::PlanRepository;

pub const DEFAULT_PLAN_FILE: &str = "plan.json";

#[derive(Clone)]
pub struct FilePlanRepository {
    file_path: PathBuf,
}

impl FilePlanRepository {
    /// `file_name` is resolved against the data directory; an absolute path
    /// is used as is.
    pub fn new(base_dir: Option<PathBuf>, file_name: &str) -> Result<Self> {
        let path = resolve_data_dir(base_dir)?.join(file_name);

        // Start from an empty plan so a first run has something to load
        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &PlanTable::default())?;
            writer.flush()?;
            info!(path = %path.display(), "created empty plan file");
        }

        Ok(FilePlanRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    pub fn save(&self, table: &PlanTable) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, table)?;
        writer.flush()?;
        Ok(())
    }
}

impl PlanRepository for FilePlanRepository {
    fn load(&self) -> Result<PlanTable> {
        let file = File::open(&self.file_path)
            .with_context(|| format!("Could not open plan file {}", self.file_path.display()))?;
        let reader = BufReader::new(file);
        let table = serde_json::from_reader(reader)
            .with_context(|| format!("Could not parse plan file {}", self.file_path.display()))?;
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::workout::PlanRow;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("triplan-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_missing_file_loads_empty_plan() {
        let dir = temp_dir();
        let repo = FilePlanRepository::new(Some(dir.clone()), DEFAULT_PLAN_FILE).unwrap();
        assert!(repo.path().exists());
        assert_eq!(repo.load().unwrap(), PlanTable::default());
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir();
        let repo = FilePlanRepository::new(Some(dir.clone()), "custom.json").unwrap();

        let mut table = PlanTable::default();
        table.workouts.insert(
            NaiveDate::from_ymd_opt(2025, 9, 20).unwrap(),
            PlanRow {
                week: 1,
                day: "Saturday".into(),
                activity: "Run 5 miles".into(),
                details: String::new(),
                entry_type: None,
            },
        );
        repo.save(&table).unwrap();
        assert_eq!(repo.load().unwrap(), table);
        std::fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = temp_dir();
        let repo = FilePlanRepository::new(Some(dir.clone()), DEFAULT_PLAN_FILE).unwrap();
        std::fs::write(repo.path(), "{ not json").unwrap();
        assert!(repo.load().is_err());
        std::fs::remove_dir_all(dir).ok();
    }
}
