use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

use crate::config::resolve_data_dir;
use crate::model::import::ImportedActivity;
use crate::repository::traits::ImportCacheRepository;

const IMPORT_FILE_NAME: &str = "imports.json";

pub struct FileImportRepository {
    file_path: PathBuf,
}

impl FileImportRepository {
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let path = resolve_data_dir(base_dir)?.join(IMPORT_FILE_NAME);

        if !path.exists() {
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<ImportedActivity>::new())?;
            writer.flush()?;
        }

        Ok(FileImportRepository { file_path: path })
    }

    fn read_activities(&self) -> Result<Vec<ImportedActivity>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let activities = serde_json::from_reader(reader)?;
        Ok(activities)
    }

    fn write_activities(&self, activities: &[ImportedActivity]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, activities)?;
        writer.flush()?;
        Ok(())
    }
}

impl ImportCacheRepository for FileImportRepository {
    fn list(&self) -> Result<Vec<ImportedActivity>> {
        self.read_activities()
    }

    fn upsert_many(&self, incoming: Vec<ImportedActivity>) -> Result<usize> {
        let mut activities = self.read_activities()?;
        let mut added = 0;
        for activity in incoming {
            let existing = activity
                .source_id
                .as_ref()
                .and_then(|id| activities.iter().position(|a| a.source_id.as_ref() == Some(id)));
            match existing {
                Some(pos) => {
                    debug!(source_id = ?activity.source_id, "replacing cached activity");
                    // Keep the local id so references stay stable
                    let id = activities[pos].id;
                    activities[pos] = ImportedActivity { id, ..activity };
                }
                None => {
                    activities.push(activity);
                    added += 1;
                }
            }
        }
        activities.sort_by_key(|a| a.date);
        self.write_activities(&activities)?;
        Ok(added)
    }

    fn clear(&self) -> Result<()> {
        self.write_activities(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sport::Sport;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("triplan-test-{}", Uuid::new_v4()))
    }

    fn activity(source_id: Option<&str>, miles: f64) -> ImportedActivity {
        let mut a = ImportedActivity::new(
            "Run".into(),
            Sport::Run,
            miles,
            NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
        );
        a.source_id = source_id.map(str::to_string);
        a
    }

    #[test]
    fn test_upsert_dedupes_by_source_id() {
        let dir = temp_dir();
        let repo = FileImportRepository::new(Some(dir.clone())).unwrap();
        assert!(repo.list().unwrap().is_empty());

        let added = repo.upsert_many(vec![activity(Some("1"), 3.0), activity(None, 2.0)]).unwrap();
        assert_eq!(added, 2);
        let first_id = repo.list().unwrap().iter().find(|a| a.source_id.is_some()).map(|a| a.id);

        let added = repo.upsert_many(vec![activity(Some("1"), 4.0), activity(None, 2.0)]).unwrap();
        assert_eq!(added, 1);

        let stored = repo.list().unwrap();
        assert_eq!(stored.len(), 3);
        let updated = stored.iter().find(|a| a.source_id.as_deref() == Some("1")).unwrap();
        assert_eq!(updated.distance_miles, 4.0);
        assert_eq!(Some(updated.id), first_id);

        repo.clear().unwrap();
        assert!(repo.list().unwrap().is_empty());
        std::fs::remove_dir_all(dir).ok();
    }
}
