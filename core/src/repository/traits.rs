use anyhow::Result;

use crate::model::import::ImportedActivity;
use crate::model::workout::PlanTable;

pub trait PlanRepository {
    fn load(&self) -> Result<PlanTable>;
}

pub trait ImportCacheRepository {
    fn list(&self) -> Result<Vec<ImportedActivity>>;
    /// Inserts or replaces by `source_id`; returns how many were new.
    fn upsert_many(&self, activities: Vec<ImportedActivity>) -> Result<usize>;
    fn clear(&self) -> Result<()>;
}
