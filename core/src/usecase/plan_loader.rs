use anyhow::Result;

use crate::repository::PlanRepository;
use crate::store::{LoadOutcome, PlanStore};

pub struct PlanLoaderUseCase<'a, R: PlanRepository> {
    plan_repo: &'a R,
}

impl<'a, R: PlanRepository> PlanLoaderUseCase<'a, R> {
    pub fn new(plan_repo: &'a R) -> Self {
        Self { plan_repo }
    }

    /// Loads the plan and reports validation issues alongside the store.
    pub fn load(&self) -> Result<LoadOutcome> {
        let table = self.plan_repo.load()?;
        Ok(PlanStore::from_table(table))
    }

    /// Loads the plan, failing on the first sign of an inconsistent table.
    pub fn load_strict(&self) -> Result<PlanStore> {
        let table = self.plan_repo.load()?;
        Ok(PlanStore::from_table_strict(table)?)
    }
}
