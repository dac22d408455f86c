pub mod file;
pub mod import_cache;
pub mod traits;

// Re-export
pub use file::FilePlanRepository;
pub use import_cache::FileImportRepository;
pub use traits::{ImportCacheRepository, PlanRepository};
