//! Per-workspace cache of git facts, remote repository names and access history.

pub mod errors;
pub mod persistence;
pub mod types;

pub use errors::CacheError;
pub use persistence::{
    CACHE_FILE_NAME, cache_file_path, cache_stats, clear_cache, load_cache, save_cache,
};
pub use types::{AccessRecord, CacheStats, GitFacts, ProjectCacheEntry, WorkspaceCacheFile};
