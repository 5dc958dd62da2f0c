//! # Kitchen Cache
//!
//! 記憶體儲存與增量可製作份數計算

pub mod dirty_tracking;
pub mod incremental;
pub mod store;

// Re-export 主要類型
pub use dirty_tracking::DirtyTracker;
pub use incremental::IncrementalAvailability;
pub use store::InMemoryRepository;
