//! # Kitchen
//!
//! 餐廳點餐核心：食材庫存、品項配方、可製作份數與訂單。
//!
//! - [`model`]：資料模型、錯誤與儲存介面
//! - [`calc`]：份數計算、訂單檢查、配方比對與點餐服務
//! - [`cache`]：記憶體儲存與增量份數快取

pub use kitchen_cache as cache;
pub use kitchen_calc as calc;
pub use kitchen_core as model;

pub use kitchen_cache::{IncrementalAvailability, InMemoryRepository};
pub use kitchen_calc::{
    AssociationReconciler, AvailabilityCalculator, KitchenService, OrderFulfillmentChecker,
};
pub use kitchen_core::{KitchenError, Result, Settings};
