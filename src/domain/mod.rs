// ==========================================
// 库存可视化看板 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑
// ==========================================

pub mod inventory;
pub mod kpi;
pub mod product;
pub mod types;
pub mod warehouse;

// 重导出核心类型
pub use inventory::{Inventory, InventoryView};
pub use kpi::KpiSnapshot;
pub use product::Product;
pub use types::{DestDemandPolicy, StockStatus};
pub use warehouse::Warehouse;
