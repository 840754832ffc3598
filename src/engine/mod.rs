// ==========================================
// 库存可视化看板 - 引擎层
// ==========================================
// 职责: 业务规则（状态判定、时间范围解析、调拨计划）
// 红线: Engine 不拼 SQL
// ==========================================

pub mod kpi_range;
pub mod status;
pub mod transfer;

// 重导出核心规则
pub use kpi_range::{parse_range_days, since_date, DEFAULT_RANGE_DAYS};
pub use status::classify;
pub use transfer::{PlanError, Shortfall, TransferPlan, TransferRequest};
