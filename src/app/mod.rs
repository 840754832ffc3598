// ==========================================
// 库存可视化看板 - 应用层
// ==========================================
// 职责: 装配状态 + 看板展示支撑（缓存、过滤、分页、汇总、表单、会话）
// ==========================================

pub mod filters;
pub mod forms;
pub mod pagination;
pub mod query_cache;
pub mod session;
pub mod state;
pub mod totals;

// 重导出
pub use filters::ProductFilter;
pub use forms::{destination_options, parse_demand_input, validate_transfer_input, TransferInput};
pub use pagination::Paginator;
pub use query_cache::{QueryCache, QueryKey};
pub use session::{DashboardSession, DashboardView, DEFAULT_RANGE};
pub use state::{get_default_db_path, AppState};
pub use totals::DashboardTotals;
