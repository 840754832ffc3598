// ==========================================
// 库存可视化看板 - API 层
// ==========================================
// 职责: 提供查询/变更接口，供展示层（看板会话）调用
// ==========================================

pub mod dto;
pub mod error;
pub mod mutation_api;
pub mod query_api;

// 重导出核心类型
pub use dto::{KpiRecord, ProductRecord, WarehouseRecord};
pub use error::{ApiError, ApiErrorKind, ApiResult, ErrorResponse};
pub use mutation_api::InventoryMutationApi;
pub use query_api::InventoryQueryApi;
