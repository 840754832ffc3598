// ==========================================
// 库存可视化看板 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 多仓库存查询、需求维护与仓间调拨
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则（状态分类、KPI 范围、调拨计划）
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// SQL 性能观测
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 查询/变更接口
pub mod api;

// 应用层 - 状态装配与看板会话
pub mod app;

// 演示数据
pub mod seed;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型与实体
pub use domain::{DestDemandPolicy, Inventory, InventoryView, KpiSnapshot, Product, StockStatus, Warehouse};

// 引擎
pub use engine::{classify, TransferPlan, TransferRequest};

// API
pub use api::{
    ApiError, ApiErrorKind, ApiResult, InventoryMutationApi, InventoryQueryApi, KpiRecord,
    ProductRecord, WarehouseRecord,
};

// 应用
pub use app::{AppState, DashboardSession};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存可视化看板";

// 数据库版本
pub const DB_VERSION: &str = "v1";
