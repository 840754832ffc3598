// ==========================================
// 库存可视化看板 - 应用状态
// ==========================================
// 职责: 打开数据库、建表、装配仓储与 API 实例
// ==========================================

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::api::{InventoryMutationApi, InventoryQueryApi};
use crate::app::session::DashboardSession;
use crate::config::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::perf::{install_sqlite_tracing, SqlPerfSettings};
use crate::repository::{
    InventoryRepository, KpiSnapshotRepository, ProductRepository, WarehouseRepository,
};

/// 数据库路径环境变量
pub const ENV_DB_PATH: &str = "SUPPLY_SIGHT_DB_PATH";

/// 应用状态
///
/// 所有仓储共享同一个连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 查询API
    pub query_api: Arc<InventoryQueryApi>,

    /// 变更API
    pub mutation_api: Arc<InventoryMutationApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    /// 仓储（种子程序/测试直接使用）
    pub warehouse_repo: Arc<WarehouseRepository>,
    pub product_repo: Arc<ProductRepository>,
    pub inventory_repo: Arc<InventoryRepository>,
    pub kpi_repo: Arc<KpiSnapshotRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（不存在时自动创建并建表）
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let mut conn =
            open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("数据库建表失败: {}", e))?;
        install_sqlite_tracing(&mut conn, SqlPerfSettings::from_env());
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let warehouse_repo = Arc::new(WarehouseRepository::from_connection(conn.clone()));
        let product_repo = Arc::new(ProductRepository::from_connection(conn.clone()));
        let inventory_repo = Arc::new(InventoryRepository::from_connection(conn.clone()));
        let kpi_repo = Arc::new(KpiSnapshotRepository::from_connection(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        // ==========================================
        // 初始化API层
        // ==========================================
        let query_api = Arc::new(InventoryQueryApi::new(
            warehouse_repo.clone(),
            inventory_repo.clone(),
            kpi_repo.clone(),
            config_manager.clone(),
        ));
        let mutation_api = Arc::new(InventoryMutationApi::new(
            inventory_repo.clone(),
            config_manager.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            query_api,
            mutation_api,
            config_manager,
            warehouse_repo,
            product_repo,
            inventory_repo,
            kpi_repo,
        })
    }

    /// 创建看板会话（页大小取自配置）
    pub fn dashboard_session(&self) -> DashboardSession {
        let page_size = self.config_manager.get_products_page_size().unwrap_or_else(|e| {
            tracing::warn!("读取分页配置失败，使用默认值: {}", e);
            crate::config::DEFAULT_PAGE_SIZE
        });
        DashboardSession::new(self.query_api.clone(), self.mutation_api.clone(), page_size)
    }
}

/// 默认数据库路径
///
/// 优先级: SUPPLY_SIGHT_DB_PATH → 用户数据目录 → 当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./supply_sight.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染正式数据
        let dir = if cfg!(debug_assertions) {
            data_dir.join("supply-sight-dev")
        } else {
            data_dir.join("supply-sight")
        };

        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("supply_sight.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}，使用当前目录", dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}
