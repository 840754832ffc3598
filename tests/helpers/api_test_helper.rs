// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用辅助函数
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use supply_sight::api::{ApiError, ApiErrorKind, ApiResult, InventoryMutationApi, InventoryQueryApi};
use supply_sight::app::{AppState, DashboardSession};
use supply_sight::config::ConfigManager;
use supply_sight::repository::{
    InventoryRepository, KpiSnapshotRepository, ProductRepository, WarehouseRepository,
};

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 包含所有API实例和必要的依赖
pub struct ApiTestEnv {
    pub db_path: String,
    pub query_api: Arc<InventoryQueryApi>,
    pub mutation_api: Arc<InventoryMutationApi>,
    pub config_manager: Arc<ConfigManager>,

    // Repository层（用于测试数据准备）
    pub warehouse_repo: Arc<WarehouseRepository>,
    pub product_repo: Arc<ProductRepository>,
    pub inventory_repo: Arc<InventoryRepository>,
    pub kpi_repo: Arc<KpiSnapshotRepository>,

    state: AppState,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建空库测试环境（只建表）
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) = test_helpers::create_test_db()
            .map_err(|e| format!("创建测试数据库失败: {}", e))?;

        let state = AppState::new(db_path.clone())?;

        Ok(Self {
            db_path,
            query_api: state.query_api.clone(),
            mutation_api: state.mutation_api.clone(),
            config_manager: state.config_manager.clone(),
            warehouse_repo: state.warehouse_repo.clone(),
            product_repo: state.product_repo.clone(),
            inventory_repo: state.inventory_repo.clone(),
            kpi_repo: state.kpi_repo.clone(),
            state,
            _temp_file: temp_file,
        })
    }

    /// 创建带参考数据的测试环境
    pub fn with_reference_data() -> Result<Self, String> {
        let env = Self::new()?;
        test_helpers::seed_reference_data(&env.db_path)
            .map_err(|e| format!("写入参考数据失败: {}", e))?;
        Ok(env)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 新的看板会话
    pub fn session(&self) -> DashboardSession {
        self.state.dashboard_session()
    }

    /// 使用独立连接的变更API（跨连接并发测试用）
    pub fn separate_mutation_api(&self) -> Result<InventoryMutationApi, String> {
        let repo = InventoryRepository::new(&self.db_path)
            .map_err(|e| format!("无法创建InventoryRepository: {}", e))?;
        let config = ConfigManager::new(&self.db_path)
            .map_err(|e| format!("无法创建ConfigManager: {}", e))?;
        Ok(InventoryMutationApi::new(Arc::new(repo), Arc::new(config)))
    }

    pub fn row(&self, product_id: &str, warehouse: &str) -> Option<(i64, i64)> {
        test_helpers::read_row(&self.db_path, product_id, warehouse)
    }

    pub fn total_stock_of(&self, product_id: &str) -> i64 {
        test_helpers::total_stock_of(&self.db_path, product_id)
    }

    pub fn insert_kpi(&self, date: &str, stock: i64, demand: i64) {
        test_helpers::insert_kpi(&self.db_path, date, stock, demand).expect("写入KPI失败");
    }

    pub fn insert_row(&self, product_id: &str, warehouse: &str, stock: i64, demand: i64) {
        test_helpers::insert_inventory_row(&self.db_path, product_id, warehouse, stock, demand)
            .expect("写入库存行失败");
    }

    pub fn insert_bulk_rows(&self, n: usize) {
        test_helpers::insert_bulk_rows(&self.db_path, n).expect("写入批量数据失败");
    }
}

// ==========================================
// 断言辅助
// ==========================================

/// 断言结果为指定种类的错误
pub fn assert_error_kind<T: std::fmt::Debug>(result: ApiResult<T>, kind: ApiErrorKind) -> ApiError {
    match result {
        Err(e) => {
            assert_eq!(e.kind(), kind, "错误种类不符: {:?}", e);
            e
        }
        Ok(v) => panic!("期望 {:?} 错误，实际成功: {:?}", kind, v),
    }
}
