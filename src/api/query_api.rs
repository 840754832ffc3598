// ==========================================
// 库存可视化看板 - 查询 API
// ==========================================
// 职责: 仓库列表 / 产品库存列表（搜索+仓库+状态过滤）/ KPI 时间序列
// 约束: 只读，不写库
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::instrument;

use crate::api::dto::{KpiRecord, ProductRecord, WarehouseRecord};
use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::domain::types::StockStatus;
use crate::engine::kpi_range::{parse_range_days, since_date};
use crate::perf::PerfGuard;
use crate::repository::{InventoryRepository, KpiSnapshotRepository, WarehouseRepository};

/// 空串视为未提供（不做 trim，按原值匹配）
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// ==========================================
// InventoryQueryApi - 查询 API
// ==========================================

/// 库存查询API
pub struct InventoryQueryApi {
    warehouse_repo: Arc<WarehouseRepository>,
    inventory_repo: Arc<InventoryRepository>,
    kpi_repo: Arc<KpiSnapshotRepository>,
    config_manager: Arc<ConfigManager>,
}

impl InventoryQueryApi {
    /// 创建新的InventoryQueryApi实例
    pub fn new(
        warehouse_repo: Arc<WarehouseRepository>,
        inventory_repo: Arc<InventoryRepository>,
        kpi_repo: Arc<KpiSnapshotRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            warehouse_repo,
            inventory_repo,
            kpi_repo,
            config_manager,
        }
    }

    /// 查询全部仓库（按 code 升序）
    #[instrument(skip(self))]
    pub fn list_warehouses(&self) -> ApiResult<Vec<WarehouseRecord>> {
        let warehouses = self.warehouse_repo.list_all()?;
        Ok(warehouses.into_iter().map(WarehouseRecord::from).collect())
    }

    /// 查询产品库存列表
    ///
    /// # 参数
    /// - search: 名称/SKU/产品ID 模糊匹配（trim 后忽略大小写）
    /// - warehouse: 仓库代码精确匹配（不 trim）
    /// - status: 状态标签（Healthy/Low/Critical，忽略大小写，不 trim）
    ///
    /// # 返回
    /// - 按最近更新时间降序；过滤不改变相对顺序
    /// - 未知状态标签返回空列表
    #[instrument(skip(self))]
    pub fn list_products(
        &self,
        search: Option<&str>,
        warehouse: Option<&str>,
        status: Option<&str>,
    ) -> ApiResult<Vec<ProductRecord>> {
        let _perf = PerfGuard::new("list_products");

        let status_filter = match non_empty(status) {
            None => None,
            Some(label) => match label.parse::<StockStatus>() {
                Ok(s) => Some(s),
                Err(e) => {
                    tracing::debug!("{}，结果为空", e);
                    return Ok(Vec::new());
                }
            },
        };

        // 仅搜索词 trim；仓库与状态按原值匹配
        let needle = search
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_lowercase);
        let views = self.inventory_repo.list_views(non_empty(warehouse))?;

        let records = views
            .into_iter()
            .filter(|view| match &needle {
                Some(n) => view.product.matches_search(n),
                None => true,
            })
            .filter(|view| match status_filter {
                Some(s) => view.status() == s,
                None => true,
            })
            .map(ProductRecord::from)
            .collect();

        Ok(records)
    }

    /// 查询 KPI 时间序列（以本地当天为基准）
    ///
    /// # 参数
    /// - range: "<N>d"（原样匹配，不 trim）；不匹配时回退到配置的默认天数
    pub fn list_kpis(&self, range: &str) -> ApiResult<Vec<KpiRecord>> {
        let today = chrono::Local::now().date_naive();
        self.list_kpis_as_of(range, today)
    }

    /// 查询 KPI 时间序列（显式指定当天）
    ///
    /// # 返回
    /// - date >= today - (N - 1) 的快照，按日期降序
    #[instrument(skip(self))]
    pub fn list_kpis_as_of(&self, range: &str, today: NaiveDate) -> ApiResult<Vec<KpiRecord>> {
        let default_days = self
            .config_manager
            .get_kpi_default_range_days()
            .map_err(|e| ApiError::InternalError(format!("读取KPI默认天数失败: {}", e)))?;

        let days = parse_range_days(range, default_days);
        let since = since_date(today, days);

        let snapshots = self.kpi_repo.find_since(since)?;
        Ok(snapshots.into_iter().map(KpiRecord::from).collect())
    }
}
