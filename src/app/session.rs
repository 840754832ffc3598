// ==========================================
// 库存可视化看板 - 看板会话
// ==========================================
// 持有: KPI 范围 / 过滤条件 / 分页 / 选中行 / 查询缓存
// 变更成功: 缓存整体失效 + 关闭详情（清空选中行）
// 变更失败: 保留选中行，错误原样返回给调用方
// ==========================================

use std::sync::Arc;

use serde::Serialize;

use crate::api::{
    ApiError, ApiResult, InventoryMutationApi, InventoryQueryApi, KpiRecord, ProductRecord,
    WarehouseRecord,
};
use crate::app::filters::ProductFilter;
use crate::app::forms::{parse_demand_input, validate_transfer_input};
use crate::app::pagination::Paginator;
use crate::app::query_cache::QueryCache;
use crate::app::totals::DashboardTotals;
use crate::i18n::{action_failed_notice, demand_updated_notice, t, transfer_done_notice};

/// 默认 KPI 范围
pub const DEFAULT_RANGE: &str = "30d";

/// 看板一屏数据
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub range: String,
    pub warehouses: Vec<WarehouseRecord>,
    pub kpis: Vec<KpiRecord>,
    /// 最近一天的 KPI（“截至”日期）
    pub as_of: Option<KpiRecord>,
    pub totals: DashboardTotals,
    pub rows: Vec<ProductRecord>,
    pub total_rows: usize,
    pub page: usize,
    pub page_count: usize,
    pub row_offset: usize,
}

/// 看板会话
pub struct DashboardSession {
    query_api: Arc<InventoryQueryApi>,
    mutation_api: Arc<InventoryMutationApi>,
    cache: QueryCache,
    range: String,
    filter: ProductFilter,
    paginator: Paginator,
    selected: Option<ProductRecord>,
    notice: Option<String>,
}

impl DashboardSession {
    pub fn new(
        query_api: Arc<InventoryQueryApi>,
        mutation_api: Arc<InventoryMutationApi>,
        page_size: usize,
    ) -> Self {
        Self {
            query_api,
            mutation_api,
            cache: QueryCache::new(),
            range: DEFAULT_RANGE.to_string(),
            filter: ProductFilter::default(),
            paginator: Paginator::new(page_size),
            selected: None,
            notice: None,
        }
    }

    // ==========================================
    // 会话状态
    // ==========================================

    pub fn range(&self) -> &str {
        &self.range
    }

    pub fn set_range(&mut self, range: &str) {
        self.range = range.to_string();
    }

    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// 更新过滤条件；条件变化时回到第一页
    pub fn set_filter(&mut self, filter: ProductFilter) {
        if filter != self.filter {
            self.filter = filter;
            self.paginator.reset();
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn selected(&self) -> Option<&ProductRecord> {
        self.selected.as_ref()
    }

    /// 最近一次变更的提示消息（已本地化）
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// 打开详情
    pub fn select(&mut self, row: ProductRecord) {
        self.selected = Some(row);
    }

    /// 关闭详情
    pub fn close_drawer(&mut self) {
        self.selected = None;
    }

    // ==========================================
    // 查询（经由缓存）
    // ==========================================

    pub fn load_warehouses(&mut self) -> ApiResult<Vec<WarehouseRecord>> {
        let api = &self.query_api;
        self.cache.warehouses(|| api.list_warehouses())
    }

    pub fn load_kpis(&mut self) -> ApiResult<Vec<KpiRecord>> {
        let api = &self.query_api;
        let range = self.range.clone();
        self.cache.kpis(&range, || api.list_kpis(&range))
    }

    pub fn load_products(&mut self) -> ApiResult<Vec<ProductRecord>> {
        let api = &self.query_api;
        let filter = &self.filter;
        self.cache.products(filter, || {
            api.list_products(
                filter.search.as_deref(),
                filter.warehouse.as_deref(),
                filter.status.as_deref(),
            )
        })
    }

    /// 组装一屏数据
    pub fn load(&mut self) -> ApiResult<DashboardView> {
        let warehouses = self.load_warehouses()?;
        let kpis = self.load_kpis()?;
        let products = self.load_products()?;

        // KPI 按日期降序，首条即最近一天
        let as_of = kpis.first().cloned();
        let totals = DashboardTotals::compute(&products, as_of.as_ref());

        let total_rows = products.len();
        let rows = self.paginator.slice(&products).to_vec();

        Ok(DashboardView {
            range: self.range.clone(),
            warehouses,
            kpis,
            as_of,
            totals,
            rows,
            total_rows,
            page: self.paginator.current_page(total_rows),
            page_count: self.paginator.page_count(total_rows),
            row_offset: self.paginator.offset(total_rows),
        })
    }

    // ==========================================
    // 分页
    // ==========================================

    pub fn go_to_page(&mut self, page: usize) -> ApiResult<()> {
        let total = self.load_products()?.len();
        self.paginator.go_to(page, total);
        Ok(())
    }

    pub fn next_page(&mut self) -> ApiResult<()> {
        let total = self.load_products()?.len();
        self.paginator.next(total);
        Ok(())
    }

    pub fn prev_page(&mut self) -> ApiResult<()> {
        let total = self.load_products()?.len();
        self.paginator.prev(total);
        Ok(())
    }

    pub fn first_page(&mut self) {
        self.paginator.first();
    }

    pub fn last_page(&mut self) -> ApiResult<()> {
        let total = self.load_products()?.len();
        self.paginator.last(total);
        Ok(())
    }

    // ==========================================
    // 变更
    // ==========================================

    fn selected_or_err(&self) -> ApiResult<ProductRecord> {
        self.selected
            .clone()
            .ok_or_else(|| ApiError::ValidationError(t("form.no_selection")))
    }

    fn finish_mutation(
        &mut self,
        result: ApiResult<ProductRecord>,
        success_notice: impl FnOnce(&ProductRecord) -> String,
    ) -> ApiResult<ProductRecord> {
        match result {
            Ok(record) => {
                self.cache.invalidate_all();
                self.close_drawer();
                self.notice = Some(success_notice(&record));
                Ok(record)
            }
            Err(e) => {
                self.notice = Some(action_failed_notice(&e));
                Err(e)
            }
        }
    }

    /// 提交需求量修改（作用于选中行）
    pub fn submit_demand(&mut self, demand_input: &str) -> ApiResult<ProductRecord> {
        let row = self.selected_or_err()?;
        let demand = parse_demand_input(demand_input).map_err(ApiError::ValidationError)?;

        let result = self.mutation_api.update_demand(&row.id, &row.warehouse, demand);
        self.finish_mutation(result, demand_updated_notice)
    }

    /// 提交调拨（源仓为选中行所在仓库）
    pub fn submit_transfer(&mut self, to_warehouse: &str, qty_input: &str) -> ApiResult<ProductRecord> {
        let row = self.selected_or_err()?;
        let input =
            validate_transfer_input(&row, to_warehouse, qty_input).map_err(ApiError::ValidationError)?;

        let result = self
            .mutation_api
            .transfer_stock(&row.id, &row.warehouse, &input.to_warehouse, input.qty);
        self.finish_mutation(result, |r| transfer_done_notice(input.qty, &row.warehouse, &r.warehouse))
    }
}
