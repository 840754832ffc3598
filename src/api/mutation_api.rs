// ==========================================
// 库存可视化看板 - 变更 API
// ==========================================
// 职责: 需求量更新 / 仓间调拨
// 调拨: 读源行 → 校验库存 → (新建目标行) → 扣源 → 加目标，
//       全部在同一 IMMEDIATE 事务内完成，任一步失败整体回滚
// ==========================================

use std::sync::Arc;

use tracing::instrument;

use crate::api::dto::ProductRecord;
use crate::api::error::{ApiError, ApiResult};
use crate::config::ConfigManager;
use crate::db::now_local;
use crate::engine::transfer::{PlanError, TransferPlan, TransferRequest};
use crate::perf::PerfGuard;
use crate::repository::{InventoryRepository, InventoryTx, RepositoryError, RepositoryResult};

// ==========================================
// InventoryMutationApi - 变更 API
// ==========================================

/// 库存变更API
pub struct InventoryMutationApi {
    inventory_repo: Arc<InventoryRepository>,
    config_manager: Arc<ConfigManager>,
}

impl InventoryMutationApi {
    /// 创建新的InventoryMutationApi实例
    pub fn new(inventory_repo: Arc<InventoryRepository>, config_manager: Arc<ConfigManager>) -> Self {
        Self {
            inventory_repo,
            config_manager,
        }
    }

    /// 更新需求量（库存不变）
    ///
    /// # 参数
    /// - product_id: 产品ID
    /// - warehouse_code: 仓库代码
    /// - demand: 新需求量（>= 0）
    ///
    /// # 返回
    /// - Ok(ProductRecord): 更新后的记录
    /// - Err(ApiError::ValidationError): 需求量为负或ID为空
    /// - Err(ApiError::NotFound): 库存行不存在
    #[instrument(skip(self))]
    pub fn update_demand(
        &self,
        product_id: &str,
        warehouse_code: &str,
        demand: i64,
    ) -> ApiResult<ProductRecord> {
        if product_id.trim().is_empty() || warehouse_code.trim().is_empty() {
            return Err(ApiError::ValidationError("产品ID/仓库代码不能为空".to_string()));
        }
        if demand < 0 {
            tracing::warn!(demand, "需求量为负，拒绝更新");
            return Err(ApiError::ValidationError(format!("需求量不能为负数: {}", demand)));
        }

        let affected = self
            .inventory_repo
            .update_demand(product_id, warehouse_code, demand, now_local())?;
        if affected == 0 {
            return Err(RepositoryError::inventory_not_found(product_id, warehouse_code).into());
        }

        let view = self
            .inventory_repo
            .find_view(product_id, warehouse_code)?
            .ok_or_else(|| RepositoryError::inventory_not_found(product_id, warehouse_code))?;

        tracing::info!(product_id, warehouse_code, demand, "需求量已更新");
        Ok(ProductRecord::from(view))
    }

    /// 仓间调拨
    ///
    /// # 参数
    /// - product_id: 产品ID
    /// - from_warehouse: 源仓
    /// - to_warehouse: 目标仓
    /// - qty: 调拨数量（> 0）
    ///
    /// # 返回
    /// - Ok(ProductRecord): 调拨后的目标行
    /// - Err(ApiError::ValidationError): 参数非法（qty <= 0 / 源仓 == 目标仓）或目标库存溢出
    /// - Err(ApiError::NotFound): 源行或目标仓不存在
    /// - Err(ApiError::InsufficientStock): 源库存不足
    /// - Err(ApiError::TransactionError): 事务未完成（已整体回滚）
    pub fn transfer_stock(
        &self,
        product_id: &str,
        from_warehouse: &str,
        to_warehouse: &str,
        qty: i64,
    ) -> ApiResult<ProductRecord> {
        let request = TransferRequest::new(product_id, from_warehouse, to_warehouse, qty);
        self.transfer_stock_with_checkpoint(&request, |_tx| Ok(()))
    }

    /// 仓间调拨（带检查点）
    ///
    /// checkpoint 在扣减源库存之后、增加目标库存之前于事务内调用；
    /// 返回 Err 时整个事务回滚
    #[instrument(skip(self, checkpoint), fields(
        product_id = %request.product_id,
        from = %request.from_warehouse,
        to = %request.to_warehouse,
        qty = request.qty
    ))]
    pub fn transfer_stock_with_checkpoint<F>(
        &self,
        request: &TransferRequest,
        checkpoint: F,
    ) -> ApiResult<ProductRecord>
    where
        F: FnOnce(&InventoryTx<'_>) -> RepositoryResult<()>,
    {
        if let Err(msg) = request.validate() {
            tracing::warn!("调拨参数校验失败: {}", msg);
            return Err(ApiError::ValidationError(msg));
        }

        let _perf = PerfGuard::new("transfer_stock");
        let policy = self
            .config_manager
            .get_dest_demand_policy()
            .map_err(|e| ApiError::InternalError(format!("读取调拨策略失败: {}", e)))?;

        let result = self.inventory_repo.in_transaction(|tx| {
            let now = now_local();
            let product_id = request.product_id.as_str();
            let to = request.to_warehouse.as_str();

            let source = tx
                .find_view(product_id, &request.from_warehouse)?
                .ok_or_else(|| RepositoryError::inventory_not_found(product_id, &request.from_warehouse))?;
            let destination = tx.find_view(product_id, to)?;

            let plan = TransferPlan::build(
                &source.inventory,
                destination.as_ref().map(|v| &v.inventory),
                request.qty,
                policy,
            )
            .map_err(|e| match e {
                PlanError::Shortfall(shortfall) => RepositoryError::InsufficientStock {
                    product_id: product_id.to_string(),
                    warehouse_code: request.from_warehouse.clone(),
                    available: shortfall.available,
                    requested: shortfall.requested,
                },
                PlanError::DestinationOverflow { current, qty } => RepositoryError::FieldValueError {
                    field: "stock".to_string(),
                    message: format!("目标仓 {} 库存 {} 加 {} 超出范围", to, current, qty),
                },
            })?;

            if let Some(demand) = plan.create_destination_with_demand {
                if !tx.warehouse_exists(to)? {
                    return Err(RepositoryError::NotFound {
                        entity: "Warehouse".to_string(),
                        id: to.to_string(),
                    });
                }
                tx.insert_row(product_id, to, 0, demand, now)?;
            }

            tx.set_stock(product_id, &request.from_warehouse, plan.source_stock_after, now)?;
            checkpoint(tx)?;
            tx.set_stock(product_id, to, plan.destination_stock_after, now)?;

            tx.find_view(product_id, to)?
                .ok_or_else(|| RepositoryError::inventory_not_found(product_id, to))
        });

        match result {
            Ok(view) => {
                tracing::info!(
                    destination_stock = view.inventory.stock,
                    "调拨完成"
                );
                Ok(ProductRecord::from(view))
            }
            Err(e) => {
                let err = ApiError::from_transaction(e);
                tracing::warn!(kind = ?err.kind(), "调拨失败，已回滚: {}", err);
                Err(err)
            }
        }
    }
}
