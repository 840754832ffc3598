// ==========================================
// 库存可视化看板 - 调拨规则
// ==========================================
// 职责: 调拨参数校验 + 计算调拨后的库存（不拼 SQL）
// 执行: 由 Mutation API 在同一事务内读行、套用规则、写回
// ==========================================

use crate::domain::inventory::Inventory;
use crate::domain::types::DestDemandPolicy;

/// 调拨请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub product_id: String,
    pub from_warehouse: String,
    pub to_warehouse: String,
    pub qty: i64,
}

impl TransferRequest {
    pub fn new(product_id: &str, from_warehouse: &str, to_warehouse: &str, qty: i64) -> Self {
        Self {
            product_id: product_id.to_string(),
            from_warehouse: from_warehouse.to_string(),
            to_warehouse: to_warehouse.to_string(),
            qty,
        }
    }

    /// 参数前置校验（不访问数据库）
    ///
    /// 校验顺序: 非空 → qty > 0 → 源仓 != 目标仓
    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.trim().is_empty() {
            return Err("产品ID不能为空".to_string());
        }
        if self.from_warehouse.trim().is_empty() || self.to_warehouse.trim().is_empty() {
            return Err("源仓/目标仓不能为空".to_string());
        }
        if self.qty <= 0 {
            return Err(format!("调拨数量必须大于0: qty={}", self.qty));
        }
        if self.from_warehouse == self.to_warehouse {
            return Err(format!("源仓与目标仓不能相同: {}", self.from_warehouse));
        }
        Ok(())
    }
}

/// 库存不足
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shortfall {
    pub available: i64,
    pub requested: i64,
}

/// 调拨计划生成失败
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// 源库存不足
    Shortfall(Shortfall),
    /// 目标库存加上调拨数量超出 i64 范围
    DestinationOverflow { current: i64, qty: i64 },
}

/// 调拨计划（事务内写回的目标值）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPlan {
    pub source_stock_after: i64,
    pub destination_stock_after: i64,
    /// Some(demand) 表示需新建目标行，并以该需求量初始化
    pub create_destination_with_demand: Option<i64>,
}

impl TransferPlan {
    /// 根据源行/目标行当前值生成调拨计划
    ///
    /// # 参数
    /// - source: 源库存行
    /// - destination: 目标库存行（None 表示尚不存在）
    /// - qty: 调拨数量（已校验 > 0）
    /// - policy: 新建目标行的需求量策略
    pub fn build(
        source: &Inventory,
        destination: Option<&Inventory>,
        qty: i64,
        policy: DestDemandPolicy,
    ) -> Result<Self, PlanError> {
        if source.stock < qty {
            return Err(PlanError::Shortfall(Shortfall {
                available: source.stock,
                requested: qty,
            }));
        }

        let (destination_stock_before, create_destination_with_demand) = match destination {
            Some(row) => (row.stock, None),
            None => (0, Some(policy.initial_demand(source.demand))),
        };

        let destination_stock_after = destination_stock_before.checked_add(qty).ok_or(
            PlanError::DestinationOverflow {
                current: destination_stock_before,
                qty,
            },
        )?;

        Ok(Self {
            source_stock_after: source.stock - qty,
            destination_stock_after,
            create_destination_with_demand,
        })
    }
}
