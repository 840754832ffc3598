// ==========================================
// 库存可视化看板 - 汇总指标
// ==========================================
// 满足率 = round(Σmin(stock, demand) / Σdemand × 100)
// 有产品行时按行汇总（无需求时 100）；
// 无产品行时取最近一条 KPI 快照（无需求时 0）
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::{KpiRecord, ProductRecord};

/// 看板顶部三项指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_stock: i64,
    pub total_demand: i64,
    pub fill_rate: i64, // 百分比（整数）
}

/// 百分比取整（demand > 0）
///
/// 按浮点先除后乘 100，再 floor(x + 0.5)，与前端 Math.round 逐值一致
/// （如 57/200 → 28.499999… → 28）
fn rounded_percent(filled: i64, demand: i64) -> i64 {
    let percent = filled as f64 / demand as f64 * 100.0;
    (percent + 0.5).floor() as i64
}

impl DashboardTotals {
    /// 由产品行汇总
    pub fn from_products(rows: &[ProductRecord]) -> Self {
        let total_stock = rows.iter().map(|r| r.stock).sum();
        let total_demand: i64 = rows.iter().map(|r| r.demand).sum();
        let filled: i64 = rows.iter().map(|r| r.stock.min(r.demand)).sum();

        let fill_rate = if total_demand > 0 {
            rounded_percent(filled, total_demand)
        } else {
            100
        };

        Self {
            total_stock,
            total_demand,
            fill_rate,
        }
    }

    /// 由单条 KPI 快照计算
    pub fn from_kpi(kpi: &KpiRecord) -> Self {
        let fill_rate = if kpi.demand > 0 {
            rounded_percent(kpi.stock.min(kpi.demand), kpi.demand)
        } else {
            0
        };
        Self {
            total_stock: kpi.stock,
            total_demand: kpi.demand,
            fill_rate,
        }
    }

    /// 看板取值: 产品行优先，否则回退到 as-of KPI，均无则全 0
    pub fn compute(rows: &[ProductRecord], as_of: Option<&KpiRecord>) -> Self {
        if !rows.is_empty() {
            return Self::from_products(rows);
        }
        as_of.map(Self::from_kpi).unwrap_or_default()
    }
}
