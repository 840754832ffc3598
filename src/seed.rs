// ==========================================
// 库存可视化看板 - 演示数据
// ==========================================
// 3 个仓库 / 4 个产品 / 4 条库存 / 今天之前 29 天的 KPI 快照
// 全部为 upsert，可重复执行
// ==========================================

use chrono::{Duration, NaiveDate};

use crate::app::AppState;
use crate::db::now_local;
use crate::domain::{Inventory, KpiSnapshot, Product, Warehouse};
use crate::repository::RepositoryResult;

/// KPI 回填天数（不含今天）
pub const KPI_HISTORY_DAYS: i64 = 29;

const WAREHOUSES: [(&str, &str, &str, &str); 3] = [
    ("BLR-A", "Bengaluru A", "Bengaluru", "IN"),
    ("PNQ-C", "Pune C", "Pune", "IN"),
    ("DEL-B", "Delhi B", "New Delhi", "IN"),
];

const PRODUCTS: [(&str, &str, &str); 4] = [
    ("P-1001", "12mm Hex Bolt", "HEX-12-100"),
    ("P-1002", "Steel Washer", "WSR-08-500"),
    ("P-1003", "M8 Nut", "NUT-08-200"),
    ("P-1004", "Bearing 608ZZ", "BRG-608-50"),
];

// (product_id, warehouse_code, stock, demand)
const INVENTORY: [(&str, &str, i64, i64); 4] = [
    ("P-1001", "BLR-A", 180, 120),
    ("P-1002", "BLR-A", 50, 80),
    ("P-1003", "PNQ-C", 80, 80),
    ("P-1004", "DEL-B", 24, 120),
];

/// 写入统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub warehouses: usize,
    pub products: usize,
    pub inventory_rows: usize,
    pub kpi_snapshots: usize,
}

/// 确定性日波动，取值 [-5, 5]
fn daily_noise(days_ago: i64, salt: i64) -> i64 {
    (days_ago * 7 + salt * 3).rem_euclid(11) - 5
}

/// 写入演示数据
///
/// # 参数
/// - state: 应用状态（使用其仓储）
/// - today: KPI 快照的基准日（快照覆盖 today-29 ..= today-1）
pub fn seed_demo_data(state: &AppState, today: NaiveDate) -> RepositoryResult<SeedSummary> {
    for (code, name, city, country) in WAREHOUSES {
        state.warehouse_repo.upsert(&Warehouse::new(code, name, city, country))?;
    }
    for (id, name, sku) in PRODUCTS {
        state.product_repo.upsert(&Product::new(id, name, sku))?;
    }

    // 列表靠后的行更新时间更晚
    let now = now_local();
    let count = INVENTORY.len() as i64;
    for (idx, (product_id, warehouse_code, stock, demand)) in INVENTORY.into_iter().enumerate() {
        let minutes_ago = count - idx as i64;
        let updated_at = now
            .checked_sub_signed(Duration::minutes(minutes_ago))
            .unwrap_or(now);
        state.inventory_repo.upsert(&Inventory {
            product_id: product_id.to_string(),
            warehouse_code: warehouse_code.to_string(),
            stock,
            demand,
            updated_at,
        })?;
    }

    let (total_stock, total_demand) = state.inventory_repo.aggregate_totals()?;
    let mut kpi_snapshots = 0;
    for days_ago in (1..=KPI_HISTORY_DAYS).rev() {
        let Some(date) = today.checked_sub_signed(Duration::days(days_ago)) else {
            continue;
        };
        state.kpi_repo.upsert(&KpiSnapshot {
            date,
            stock: (total_stock + daily_noise(days_ago, 1)).max(0),
            demand: (total_demand + daily_noise(days_ago, 2)).max(0),
        })?;
        kpi_snapshots += 1;
    }

    let summary = SeedSummary {
        warehouses: WAREHOUSES.len(),
        products: PRODUCTS.len(),
        inventory_rows: INVENTORY.len(),
        kpi_snapshots,
    };
    tracing::info!(?summary, "演示数据写入完成");
    Ok(summary)
}
