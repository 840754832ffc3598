// ==========================================
// 库存可视化看板 - API 数据传输对象
// ==========================================
// 职责: 对外扁平记录（JSON 形状与前端约定一致）
// ==========================================

use serde::{Deserialize, Serialize};

use crate::db::DATE_FORMAT;
use crate::domain::inventory::InventoryView;
use crate::domain::kpi::KpiSnapshot;
use crate::domain::types::StockStatus;
use crate::domain::warehouse::Warehouse;
use crate::engine::status::classify;

/// 仓库记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseRecord {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
}

impl From<Warehouse> for WarehouseRecord {
    fn from(w: Warehouse) -> Self {
        Self {
            code: w.code,
            name: w.name,
            city: w.city,
            country: w.country,
        }
    }
}

/// 产品库存记录（库存行 + 产品信息扁平化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,        // 产品ID
    pub name: String,      // 产品名称
    pub sku: String,       // SKU
    pub warehouse: String, // 仓库代码
    pub stock: i64,        // 库存量
    pub demand: i64,       // 需求量
}

impl ProductRecord {
    /// 派生库存状态
    pub fn status(&self) -> StockStatus {
        classify(self.stock, self.demand)
    }
}

impl From<InventoryView> for ProductRecord {
    fn from(view: InventoryView) -> Self {
        Self {
            id: view.product.id,
            name: view.product.name,
            sku: view.product.sku,
            warehouse: view.inventory.warehouse_code,
            stock: view.inventory.stock,
            demand: view.inventory.demand,
        }
    }
}

/// KPI 记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRecord {
    pub date: String, // YYYY-MM-DD
    pub stock: i64,
    pub demand: i64,
}

impl From<KpiSnapshot> for KpiRecord {
    fn from(s: KpiSnapshot) -> Self {
        Self {
            date: s.date.format(DATE_FORMAT).to_string(),
            stock: s.stock,
            demand: s.demand,
        }
    }
}
