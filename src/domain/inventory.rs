// ==========================================
// 库存可视化看板 - 库存领域模型
// ==========================================
// 主键: (product_id, warehouse_code)，每对至多一行
// 红线: stock >= 0 恒成立
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::product::Product;
use crate::domain::types::StockStatus;
use crate::engine::status::classify;

// ==========================================
// Inventory - 库存行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub product_id: String,       // 产品ID
    pub warehouse_code: String,   // 仓库代码
    pub stock: i64,               // 库存量 (>= 0)
    pub demand: i64,              // 需求量 (>= 0)
    pub updated_at: NaiveDateTime, // 最近更新时间
}

impl Inventory {
    /// 派生库存状态
    pub fn status(&self) -> StockStatus {
        classify(self.stock, self.demand)
    }
}

// ==========================================
// InventoryView - 库存行 + 产品信息（查询联表结果）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryView {
    pub inventory: Inventory,
    pub product: Product,
}

impl InventoryView {
    pub fn status(&self) -> StockStatus {
        self.inventory.status()
    }
}
