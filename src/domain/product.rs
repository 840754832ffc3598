// ==========================================
// 库存可视化看板 - 产品领域模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 产品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,   // 产品ID（唯一）
    pub name: String, // 产品名称
    pub sku: String,  // SKU
}

impl Product {
    pub fn new(id: &str, name: &str, sku: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sku: sku.to_string(),
        }
    }

    /// 名称/SKU/ID 是否包含关键字
    ///
    /// 调用方负责传入已 trim + 小写化的关键字
    pub fn matches_search(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
            || self.sku.to_lowercase().contains(needle_lower)
            || self.id.to_lowercase().contains(needle_lower)
    }
}
