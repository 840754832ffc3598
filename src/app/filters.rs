// ==========================================
// 库存可视化看板 - 产品列表过滤条件
// ==========================================

/// 产品列表过滤条件
///
/// 空串统一归一化为 None；仅搜索词做 trim
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub warehouse: Option<String>,
    pub status: Option<String>,
}

fn normalize(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

impl ProductFilter {
    pub fn new(search: &str, warehouse: &str, status: &str) -> Self {
        Self {
            search: normalize(search.trim()),
            warehouse: normalize(warehouse),
            status: normalize(status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.warehouse.is_none() && self.status.is_none()
    }
}
