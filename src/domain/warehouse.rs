// ==========================================
// 库存可视化看板 - 仓库领域模型
// ==========================================
// 参考数据: 由种子/导入程序创建，核心逻辑不删除
// ==========================================

use serde::{Deserialize, Serialize};

/// 仓库
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub code: String,    // 仓库代码（唯一）
    pub name: String,    // 仓库名称
    pub city: String,    // 所在城市
    pub country: String, // 国家代码
}

impl Warehouse {
    pub fn new(code: &str, name: &str, city: &str, country: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            city: city.to_string(),
            country: country.to_string(),
        }
    }
}
