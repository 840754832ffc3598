// ==========================================
// 库存可视化看板 - KPI 快照领域模型
// ==========================================
// 每个自然日一条，记录当日库存/需求汇总
// 只追加/覆盖，调拨与需求更新不读取它
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// KPI 日快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    pub date: NaiveDate, // 快照日期
    pub stock: i64,      // 当日库存汇总
    pub demand: i64,     // 当日需求汇总
}
