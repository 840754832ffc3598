// ==========================================
// 库存可视化看板 - 库存状态判定
// ==========================================
// 规则: stock > demand → Healthy
//       stock == demand → Low
//       stock <  demand → Critical
// 服务端与前端共用同一规则，纯函数，无错误分支
// ==========================================

use crate::domain::types::StockStatus;
use std::cmp::Ordering;

/// 判定库存状态
///
/// # 参数
/// - stock: 库存量（调用方保证 >= 0）
/// - demand: 需求量（调用方保证 >= 0）
pub fn classify(stock: i64, demand: i64) -> StockStatus {
    match stock.cmp(&demand) {
        Ordering::Greater => StockStatus::Healthy,
        Ordering::Equal => StockStatus::Low,
        Ordering::Less => StockStatus::Critical,
    }
}
