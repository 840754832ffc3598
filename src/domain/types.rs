// ==========================================
// 库存可视化看板 - 领域类型定义
// ==========================================
// 库存状态: 由 (stock, demand) 比较派生，不落库
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 库存状态 (Stock Status)
// ==========================================
// 规则: stock > demand → Healthy; stock == demand → Low; stock < demand → Critical
// 序列化格式: 与前端标签一致 (Healthy / Low / Critical)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    Critical, // 缺货风险
    Low,      // 刚好满足
    Healthy,  // 充足
}

impl StockStatus {
    /// 全部状态（按严重程度从高到低）
    pub const ALL: [StockStatus; 3] = [StockStatus::Critical, StockStatus::Low, StockStatus::Healthy];

    /// 标签文本
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Healthy => "Healthy",
            StockStatus::Low => "Low",
            StockStatus::Critical => "Critical",
        }
    }

    /// 标签是否与给定文本相同（忽略大小写）
    pub fn matches_label(&self, label: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(label)
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StockStatus::ALL
            .into_iter()
            .find(|status| status.matches_label(s))
            .ok_or_else(|| format!("未知库存状态: {}", s))
    }
}

// ==========================================
// 调拨目标行需求量策略 (Destination Demand Policy)
// ==========================================
// 目标仓首次出现该产品时新建库存行，需求量的初始化方式
// 默认 COPY_SOURCE（沿用源仓需求量）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DestDemandPolicy {
    #[default]
    CopySource, // 复制源行需求量
    Zero,       // 需求量置 0
}

impl DestDemandPolicy {
    /// 计算新建目标行的初始需求量
    pub fn initial_demand(&self, source_demand: i64) -> i64 {
        match self {
            DestDemandPolicy::CopySource => source_demand,
            DestDemandPolicy::Zero => 0,
        }
    }
}

impl fmt::Display for DestDemandPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestDemandPolicy::CopySource => write!(f, "COPY_SOURCE"),
            DestDemandPolicy::Zero => write!(f, "ZERO"),
        }
    }
}

impl FromStr for DestDemandPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COPY_SOURCE" => Ok(DestDemandPolicy::CopySource),
            "ZERO" => Ok(DestDemandPolicy::Zero),
            other => Err(format!("未知需求量策略: {}", other)),
        }
    }
}
