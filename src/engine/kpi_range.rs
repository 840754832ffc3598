// ==========================================
// 库存可视化看板 - KPI 时间范围解析
// ==========================================
// 输入格式: "<整数>d"，如 "7d" / "30d" / "90d"
// 不匹配时静默回退到默认天数（不报错）
// ==========================================

use chrono::{Duration, NaiveDate};

/// 默认回看天数
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// 解析范围字符串为天数
///
/// # 参数
/// - range: 范围字符串
/// - default_days: 不匹配时使用的天数
pub fn parse_range_days(range: &str, default_days: i64) -> i64 {
    let Some(digits) = range.strip_suffix('d') else {
        return default_days;
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return default_days;
    }
    // 超出 i64 的天数视为“全部历史”
    digits.parse::<i64>().unwrap_or(i64::MAX)
}

/// 计算起始日期: since = today - (days - 1)
///
/// 返回 None 表示超出日历范围（即不设下限）
pub fn since_date(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    let back = days.checked_sub(1)?;
    let offset = Duration::try_days(back)?;
    today.checked_sub_signed(offset)
}
