// ==========================================
// 库存可视化看板 - 界面文案
// ==========================================
// 文案表: locales/zh-CN.yml（默认）与 locales/en.yml
// 覆盖: 库存状态标签 / 表单校验提示 / 操作结果通知
// 宏初始化见 lib.rs
// ==========================================

use crate::api::{ApiError, ProductRecord};
use crate::domain::types::StockStatus;

/// 可切换的界面语言
pub const SUPPORTED_LOCALES: [&str; 2] = ["zh-CN", "en"];

pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 切换界面语言
///
/// # 返回
/// - true: 已切换
/// - false: 不支持的语言，保持当前语言
pub fn set_locale(locale: &str) -> bool {
    if !SUPPORTED_LOCALES.contains(&locale) {
        tracing::warn!(locale, current = %current_locale(), "不支持的界面语言，忽略");
        return false;
    }
    rust_i18n::set_locale(locale);
    true
}

/// 按 key 取文案
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 取文案并替换 `%{name}` 占位符
fn fill(key: &str, args: &[(&str, &str)]) -> String {
    args.iter().fold(t(key), |text, (name, value)| {
        text.replace(&format!("%{{{}}}", name), value)
    })
}

/// 库存状态标签（"Critical" → "紧缺"）
pub fn status_label(status: StockStatus) -> String {
    t(&format!("status.{}", status.as_str()))
}

// ==========================================
// 操作结果通知
// ==========================================

/// 需求量已更新
pub fn demand_updated_notice(record: &ProductRecord) -> String {
    let demand = record.demand.to_string();
    fill(
        "toast.demand_updated",
        &[
            ("id", record.id.as_str()),
            ("warehouse", record.warehouse.as_str()),
            ("demand", demand.as_str()),
        ],
    )
}

/// 调拨完成
pub fn transfer_done_notice(qty: i64, from_warehouse: &str, to_warehouse: &str) -> String {
    let qty = qty.to_string();
    fill(
        "toast.transfer_done",
        &[("qty", qty.as_str()), ("from", from_warehouse), ("to", to_warehouse)],
    )
}

/// 操作失败（附错误原因）
pub fn action_failed_notice(err: &ApiError) -> String {
    let reason = err.to_string();
    fill("toast.action_failed", &[("reason", reason.as_str())])
}


#[cfg(test)]
mod tests {
    use super::test_support::LOCALE_TEST_LOCK;
    use super::*;

    fn record() -> ProductRecord {
        ProductRecord {
            id: "P-1001".to_string(),
            name: "12mm Hex Bolt".to_string(),
            sku: "HEX-12-100".to_string(),
            warehouse: "BLR-A".to_string(),
            stock: 180,
            demand: 150,
        }
    }

    #[test]
    fn test_unsupported_locale_is_ignored() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        assert!(set_locale("en"));
        assert!(!set_locale("fr"));
        assert_eq!(current_locale(), "en");

        assert!(set_locale("zh-CN"));
        assert_eq!(current_locale(), "zh-CN");
    }

    #[test]
    fn test_notices() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(
            transfer_done_notice(10, "DEL-B", "PNQ-C"),
            "Moved 10 units from DEL-B to PNQ-C"
        );
        assert_eq!(
            demand_updated_notice(&record()),
            "Demand for P-1001 at BLR-A set to 150"
        );

        set_locale("zh-CN");
        let msg = action_failed_notice(&ApiError::ValidationError("库存不足".to_string()));
        assert!(msg.contains("库存不足"));
        assert!(!msg.contains("%{reason}"));
    }

    #[test]
    fn test_status_label() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(status_label(StockStatus::Critical), "紧缺");

        set_locale("en");
        assert_eq!(status_label(StockStatus::Low), "Low");

        set_locale("zh-CN");
    }
}
