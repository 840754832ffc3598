// ==========================================
// 库存可视化看板 - 详情抽屉表单校验
// ==========================================
// 表单校验在提交前完成，错误消息已本地化
// 服务端仍会再次校验
// ==========================================

use crate::api::{ProductRecord, WarehouseRecord};
use crate::i18n::t;

/// 已校验的调拨输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferInput {
    pub to_warehouse: String,
    pub qty: i64,
}

/// 解析需求量输入（非负整数）
pub fn parse_demand_input(input: &str) -> Result<i64, String> {
    match input.trim().parse::<i64>() {
        Ok(n) if n >= 0 => Ok(n),
        _ => Err(t("form.demand_invalid")),
    }
}

/// 校验调拨表单
///
/// # 参数
/// - row: 当前选中行（源仓即该行仓库）
/// - to_warehouse: 目标仓（空串表示未选择）
/// - qty_input: 数量输入
pub fn validate_transfer_input(
    row: &ProductRecord,
    to_warehouse: &str,
    qty_input: &str,
) -> Result<TransferInput, String> {
    let to = to_warehouse.trim();
    if to.is_empty() {
        return Err(t("form.destination_required"));
    }
    if to == row.warehouse {
        return Err(t("form.destination_same"));
    }

    match qty_input.trim().parse::<i64>() {
        Ok(qty) if qty > 0 => Ok(TransferInput {
            to_warehouse: to.to_string(),
            qty,
        }),
        _ => Err(t("form.qty_invalid")),
    }
}

/// 目标仓候选（排除当前行所在仓库）
pub fn destination_options<'a>(
    warehouses: &'a [WarehouseRecord],
    row: &ProductRecord,
) -> Vec<&'a WarehouseRecord> {
    warehouses.iter().filter(|w| w.code != row.warehouse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_locale;
    use crate::i18n::test_support::LOCALE_TEST_LOCK;

    fn selected() -> ProductRecord {
        ProductRecord {
            id: "P-1004".to_string(),
            name: "Bearing 608ZZ".to_string(),
            sku: "BRG-608-50".to_string(),
            warehouse: "DEL-B".to_string(),
            stock: 24,
            demand: 120,
        }
    }

    #[test]
    fn test_parse_demand_input() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        assert_eq!(parse_demand_input(" 150 "), Ok(150));
        assert_eq!(parse_demand_input("0"), Ok(0));
        assert_eq!(
            parse_demand_input("-1"),
            Err("Demand must be a non-negative integer".to_string())
        );
        assert!(parse_demand_input("abc").is_err());

        set_locale("zh-CN");
    }

    #[test]
    fn test_validate_transfer_input() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let row = selected();

        assert_eq!(
            validate_transfer_input(&row, "PNQ-C", "10"),
            Ok(TransferInput {
                to_warehouse: "PNQ-C".to_string(),
                qty: 10
            })
        );
        assert_eq!(
            validate_transfer_input(&row, "", "10"),
            Err("请选择目标仓库".to_string())
        );
        assert_eq!(
            validate_transfer_input(&row, "DEL-B", "10"),
            Err("目标仓库不能与当前仓库相同".to_string())
        );
        assert!(validate_transfer_input(&row, "PNQ-C", "0").is_err());
        assert!(validate_transfer_input(&row, "PNQ-C", "1.5").is_err());
    }

    #[test]
    fn test_destination_options_exclude_current() {
        let warehouses: Vec<WarehouseRecord> = ["BLR-A", "DEL-B", "PNQ-C"]
            .iter()
            .map(|code| WarehouseRecord {
                code: code.to_string(),
                name: code.to_string(),
                city: String::new(),
                country: "IN".to_string(),
            })
            .collect();

        let codes: Vec<&str> = destination_options(&warehouses, &selected())
            .into_iter()
            .map(|w| w.code.as_str())
            .collect();
        assert_eq!(codes, vec!["BLR-A", "PNQ-C"]);
    }
}
