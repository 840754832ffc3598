// ==========================================
// 变更 API 集成测试
// ==========================================
// 覆盖: 需求更新 / 调拨 / 原子性 / 往返 / 边界
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use supply_sight::api::ApiErrorKind;
use supply_sight::config::config_keys;
use supply_sight::domain::StockStatus;
use supply_sight::engine::TransferRequest;
use supply_sight::repository::RepositoryError;

// ==========================================
// 需求量更新
// ==========================================

#[test]
fn test_update_demand_keeps_stock() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    let record = env.mutation_api.update_demand("P-1001", "BLR-A", 200).unwrap();
    assert_eq!(record.stock, 180);
    assert_eq!(record.demand, 200);
    assert_eq!(record.status(), StockStatus::Critical);
    assert_eq!(env.row("P-1001", "BLR-A"), Some((180, 200)));

    // 刚更新的行排在最前
    let rows = env.query_api.list_products(None, None, None).unwrap();
    assert_eq!(rows[0].id, "P-1001");
}

#[test]
fn test_update_demand_below_stock_is_healthy() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    let record = env.mutation_api.update_demand("P-1001", "BLR-A", 150).unwrap();
    assert_eq!((record.stock, record.demand), (180, 150));
    assert_eq!(record.status(), StockStatus::Healthy);
    assert_eq!(env.row("P-1001", "BLR-A"), Some((180, 150)));
}

#[test]
fn test_update_demand_is_idempotent() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    let first = env.mutation_api.update_demand("P-1003", "PNQ-C", 60).unwrap();
    let second = env.mutation_api.update_demand("P-1003", "PNQ-C", 60).unwrap();

    assert_eq!(first, second);
    assert_eq!(second.status(), StockStatus::Healthy);
}

#[test]
fn test_update_demand_rejections() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    assert_error_kind(
        env.mutation_api.update_demand("P-1001", "BLR-A", -1),
        ApiErrorKind::Validation,
    );
    assert_error_kind(
        env.mutation_api.update_demand("", "BLR-A", 10),
        ApiErrorKind::Validation,
    );
    assert_error_kind(
        env.mutation_api.update_demand("P-1001", "DEL-B", 10),
        ApiErrorKind::NotFound,
    );

    assert_eq!(env.row("P-1001", "BLR-A"), Some((180, 120)));
}

// ==========================================
// 调拨
// ==========================================

#[test]
fn test_transfer_creates_destination_with_source_demand() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    let record = env.mutation_api.transfer_stock("P-1004", "DEL-B", "PNQ-C", 10).unwrap();
    assert_eq!(record.warehouse, "PNQ-C");
    assert_eq!(record.stock, 10);
    assert_eq!(record.demand, 120);

    assert_eq!(env.row("P-1004", "DEL-B"), Some((14, 120)));
    assert_eq!(env.row("P-1004", "PNQ-C"), Some((10, 120)));
    assert_eq!(env.total_stock_of("P-1004"), 24);

    // 新建行排在最前
    let rows = env.query_api.list_products(None, None, None).unwrap();
    assert_eq!((rows[0].id.as_str(), rows[0].warehouse.as_str()), ("P-1004", "PNQ-C"));
}

#[test]
fn test_transfer_with_zero_demand_policy() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    env.config_manager
        .set_global_config_value(config_keys::TRANSFER_DEST_DEMAND_POLICY, "ZERO")
        .unwrap();

    let record = env.mutation_api.transfer_stock("P-1004", "DEL-B", "BLR-A", 4).unwrap();
    assert_eq!(record.stock, 4);
    assert_eq!(record.demand, 0);
    assert_eq!(record.status(), StockStatus::Healthy);
}

#[test]
fn test_transfer_into_existing_row_adds_stock() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    env.mutation_api.transfer_stock("P-1001", "BLR-A", "PNQ-C", 30).unwrap();

    let record = env.mutation_api.transfer_stock("P-1001", "BLR-A", "PNQ-C", 20).unwrap();
    assert_eq!(record.stock, 50);
    assert_eq!(env.row("P-1001", "BLR-A"), Some((130, 120)));
}

#[test]
fn test_insufficient_stock_changes_nothing() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    let err = assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "DEL-B", "PNQ-C", 999),
        ApiErrorKind::InsufficientStock,
    );
    assert!(!err.is_retryable());

    assert_eq!(env.row("P-1004", "DEL-B"), Some((24, 120)));
    assert_eq!(env.row("P-1004", "PNQ-C"), None);
}

#[test]
fn test_transfer_validation() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "DEL-B", "PNQ-C", 0),
        ApiErrorKind::Validation,
    );
    assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "DEL-B", "PNQ-C", -3),
        ApiErrorKind::Validation,
    );
    assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "DEL-B", "DEL-B", 5),
        ApiErrorKind::Validation,
    );
    assert_eq!(env.row("P-1004", "DEL-B"), Some((24, 120)));
}

#[test]
fn test_transfer_not_found() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    // 源仓无此产品
    assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "BLR-A", "PNQ-C", 1),
        ApiErrorKind::NotFound,
    );

    // 目标仓不存在
    assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "DEL-B", "NOPE-Z", 1),
        ApiErrorKind::NotFound,
    );
    assert_eq!(env.row("P-1004", "DEL-B"), Some((24, 120)));
}

#[test]
fn test_transfer_rolls_back_on_checkpoint_failure() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    let request = TransferRequest::new("P-1004", "DEL-B", "PNQ-C", 10);

    let result = env.mutation_api.transfer_stock_with_checkpoint(&request, |tx| {
        // 源行已扣减，但尚未提交
        let source = tx.find_view("P-1004", "DEL-B")?.expect("源行存在");
        assert_eq!(source.inventory.stock, 14);
        Err(RepositoryError::DatabaseTransactionError("injected failure".to_string()))
    });

    let err = assert_error_kind(result, ApiErrorKind::Transaction);
    assert!(err.is_retryable());

    assert_eq!(env.row("P-1004", "DEL-B"), Some((24, 120)));
    assert_eq!(env.row("P-1004", "PNQ-C"), None);
    assert_eq!(env.total_stock_of("P-1004"), 24);
}

#[test]
fn test_round_trip_restores_stock() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    env.mutation_api.transfer_stock("P-1002", "BLR-A", "DEL-B", 20).unwrap();
    env.mutation_api.transfer_stock("P-1002", "DEL-B", "BLR-A", 20).unwrap();

    assert_eq!(env.row("P-1002", "BLR-A"), Some((50, 80)));
    // 往返后目标行保留，库存归零
    assert_eq!(env.row("P-1002", "DEL-B"), Some((0, 80)));
}

#[test]
fn test_round_trip_with_existing_destination() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    env.insert_row("P-1002", "DEL-B", 5, 30);

    let record = env.mutation_api.transfer_stock("P-1002", "BLR-A", "DEL-B", 20).unwrap();
    assert_eq!((record.stock, record.demand), (25, 30));

    env.mutation_api.transfer_stock("P-1002", "DEL-B", "BLR-A", 20).unwrap();

    assert_eq!(env.row("P-1002", "BLR-A"), Some((50, 80)));
    assert_eq!(env.row("P-1002", "DEL-B"), Some((5, 30)));
    assert_eq!(env.total_stock_of("P-1002"), 55);
}

#[test]
fn test_transfer_destination_overflow_is_rejected() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    env.insert_row("P-1004", "PNQ-C", i64::MAX, 0);

    let err = assert_error_kind(
        env.mutation_api.transfer_stock("P-1004", "DEL-B", "PNQ-C", 1),
        ApiErrorKind::Validation,
    );
    assert!(!err.is_retryable());

    assert_eq!(env.row("P-1004", "DEL-B"), Some((24, 120)));
    assert_eq!(env.row("P-1004", "PNQ-C"), Some((i64::MAX, 0)));

    // 共享连接仍可用
    let record = env.mutation_api.transfer_stock("P-1004", "DEL-B", "BLR-A", 4).unwrap();
    assert_eq!(record.stock, 4);
    assert_eq!(env.row("P-1004", "DEL-B"), Some((20, 120)));
    assert!(!env.query_api.list_products(None, None, None).unwrap().is_empty());
}

#[test]
fn test_transfer_entire_stock() {
    let env = ApiTestEnv::with_reference_data().unwrap();

    let record = env.mutation_api.transfer_stock("P-1003", "PNQ-C", "BLR-A", 80).unwrap();
    assert_eq!(record.stock, 80);

    // 源行保留，库存为 0
    assert_eq!(env.row("P-1003", "PNQ-C"), Some((0, 80)));
    let rows = env.query_api.list_products(Some("nut"), Some("PNQ-C"), None).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status(), StockStatus::Critical);
}
