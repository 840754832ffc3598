// ==========================================
// 看板会话集成测试
// ==========================================
// 覆盖: 缓存命中/失效、分页、汇总、变更后的会话状态
// ==========================================

mod helpers;

use helpers::api_test_helper::*;
use supply_sight::api::ApiErrorKind;
use supply_sight::app::{ProductFilter, QueryKey};
use supply_sight::config::config_keys;

fn select_row(session: &mut supply_sight::app::DashboardSession, id: &str) {
    let row = session
        .load_products()
        .unwrap()
        .into_iter()
        .find(|r| r.id == id)
        .expect("行存在");
    session.select(row);
}

#[test]
fn test_load_dashboard_totals() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    let mut session = env.session();

    let view = session.load().unwrap();
    assert_eq!(view.range, "30d");
    assert_eq!(view.warehouses.len(), 3);
    assert_eq!(view.total_rows, 4);
    assert_eq!(view.page, 1);
    assert_eq!(view.page_count, 1);
    assert_eq!(view.totals.total_stock, 334);
    assert_eq!(view.totals.total_demand, 400);
    assert_eq!(view.totals.fill_rate, 69);
}

#[test]
fn test_repeated_loads_hit_cache() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    let mut session = env.session();

    session.load().unwrap();
    assert_eq!(session.cache().misses(), 3);

    session.load().unwrap();
    assert_eq!(session.cache().misses(), 3);
    assert_eq!(session.cache().hits(), 3);

    session.set_filter(ProductFilter::new("nut", "", ""));
    let view = session.load().unwrap();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(session.cache().misses(), 4);
    assert!(session.cache().contains(&QueryKey::from(session.filter())));
}

#[test]
fn test_successful_transfer_invalidates_cache_and_closes_drawer() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    let mut session = env.session();
    session.load().unwrap();

    select_row(&mut session, "P-1004");
    let record = session.submit_transfer("PNQ-C", "10").unwrap();
    assert_eq!(record.stock, 10);

    assert!(session.selected().is_none());
    assert!(session.cache().is_empty());
    assert!(session.notice().is_some());

    // 重新加载看到新数据
    let view = session.load().unwrap();
    assert_eq!(view.total_rows, 5);
    assert_eq!(view.rows[0].warehouse, "PNQ-C");
}

#[test]
fn test_failed_transfer_keeps_selection() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    let mut session = env.session();
    session.load().unwrap();
    let cached = session.cache().len();

    select_row(&mut session, "P-1004");
    let err = session.submit_transfer("PNQ-C", "999").unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::InsufficientStock);

    assert_eq!(session.selected().map(|r| r.id.as_str()), Some("P-1004"));
    assert_eq!(session.cache().len(), cached);

    // 表单校验失败同样保留选中行
    let err = session.submit_transfer("DEL-B", "5").unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Validation);
    assert!(session.selected().is_some());
}

#[test]
fn test_submit_demand() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    let mut session = env.session();

    // 未选中行
    let err = session.submit_demand("10").unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Validation);

    select_row(&mut session, "P-1002");
    let err = session.submit_demand("-5").unwrap_err();
    assert_eq!(err.kind(), ApiErrorKind::Validation);

    let record = session.submit_demand(" 40 ").unwrap();
    assert_eq!(record.demand, 40);
    assert_eq!(record.stock, 50);
    assert!(session.selected().is_none());
}

#[test]
fn test_pagination_and_filter_reset() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    env.insert_bulk_rows(21);
    let mut session = env.session();

    let view = session.load().unwrap();
    assert_eq!(view.total_rows, 25);
    assert_eq!(view.page_count, 3);
    assert_eq!(view.rows.len(), 10);

    session.last_page().unwrap();
    let view = session.load().unwrap();
    assert_eq!(view.page, 3);
    assert_eq!(view.row_offset, 20);
    assert_eq!(view.rows.len(), 5);

    session.next_page().unwrap();
    assert_eq!(session.load().unwrap().page, 3);

    session.prev_page().unwrap();
    assert_eq!(session.load().unwrap().page, 2);

    // 过滤条件变化回到第一页
    session.set_filter(ProductFilter::new("", "BLR-A", ""));
    let view = session.load().unwrap();
    assert_eq!(view.page, 1);
    assert_eq!(view.total_rows, 23);
}

#[test]
fn test_page_size_from_config() {
    let env = ApiTestEnv::with_reference_data().unwrap();
    env.config_manager
        .set_global_config_value(config_keys::PRODUCTS_PAGE_SIZE, "3")
        .unwrap();

    let mut session = env.session();
    let view = session.load().unwrap();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(view.page_count, 2);
}

#[test]
fn test_totals_fall_back_to_latest_kpi() {
    let env = ApiTestEnv::new().unwrap();
    let today = chrono::Local::now().date_naive();
    let yesterday = today.pred_opt().unwrap();
    env.insert_kpi(&yesterday.format("%Y-%m-%d").to_string(), 300, 400);
    env.insert_kpi(&today.format("%Y-%m-%d").to_string(), 330, 400);

    let mut session = env.session();
    let view = session.load().unwrap();

    assert_eq!(view.total_rows, 0);
    let as_of = view.as_of.expect("最近一天 KPI");
    assert_eq!(as_of.date, today.format("%Y-%m-%d").to_string());
    assert_eq!(view.totals.total_stock, 330);
    assert_eq!(view.totals.fill_rate, 83);
}
