// ==========================================
// 库存可视化看板 - 命令行入口
// ==========================================
// 用法: supply-sight [RANGE]
// 打开默认数据库，输出一屏看板数据（JSON）
// ==========================================

use anyhow::{anyhow, Result};

use supply_sight::app::{get_default_db_path, AppState};

fn main() -> Result<()> {
    supply_sight::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 系统版本: {}", supply_sight::APP_NAME, supply_sight::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;

    let mut session = state.dashboard_session();
    if let Some(range) = std::env::args().nth(1) {
        session.set_range(&range);
    }

    let view = session.load()?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
