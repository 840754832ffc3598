// ==========================================
// 库存可视化看板 - 演示库种子程序
// ==========================================
// 用法: seed_demo_db [DB_PATH] [--reset]
// --reset: 先备份并删除已有库文件，再建表写入
// ==========================================

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Local;

use supply_sight::app::{get_default_db_path, AppState};
use supply_sight::seed::seed_demo_data;

fn main() -> Result<()> {
    supply_sight::logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let reset = args.iter().any(|a| a == "--reset");
    let db_path = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(get_default_db_path);

    if reset {
        backup_and_reset_db(&db_path)?;
    }

    let state = AppState::new(db_path.clone()).map_err(|e| anyhow!(e))?;
    let summary = seed_demo_data(&state, Local::now().date_naive())
        .with_context(|| format!("写入演示数据失败: {}", db_path))?;

    println!(
        "Seeded {}: warehouses={} products={} inventory={} kpi_snapshots={}",
        db_path, summary.warehouses, summary.products, summary.inventory_rows, summary.kpi_snapshots
    );
    Ok(())
}

fn backup_and_reset_db(db_path: &str) -> Result<()> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path).with_context(|| format!("备份失败: {}", backup_path))?;
    fs::remove_file(path).with_context(|| format!("删除旧库失败: {}", db_path))?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}
