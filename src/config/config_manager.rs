// ==========================================
// 库存可视化看板 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)，当前只使用 global scope
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::DestDemandPolicy;
use crate::engine::kpi_range::DEFAULT_RANGE_DAYS;
use rusqlite::{params, Connection};
use serde_json::json;
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 默认每页行数
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 的配置值
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// 获取所有配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> Result<String, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt = conn.prepare(
            "SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key"
        )?;

        let mut config_map: HashMap<String, String> = HashMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
            ))
        })?;

        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        let json_value = json!(config_map);
        Ok(serde_json::to_string(&json_value)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// - Ok(usize): 回写的配置条数
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> Result<usize, Box<dyn Error>> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let tx = conn.transaction()?;

        let mut count = 0;
        for (key, value) in config_map.iter() {
            let affected = tx.execute(
                "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
                 ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2",
                params![key, value],
            )?;
            count += affected;
        }

        tx.commit()?;
        Ok(count)
    }

    // ===== 看板配置 =====

    /// KPI 范围不合法时使用的默认天数（默认 30）
    pub fn get_kpi_default_range_days(&self) -> Result<i64, Box<dyn Error>> {
        let default = DEFAULT_RANGE_DAYS.to_string();
        let value = self.get_config_or_default(config_keys::KPI_DEFAULT_RANGE_DAYS, &default)?;
        match value.trim().parse::<i64>() {
            Ok(days) if days > 0 => Ok(days),
            _ => {
                tracing::warn!(
                    config_key = config_keys::KPI_DEFAULT_RANGE_DAYS,
                    raw_value = %value,
                    "KPI 默认天数配置不合法，使用默认值"
                );
                Ok(DEFAULT_RANGE_DAYS)
            }
        }
    }

    /// 产品列表每页行数（默认 10）
    pub fn get_products_page_size(&self) -> Result<usize, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::PRODUCTS_PAGE_SIZE,
            &DEFAULT_PAGE_SIZE.to_string(),
        )?;
        Ok(value
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE))
    }

    /// 调拨新建目标行的需求量策略（默认 COPY_SOURCE）
    pub fn get_dest_demand_policy(&self) -> Result<DestDemandPolicy, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::TRANSFER_DEST_DEMAND_POLICY, "COPY_SOURCE")?;
        Ok(value.parse::<DestDemandPolicy>().unwrap_or_else(|e| {
            tracing::warn!(
                config_key = config_keys::TRANSFER_DEST_DEMAND_POLICY,
                raw_value = %value,
                "{}，使用 COPY_SOURCE",
                e
            );
            DestDemandPolicy::CopySource
        }))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // KPI 趋势
    pub const KPI_DEFAULT_RANGE_DAYS: &str = "kpi_default_range_days";

    // 产品列表
    pub const PRODUCTS_PAGE_SIZE: &str = "products_page_size";

    // 调拨
    pub const TRANSFER_DEST_DEMAND_POLICY: &str = "transfer_dest_demand_policy";
}
