// ==========================================
// 库存可视化看板 - 仓库数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::warehouse::Warehouse;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// WarehouseRepository - 仓库仓储
// ==========================================

/// 仓库仓储
/// 职责: 管理warehouse表的读取与种子写入
pub struct WarehouseRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WarehouseRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &rusqlite::Row) -> SqliteResult<Warehouse> {
        Ok(Warehouse {
            code: row.get(0)?,
            name: row.get(1)?,
            city: row.get(2)?,
            country: row.get(3)?,
        })
    }

    /// 查询全部仓库（按代码排序，保证顺序稳定）
    pub fn list_all(&self) -> RepositoryResult<Vec<Warehouse>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT code, name, city, country
            FROM warehouse
            ORDER BY code ASC
            "#,
        )?;

        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<Warehouse>>>()?;

        Ok(rows)
    }

    /// 插入或更新仓库（种子/导入使用）
    pub fn upsert(&self, warehouse: &Warehouse) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO warehouse (code, name, city, country)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(code) DO UPDATE SET
                name = excluded.name,
                city = excluded.city,
                country = excluded.country
            "#,
            params![warehouse.code, warehouse.name, warehouse.city, warehouse.country],
        )?;
        Ok(())
    }
}
