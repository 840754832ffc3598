// ==========================================
// 库存可视化看板 - KPI 快照仓储
// ==========================================
// 职责: 管理kpi_snapshot表（按日期唯一，只追加/覆盖）
// ==========================================

use crate::domain::kpi::KpiSnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// KpiSnapshotRepository - KPI 快照仓储
// ==========================================
pub struct KpiSnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl KpiSnapshotRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &rusqlite::Row) -> SqliteResult<KpiSnapshot> {
        Ok(KpiSnapshot {
            date: row.get(0)?,
            stock: row.get(1)?,
            demand: row.get(2)?,
        })
    }

    /// 插入或覆盖某日快照
    pub fn upsert(&self, snapshot: &KpiSnapshot) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO kpi_snapshot (snapshot_date, stock, demand)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(snapshot_date) DO UPDATE SET
                stock = excluded.stock,
                demand = excluded.demand
            "#,
            params![snapshot.date, snapshot.stock, snapshot.demand],
        )?;
        Ok(())
    }

    /// 查询起始日期（含）之后的快照，按日期降序
    ///
    /// # 参数
    /// - since: 起始日期；None 表示不设下限
    pub fn find_since(&self, since: Option<NaiveDate>) -> RepositoryResult<Vec<KpiSnapshot>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT snapshot_date, stock, demand
            FROM kpi_snapshot
            WHERE (?1 IS NULL OR snapshot_date >= ?1)
            ORDER BY snapshot_date DESC
            "#,
        )?;

        let rows = stmt
            .query_map(params![since], Self::map_row)?
            .collect::<SqliteResult<Vec<KpiSnapshot>>>()?;

        Ok(rows)
    }

    /// 快照总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM kpi_snapshot", [], |row| row.get(0))?;
        Ok(n)
    }
}
