// ==========================================
// 库存可视化看板 - 库存数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑（调拨规则在 engine::transfer）
// 约束: 所有查询使用参数化
// 事务: 调拨走 BEGIN IMMEDIATE，开启即持有写锁，
//       并发调拨在 busy_timeout 内排队，不会同时通过库存校验
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::inventory::{Inventory, InventoryView};
use crate::domain::product::Product;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, TransactionBehavior};
use std::sync::{Arc, Mutex};

const VIEW_COLUMNS: &str = r#"
    i.product_id, i.warehouse_code, i.stock, i.demand, i.updated_at,
    p.id, p.name, p.sku
"#;

/// 映射联表行到 InventoryView
fn map_view_row(row: &rusqlite::Row) -> SqliteResult<InventoryView> {
    Ok(InventoryView {
        inventory: Inventory {
            product_id: row.get(0)?,
            warehouse_code: row.get(1)?,
            stock: row.get(2)?,
            demand: row.get(3)?,
            updated_at: row.get(4)?,
        },
        product: Product {
            id: row.get(5)?,
            name: row.get(6)?,
            sku: row.get(7)?,
        },
    })
}

fn query_view(
    conn: &Connection,
    product_id: &str,
    warehouse_code: &str,
) -> RepositoryResult<Option<InventoryView>> {
    let sql = format!(
        "SELECT {} FROM inventory i JOIN product p ON p.id = i.product_id
         WHERE i.product_id = ?1 AND i.warehouse_code = ?2",
        VIEW_COLUMNS
    );
    let view = conn
        .query_row(&sql, params![product_id, warehouse_code], map_view_row)
        .optional()?;
    Ok(view)
}

// ==========================================
// InventoryRepository - 库存仓储
// ==========================================

/// 库存仓储
/// 职责: 管理inventory表的查询、需求更新、调拨事务
pub struct InventoryRepository {
    conn: Arc<Mutex<Connection>>,
}

impl InventoryRepository {
    /// 创建新的库存仓储实例（独立连接）
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

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

    /// 查询库存行（联表产品），按最近更新降序
    ///
    /// # 参数
    /// - warehouse_code: 仓库代码精确过滤（None 表示全部仓库）
    ///
    /// # 返回
    /// - Ok(Vec<InventoryView>): 同一 updated_at 时新插入的行在前
    pub fn list_views(&self, warehouse_code: Option<&str>) -> RepositoryResult<Vec<InventoryView>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM inventory i
            JOIN product p ON p.id = i.product_id
            WHERE (?1 IS NULL OR i.warehouse_code = ?1)
            ORDER BY i.updated_at DESC, i.id DESC
            "#,
            VIEW_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt
            .query_map(params![warehouse_code], map_view_row)?
            .collect::<SqliteResult<Vec<InventoryView>>>()?;

        Ok(rows)
    }

    /// 按 (产品, 仓库) 查询库存行（联表产品）
    pub fn find_view(
        &self,
        product_id: &str,
        warehouse_code: &str,
    ) -> RepositoryResult<Option<InventoryView>> {
        let conn = self.get_conn()?;
        query_view(&conn, product_id, warehouse_code)
    }

    /// 插入或覆盖库存行（种子/导入使用）
    pub fn upsert(&self, row: &Inventory) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO inventory (product_id, warehouse_code, stock, demand, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(product_id, warehouse_code) DO UPDATE SET
                stock = excluded.stock,
                demand = excluded.demand,
                updated_at = excluded.updated_at
            "#,
            params![
                row.product_id,
                row.warehouse_code,
                row.stock,
                row.demand,
                row.updated_at,
            ],
        )?;
        Ok(())
    }

    /// 更新单行需求量（库存不变）
    ///
    /// # 返回
    /// - Ok(usize): 受影响行数（0 表示该行不存在）
    pub fn update_demand(
        &self,
        product_id: &str,
        warehouse_code: &str,
        demand: i64,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE inventory
            SET demand = ?3, updated_at = ?4
            WHERE product_id = ?1 AND warehouse_code = ?2
            "#,
            params![product_id, warehouse_code, demand, updated_at],
        )?;
        Ok(affected)
    }

    /// 全部库存行的库存/需求汇总
    ///
    /// # 返回
    /// - (Σstock, Σdemand)
    pub fn aggregate_totals(&self) -> RepositoryResult<(i64, i64)> {
        let conn = self.get_conn()?;
        let totals = conn.query_row(
            "SELECT COALESCE(SUM(stock), 0), COALESCE(SUM(demand), 0) FROM inventory",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;
        Ok(totals)
    }

    /// 在单个 IMMEDIATE 事务中执行操作
    ///
    /// - 闭包返回 Ok: 提交
    /// - 闭包返回 Err: 事务随 drop 回滚，所有写入撤销
    pub fn in_transaction<T, F>(&self, f: F) -> RepositoryResult<T>
    where
        F: FnOnce(&InventoryTx<'_>) -> RepositoryResult<T>,
    {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| RepositoryError::DatabaseTransactionError(format!("开启事务失败: {}", e)))?;

        let result = f(&InventoryTx { conn: &*tx })?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(format!("提交事务失败: {}", e)))?;
        Ok(result)
    }
}

// ==========================================
// InventoryTx - 事务内操作句柄
// ==========================================

/// 事务内的库存读写
///
/// 只能在 `InventoryRepository::in_transaction` 闭包内获得
pub struct InventoryTx<'t> {
    conn: &'t Connection,
}

impl<'t> InventoryTx<'t> {
    /// 按 (产品, 仓库) 读取库存行
    pub fn find_view(
        &self,
        product_id: &str,
        warehouse_code: &str,
    ) -> RepositoryResult<Option<InventoryView>> {
        query_view(self.conn, product_id, warehouse_code)
    }

    /// 仓库是否存在
    pub fn warehouse_exists(&self, warehouse_code: &str) -> RepositoryResult<bool> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM warehouse WHERE code = ?1",
                params![warehouse_code],
                |_row| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    /// 新建库存行
    pub fn insert_row(
        &self,
        product_id: &str,
        warehouse_code: &str,
        stock: i64,
        demand: i64,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO inventory (product_id, warehouse_code, stock, demand, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![product_id, warehouse_code, stock, demand, updated_at],
        )?;
        Ok(())
    }

    /// 写回库存量
    pub fn set_stock(
        &self,
        product_id: &str,
        warehouse_code: &str,
        stock: i64,
        updated_at: NaiveDateTime,
    ) -> RepositoryResult<()> {
        let affected = self.conn.execute(
            r#"
            UPDATE inventory
            SET stock = ?3, updated_at = ?4
            WHERE product_id = ?1 AND warehouse_code = ?2
            "#,
            params![product_id, warehouse_code, stock, updated_at],
        )?;
        if affected == 0 {
            return Err(RepositoryError::inventory_not_found(product_id, warehouse_code));
        }
        Ok(())
    }
}
