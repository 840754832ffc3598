// ==========================================
// 库存可视化看板 - SQL 性能观测
// ==========================================
// 依赖 rusqlite `trace` 特性: 统计语句数并记录慢 SQL
// 环境变量:
// - SUPPLY_SIGHT_PERF_SQL=1      开启（Debug 默认开启，Release 默认关闭）
// - SUPPLY_SIGHT_SLOW_SQL_MS=50  慢 SQL 阈值（毫秒）
// ==========================================

use rusqlite::Connection;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const ENV_PERF_SQL: &str = "SUPPLY_SIGHT_PERF_SQL";
pub const ENV_SLOW_SQL_MS: &str = "SUPPLY_SIGHT_SLOW_SQL_MS";

static ENABLED: AtomicBool = AtomicBool::new(false);
static SLOW_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static GUARD_DEPTH: Cell<u32> = const { Cell::new(0) };
    static STATEMENTS: Cell<u64> = const { Cell::new(0) };
    static SLOW_STATEMENTS: Cell<u64> = const { Cell::new(0) };
}

/// SQL 观测开关
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlPerfSettings {
    pub enabled: bool,
    pub slow_ms: u64,
}

impl SqlPerfSettings {
    /// 从原始环境变量值解析
    pub fn parse(perf_sql: Option<&str>, slow_ms: Option<&str>) -> Self {
        let enabled = match perf_sql {
            Some(v) => is_truthy(v),
            None => cfg!(debug_assertions),
        };
        let slow_ms = slow_ms
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 });
        Self { enabled, slow_ms }
    }

    pub fn from_env() -> Self {
        let perf_sql = std::env::var(ENV_PERF_SQL).ok();
        let slow_ms = std::env::var(ENV_SLOW_SQL_MS).ok();
        Self::parse(perf_sql.as_deref(), slow_ms.as_deref())
    }
}

fn is_truthy(v: &str) -> bool {
    matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

fn shorten_sql(sql: &str, max_chars: usize) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}…", &flat[..idx]),
        None => flat,
    }
}

/// 在连接上安装 trace/profile 回调
pub fn install_sqlite_tracing(conn: &mut Connection, settings: SqlPerfSettings) {
    ENABLED.store(settings.enabled, Ordering::Relaxed);

    if !settings.enabled {
        conn.trace(None);
        conn.profile(None);
        return;
    }

    SLOW_THRESHOLD_MS.store(settings.slow_ms, Ordering::Relaxed);
    conn.trace(Some(on_statement));
    conn.profile(Some(on_profile));
    tracing::debug!(slow_ms = settings.slow_ms, "SQL 观测已开启");
}

fn on_statement(_sql: &str) {
    if !ENABLED.load(Ordering::Relaxed) || GUARD_DEPTH.with(|d| d.get()) == 0 {
        return;
    }
    STATEMENTS.with(|c| c.set(c.get().saturating_add(1)));
}

fn on_profile(sql: &str, duration: Duration) {
    if !ENABLED.load(Ordering::Relaxed) {
        return;
    }
    let ms = duration.as_millis() as u64;
    let threshold = SLOW_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold == 0 || ms < threshold {
        return;
    }

    tracing::warn!(target: "slow_sql", duration_ms = ms, sql = %shorten_sql(sql, 400), "slow sql");
    if GUARD_DEPTH.with(|d| d.get()) > 0 {
        SLOW_STATEMENTS.with(|c| c.set(c.get().saturating_add(1)));
    }
}

/// 操作级耗时统计: drop 时输出 elapsed_ms / sql_count / slow_sql_count
///
/// ```ignore
/// let _perf = supply_sight::perf::PerfGuard::new("list_products");
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    statements_at_start: u64,
    slow_at_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        GUARD_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        Self {
            op,
            start: Instant::now(),
            statements_at_start: STATEMENTS.with(|c| c.get()),
            slow_at_start: SLOW_STATEMENTS.with(|c| c.get()),
        }
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sql_count = STATEMENTS.with(|c| c.get()).saturating_sub(self.statements_at_start);
        let slow_sql_count = SLOW_STATEMENTS.with(|c| c.get()).saturating_sub(self.slow_at_start);

        tracing::debug!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            sql_count,
            slow_sql_count,
            "done"
        );

        GUARD_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
