// ==========================================
// 连铸方坯质量记录系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少多实例同时写入时的偶发 busy 错误
// - 注册 unicode_lower()，检索时做完整的 Unicode 大小写折叠
// - 建表（幂等），不做自动迁移
// ==========================================
// 已知限制: 多个实例并发写同一文件时不做协调，仅依赖 SQLite 自身的文件锁
// ==========================================

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 检索用的小写函数名（内置 lower() 只处理 ASCII）
pub const UNICODE_LOWER_FN: &str = "unicode_lower";

/// 配置 SQLite 连接
///
/// 说明：busy_timeout 与自定义函数都需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    conn.create_scalar_function(
        UNICODE_LOWER_FN,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|s| s.to_lowercase()))
        },
    )?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表（幂等）
///
/// - strand_record: 只追加的质量记录表
/// - config_kv: 系统配置
/// - schema_version: 版本登记
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS strand_record (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            date_only TEXT NOT NULL,
            time_only TEXT NOT NULL,
            shift TEXT NOT NULL,
            operator TEXT NOT NULL,
            inspector TEXT NOT NULL,
            ccm TEXT NOT NULL,
            heat TEXT NOT NULL,
            grade TEXT NOT NULL,
            strand TEXT NOT NULL,
            rh REAL NOT NULL,
            status TEXT NOT NULL,
            d1 REAL NOT NULL,
            d2 REAL NOT NULL,
            billet_count INTEGER NOT NULL,
            storage_loc TEXT NOT NULL,
            short_billet_length REAL,
            sample_info TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_strand_record_heat ON strand_record(heat);

        CREATE TABLE IF NOT EXISTS config_kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> =
        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn test_unicode_lower_folds_non_ascii() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT unicode_lower('ÖDEME-Lager Ä')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, "ödeme-lager ä");

        // 内置 lower() 不处理非 ASCII
        let builtin: String = conn
            .query_row("SELECT lower('ÖDEME')", [], |row| row.get(0))
            .unwrap();
        assert_eq!(builtin, "Ödeme");

        let null: Option<String> = conn
            .query_row("SELECT unicode_lower(NULL)", [], |row| row.get(0))
            .unwrap();
        assert!(null.is_none());
    }
}
