use super::core::SqliteStrandRecordRepository;
use crate::db::UNICODE_LOWER_FN;
use crate::domain::strand_record::{StrandRecord, TIMESTAMP_FORMAT};
use crate::domain::types::QualityStatus;
use crate::repository::error::RepositoryResult;
use crate::repository::strand_record_store::{RecordFilter, RecordOrder};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{params, Result as SqliteResult, Row};

const SELECT_COLUMNS: &str = r#"
    SELECT id, timestamp, date_only, time_only, shift, operator, inspector,
           ccm, heat, grade, strand, rh, status, d1, d2,
           billet_count, storage_loc, short_billet_length, sample_info
    FROM strand_record
"#;

/// 空串视为不限制
fn normalize_needle(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl SqliteStrandRecordRepository {
    // ==========================================
    // 查询操作
    // ==========================================

    /// 全表查询
    pub fn find_all(&self, order: RecordOrder) -> RepositoryResult<Vec<StrandRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} {}", SELECT_COLUMNS, order.sql());
        let mut stmt = conn.prepare(&sql)?;

        let records = stmt
            .query_map([], |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 最近 n 条（主键降序）
    pub fn find_recent(&self, n: usize) -> RepositoryResult<Vec<StrandRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} ORDER BY id DESC LIMIT ?", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let records = stmt
            .query_map(params![limit], |row| Self::map_row(row))?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 条件检索
    ///
    /// 说明：子串匹配，不区分大小写；大小写折叠由连接上注册的 unicode_lower() 完成
    pub fn find_by_filter(&self, filter: &RecordFilter) -> RepositoryResult<Vec<StrandRecord>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"{select}
            WHERE (?1 IS NULL OR instr({f}(heat), {f}(?1)) > 0)
              AND (?2 IS NULL OR instr({f}(storage_loc), {f}(?2)) > 0)
              AND (?3 IS NULL OR instr({f}(operator), {f}(?3)) > 0)
            ORDER BY id DESC
            "#,
            select = SELECT_COLUMNS,
            f = UNICODE_LOWER_FN
        );
        let mut stmt = conn.prepare(&sql)?;

        let records = stmt
            .query_map(
                params![
                    normalize_needle(&filter.heat_contains),
                    normalize_needle(&filter.storage_contains),
                    normalize_needle(&filter.operator_contains),
                ],
                |row| Self::map_row(row),
            )?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 按主键查询单条
    pub fn find_one(&self, id: i64) -> RepositoryResult<Option<StrandRecord>> {
        let conn = self.get_conn()?;
        let sql = format!("{} WHERE id = ?", SELECT_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;

        match stmt.query_row(params![id], |row| Self::map_row(row)) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    // ==========================================
    // 行映射
    // ==========================================

    fn map_row(row: &Row) -> SqliteResult<StrandRecord> {
        let ts_raw: String = row.get(1)?;
        let timestamp = NaiveDateTime::parse_from_str(&ts_raw, TIMESTAMP_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;

        let status_raw: String = row.get(12)?;
        let status = QualityStatus::from_db_str(&status_raw).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                12,
                Type::Text,
                format!("未知的判定状态: {}", status_raw).into(),
            )
        })?;

        Ok(StrandRecord {
            id: row.get(0)?,
            timestamp,
            date_only: row.get(2)?,
            time_only: row.get(3)?,
            shift: row.get(4)?,
            operator: row.get(5)?,
            inspector: row.get(6)?,
            ccm: row.get(7)?,
            heat: row.get(8)?,
            grade: row.get(9)?,
            strand: row.get(10)?,
            rh: row.get(11)?,
            status,
            d1: row.get(13)?,
            d2: row.get(14)?,
            billet_count: row.get(15)?,
            storage_loc: row.get(16)?,
            short_billet_length: row.get(17)?,
            sample_info: row.get(18)?,
        })
    }
}
