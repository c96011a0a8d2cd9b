use crate::domain::strand_record::{NewStrandRecord, StrandRecord, TIMESTAMP_FORMAT};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::strand_record_store::{RecordFilter, RecordOrder, StrandRecordStore};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

// ==========================================
// SqliteStrandRecordRepository - 质量记录仓储
// ==========================================
// 红线: Repository 不做业务逻辑,只做数据映射
pub struct SqliteStrandRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStrandRecordRepository {
    /// 基于共享连接创建仓储
    ///
    /// 说明：调用方负责建表（见 `db::init_schema`）
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    pub(super) fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    // ==========================================
    // 写入操作
    // ==========================================

    /// 批量追加记录（单事务）
    pub fn insert_batch(&self, records: &[NewStrandRecord]) -> RepositoryResult<Vec<i64>> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let mut ids = Vec::with_capacity(records.len());
        for r in records {
            tx.execute(
                r#"
                INSERT INTO strand_record (
                    timestamp, date_only, time_only, shift, operator, inspector,
                    ccm, heat, grade, strand, rh, status, d1, d2,
                    billet_count, storage_loc, short_billet_length, sample_info
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
                params![
                    r.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    r.date_only(),
                    r.time_only(),
                    r.shift,
                    r.operator,
                    r.inspector,
                    r.ccm,
                    r.heat,
                    r.grade,
                    r.strand,
                    r.rh,
                    r.status.to_db_str(),
                    r.d1,
                    r.d2,
                    r.billet_count,
                    r.storage_loc,
                    r.short_billet_length,
                    r.sample_info,
                ],
            )?;
            ids.push(tx.last_insert_rowid());
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!(count = ids.len(), "strand_record 写入完成");
        Ok(ids)
    }
}

impl StrandRecordStore for SqliteStrandRecordRepository {
    fn append(&self, records: &[NewStrandRecord]) -> RepositoryResult<Vec<i64>> {
        self.insert_batch(records)
    }

    fn query_all(&self, order: RecordOrder) -> RepositoryResult<Vec<StrandRecord>> {
        self.find_all(order)
    }

    fn query_recent(&self, n: usize) -> RepositoryResult<Vec<StrandRecord>> {
        self.find_recent(n)
    }

    fn search(&self, filter: &RecordFilter) -> RepositoryResult<Vec<StrandRecord>> {
        self.find_by_filter(filter)
    }

    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<StrandRecord>> {
        self.find_one(id)
    }
}
