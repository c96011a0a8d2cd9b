// ==========================================
// 连铸方坯质量记录系统 - 质量记录仓储接口
// ==========================================
// 职责: 把判定/构建逻辑与存储技术解耦
// 红线: Repository 不含业务规则，只做数据 CRUD
// 约束: 只追加，不提供修改/删除
// ==========================================

use crate::domain::strand_record::{NewStrandRecord, StrandRecord};
use crate::repository::error::RepositoryResult;
use serde::{Deserialize, Serialize};

/// 全表查询排序方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordOrder {
    /// 录入顺序
    IdAsc,
    /// 最近在前
    #[default]
    IdDesc,
    /// 按采集时间倒序（同一时间按主键倒序）
    TimestampDesc,
}

impl RecordOrder {
    pub(crate) fn sql(&self) -> &'static str {
        match self {
            RecordOrder::IdAsc => "ORDER BY id ASC",
            RecordOrder::IdDesc => "ORDER BY id DESC",
            RecordOrder::TimestampDesc => "ORDER BY timestamp DESC, id DESC",
        }
    }
}

/// 检索条件
///
/// 各字段为子串匹配、不区分大小写；None 或空串表示不限制
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFilter {
    pub heat_contains: Option<String>,
    pub storage_contains: Option<String>,
    pub operator_contains: Option<String>,
}

impl RecordFilter {
    pub fn by_heat(heat: impl Into<String>) -> Self {
        Self {
            heat_contains: Some(heat.into()),
            ..Self::default()
        }
    }

    pub fn by_storage(storage: impl Into<String>) -> Self {
        Self {
            storage_contains: Some(storage.into()),
            ..Self::default()
        }
    }
}

// ==========================================
// StrandRecordStore Trait
// ==========================================
// 实现者: SqliteStrandRecordRepository（使用 rusqlite）
pub trait StrandRecordStore: Send + Sync {
    /// 追加一批记录（事务化，全部成功或全部回滚）
    ///
    /// # 返回
    /// - Ok(Vec<i64>): 新记录主键，顺序与输入一致
    fn append(&self, records: &[NewStrandRecord]) -> RepositoryResult<Vec<i64>>;

    /// 全表查询
    fn query_all(&self, order: RecordOrder) -> RepositoryResult<Vec<StrandRecord>>;

    /// 最近 n 条（主键降序）
    fn query_recent(&self, n: usize) -> RepositoryResult<Vec<StrandRecord>>;

    /// 条件检索（主键降序）；无匹配返回空列表
    fn search(&self, filter: &RecordFilter) -> RepositoryResult<Vec<StrandRecord>>;

    /// 按主键查询
    fn find_by_id(&self, id: i64) -> RepositoryResult<Option<StrandRecord>>;
}
