// ==========================================
// 连铸方坯质量记录系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 覆盖: 连接锁、事务、约束、行解析、其余 SQL 错误
// ==========================================

use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    /// NOT NULL 等约束失败；整批写入已回滚
    #[error("数据约束失败: {0}")]
    ConstraintViolation(String),

    /// 表中存量数据无法还原为记录（如未知的判定状态）
    #[error("记录字段解析失败 (column={column}): {message}")]
    RowDecodeError { column: usize, message: String },

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref e, ref msg)
                if e.code == ErrorCode::ConstraintViolation =>
            {
                let message = msg.clone().unwrap_or_else(|| e.to_string());
                RepositoryError::ConstraintViolation(message)
            }
            rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
                RepositoryError::RowDecodeError {
                    column,
                    message: source.to_string(),
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
