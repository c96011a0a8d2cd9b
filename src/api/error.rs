// ==========================================
// 连铸方坯质量记录系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换Repository/导出错误为用户可读的错误消息
// ==========================================

use crate::export::error::ExportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 访问控制错误
    // ==========================================
    #[error("未登录，请先输入访问口令")]
    NotAuthenticated,

    #[error("访问口令错误")]
    InvalidCredentials,

    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 导出错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportError(#[from] ExportError),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::ConstraintViolation(msg) => {
                ApiError::DatabaseError(format!("数据约束失败，本批未写入: {}", msg))
            }
            RepositoryError::RowDecodeError { column, message } => {
                ApiError::DatabaseError(format!("记录第{}列无法解析: {}", column, message))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_mapping() {
        let err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(err, ApiError::DatabaseConnectionError(ref m) if m.contains("poisoned")));

        let err: ApiError = RepositoryError::RowDecodeError {
            column: 12,
            message: "未知的判定状态: MAYBE".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "数据库错误: 记录第12列无法解析: 未知的判定状态: MAYBE"
        );
    }
}
