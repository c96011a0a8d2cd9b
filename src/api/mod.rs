// ==========================================
// 连铸方坯质量记录系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供命令行调用
// ==========================================

pub mod error;
pub mod recorder_api;
pub mod session;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use recorder_api::{RecorderApi, SaveOutcome};
pub use session::{Session, SessionState};
