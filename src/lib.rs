// ==========================================
// 连铸方坯质量记录系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 单机质检记录（炉次测量 → 椭圆度判定 → 追加存储 → 浏览/告警/导出）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 判定与统计
pub mod engine;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 导出层 - Excel/CSV
pub mod export;

// 标签数据
pub mod label;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    HeatBatch, HeatMeta, NewStrandRecord, QualityStatus, StrandMeasurement, StrandPosition,
    StrandRecord,
};

pub use engine::{
    decide, roundness, QualityDecision, RecordBuilder, StrandAlert, StrandAlertDetector,
    DEFAULT_REJECT_THRESHOLD_MM,
};

pub use api::{ApiError, ApiResult, RecorderApi, SaveOutcome, Session};

pub use label::LabelData;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "连铸方坯质量记录系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
