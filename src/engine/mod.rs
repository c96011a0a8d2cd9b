// ==========================================
// 连铸方坯质量记录系统 - 引擎层
// ==========================================
// 职责: 椭圆度判定、记录构建、连续判废告警、统计汇总
// 红线: 引擎不直接访问数据库
// ==========================================

pub mod quality_decision;
pub mod record_builder;
pub mod statistics;
pub mod strand_alert;

// 重导出核心引擎
pub use quality_decision::{decide, roundness, QualityDecision, DEFAULT_REJECT_THRESHOLD_MM};
pub use record_builder::RecordBuilder;
pub use statistics::{
    operator_mean_rh, rh_time_series, status_summary, OperatorMean, RhPoint, StatusSummary,
};
pub use strand_alert::{StrandAlert, StrandAlertDetector, ALERT_CONSECUTIVE, ALERT_WINDOW};
