// ==========================================
// 连铸方坯质量记录系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod heat_batch;
pub mod strand_record;
pub mod types;

// 重导出核心类型
pub use heat_batch::{HeatBatch, HeatMeta, StrandMeasurement};
pub use strand_record::{NewStrandRecord, StrandRecord};
pub use types::{QualityStatus, StrandPosition, STRANDS_PER_HEAT};
