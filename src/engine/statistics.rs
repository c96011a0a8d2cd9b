// ==========================================
// 连铸方坯质量记录系统 - 统计汇总
// ==========================================
// 职责: 为图表提供数据（按操作工平均椭圆度、合格率、时间序列）
// 约束: 只做分组/平均，不做渲染
// ==========================================

use crate::domain::strand_record::StrandRecord;
use crate::domain::types::QualityStatus;
use crate::engine::quality_decision::round2;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 操作工平均椭圆度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorMean {
    pub operator: String,
    pub mean_rh: f64,
    pub count: usize,
}

/// 合格/判废汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub total: usize,
    pub pass: usize,
    pub reject: usize,
    pub reject_rate: f64, // 0..1，无记录时为 0
}

/// 椭圆度时间序列点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhPoint {
    pub id: i64,
    pub timestamp: NaiveDateTime,
    pub heat: String,
    pub strand: String,
    pub rh: f64,
    pub status: QualityStatus,
}

/// 按操作工分组求平均椭圆度（按操作工名排序，平均值保留 2 位小数）
pub fn operator_mean_rh(records: &[StrandRecord]) -> Vec<OperatorMean> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for r in records {
        let entry = groups.entry(r.operator.as_str()).or_insert((0.0, 0));
        entry.0 += r.rh;
        entry.1 += 1;
    }

    groups
        .into_iter()
        .map(|(operator, (sum, count))| OperatorMean {
            operator: operator.to_string(),
            mean_rh: round2(sum / count as f64),
            count,
        })
        .collect()
}

pub fn status_summary(records: &[StrandRecord]) -> StatusSummary {
    let reject = records.iter().filter(|r| r.status.is_reject()).count();
    let total = records.len();
    StatusSummary {
        total,
        pass: total - reject,
        reject,
        reject_rate: if total == 0 {
            0.0
        } else {
            reject as f64 / total as f64
        },
    }
}

/// 时间序列（按主键升序，即录入顺序）
pub fn rh_time_series(records: &[StrandRecord]) -> Vec<RhPoint> {
    let mut points: Vec<RhPoint> = records
        .iter()
        .map(|r| RhPoint {
            id: r.id,
            timestamp: r.timestamp,
            heat: r.heat.clone(),
            strand: r.strand.clone(),
            rh: r.rh,
            status: r.status,
        })
        .collect();
    points.sort_by_key(|p| p.id);
    points
}
