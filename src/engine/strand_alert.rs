// ==========================================
// 连铸方坯质量记录系统 - 连续判废告警
// ==========================================
// 规则:
// - 取全表最近 15 条记录（按主键降序，各流混合，不是每流 15 条）
// - 对每个流号 S01..S05，筛出该流记录并取前 3 条
// - 3 条全部为 REJECT → 告警
// - 窗口内不足 3 条 → 不告警
// 约束: 只读、无状态，每次从历史重新计算，不去重
// ==========================================

use crate::domain::strand_record::StrandRecord;
use crate::domain::types::StrandPosition;
use serde::{Deserialize, Serialize};

/// 告警检查窗口（最近记录条数）
pub const ALERT_WINDOW: usize = 15;

/// 触发告警所需的连续判废次数
pub const ALERT_CONSECUTIVE: usize = 3;

/// 连续判废告警
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrandAlert {
    pub strand: String,       // 流号标签
    pub record_ids: Vec<i64>, // 触发告警的记录（最近在前）
}

// ==========================================
// StrandAlertDetector - 连续判废检测
// ==========================================
#[derive(Debug, Default)]
pub struct StrandAlertDetector {}

impl StrandAlertDetector {
    pub fn new() -> Self {
        Self {}
    }

    /// 检测连续判废
    ///
    /// # 参数
    /// - `recent`: 按主键降序（最近在前）的历史记录，超过窗口的部分忽略
    ///
    /// # 返回
    /// 按 S01..S05 顺序的告警列表
    pub fn detect(&self, recent: &[StrandRecord]) -> Vec<StrandAlert> {
        let window = &recent[..recent.len().min(ALERT_WINDOW)];

        StrandPosition::all()
            .filter_map(|position| {
                let label = position.label();
                let latest: Vec<&StrandRecord> = window
                    .iter()
                    .filter(|r| r.strand == label)
                    .take(ALERT_CONSECUTIVE)
                    .collect();

                if latest.len() < ALERT_CONSECUTIVE {
                    return None;
                }
                if !latest.iter().all(|r| r.status.is_reject()) {
                    return None;
                }

                tracing::warn!(strand = %label, "连续 {} 次判废", ALERT_CONSECUTIVE);
                Some(StrandAlert {
                    strand: label,
                    record_ids: latest.iter().map(|r| r.id).collect(),
                })
            })
            .collect()
    }
}
