// ==========================================
// 连铸方坯质量记录系统 - 椭圆度判定
// ==========================================
// 职责: 两次卡尺读数 → 椭圆度 rh + 合格/判废
// 约束: 纯函数，无 I/O；D1 = 0 (未测量) 由调用方过滤
// ==========================================
// 舍入规则: 保留 2 位小数，四舍五入（远离零），即 (x * 100).round() / 100
// ==========================================

use crate::domain::types::QualityStatus;
use serde::{Deserialize, Serialize};

/// 默认判废阈值 (mm)
pub const DEFAULT_REJECT_THRESHOLD_MM: f64 = 8.0;

/// 判定结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityDecision {
    pub rh: f64,
    pub status: QualityStatus,
}

/// 保留 2 位小数（四舍五入，远离零）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 椭圆度 rh = round(|D1 - D2|, 2)
pub fn roundness(d1: f64, d2: f64) -> f64 {
    round2((d1 - d2).abs())
}

/// 椭圆度判定
///
/// # 规则
/// - rh ≤ threshold → PASS
/// - rh > threshold → REJECT
pub fn decide(d1: f64, d2: f64, threshold_mm: f64) -> QualityDecision {
    let rh = roundness(d1, d2);
    let status = if rh <= threshold_mm {
        QualityStatus::Pass
    } else {
        QualityStatus::Reject
    };
    QualityDecision { rh, status }
}
