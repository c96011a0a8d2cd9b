// ==========================================
// 连铸方坯质量记录系统 - 领域类型定义
// ==========================================
// 职责: 质量判定状态、流号等基础值类型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 每炉固定流数
pub const STRANDS_PER_HEAT: u8 = 5;

// ==========================================
// 质量判定状态 (Quality Status)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityStatus {
    Pass,   // 合格
    Reject, // 判废
}

impl QualityStatus {
    /// 从数据库字符串解析
    ///
    /// 未知字符串返回 None（不做默认值兜底，避免把脏数据当成合格）
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PASS" => Some(QualityStatus::Pass),
            "REJECT" => Some(QualityStatus::Reject),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            QualityStatus::Pass => "PASS",
            QualityStatus::Reject => "REJECT",
        }
    }

    pub fn is_reject(&self) -> bool {
        matches!(self, QualityStatus::Reject)
    }
}

impl fmt::Display for QualityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 流号 (Strand Position)
// ==========================================
// 取值 1..=5，标签 S01..S05
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StrandPosition(u8);

impl StrandPosition {
    /// 创建流号，超出 1..=5 返回 None
    pub fn new(position: u8) -> Option<Self> {
        if (1..=STRANDS_PER_HEAT).contains(&position) {
            Some(Self(position))
        } else {
            None
        }
    }

    /// 全部流号（升序）
    pub fn all() -> impl Iterator<Item = StrandPosition> {
        (1..=STRANDS_PER_HEAT).map(StrandPosition)
    }

    /// 存储/展示用标签，例如 S03
    pub fn label(&self) -> String {
        format!("S{:02}", self.0)
    }

    /// 从标签解析（S01 / s1 / 1 均可）
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        let digits = trimmed
            .strip_prefix('S')
            .or_else(|| trimmed.strip_prefix('s'))
            .unwrap_or(trimmed);
        digits.parse::<u8>().ok().and_then(Self::new)
    }
}

impl fmt::Display for StrandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}", self.0)
    }
}

// ==========================================
// 表单候选项
// ==========================================
// 仅作为录入提示，字段本身仍为自由文本
pub mod suggestions {
    pub const GRADES: [&str; 4] = ["B500", "B500W", "SAE1006", "SAE1008"];
    pub const SHIFTS: [&str; 4] = ["A", "B", "C", "D"];
    pub const MACHINES: [&str; 2] = ["CCM01", "CCM02"];
    pub const DEFAULT_STORAGE_LOC: &str = "SMS-Box";
    pub const DEFAULT_BILLET_COUNT: i64 = 40;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_status_db_roundtrip() {
        assert_eq!(QualityStatus::from_db_str("PASS"), Some(QualityStatus::Pass));
        assert_eq!(QualityStatus::from_db_str(" reject "), Some(QualityStatus::Reject));
        assert_eq!(QualityStatus::from_db_str("OK"), None);
        assert_eq!(QualityStatus::Reject.to_string(), "REJECT");
    }

    #[test]
    fn test_strand_position_range() {
        assert!(StrandPosition::new(0).is_none());
        assert!(StrandPosition::new(6).is_none());
        assert_eq!(StrandPosition::new(3).unwrap().label(), "S03");
        assert_eq!(StrandPosition::all().count(), 5);
    }

    #[test]
    fn test_strand_position_from_label() {
        assert_eq!(StrandPosition::from_label("S05"), StrandPosition::new(5));
        assert_eq!(StrandPosition::from_label("s2"), StrandPosition::new(2));
        assert_eq!(StrandPosition::from_label("4"), StrandPosition::new(4));
        assert_eq!(StrandPosition::from_label("S09"), None);
        assert_eq!(StrandPosition::from_label("X1"), None);
    }
}
