// ==========================================
// 连铸方坯质量记录系统 - 标签数据
// ==========================================
// 职责: 组装炉次标签字段 + 二维码内容
// 约束: 版面/PDF/二维码图像由外部渲染，这里只提供字段值
// ==========================================

use crate::domain::strand_record::StrandRecord;
use serde::{Deserialize, Serialize};

/// 炉次标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelData {
    pub heat: String,
    pub grade: String,
    pub ccm: String,
    pub date: String,
    pub storage_loc: String,
    pub billet_count: i64,
    pub short_billet_length: Option<f64>,
}

impl LabelData {
    pub fn new(
        heat: impl Into<String>,
        grade: impl Into<String>,
        ccm: impl Into<String>,
        date: impl Into<String>,
        storage_loc: impl Into<String>,
        billet_count: i64,
        short_billet_length: Option<f64>,
    ) -> Self {
        Self {
            heat: heat.into(),
            grade: grade.into(),
            ccm: ccm.into(),
            date: date.into(),
            storage_loc: storage_loc.into(),
            billet_count,
            short_billet_length,
        }
    }

    /// 由历史记录重新生成标签
    pub fn from_record(record: &StrandRecord) -> Self {
        Self::new(
            record.heat.clone(),
            record.grade.clone(),
            record.ccm.clone(),
            record.date_only.clone(),
            record.storage_loc.clone(),
            record.billet_count,
            record.short_billet_length,
        )
    }

    /// 二维码内容: HEAT:<id>|LOC:<location>|GRADE:<grade>
    pub fn qr_payload(&self) -> String {
        format!("HEAT:{}|LOC:{}|GRADE:{}", self.heat, self.storage_loc, self.grade)
    }

    /// 有效短尺长度（缺失或 ≤ 0 视为无）
    pub fn effective_short_billet_length(&self) -> Option<f64> {
        self.short_billet_length.filter(|len| *len > 0.0)
    }

    /// 标签文本行，短尺长度无效时省略该行
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("HEAT: {}", self.heat),
            format!("GRADE: {}", self.grade),
            format!("CCM: {}", self.ccm),
            format!("DATE: {}", self.date),
            format!("LOC: {}", self.storage_loc),
            format!("BILLETS: {}", self.billet_count),
        ];
        if let Some(len) = self.effective_short_billet_length() {
            lines.push(format!("SHORT: {}", len));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(short: Option<f64>) -> LabelData {
        LabelData::new("H2501", "B500W", "CCM02", "2025-05-01", "Bay-7", 36, short)
    }

    #[test]
    fn test_qr_payload() {
        assert_eq!(label(None).qr_payload(), "HEAT:H2501|LOC:Bay-7|GRADE:B500W");
    }

    #[test]
    fn test_short_billet_omitted_when_zero_or_missing() {
        assert_eq!(label(None).text_lines().len(), 6);
        assert_eq!(label(Some(0.0)).text_lines().len(), 6);

        let lines = label(Some(4.5)).text_lines();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[6], "SHORT: 4.5");
    }
}
