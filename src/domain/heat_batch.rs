// ==========================================
// 连铸方坯质量记录系统 - 炉次录入批次
// ==========================================
// 职责: 一次保存操作的输入（炉次元数据 + 各流测量值）
// 约束: 提交时一次性构建，之后按值传入记录构建器，不再修改
// ==========================================

use crate::domain::types::{StrandPosition, STRANDS_PER_HEAT};
use crate::engine::quality_decision::DEFAULT_REJECT_THRESHOLD_MM;
use serde::{Deserialize, Serialize};

// ==========================================
// HeatMeta - 炉次元数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatMeta {
    pub shift: String,                    // 班次
    pub operator: String,                 // 操作工
    pub inspector: String,                // 质检员
    pub ccm: String,                      // 连铸机号
    pub heat: String,                     // 炉号
    pub grade: String,                    // 钢种
    pub storage_loc: String,              // 存放位置
    pub billet_count: i64,                // 支数
    pub short_billet_length: Option<f64>, // 短尺长度 (可选)
}

// ==========================================
// StrandMeasurement - 单流卡尺测量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandMeasurement {
    pub strand: StrandPosition,
    pub d1: f64, // 对角线/直径 1 (mm)，0 表示该流未测量
    pub d2: f64, // 对角线/直径 2 (mm)
    pub sample_info: Option<String>, // 取样备注
}

impl StrandMeasurement {
    /// 该流是否已测量（D1 > 0）
    pub fn is_measured(&self) -> bool {
        self.d1 > 0.0
    }
}

// ==========================================
// HeatBatch - 炉次录入批次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatBatch {
    pub meta: HeatMeta,
    pub threshold_mm: f64,
    strands: Vec<StrandMeasurement>,
}

impl HeatBatch {
    /// 以默认判废阈值创建空批次
    pub fn new(meta: HeatMeta) -> Self {
        Self {
            meta,
            threshold_mm: DEFAULT_REJECT_THRESHOLD_MM,
            strands: Vec::with_capacity(STRANDS_PER_HEAT as usize),
        }
    }

    pub fn with_threshold(mut self, threshold_mm: f64) -> Self {
        self.threshold_mm = threshold_mm;
        self
    }

    /// 设置某一流的测量值
    ///
    /// 同一流号重复设置时以后一次为准；流号始终按升序保存
    pub fn with_strand(
        mut self,
        strand: StrandPosition,
        d1: f64,
        d2: f64,
        sample_info: Option<String>,
    ) -> Self {
        let measurement = StrandMeasurement {
            strand,
            d1,
            d2,
            sample_info,
        };
        match self.strands.binary_search_by_key(&strand, |m| m.strand) {
            Ok(idx) => self.strands[idx] = measurement,
            Err(idx) => self.strands.insert(idx, measurement),
        }
        self
    }

    /// 按流号 1..5 顺序批量设置 (D1, D2)
    ///
    /// 超出 5 个的部分忽略
    pub fn with_readings(mut self, readings: &[(f64, f64)]) -> Self {
        for (strand, (d1, d2)) in StrandPosition::all().zip(readings.iter().copied()) {
            self = self.with_strand(strand, d1, d2, None);
        }
        self
    }

    pub fn strands(&self) -> &[StrandMeasurement] {
        &self.strands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> HeatMeta {
        HeatMeta {
            shift: "A".to_string(),
            operator: "op".to_string(),
            inspector: "qc".to_string(),
            ccm: "CCM01".to_string(),
            heat: "H1".to_string(),
            grade: "B500".to_string(),
            storage_loc: "SMS-Box".to_string(),
            billet_count: 40,
            short_billet_length: None,
        }
    }

    #[test]
    fn test_with_strand_replaces_and_sorts() {
        let s1 = StrandPosition::new(1).unwrap();
        let s4 = StrandPosition::new(4).unwrap();
        let batch = HeatBatch::new(meta())
            .with_strand(s4, 10.0, 10.0, None)
            .with_strand(s1, 1.0, 2.0, None)
            .with_strand(s4, 20.0, 21.0, Some("样".to_string()));

        let strands = batch.strands();
        assert_eq!(strands.len(), 2);
        assert_eq!(strands[0].strand, s1);
        assert_eq!(strands[1].d1, 20.0);
        assert_eq!(strands[1].sample_info.as_deref(), Some("样"));
    }

    #[test]
    fn test_with_readings_caps_at_five() {
        let readings = [(1.0, 1.0); 7];
        let batch = HeatBatch::new(meta()).with_readings(&readings);
        assert_eq!(batch.strands().len(), 5);
        assert_eq!(batch.threshold_mm, DEFAULT_REJECT_THRESHOLD_MM);
    }
}
