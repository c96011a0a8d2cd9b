// ==========================================
// 连铸方坯质量记录系统 - 质量记录构建器
// ==========================================
// 职责: HeatBatch → 0..5 条 NewStrandRecord
// 规则:
// - 仅 D1 > 0 的流生成记录，其余静默跳过（不是错误，也不记为判废）
// - 同一批次所有记录共享同一个采集时间
// - 必填项校验 (炉号/操作工) 由调用方负责
// ==========================================

use crate::domain::heat_batch::HeatBatch;
use crate::domain::strand_record::NewStrandRecord;
use crate::engine::quality_decision::decide;
use chrono::NaiveDateTime;
use tracing::instrument;

// ==========================================
// RecordBuilder - 质量记录构建器
// ==========================================
/// 无状态构建器，持久化由调用方处理
#[derive(Debug, Default)]
pub struct RecordBuilder {}

impl RecordBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建待写入记录
    ///
    /// # 参数
    /// - `batch`: 提交时构建的炉次批次（按值传入）
    /// - `captured_at`: 本次保存的采集时间
    ///
    /// # 返回
    /// 按流号升序排列的记录，条数等于 D1 > 0 的流数
    #[instrument(
        skip(self, batch),
        fields(heat = %batch.meta.heat, strands = batch.strands().len())
    )]
    pub fn build(&self, batch: HeatBatch, captured_at: NaiveDateTime) -> Vec<NewStrandRecord> {
        let threshold = batch.threshold_mm;
        let meta = &batch.meta;

        let records: Vec<NewStrandRecord> = batch
            .strands()
            .iter()
            .filter(|m| m.is_measured())
            .map(|m| {
                let decision = decide(m.d1, m.d2, threshold);
                NewStrandRecord {
                    timestamp: captured_at,
                    shift: meta.shift.clone(),
                    operator: meta.operator.clone(),
                    inspector: meta.inspector.clone(),
                    ccm: meta.ccm.clone(),
                    heat: meta.heat.clone(),
                    grade: meta.grade.clone(),
                    storage_loc: meta.storage_loc.clone(),
                    billet_count: meta.billet_count,
                    short_billet_length: meta.short_billet_length,
                    sample_info: m.sample_info.clone(),
                    strand: m.strand.label(),
                    d1: m.d1,
                    d2: m.d2,
                    rh: decision.rh,
                    status: decision.status,
                }
            })
            .collect();

        tracing::debug!(
            built = records.len(),
            skipped = batch.strands().len() - records.len(),
            "质量记录构建完成"
        );

        records
    }
}
