// ==========================================
// 连铸方坯质量记录系统 - 质量记录 API
// ==========================================
// 职责: 登录门禁、炉次保存、记录浏览/检索、连续判废告警、统计、导出、标签
// 约束: 同步执行，每次调用完成全部存储操作后返回；无重试
// ==========================================

use std::path::Path;
use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::api::session::Session;
use crate::config::ConfigManager;
use crate::domain::heat_batch::{HeatBatch, HeatMeta};
use crate::domain::strand_record::StrandRecord;
use crate::engine::record_builder::RecordBuilder;
use crate::engine::statistics::{self, OperatorMean, RhPoint, StatusSummary};
use crate::engine::strand_alert::{StrandAlert, StrandAlertDetector, ALERT_WINDOW};
use crate::export::exporter_for_path;
use crate::label::LabelData;
use crate::repository::strand_record_store::{RecordFilter, RecordOrder, StrandRecordStore};

/// 保存结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveOutcome {
    pub heat: String,
    pub records: Vec<StrandRecord>,
}

impl SaveOutcome {
    pub fn record_ids(&self) -> Vec<i64> {
        self.records.iter().map(|r| r.id).collect()
    }

    pub fn reject_count(&self) -> usize {
        self.records.iter().filter(|r| r.status.is_reject()).count()
    }
}

// ==========================================
// RecorderApi - 质量记录 API
// ==========================================
pub struct RecorderApi {
    store: Arc<dyn StrandRecordStore>,
    config: Arc<ConfigManager>,
    builder: RecordBuilder,
    detector: StrandAlertDetector,
}

impl RecorderApi {
    pub fn new(store: Arc<dyn StrandRecordStore>, config: Arc<ConfigManager>) -> Self {
        Self {
            store,
            config,
            builder: RecordBuilder::new(),
            detector: StrandAlertDetector::new(),
        }
    }

    // ==========================================
    // 访问控制
    // ==========================================

    /// 使用配置中的访问口令登录
    pub fn login(&self, session: &mut Session, password: &str) -> ApiResult<()> {
        let expected = self
            .config
            .get_access_password()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        session.login(password, &expected)
    }

    // ==========================================
    // 录入
    // ==========================================

    /// 以配置中的判废阈值创建空批次
    pub fn prepare_batch(&self, session: &Session, meta: HeatMeta) -> ApiResult<HeatBatch> {
        session.require_login()?;
        let threshold = self
            .config
            .get_reject_threshold_mm()
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;
        Ok(HeatBatch::new(meta).with_threshold(threshold))
    }

    /// 保存炉次（采集时间取当前本地时间）
    pub fn save_batch(&self, session: &Session, batch: HeatBatch) -> ApiResult<SaveOutcome> {
        self.save_batch_at(session, batch, Local::now().naive_local())
    }

    /// 保存炉次
    ///
    /// # 规则
    /// - 炉号、操作工为必填，缺失时整批拒绝，不做部分保存
    /// - 阈值及已测量流的 D1/D2 须为有限非负数，否则整批拒绝
    /// - 仅 D1 > 0 的流写入；全部未测量时写入 0 条，不报错
    /// - 同一炉号重复提交生成新的独立记录
    /// - 写入失败时整批回滚并返回错误
    pub fn save_batch_at(
        &self,
        session: &Session,
        batch: HeatBatch,
        captured_at: NaiveDateTime,
    ) -> ApiResult<SaveOutcome> {
        session.require_login()?;

        if batch.meta.heat.trim().is_empty() {
            return Err(ApiError::InvalidInput("炉号不能为空".to_string()));
        }
        if batch.meta.operator.trim().is_empty() {
            return Err(ApiError::InvalidInput("操作工不能为空".to_string()));
        }
        validate_readings(&batch)?;

        let heat = batch.meta.heat.clone();
        let new_records = self.builder.build(batch, captured_at);

        let ids = if new_records.is_empty() {
            Vec::new()
        } else {
            self.store.append(&new_records)?
        };

        let records: Vec<StrandRecord> = ids
            .into_iter()
            .zip(new_records)
            .map(|(id, r)| StrandRecord::from_new(id, r))
            .collect();

        let outcome = SaveOutcome { heat, records };
        tracing::info!(
            heat = %outcome.heat,
            saved = outcome.records.len(),
            rejected = outcome.reject_count(),
            "炉次保存完成"
        );
        Ok(outcome)
    }

    // ==========================================
    // 浏览与检索
    // ==========================================

    pub fn list_records(
        &self,
        session: &Session,
        order: RecordOrder,
    ) -> ApiResult<Vec<StrandRecord>> {
        session.require_login()?;
        Ok(self.store.query_all(order)?)
    }

    /// 最近 n 条（主键降序）
    pub fn recent_records(&self, session: &Session, n: usize) -> ApiResult<Vec<StrandRecord>> {
        session.require_login()?;
        Ok(self.store.query_recent(n)?)
    }

    /// 条件检索；无匹配返回空列表
    pub fn search_records(
        &self,
        session: &Session,
        filter: &RecordFilter,
    ) -> ApiResult<Vec<StrandRecord>> {
        session.require_login()?;
        Ok(self.store.search(filter)?)
    }

    // ==========================================
    // 告警与统计
    // ==========================================

    /// 连续判废告警（每次从历史重新计算）
    pub fn check_alerts(&self, session: &Session) -> ApiResult<Vec<StrandAlert>> {
        session.require_login()?;
        let recent = self.store.query_recent(ALERT_WINDOW)?;
        Ok(self.detector.detect(&recent))
    }

    pub fn operator_statistics(&self, session: &Session) -> ApiResult<Vec<OperatorMean>> {
        session.require_login()?;
        let records = self.store.query_all(RecordOrder::IdAsc)?;
        Ok(statistics::operator_mean_rh(&records))
    }

    pub fn status_summary(&self, session: &Session) -> ApiResult<StatusSummary> {
        session.require_login()?;
        let records = self.store.query_all(RecordOrder::IdAsc)?;
        Ok(statistics::status_summary(&records))
    }

    pub fn rh_series(&self, session: &Session) -> ApiResult<Vec<RhPoint>> {
        session.require_login()?;
        let records = self.store.query_all(RecordOrder::IdAsc)?;
        Ok(statistics::rh_time_series(&records))
    }

    // ==========================================
    // 导出与标签
    // ==========================================

    /// 导出全表（格式由扩展名决定）
    ///
    /// # 返回
    /// - Ok(usize): 导出行数
    pub fn export_records(
        &self,
        session: &Session,
        path: &Path,
        order: RecordOrder,
    ) -> ApiResult<usize> {
        session.require_login()?;
        let exporter = exporter_for_path(path)?;
        let records = self.store.query_all(order)?;
        Ok(exporter.export(&records, path)?)
    }

    /// 由历史记录重新生成标签
    pub fn label_for_record(&self, session: &Session, id: i64) -> ApiResult<LabelData> {
        session.require_login()?;
        let record = self
            .store
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("质量记录(id={})不存在", id)))?;
        Ok(LabelData::from_record(&record))
    }
}

/// 读数与阈值校验
///
/// D1 ≤ 0 的流视为未测量，由 RecordBuilder 跳过，不在此校验
fn validate_readings(batch: &HeatBatch) -> ApiResult<()> {
    if !batch.threshold_mm.is_finite() || batch.threshold_mm < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "判废阈值须为非负数: {}",
            batch.threshold_mm
        )));
    }

    for m in batch.strands().iter().filter(|m| m.is_measured()) {
        for (name, value) in [("D1", m.d1), ("D2", m.d2)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ApiError::InvalidInput(format!(
                    "{} 的 {} 须为非负数: {}",
                    m.strand, name, value
                )));
            }
        }
    }
    Ok(())
}
