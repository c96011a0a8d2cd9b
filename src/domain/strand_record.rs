// ==========================================
// 连铸方坯质量记录系统 - 单流质量记录
// ==========================================
// 对齐: strand_record 表
// 红线: 记录一经写入不可修改、不可删除
// ==========================================

use crate::domain::types::QualityStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 时间戳存储格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// 日期存储格式
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// 时刻存储格式
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// 表列名（按 schema 顺序），导出表头与之一致
pub const COLUMN_NAMES: [&str; 19] = [
    "id",
    "timestamp",
    "date_only",
    "time_only",
    "shift",
    "operator",
    "inspector",
    "ccm",
    "heat",
    "grade",
    "strand",
    "rh",
    "status",
    "d1",
    "d2",
    "billet_count",
    "storage_loc",
    "short_billet_length",
    "sample_info",
];

// ==========================================
// NewStrandRecord - 待写入记录（无主键）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStrandRecord {
    // ===== 采集时间 =====
    pub timestamp: NaiveDateTime,

    // ===== 炉次元数据 =====
    pub shift: String,
    pub operator: String,
    pub inspector: String,
    pub ccm: String,
    pub heat: String,
    pub grade: String,
    pub storage_loc: String,
    pub billet_count: i64,
    pub short_billet_length: Option<f64>,
    pub sample_info: Option<String>,

    // ===== 测量与判定 =====
    pub strand: String, // 流号标签 S01..S05
    pub d1: f64,
    pub d2: f64,
    pub rh: f64, // 椭圆度 = round(|D1 - D2|, 2)
    pub status: QualityStatus,
}

impl NewStrandRecord {
    pub fn date_only(&self) -> String {
        self.timestamp.format(DATE_FORMAT).to_string()
    }

    pub fn time_only(&self) -> String {
        self.timestamp.format(TIME_FORMAT).to_string()
    }
}

// ==========================================
// StrandRecord - 已持久化记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandRecord {
    pub id: i64, // 自增主键，插入顺序即"最近 N 条"的排序依据
    pub timestamp: NaiveDateTime,
    pub date_only: String,
    pub time_only: String,
    pub shift: String,
    pub operator: String,
    pub inspector: String,
    pub ccm: String,
    pub heat: String,
    pub grade: String,
    pub strand: String,
    pub rh: f64,
    pub status: QualityStatus,
    pub d1: f64,
    pub d2: f64,
    pub billet_count: i64,
    pub storage_loc: String,
    pub short_billet_length: Option<f64>,
    pub sample_info: Option<String>,
}

impl StrandRecord {
    /// 由待写入记录 + 主键组装
    pub fn from_new(id: i64, record: NewStrandRecord) -> Self {
        let date_only = record.date_only();
        let time_only = record.time_only();
        Self {
            id,
            timestamp: record.timestamp,
            date_only,
            time_only,
            shift: record.shift,
            operator: record.operator,
            inspector: record.inspector,
            ccm: record.ccm,
            heat: record.heat,
            grade: record.grade,
            strand: record.strand,
            rh: record.rh,
            status: record.status,
            d1: record.d1,
            d2: record.d2,
            billet_count: record.billet_count,
            storage_loc: record.storage_loc,
            short_billet_length: record.short_billet_length,
            sample_info: record.sample_info,
        }
    }
}
