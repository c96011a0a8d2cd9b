// ==========================================
// 连铸方坯质量记录系统 - 导出层
// ==========================================
// 职责: 把质量记录写成单工作表的表格文件
// 表头: strand_record 列名（schema 顺序）
// 行序: 与传入记录顺序一致（由调用方的查询排序决定）
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod xlsx_exporter;

pub use csv_exporter::CsvExporter;
pub use error::{ExportError, ExportResult};
pub use xlsx_exporter::XlsxExporter;

use crate::domain::strand_record::{StrandRecord, COLUMN_NAMES, TIMESTAMP_FORMAT};
use chrono::NaiveDate;
use std::path::Path;

/// Excel 工作表名
pub const SHEET_NAME: &str = "QC_Report";

// ==========================================
// SheetExporter Trait
// ==========================================
pub trait SheetExporter {
    /// 文件扩展名（不含点）
    fn extension(&self) -> &'static str;

    /// 导出记录
    ///
    /// # 返回
    /// - Ok(usize): 写入的数据行数（不含表头）
    fn export(&self, records: &[StrandRecord], path: &Path) -> ExportResult<usize>;
}

/// 单元格取值
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// 文本形式（CSV 使用）
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

pub fn header() -> &'static [&'static str] {
    &COLUMN_NAMES
}

/// 一条记录 → 一行单元格（与 COLUMN_NAMES 对齐）
pub fn record_cells(r: &StrandRecord) -> Vec<CellValue> {
    vec![
        CellValue::Number(r.id as f64),
        CellValue::Text(r.timestamp.format(TIMESTAMP_FORMAT).to_string()),
        CellValue::Text(r.date_only.clone()),
        CellValue::Text(r.time_only.clone()),
        CellValue::Text(r.shift.clone()),
        CellValue::Text(r.operator.clone()),
        CellValue::Text(r.inspector.clone()),
        CellValue::Text(r.ccm.clone()),
        CellValue::Text(r.heat.clone()),
        CellValue::Text(r.grade.clone()),
        CellValue::Text(r.strand.clone()),
        CellValue::Number(r.rh),
        CellValue::Text(r.status.to_db_str().to_string()),
        CellValue::Number(r.d1),
        CellValue::Number(r.d2),
        CellValue::Number(r.billet_count as f64),
        CellValue::Text(r.storage_loc.clone()),
        r.short_billet_length.map_or(CellValue::Empty, CellValue::Number),
        r.sample_info.clone().map_or(CellValue::Empty, CellValue::Text),
    ]
}

/// 默认导出文件名，例如 QC_Report_20250314.xlsx
pub fn default_file_name(date: NaiveDate, extension: &str) -> String {
    format!("QC_Report_{}.{}", date.format("%Y%m%d"), extension)
}

/// 根据扩展名选择导出器
pub fn exporter_for_path(path: &Path) -> ExportResult<Box<dyn SheetExporter>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "xlsx" => Ok(Box::new(XlsxExporter)),
        "csv" => Ok(Box::new(CsvExporter)),
        _ => Err(ExportError::UnsupportedFormat(ext)),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cells_align_with_header() {
        let records = test_support::sample_records();
        for r in &records {
            assert_eq!(record_cells(r).len(), header().len());
        }
        let cells = record_cells(&records[0]);
        assert_eq!(cells[12], CellValue::Text("PASS".to_string()));
        assert_eq!(cells[17], CellValue::Empty);
    }

    #[test]
    fn test_default_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(default_file_name(date, "xlsx"), "QC_Report_20250304.xlsx");
    }

    #[test]
    fn test_exporter_for_path() {
        assert_eq!(exporter_for_path(Path::new("a.XLSX")).unwrap().extension(), "xlsx");
        assert_eq!(exporter_for_path(Path::new("a.csv")).unwrap().extension(), "csv");
        assert!(matches!(
            exporter_for_path(Path::new("a.pdf")),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }
}
