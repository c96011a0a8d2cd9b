// ==========================================
// 连铸方坯质量记录系统 - CSV 导出器
// ==========================================

use crate::domain::strand_record::StrandRecord;
use crate::export::error::ExportResult;
use crate::export::{header, record_cells, SheetExporter};
use csv::WriterBuilder;
use std::fs::File;
use std::path::Path;

pub struct CsvExporter;

impl SheetExporter for CsvExporter {
    fn extension(&self) -> &'static str {
        "csv"
    }

    fn export(&self, records: &[StrandRecord], path: &Path) -> ExportResult<usize> {
        let file = File::create(path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        writer.write_record(header())?;
        for record in records {
            let row: Vec<String> = record_cells(record).iter().map(|c| c.to_text()).collect();
            writer.write_record(&row)?;
        }
        writer.flush()?;

        tracing::info!(rows = records.len(), path = %path.display(), "CSV 导出完成");
        Ok(records.len())
    }
}
