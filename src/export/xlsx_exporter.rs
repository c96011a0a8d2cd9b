// ==========================================
// 连铸方坯质量记录系统 - Excel 导出器
// ==========================================
// 工具: rust_xlsxwriter
// 输出: 单工作表 QC_Report，首行为列名
// ==========================================

use crate::domain::strand_record::StrandRecord;
use crate::export::error::ExportResult;
use crate::export::{header, record_cells, CellValue, SheetExporter, SHEET_NAME};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

pub struct XlsxExporter;

impl XlsxExporter {
    /// 生成工作簿（供写文件/写内存复用）
    fn build_workbook(&self, records: &[StrandRecord]) -> ExportResult<Workbook> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, name) in header().iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *name, &header_format)?;
        }

        for (idx, record) in records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, cell) in record_cells(record).into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Text(s) => {
                        worksheet.write_string(row, col, s)?;
                    }
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, n)?;
                    }
                    CellValue::Empty => {}
                }
            }
        }

        Ok(workbook)
    }
}

impl SheetExporter for XlsxExporter {
    fn extension(&self) -> &'static str {
        "xlsx"
    }

    fn export(&self, records: &[StrandRecord], path: &Path) -> ExportResult<usize> {
        let mut workbook = self.build_workbook(records)?;
        workbook.save(path)?;
        tracing::info!(rows = records.len(), path = %path.display(), "Excel 导出完成");
        Ok(records.len())
    }
}
