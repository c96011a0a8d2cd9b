// ==========================================
// 连铸方坯质量记录系统 - 质量记录数据仓储
// ==========================================
// 对齐: strand_record 表
// 红线: 只追加，记录不可修改/删除
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::SqliteStrandRecordRepository;
