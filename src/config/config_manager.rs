// ==========================================
// 连铸方坯质量记录系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value)
// ==========================================

use crate::domain::types::suggestions;
use crate::engine::quality_decision::DEFAULT_REJECT_THRESHOLD_MM;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

/// 默认访问口令
pub const DEFAULT_ACCESS_PASSWORD: &str = "1100";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：缺省配置使用 INSERT OR IGNORE 写入，不覆盖已有值（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        let manager = Self { conn };
        manager.seed_defaults()?;
        Ok(manager)
    }

    fn seed_defaults(&self) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        for (key, value) in config_keys::defaults() {
            conn.execute(
                "INSERT OR IGNORE INTO config_kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )?;
        }
        Ok(())
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let key = key.trim();
        if key.is_empty() {
            return Err("配置键不能为空".into());
        }

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        tracing::info!(key = %key, "配置已更新");
        Ok(())
    }

    /// 列出全部配置（按键排序）
    pub fn list_configs(&self) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        let mut stmt = conn.prepare("SELECT key, value FROM config_kv ORDER BY key")?;

        let mut configs = BTreeMap::new();
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        for row in rows {
            let (key, value) = row?;
            configs.insert(key, value);
        }
        Ok(configs)
    }

    /// 读取并解析配置；缺失或格式错误时回退默认值
    fn get_parsed_or<T: std::str::FromStr>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, Box<dyn Error>> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(v) => Ok(v),
                Err(_) => {
                    tracing::warn!(key = %key, value = %raw, "配置值无法解析，使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    // ===== 质量判定配置 =====

    /// 判废阈值 (mm)，负数视为无效
    pub fn get_reject_threshold_mm(&self) -> Result<f64, Box<dyn Error>> {
        let value =
            self.get_parsed_or(config_keys::REJECT_THRESHOLD_MM, DEFAULT_REJECT_THRESHOLD_MM)?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            tracing::warn!(value, "判废阈值无效，使用默认值");
            Ok(DEFAULT_REJECT_THRESHOLD_MM)
        }
    }

    // ===== 访问控制配置 =====

    pub fn get_access_password(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(config_keys::ACCESS_PASSWORD)?
            .unwrap_or_else(|| DEFAULT_ACCESS_PASSWORD.to_string()))
    }

    // ===== 表单缺省值 =====

    pub fn get_default_storage_loc(&self) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(config_keys::DEFAULT_STORAGE_LOC)?
            .unwrap_or_else(|| suggestions::DEFAULT_STORAGE_LOC.to_string()))
    }

    pub fn get_default_billet_count(&self) -> Result<i64, Box<dyn Error>> {
        self.get_parsed_or(config_keys::DEFAULT_BILLET_COUNT, suggestions::DEFAULT_BILLET_COUNT)
    }
}

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    use super::*;

    // 质量判定
    pub const REJECT_THRESHOLD_MM: &str = "reject_threshold_mm";

    // 访问控制
    pub const ACCESS_PASSWORD: &str = "access_password";

    // 表单缺省值
    pub const DEFAULT_STORAGE_LOC: &str = "default_storage_loc";
    pub const DEFAULT_BILLET_COUNT: &str = "default_billet_count";

    /// 首次建库写入的缺省配置
    pub fn defaults() -> Vec<(&'static str, String)> {
        vec![
            (REJECT_THRESHOLD_MM, DEFAULT_REJECT_THRESHOLD_MM.to_string()),
            (ACCESS_PASSWORD, DEFAULT_ACCESS_PASSWORD.to_string()),
            (DEFAULT_STORAGE_LOC, suggestions::DEFAULT_STORAGE_LOC.to_string()),
            (DEFAULT_BILLET_COUNT, suggestions::DEFAULT_BILLET_COUNT.to_string()),
        ]
    }
}
