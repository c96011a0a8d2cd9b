// ==========================================
// 连铸方坯质量记录系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享资源和API实例
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::api::RecorderApi;
use crate::config::ConfigManager;
use crate::db::{
    init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION,
};
use crate::repository::{SqliteStrandRecordRepository, StrandRecordStore};

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "HEAT_QC_DB_PATH";

/// 应用状态
///
/// 包含API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 质量记录API
    pub recorder_api: Arc<RecorderApi>,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 创建数据库所在目录，打开数据库并建表（幂等）
    /// 2. 写入缺省配置
    /// 3. 创建API实例
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        if let Some(parent) = Path::new(&db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("无法创建数据库目录 {}: {}", parent.display(), e))?;
            }
        }

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("无法初始化数据库表: {}", e))?;

        match read_schema_version(&conn) {
            Ok(Some(v)) if v != CURRENT_SCHEMA_VERSION => {
                tracing::warn!(found = v, expected = CURRENT_SCHEMA_VERSION, "schema_version 不一致");
            }
            Err(e) => tracing::warn!("schema_version 读取失败(将继续启动): {}", e),
            _ => {}
        }

        let conn = Arc::new(Mutex::new(conn));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn.clone())
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );
        let store: Arc<dyn StrandRecordStore> =
            Arc::new(SqliteStrandRecordRepository::new(conn.clone()));
        let recorder_api = Arc::new(RecorderApi::new(store, config_manager.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            recorder_api,
            config_manager,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: 环境变量 HEAT_QC_DB_PATH → 用户数据目录 → 当前目录
///
/// 只计算路径，目录在 `AppState::new` 中按需创建
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    default_db_path_in(dirs::data_dir()).to_string_lossy().to_string()
}

fn default_db_path_in(data_dir: Option<PathBuf>) -> PathBuf {
    match data_dir {
        Some(dir) => dir.join("heat-qc-recorder").join("heat_qc.db"),
        None => PathBuf::from("./heat_qc.db"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_db_path_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_db_path_in(Some(dir.path().to_path_buf()));
        assert_eq!(path, dir.path().join("heat-qc-recorder").join("heat_qc.db"));
        // 仅计算路径，不创建目录
        assert!(!dir.path().join("heat-qc-recorder").exists());

        assert_eq!(default_db_path_in(None), PathBuf::from("./heat_qc.db"));
    }

    #[test]
    fn test_app_state_creates_missing_db_dir() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("qc.db");

        let state = AppState::new(db_path.to_string_lossy().to_string()).unwrap();
        assert!(db_path.exists());
        assert_eq!(state.config_manager.get_access_password().unwrap(), "1100");
    }

    #[test]
    fn test_app_state_new_on_temp_db() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("state.db").to_string_lossy().to_string();

        let state = AppState::new(db_path.clone()).unwrap();
        assert_eq!(state.db_path, db_path);
        assert_eq!(state.config_manager.get_reject_threshold_mm().unwrap(), 8.0);

        // 重复打开同一数据库（幂等建表）
        assert!(AppState::new(db_path).is_ok());
    }
}
