// ==========================================
// 连铸方坯质量记录系统 - 访问会话
// ==========================================
// 职责: 单一共享口令的访问门禁（不是完整的认证系统）
// 状态: LoggedOut → LoggedIn，无中间状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    LoggedOut,
    LoggedIn { since: NaiveDateTime },
}

/// 访问会话，显式传入各 API 调用
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::LoggedOut,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.state, SessionState::LoggedIn { .. })
    }

    /// 口令校验；失败时保持 LoggedOut
    pub fn login(&mut self, password: &str, expected: &str) -> ApiResult<()> {
        if password != expected {
            tracing::warn!("访问口令错误");
            self.state = SessionState::LoggedOut;
            return Err(ApiError::InvalidCredentials);
        }

        self.state = SessionState::LoggedIn {
            since: Local::now().naive_local(),
        };
        tracing::info!("会话已登录");
        Ok(())
    }

    pub fn logout(&mut self) {
        self.state = SessionState::LoggedOut;
        tracing::info!("会话已登出");
    }

    /// 未登录时返回 NotAuthenticated
    pub fn require_login(&self) -> ApiResult<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }
}
