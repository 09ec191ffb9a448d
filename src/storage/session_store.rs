//! # Session Store
//!
//! 백엔드가 발급한 애플리케이션 세션을 내구성 있는 키-값 저장소에 기록하고,
//! 이후 요청에서 동기식으로 읽어 오는 계층입니다.
//!
//! ## 저장 키
//!
//! | 키 | 값 | 비고 |
//! |----|----|------|
//! | `userToken` | 애플리케이션 세션 토큰 | |
//! | `isLoggedIn` | `"true"` | |
//! | `userRoles` | JSON 배열 (`["USER"]`) | 순서 그대로 |
//! | `userEmail` | 이메일 | 이메일이 없으면 키 삭제 |
//! | `trustedDeviceToken` | 기기 신뢰 토큰 | 응답에 있을 때만 기록, 없으면 기존 값 유지 |
//!
//! 모든 쓰기는 하나의 [`WriteBatch`]로 묶여 원자적으로 적용됩니다.

use std::sync::Arc;

use crate::domain::dto::session_exchange::SessionExchangeResponse;
use crate::domain::models::session::PersistedSession;
use crate::errors::StorageError;
use crate::storage::key_value::{KeyValueStorage, WriteBatch};

pub const USER_TOKEN_KEY: &str = "userToken";
pub const IS_LOGGED_IN_KEY: &str = "isLoggedIn";
pub const USER_EMAIL_KEY: &str = "userEmail";
pub const USER_ROLES_KEY: &str = "userRoles";
pub const TRUSTED_DEVICE_TOKEN_KEY: &str = "trustedDeviceToken";

/// 세션 저장소
///
/// 로그인 오케스트레이션과 인증된 HTTP 클라이언트에 같은 인스턴스가 주입됩니다.
/// 복제 비용은 `Arc` 하나입니다.
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// 백엔드 응답을 세션으로 기록합니다.
    ///
    /// # Errors
    ///
    /// 저장소가 가득 찼거나 비활성화된 경우 `StorageError`를 반환합니다.
    /// 이 경우 배치는 전혀 적용되지 않습니다.
    pub fn persist(
        &self,
        response: &SessionExchangeResponse,
        email: Option<&str>,
    ) -> Result<(), StorageError> {
        let roles = serde_json::to_string(&response.roles)?;

        let mut batch = WriteBatch::new()
            .set(USER_TOKEN_KEY, response.token.as_str())
            .set(IS_LOGGED_IN_KEY, "true")
            .set(USER_ROLES_KEY, roles);

        batch = match email {
            Some(email) => batch.set(USER_EMAIL_KEY, email),
            None => batch.remove(USER_EMAIL_KEY),
        };

        if let Some(device_token) = &response.new_trusted_device_token {
            batch = batch.set(TRUSTED_DEVICE_TOKEN_KEY, device_token.as_str());
        }

        self.storage.commit(batch)?;
        log::debug!("💾 세션 저장 완료 (roles: {:?})", response.roles);
        Ok(())
    }

    /// 세션 키를 삭제합니다. 기기 신뢰 토큰은 다음 로그인을 위해 유지됩니다.
    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.storage.commit(
            WriteBatch::new()
                .remove(USER_TOKEN_KEY)
                .remove(IS_LOGGED_IN_KEY)
                .remove(USER_ROLES_KEY)
                .remove(USER_EMAIL_KEY),
        )
    }

    /// 현재 세션 토큰
    pub fn token(&self) -> Option<String> {
        self.read(USER_TOKEN_KEY)
    }

    pub fn is_logged_in(&self) -> bool {
        self.read(IS_LOGGED_IN_KEY).as_deref() == Some("true")
    }

    pub fn email(&self) -> Option<String> {
        self.read(USER_EMAIL_KEY)
    }

    /// 저장된 역할 목록. 값이 손상되었으면 빈 목록을 반환합니다.
    pub fn roles(&self) -> Vec<String> {
        self.read(USER_ROLES_KEY)
            .and_then(|raw| match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(roles) => Some(roles),
                Err(e) => {
                    log::warn!("⚠️ 저장된 역할 목록 파싱 실패: {}", e);
                    None
                }
            })
            .unwrap_or_default()
    }

    pub fn trusted_device_token(&self) -> Option<String> {
        self.read(TRUSTED_DEVICE_TOKEN_KEY)
    }

    /// 저장된 세션 전체. 토큰이 없거나 로그인 플래그가 없으면 `None`.
    pub fn current_session(&self) -> Option<PersistedSession> {
        let token = self.token()?;
        if !self.is_logged_in() {
            return None;
        }

        Some(PersistedSession {
            token,
            roles: self.roles(),
            is_logged_in: true,
            email: self.email(),
            trusted_device_token: self.trusted_device_token(),
        })
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("⚠️ 세션 저장소 읽기 실패 ({}): {}", key, e);
                None
            }
        }
    }
}
