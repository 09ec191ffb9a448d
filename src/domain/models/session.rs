//! # 세션 모델
//!
//! 저장소에 영속화된 세션과 로그인 성공 시 호출자에게 반환되는 결과를 정의합니다.

use serde::Serialize;

use crate::domain::models::identity::ProviderIdentity;

/// 세션 저장소에서 읽어 온 로그인 상태
///
/// 마지막으로 완료된 로그인 시도가 성공한 경우에만 존재합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    #[serde(skip_serializing)]
    pub token: String,
    pub roles: Vec<String>,
    pub is_logged_in: bool,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub trusted_device_token: Option<String>,
}

/// 소셜 로그인 성공 결과 `{ token, roles, identity }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    pub token: String,
    pub roles: Vec<String>,
    pub identity: ProviderIdentity,
}

