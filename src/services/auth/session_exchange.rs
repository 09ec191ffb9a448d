//! # Backend Session Exchange
//!
//! 프로바이더 ID 토큰과 프로필 정보를 신뢰할 수 있는 백엔드로 보내
//! 애플리케이션 세션 토큰, 역할 목록, (선택) 기기 신뢰 토큰을 받아 옵니다.
//!
//! ## 요청 형식
//!
//! ```text
//! POST {SAFEYOU_API_URL}/auth/login-social
//! Content-Type: application/json
//!
//! {"provider":"GOOGLE","idToken":"...","email":"...","nome":"...","foto":"data:..."}
//! ```
//!
//! ## 에러 처리
//!
//! | 상황 | AuthError |
//! |------|-----------|
//! | 연결 실패 / 타임아웃 | `NetworkError` |
//! | 2xx 이외의 상태 | `BackendRejected { status, message }` |
//! | 2xx 이지만 본문 파싱 실패 | `NetworkError` |
//!
//! 팝업은 일회용이므로 클라이언트 측 재시도는 하지 않습니다.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::domain::dto::session_exchange::{
    BackendErrorBody, SessionExchangeRequest, SessionExchangeResponse,
};
use crate::errors::{AuthError, DEFAULT_BACKEND_MESSAGE};
use crate::utils::string_utils::join_url;

pub const LOGIN_SOCIAL_PATH: &str = "/auth/login-social";

/// 백엔드 세션 교환 인터페이스
#[async_trait]
pub trait SessionExchange: Send + Sync {
    async fn exchange(
        &self,
        request: &SessionExchangeRequest,
    ) -> Result<SessionExchangeResponse, AuthError>;
}

/// reqwest 기반 세션 교환 구현체
pub struct HttpSessionExchange {
    http: reqwest::Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpSessionExchange {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// 환경 변수(`SAFEYOU_API_URL`, `SAFEYOU_EXCHANGE_TIMEOUT_SECS`) 기반으로 생성합니다.
    pub fn from_env(http: reqwest::Client) -> Self {
        Self::new(http, BackendConfig::api_url()).with_timeout(BackendConfig::exchange_timeout())
    }

    /// 요청 타임아웃을 설정합니다. 만료 시 `NetworkError`로 보고됩니다.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> String {
        join_url(&self.base_url, LOGIN_SOCIAL_PATH)
    }
}

#[async_trait]
impl SessionExchange for HttpSessionExchange {
    async fn exchange(
        &self,
        request: &SessionExchangeRequest,
    ) -> Result<SessionExchangeResponse, AuthError> {
        let mut builder = self.http.post(self.endpoint()).json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AuthError::NetworkError("백엔드 응답 시간 초과".to_string())
            } else {
                AuthError::NetworkError(format!("백엔드 요청 실패: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = BackendErrorBody::extract_message(&body)
                .unwrap_or_else(|| DEFAULT_BACKEND_MESSAGE.to_string());

            return Err(AuthError::BackendRejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SessionExchangeResponse>()
            .await
            .map_err(|e| AuthError::NetworkError(format!("백엔드 응답 파싱 실패: {}", e)))
    }
}
