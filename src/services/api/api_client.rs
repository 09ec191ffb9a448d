//! # Authenticated HTTP Client
//!
//! 백엔드 API 요청에 저장된 세션 토큰을 `Authorization: Bearer <token>` 헤더로 붙입니다.
//!
//! 토큰은 요청을 만들 때마다 세션 저장소에서 동기식으로 읽으므로,
//! 로그인/로그아웃 직후의 요청에도 최신 상태가 반영됩니다.
//! 세션이 없으면 헤더 없이 요청합니다.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;
use crate::domain::dto::session_exchange::BackendErrorBody;
use crate::errors::{AuthError, AuthResult, DEFAULT_BACKEND_MESSAGE, ErrorContext};
use crate::storage::SessionStore;
use crate::utils::string_utils::join_url;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: SessionStore,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, store: SessionStore) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            store,
        }
    }

    /// `SAFEYOU_API_URL` 기반으로 생성합니다.
    pub fn from_env(http: reqwest::Client, store: SessionStore) -> Self {
        Self::new(http, BackendConfig::api_url(), store)
    }

    /// 세션 토큰이 포함된 요청 빌더를 만듭니다.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, join_url(&self.base_url, path));

        match self.store.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// 요청을 보내고 2xx 응답 본문을 JSON으로 파싱합니다.
    ///
    /// # Errors
    ///
    /// * `NetworkError` - 연결 실패 또는 본문 파싱 실패
    /// * `BackendRejected` - 2xx 이외의 상태
    pub async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> AuthResult<T> {
        let response = builder.send().await.network_context("API 요청 실패")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::BackendRejected {
                status: status.as_u16(),
                message: BackendErrorBody::extract_message(&body)
                    .unwrap_or_else(|| DEFAULT_BACKEND_MESSAGE.to_string()),
            });
        }

        response.json::<T>().await.network_context("API 응답 파싱 실패")
    }
}
