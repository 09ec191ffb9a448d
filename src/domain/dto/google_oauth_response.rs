//! Google OAuth 응답 DTO 모듈
//!
//! Google OAuth 2.0 / OpenID Connect 엔드포인트가 반환하는 응답과
//! 로그인 창을 열기 위한 인가 요청 정보를 정의합니다.

use serde::Deserialize;

use crate::utils::string_utils::deserialize_optional_string;

/// Google OAuth 2.0 토큰 엔드포인트 응답
///
/// Authorization Code 교환과 Refresh Token 갱신 모두 이 형식으로 응답합니다.
/// `openid` 스코프를 요청했으므로 `id_token`이 포함됩니다.
#[derive(Debug, Deserialize)]
pub struct GoogleTokenResponse {
    /// Google OAuth 액세스 토큰 (userinfo 조회용)
    pub access_token: String,
    /// 토큰 타입 (항상 "Bearer")
    #[serde(default)]
    pub token_type: Option<String>,
    /// 토큰 만료 시간 (초 단위)
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// 리프레시 토큰 (갱신 응답에는 없음)
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// 부여된 권한 범위
    #[serde(default)]
    pub scope: Option<String>,
    /// OpenID Connect ID 토큰 (백엔드가 서버 측에서 검증)
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Google 토큰 엔드포인트 에러 응답
#[derive(Debug, Deserialize)]
pub struct GoogleErrorResponse {
    pub error: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

/// OpenID Connect userinfo 응답
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 식별자
    pub sub: String,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,
    #[serde(default)]
    pub email_verified: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,
    /// 프로필 사진 URL
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub picture: Option<String>,
}

/// 로그인 창을 열기 위한 인가 요청
///
/// `state`와 `code_verifier`는 콜백 검증과 코드 교환 때까지 보관해야 합니다.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub state: String,
    pub code_verifier: String,
}
