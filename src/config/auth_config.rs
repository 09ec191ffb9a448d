//! # Authentication Configuration Module
//!
//! Google 로그인(Identity Provider)과 OAuth 콜백 리스너 관련 설정을 관리하는 모듈입니다.
//! 모든 값은 환경 변수에서 읽으며, 민감하지 않은 엔드포인트에는 기본값을 제공합니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### Google OAuth 설정
//! ```bash
//! export GOOGLE_CLIENT_ID="123456789-abc.apps.googleusercontent.com"
//! # 데스크톱(공개) 클라이언트라면 생략 가능
//! export GOOGLE_CLIENT_SECRET="your-google-client-secret"
//! ```
//!
//! ### 콜백 리스너 설정
//! ```bash
//! export OAUTH_CALLBACK_PORT="9876"
//! export OAUTH_CALLBACK_TIMEOUT_SECS="120"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthProvider, GoogleOAuthConfig};
//!
//! match GoogleOAuthConfig::settings() {
//!     Some(settings) => println!("Google 로그인 사용 가능: {}", settings.client_id),
//!     None => println!("GOOGLE_CLIENT_ID 미설정 → 프로바이더 사용 불가"),
//! }
//!
//! assert_eq!(AuthProvider::Google.as_str(), "GOOGLE");
//! ```

use std::env;
use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Google OAuth 2.0 설정을 관리하는 구조체
///
/// 데스크톱 로그인은 Google의 "installed application" 플로우를 사용합니다.
/// 시스템 브라우저가 로그인 창 역할을 하고, 루프백 주소로 리디렉션을 받습니다.
///
/// ## Google Cloud Console 설정 가이드
///
/// 1. APIs & Services > Credentials로 이동
/// 2. OAuth 2.0 Client IDs 생성 (유형: Desktop app)
/// 3. 발급된 Client ID를 `GOOGLE_CLIENT_ID`에 설정
///
/// 루프백 리디렉션(`http://127.0.0.1:<port>/callback`)은 데스크톱 클라이언트에
/// 자동으로 허용되므로 별도 등록이 필요하지 않습니다.
pub struct GoogleOAuthConfig;

impl GoogleOAuthConfig {
    /// Google OAuth Client ID를 반환합니다.
    ///
    /// 설정되지 않았거나 비어 있으면 `None`을 반환하며,
    /// 이 경우 Google 프로바이더는 "사용 불가"로 보고됩니다.
    pub fn client_id() -> Option<String> {
        env::var("GOOGLE_CLIENT_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Google OAuth Client Secret을 반환합니다.
    ///
    /// PKCE를 사용하는 데스크톱 클라이언트에서는 선택 사항입니다.
    /// 이 값을 로그에 출력하지 마세요.
    pub fn client_secret() -> Option<String> {
        env::var("GOOGLE_CLIENT_SECRET")
            .ok()
            .filter(|v| !v.trim().is_empty())
    }

    /// Google 인증 엔드포인트 URI
    ///
    /// # 기본값
    ///
    /// `https://accounts.google.com/o/oauth2/v2/auth`
    pub fn auth_uri() -> String {
        env::var("GOOGLE_AUTH_URI")
            .unwrap_or_else(|_| "https://accounts.google.com/o/oauth2/v2/auth".to_string())
    }

    /// Google 토큰 교환 엔드포인트 URI
    ///
    /// # 기본값
    ///
    /// `https://oauth2.googleapis.com/token`
    pub fn token_uri() -> String {
        env::var("GOOGLE_TOKEN_URI")
            .unwrap_or_else(|_| "https://oauth2.googleapis.com/token".to_string())
    }

    /// Google 사용자 정보 엔드포인트 URI
    ///
    /// # 기본값
    ///
    /// `https://openidconnect.googleapis.com/v1/userinfo`
    pub fn userinfo_uri() -> String {
        env::var("GOOGLE_USERINFO_URI")
            .unwrap_or_else(|_| "https://openidconnect.googleapis.com/v1/userinfo".to_string())
    }

    /// 환경 변수로부터 Google 프로바이더 설정 묶음을 생성합니다.
    ///
    /// Client ID가 없으면 `None`을 반환합니다.
    pub fn settings() -> Option<GoogleProviderSettings> {
        let client_id = Self::client_id()?;

        Some(GoogleProviderSettings {
            client_id,
            client_secret: Self::client_secret(),
            auth_uri: Self::auth_uri(),
            token_uri: Self::token_uri(),
            userinfo_uri: Self::userinfo_uri(),
            scopes: vec!["openid".into(), "email".into(), "profile".into()],
            callback_port: OAuthCallbackConfig::port(),
            callback_timeout: OAuthCallbackConfig::timeout(),
        })
    }
}

/// Google 프로바이더 실행에 필요한 설정 값 묶음
///
/// 테스트에서는 엔드포인트를 가짜 서버로 바꿔 직접 생성할 수 있습니다.
#[derive(Debug, Clone)]
pub struct GoogleProviderSettings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub auth_uri: String,
    pub token_uri: String,
    pub userinfo_uri: String,
    pub scopes: Vec<String>,
    pub callback_port: u16,
    pub callback_timeout: Duration,
}

/// OAuth 루프백 콜백 리스너 설정
pub struct OAuthCallbackConfig;

impl OAuthCallbackConfig {
    /// 콜백을 수신할 로컬 포트 (기본값: 9876)
    pub fn port() -> u16 {
        env::var("OAUTH_CALLBACK_PORT")
            .unwrap_or_else(|_| "9876".to_string())
            .parse()
            .unwrap_or(9876)
    }

    /// 사용자가 브라우저에서 로그인을 마칠 때까지 기다리는 최대 시간 (기본값: 120초)
    ///
    /// 이 시간이 지나면 사용자가 로그인 창을 닫은 것으로 간주합니다.
    pub fn timeout() -> Duration {
        let secs = env::var("OAUTH_CALLBACK_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".to_string())
            .parse()
            .unwrap_or(120);
        Duration::from_secs(secs)
    }
}

/// 지원하는 인증 프로바이더
///
/// 백엔드 `POST /auth/login-social` 요청의 `provider` 필드로 직렬화됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuthProvider {
    /// Google 계정을 통한 소셜 로그인
    Google,
}

impl AuthProvider {
    /// 백엔드 와이어 형식의 이름을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Google => "GOOGLE",
        }
    }
}
