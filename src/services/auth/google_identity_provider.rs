//! # Google 로그인 프로바이더 (데스크톱 루프백 플로우)
//!
//! 시스템 브라우저를 "로그인 창"으로 사용하는 [`IdentityProvider`] 구현체입니다.
//! Google의 installed application 플로우(Authorization Code + PKCE)를 따릅니다.
//!
//! ## 플로우
//!
//! ```text
//! 1. 127.0.0.1:<port> 에 콜백 리스너 바인딩
//! 2. 인가 URL을 시스템 브라우저로 열기
//!    GET {auth_uri}?client_id=...&redirect_uri=...&response_type=code
//!        &scope=openid%20email%20profile&state=...&code_challenge=...&code_challenge_method=S256
//! 3. 콜백 수신: /callback?code=...&state=...
//! 4. POST {token_uri} (grant_type=authorization_code, code_verifier)
//! 5. GET {userinfo_uri} (Authorization: Bearer ...)
//! ```
//!
//! ## 실패 매핑
//!
//! | 상황 | ProviderFailure 코드 |
//! |------|----------------------|
//! | 브라우저 실행 실패 | `auth/popup-blocked` |
//! | 콜백 대기 시간 초과 | `auth/popup-closed-by-user` |
//! | 사용자가 동의 화면에서 거부 | `access_denied` |
//! | state 불일치, 토큰 교환 실패 등 | `auth/internal-error` |

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AuthProvider, GoogleOAuthConfig, GoogleProviderSettings};
use crate::domain::dto::google_oauth_response::{
    AuthorizationRequest, GoogleErrorResponse, GoogleTokenResponse, GoogleUserInfo,
};
use crate::services::auth::identity_provider::{
    IdentityProvider, ProviderAccount, ProviderCredential, ProviderFailure,
};
use crate::services::auth::loopback::LoopbackListener;
use crate::services::auth::pkce;

/// 인가 URL을 사용자에게 보여 줄 "창"을 여는 추상화
pub trait BrowserLauncher: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// OS 기본 브라우저
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// Google 계정 로그인 프로바이더
pub struct GoogleLoopbackProvider {
    settings: Option<GoogleProviderSettings>,
    http: reqwest::Client,
    browser: Arc<dyn BrowserLauncher>,
}

impl GoogleLoopbackProvider {
    pub fn new(
        settings: Option<GoogleProviderSettings>,
        http: reqwest::Client,
        browser: Arc<dyn BrowserLauncher>,
    ) -> Self {
        Self {
            settings,
            http,
            browser,
        }
    }

    /// 환경 변수 설정과 시스템 브라우저로 생성합니다.
    ///
    /// `GOOGLE_CLIENT_ID`가 없으면 프로바이더는 사용 불가 상태가 됩니다.
    pub fn from_env(http: reqwest::Client) -> Self {
        Self::new(GoogleOAuthConfig::settings(), http, Arc::new(SystemBrowser))
    }

    fn settings(&self) -> Result<&GoogleProviderSettings, ProviderFailure> {
        self.settings
            .as_ref()
            .ok_or_else(|| ProviderFailure::internal("GOOGLE_CLIENT_ID가 설정되지 않았습니다"))
    }

    /// PKCE와 state가 포함된 인가 요청을 만듭니다.
    pub fn authorization_request(
        settings: &GoogleProviderSettings,
        redirect_uri: &str,
    ) -> AuthorizationRequest {
        let state = pkce::generate_state();
        let code_verifier = pkce::generate_code_verifier();
        let code_challenge = pkce::generate_code_challenge(&code_verifier);
        let scope = settings.scopes.join(" ");

        let url = format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}&code_challenge={}&code_challenge_method=S256&prompt=select_account",
            settings.auth_uri,
            urlencoding::encode(&settings.client_id),
            urlencoding::encode(redirect_uri),
            urlencoding::encode(&scope),
            urlencoding::encode(&state),
            urlencoding::encode(&code_challenge),
        );

        AuthorizationRequest {
            url,
            state,
            code_verifier,
        }
    }

    async fn request_tokens(
        &self,
        settings: &GoogleProviderSettings,
        mut params: Vec<(&'static str, String)>,
    ) -> Result<GoogleTokenResponse, ProviderFailure> {
        params.push(("client_id", settings.client_id.clone()));
        if let Some(secret) = &settings.client_secret {
            params.push(("client_secret", secret.clone()));
        }

        let response = self
            .http
            .post(&settings.token_uri)
            .form(&params)
            .send()
            .await
            .map_err(|e| ProviderFailure::internal(format!("Google 토큰 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<GoogleErrorResponse>(&error_text)
                .map(|e| e.error_description.unwrap_or(e.error))
                .unwrap_or(error_text);
            return Err(ProviderFailure::internal(format!(
                "Google 토큰 교환 실패: {}",
                reason
            )));
        }

        response
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| ProviderFailure::internal(format!("Google 토큰 응답 파싱 실패: {}", e)))
    }

    async fn exchange_code(
        &self,
        settings: &GoogleProviderSettings,
        code: &str,
        redirect_uri: &str,
        code_verifier: &str,
    ) -> Result<GoogleTokenResponse, ProviderFailure> {
        let params = vec![
            ("grant_type", "authorization_code".to_string()),
            ("code", code.to_string()),
            ("redirect_uri", redirect_uri.to_string()),
            ("code_verifier", code_verifier.to_string()),
        ];
        self.request_tokens(settings, params).await
    }

    async fn get_user_info(
        &self,
        settings: &GoogleProviderSettings,
        access_token: &str,
    ) -> Result<GoogleUserInfo, ProviderFailure> {
        let response = self
            .http
            .get(&settings.userinfo_uri)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ProviderFailure::internal(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ProviderFailure::internal(format!(
                "Google 사용자 정보 조회 실패: {}",
                error_text
            )));
        }

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| ProviderFailure::internal(format!("Google 사용자 정보 파싱 실패: {}", e)))
    }
}

#[async_trait]
impl IdentityProvider for GoogleLoopbackProvider {
    fn provider(&self) -> AuthProvider {
        AuthProvider::Google
    }

    fn is_available(&self) -> bool {
        self.settings.is_some()
    }

    async fn open_popup(&self) -> Result<ProviderAccount, ProviderFailure> {
        let settings = self.settings()?;

        let listener = LoopbackListener::bind(settings.callback_port)
            .await
            .map_err(|e| ProviderFailure::internal(format!("콜백 리스너 바인딩 실패: {}", e)))?;
        let redirect_uri = listener.redirect_uri();
        let request = Self::authorization_request(settings, &redirect_uri);

        log::info!("🌐 브라우저에서 Google 로그인 창을 엽니다");
        self.browser.open(&request.url).map_err(|e| {
            ProviderFailure::popup_blocked(format!("브라우저를 열 수 없습니다: {}", e))
        })?;

        let params = listener
            .wait_for_callback(settings.callback_timeout)
            .await
            .map_err(|e| ProviderFailure::internal(format!("콜백 수신 실패: {}", e)))?
            .ok_or_else(|| ProviderFailure::popup_closed("로그인 창이 시간 내에 완료되지 않았습니다"))?;

        if let Some(error) = params.error {
            let message = params.error_description.unwrap_or_else(|| error.clone());
            return Err(ProviderFailure::new(error, message));
        }

        if params.state.as_deref() != Some(request.state.as_str()) {
            log::warn!("🚫 OAuth state 불일치");
            return Err(ProviderFailure::internal("OAuth state 값이 일치하지 않습니다"));
        }

        let code = params
            .code
            .filter(|c| !c.is_empty())
            .ok_or_else(|| ProviderFailure::internal("인가 코드가 없습니다"))?;

        let tokens = self
            .exchange_code(settings, &code, &redirect_uri, &request.code_verifier)
            .await?;
        let user = self.get_user_info(settings, &tokens.access_token).await?;

        log::debug!("✅ Google 계정 확인: {}", user.sub);

        Ok(ProviderAccount {
            subject: user.sub,
            email: user.email,
            display_name: user.name,
            photo_url: user.picture,
            credential: ProviderCredential {
                id_token: tokens.id_token,
                refresh_token: tokens.refresh_token,
            },
        })
    }

    /// 리프레시 토큰이 있으면 새 ID 토큰을 발급받고,
    /// 없으면 방금 코드 교환으로 발급된 ID 토큰을 사용합니다.
    async fn fresh_id_token(&self, account: &ProviderAccount) -> Result<String, ProviderFailure> {
        let settings = self.settings()?;

        if let Some(refresh_token) = &account.credential.refresh_token {
            let params = vec![
                ("grant_type", "refresh_token".to_string()),
                ("refresh_token", refresh_token.clone()),
            ];
            let tokens = self.request_tokens(settings, params).await?;
            return tokens
                .id_token
                .ok_or_else(|| ProviderFailure::internal("갱신 응답에 ID 토큰이 없습니다"));
        }

        account
            .credential
            .id_token
            .clone()
            .ok_or_else(|| ProviderFailure::internal("Google이 ID 토큰을 반환하지 않았습니다"))
    }
}
