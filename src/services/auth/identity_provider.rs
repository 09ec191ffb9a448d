//! # Identity Provider Adapter
//!
//! 외부 Identity Provider의 팝업 기반 OAuth 플로우를 감싸는 능력(capability) 인터페이스입니다.
//! 어떤 OAuth SDK든 [`IdentityProvider`]를 구현하면 로그인 파이프라인에 연결할 수 있습니다.
//!
//! ## 플로우
//!
//! ```text
//! is_available() ──► open_popup() ──► fresh_id_token(account) ──► ProviderIdentity
//!                      (사용자 상호작용)      (항상 새로 발급)
//! ```
//!
//! ## 에러 매핑
//!
//! | 프로바이더 코드 | AuthError |
//! |-----------------|-----------|
//! | `auth/popup-closed-by-user`, `auth/cancelled-popup-request`, `access_denied` | `UserCancelled` |
//! | `auth/popup-blocked` | `PopupBlocked` |
//! | `auth/account-exists-with-different-credential` | `AccountConflict` |
//! | 그 외 | `ProviderError(message)` |

use async_trait::async_trait;

use crate::config::AuthProvider;
use crate::domain::models::identity::ProviderIdentity;
use crate::errors::AuthError;

pub const POPUP_CLOSED_BY_USER: &str = "auth/popup-closed-by-user";
pub const CANCELLED_POPUP_REQUEST: &str = "auth/cancelled-popup-request";
pub const ACCESS_DENIED: &str = "access_denied";
pub const POPUP_BLOCKED: &str = "auth/popup-blocked";
pub const ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL: &str =
    "auth/account-exists-with-different-credential";
pub const INTERNAL_ERROR: &str = "auth/internal-error";

/// 프로바이더가 보고한 실패 (프로바이더 고유 코드 + 메시지)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub code: String,
    pub message: String,
}

impl ProviderFailure {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn popup_closed(message: impl Into<String>) -> Self {
        Self::new(POPUP_CLOSED_BY_USER, message)
    }

    pub fn popup_blocked(message: impl Into<String>) -> Self {
        Self::new(POPUP_BLOCKED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl From<ProviderFailure> for AuthError {
    fn from(failure: ProviderFailure) -> Self {
        match failure.code.as_str() {
            POPUP_CLOSED_BY_USER | CANCELLED_POPUP_REQUEST | ACCESS_DENIED => AuthError::UserCancelled,
            POPUP_BLOCKED => AuthError::PopupBlocked,
            ACCOUNT_EXISTS_WITH_DIFFERENT_CREDENTIAL => AuthError::AccountConflict,
            _ => AuthError::ProviderError(failure.message),
        }
    }
}

/// 로그인 창에서 돌아온 사용자 계정
///
/// `credential`은 프로바이더가 새 ID 토큰을 발급할 때 사용하는 불투명 값입니다.
#[derive(Debug, Clone, Default)]
pub struct ProviderAccount {
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub credential: ProviderCredential,
}

/// 프로바이더가 발급한 자격 증명 묶음
#[derive(Debug, Clone, Default)]
pub struct ProviderCredential {
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Identity Provider 능력 인터페이스
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    fn provider(&self) -> AuthProvider;

    /// 실행 환경이 이 프로바이더의 전제 조건을 갖추었는지 여부
    fn is_available(&self) -> bool;

    /// 로그인 창을 열고 사용자 상호작용이 끝날 때까지 기다립니다.
    async fn open_popup(&self) -> Result<ProviderAccount, ProviderFailure>;

    /// 계정에 대한 새 ID 토큰을 발급받습니다. 캐시된 토큰을 반환해서는 안 됩니다.
    async fn fresh_id_token(&self, account: &ProviderAccount) -> Result<String, ProviderFailure>;
}

/// 프로바이더 로그인을 수행하고 [`ProviderIdentity`]를 만듭니다.
///
/// # Errors
///
/// 프로바이더 실패는 위 매핑 표에 따라 변환됩니다.
/// 빈 ID 토큰은 `ProviderError`입니다.
pub async fn sign_in(provider: &dyn IdentityProvider) -> Result<ProviderIdentity, AuthError> {
    let account = provider.open_popup().await?;
    let id_token = provider.fresh_id_token(&account).await?;

    if id_token.trim().is_empty() {
        return Err(AuthError::ProviderError(
            "프로바이더가 빈 ID 토큰을 반환했습니다".to_string(),
        ));
    }

    Ok(ProviderIdentity::new(
        provider.provider(),
        id_token,
        account.email,
        account.display_name,
        account.photo_url,
    ))
}
