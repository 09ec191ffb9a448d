//! 소셜 로그인 파이프라인 전역에서 사용하는 에러 시스템
//!
//! 로그인 플로우(Identity Provider → 백엔드 세션 교환 → 세션 저장)에서
//! 발생할 수 있는 모든 실패를 하나의 열거형으로 표현합니다.
//! `thiserror`를 사용하여 타입 안전하고 일관된 에러 처리를 제공합니다.
//!
//! ## 에러 분류
//!
//! | AuthError | kind | 예상된 실패 | 사용 시나리오 |
//! |-----------|------|-------------|---------------|
//! | `UserCancelled` | `user_cancelled` | ✅ | 사용자가 로그인 창을 닫음 |
//! | `PopupBlocked` | `popup_blocked` | ✅ | 브라우저/팝업 실행 불가 |
//! | `AccountConflict` | `account_conflict` | ❌ | 다른 자격 증명으로 가입된 계정 |
//! | `ProviderUnavailable` | `provider_unavailable` | ❌ | 프로바이더 설정 누락 |
//! | `ProviderError` | `provider_error` | ❌ | 기타 프로바이더 오류 |
//! | `NetworkError` | `network_error` | ❌ | 백엔드 통신 실패/타임아웃 |
//! | `BackendRejected` | `backend_rejected` | ❌ | 백엔드가 2xx 이외의 상태 반환 |
//! | `SignInInProgress` | `sign_in_in_progress` | ✅ | 중복 로그인 시도 |
//! | `Storage` | `storage` | ❌ | 세션 저장소 쓰기/읽기 실패 |
//!
//! 프로필 사진 변환(Asset Normalizer) 실패는 이 분류에 포함되지 않습니다.
//! 해당 실패는 로그만 남기고 흡수됩니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::errors::errors::AuthError;
//!
//! match service.sign_in_with_google().await {
//!     Ok(outcome) => println!("로그인 성공: {:?}", outcome.roles),
//!     Err(e) if e.is_expected() => println!("{}", e.user_message()),
//!     Err(e) => eprintln!("로그인 실패 [{}]: {}", e.kind(), e.user_message()),
//! }
//! ```

use thiserror::Error;

/// 백엔드가 메시지를 제공하지 않았을 때 사용하는 기본 메시지
pub const DEFAULT_BACKEND_MESSAGE: &str = "Erro ao fazer login com Google. Tente novamente.";

/// 소셜 로그인 파이프라인 에러 타입
///
/// 각 변형은 UI 계층이 프로바이더별 코드를 해석하지 않고도
/// 올바른 메시지를 보여줄 수 있을 만큼의 정보를 담고 있습니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// 사용자가 로그인 창을 닫거나 인증을 거부함
    #[error("Sign-in cancelled by user")]
    UserCancelled,

    /// 로그인 창(팝업/브라우저)을 열 수 없음
    #[error("Sign-in popup was blocked")]
    PopupBlocked,

    /// 같은 이메일로 다른 자격 증명의 계정이 이미 존재함
    #[error("Account exists with a different credential")]
    AccountConflict,

    /// 실행 환경에 프로바이더 사용 전제 조건이 없음 (예: 클라이언트 ID 미설정)
    #[error("Identity provider unavailable")]
    ProviderUnavailable,

    /// 기타 프로바이더 오류
    #[error("Identity provider error: {0}")]
    ProviderError(String),

    /// 백엔드와의 통신 실패 (연결 실패, 타임아웃, 잘못된 응답 본문)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// 백엔드가 2xx 이외의 상태 코드로 응답함
    #[error("Backend rejected sign-in ({status}): {message}")]
    BackendRejected { status: u16, message: String },

    /// 이미 진행 중인 로그인이 있음
    #[error("Another sign-in is already in progress")]
    SignInInProgress,

    /// 세션 저장소 오류
    #[error("Session storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// 로깅과 분기 처리를 위한 안정적인 에러 종류 문자열을 반환합니다.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::UserCancelled => "user_cancelled",
            AuthError::PopupBlocked => "popup_blocked",
            AuthError::AccountConflict => "account_conflict",
            AuthError::ProviderUnavailable => "provider_unavailable",
            AuthError::ProviderError(_) => "provider_error",
            AuthError::NetworkError(_) => "network_error",
            AuthError::BackendRejected { .. } => "backend_rejected",
            AuthError::SignInInProgress => "sign_in_in_progress",
            AuthError::Storage(_) => "storage",
        }
    }

    /// 자주 발생하며 사용자에게 경고할 필요가 없는 실패인지 여부
    ///
    /// 취소와 팝업 차단은 재시도를 허용하는 정상적인 결과로 취급합니다.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            AuthError::UserCancelled | AuthError::PopupBlocked | AuthError::SignInInProgress
        )
    }

    /// 사용자에게 그대로 보여줄 수 있는 메시지를 반환합니다.
    ///
    /// 백엔드 거부의 경우 백엔드가 보낸 메시지를 그대로 사용합니다.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::UserCancelled => "Login cancelado.".to_string(),
            AuthError::PopupBlocked => {
                "Não foi possível abrir a janela de login. Verifique o bloqueador de pop-ups.".to_string()
            }
            AuthError::AccountConflict => {
                "Já existe uma conta com este e-mail usando outro método de login.".to_string()
            }
            AuthError::ProviderUnavailable => {
                "Login com Google indisponível no momento.".to_string()
            }
            AuthError::ProviderError(_) => DEFAULT_BACKEND_MESSAGE.to_string(),
            AuthError::NetworkError(_) => {
                "Falha de conexão com o servidor. Verifique sua internet.".to_string()
            }
            AuthError::BackendRejected { message, .. } => message.clone(),
            AuthError::SignInInProgress => "Login já em andamento.".to_string(),
            AuthError::Storage(_) => {
                "Não foi possível salvar sua sessão neste dispositivo.".to_string()
            }
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AuthResult<T> = Result<T, AuthError>;

/// 세션 저장소 계층 에러
#[derive(Error, Debug)]
pub enum StorageError {
    /// 파일 시스템 I/O 실패
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 저장된 값 직렬화/역직렬화 실패
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 잠금이 오염됨 (다른 스레드가 쓰기 도중 패닉)
    #[error("Storage lock poisoned")]
    Poisoned,
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

/// 푸시 알림 처리 에러
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PushError {
    /// 알림 표시 실패 (권한 없음 등)
    #[error("Failed to show notification: {0}")]
    Presenter(String),

    /// 창 포커스/열기 실패
    #[error("Window client error: {0}")]
    Window(String),

    /// 메시지 본문 파싱 실패
    #[error("Invalid push payload: {0}")]
    InvalidPayload(String),
}

/// 외부 라이브러리 에러를 AuthError로 변환하는 확장 trait
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 네트워크 에러로 변환합니다.
    fn network_context(self, msg: &str) -> AuthResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn network_context(self, msg: &str) -> AuthResult<T> {
        self.map_err(|e| AuthError::NetworkError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_errors() {
        assert!(AuthError::UserCancelled.is_expected());
        assert!(AuthError::PopupBlocked.is_expected());
        assert!(!AuthError::AccountConflict.is_expected());
        assert!(!AuthError::NetworkError("timeout".to_string()).is_expected());
    }

    #[test]
    fn test_backend_rejected_surfaces_backend_message() {
        let error = AuthError::BackendRejected {
            status: 401,
            message: "invalid token".to_string(),
        };

        assert_eq!(error.kind(), "backend_rejected");
        assert_eq!(error.user_message(), "invalid token");
        assert!(error.to_string().contains("401"));
    }

    #[test]
    fn test_every_kind_is_distinct() {
        let errors = vec![
            AuthError::UserCancelled,
            AuthError::PopupBlocked,
            AuthError::AccountConflict,
            AuthError::ProviderUnavailable,
            AuthError::ProviderError("x".to_string()),
            AuthError::NetworkError("x".to_string()),
            AuthError::BackendRejected { status: 500, message: "x".to_string() },
            AuthError::SignInInProgress,
            AuthError::Storage("x".to_string()),
        ];

        let mut kinds: Vec<&str> = errors.iter().map(|e| e.kind()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());

        for error in &errors {
            assert!(!error.user_message().is_empty());
        }
    }

    #[test]
    fn test_storage_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error: AuthError = StorageError::from(io).into();

        match error {
            AuthError::Storage(msg) => assert!(msg.contains("read-only")),
            other => panic!("Expected Storage, got {:?}", other),
        }
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("connection reset");
        let app_result = result.network_context("백엔드 요청 실패");

        if let Err(AuthError::NetworkError(msg)) = app_result {
            assert!(msg.contains("백엔드 요청 실패"));
            assert!(msg.contains("connection reset"));
        } else {
            panic!("Expected NetworkError");
        }
    }
}
