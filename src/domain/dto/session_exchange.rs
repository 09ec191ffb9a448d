//! 백엔드 세션 교환 DTO 모듈
//!
//! `POST /auth/login-social` 요청/응답 본문을 정의합니다.
//!
//! ## 요청
//!
//! ```json
//! {
//!   "provider": "GOOGLE",
//!   "idToken": "eyJhbGciOiJSUzI1NiIs...",
//!   "email": "ana@example.com",
//!   "nome": "Ana Souza",
//!   "foto": "data:image/jpeg;base64,/9j/4AAQ..."
//! }
//! ```
//!
//! ## 응답
//!
//! ```json
//! { "token": "app-session-token", "roles": ["USER"], "newTrustedDeviceToken": "dev123" }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::models::identity::{InlineAsset, ProviderIdentity};

/// 세션 교환 요청 본문
///
/// 값이 없는 필드는 생략하지 않고 `null`로 직렬화됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionExchangeRequest {
    pub provider: AuthProvider,
    #[serde(rename = "idToken")]
    pub id_token: String,
    pub email: Option<String>,
    #[serde(rename = "nome")]
    pub display_name: Option<String>,
    /// 프로필 사진의 `data:` URL
    #[serde(rename = "foto")]
    pub photo: Option<String>,
}

impl SessionExchangeRequest {
    pub fn from_identity(identity: &ProviderIdentity, photo: Option<&InlineAsset>) -> Self {
        Self {
            provider: identity.provider(),
            id_token: identity.id_token().to_string(),
            email: identity.email().map(str::to_string),
            display_name: identity.display_name().map(str::to_string),
            photo: photo.map(InlineAsset::to_data_url),
        }
    }
}

/// 세션 교환 응답 본문
///
/// `roles`의 순서는 중복 제거나 정렬 없이 그대로 저장됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionExchangeResponse {
    pub token: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(rename = "newTrustedDeviceToken", default)]
    pub new_trusted_device_token: Option<String>,
}

/// 백엔드 에러 응답 본문 (`{"message": "..."}`)
#[derive(Debug, Clone, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl BackendErrorBody {
    /// 응답 본문에서 사용자에게 보여줄 메시지를 추출합니다.
    ///
    /// JSON이 아니거나 `message`가 비어 있으면 `None`을 반환합니다.
    pub fn extract_message(body: &str) -> Option<String> {
        serde_json::from_str::<BackendErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_format_with_absent_fields() {
        let identity = ProviderIdentity::new(AuthProvider::Google, "tok-1", None, None, None);
        let request = SessionExchangeRequest::from_identity(&identity, None);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "provider": "GOOGLE",
                "idToken": "tok-1",
                "email": null,
                "nome": null,
                "foto": null
            })
        );
    }

    #[test]
    fn test_request_carries_inline_photo() {
        let identity = ProviderIdentity::new(
            AuthProvider::Google,
            "tok-2",
            Some("ana@example.com".to_string()),
            Some("Ana Souza".to_string()),
            Some("https://lh3.googleusercontent.com/a/photo".to_string()),
        );
        let asset = InlineAsset::from_bytes("image/jpeg", b"jpg");
        let request = SessionExchangeRequest::from_identity(&identity, Some(&asset));

        assert_eq!(request.display_name.as_deref(), Some("Ana Souza"));
        assert_eq!(request.photo.as_deref(), Some("data:image/jpeg;base64,anBn"));
    }

    #[test]
    fn test_response_preserves_role_order() {
        let json = r#"{"token":"abc","roles":["USER","ADMIN","USER"]}"#;
        let response: SessionExchangeResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.roles, vec!["USER", "ADMIN", "USER"]);
        assert_eq!(response.new_trusted_device_token, None);
    }

    #[test]
    fn test_extract_backend_message() {
        assert_eq!(
            BackendErrorBody::extract_message(r#"{"message":"invalid token"}"#),
            Some("invalid token".to_string())
        );
        assert_eq!(BackendErrorBody::extract_message(r#"{"message":""}"#), None);
        assert_eq!(BackendErrorBody::extract_message(r#"{"error":"x"}"#), None);
        assert_eq!(BackendErrorBody::extract_message("<html>502</html>"), None);
    }
}
