//! # Identity Provider 결과 모델
//!
//! 한 번의 로그인 시도 동안만 존재하는 프로바이더 신원 정보와
//! 프로필 사진을 요청 본문에 직접 넣기 위한 인라인 표현을 정의합니다.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;

use crate::config::AuthProvider;
use crate::utils::string_utils::clean_optional_string;

/// Identity Provider가 반환한 신원 정보
///
/// 로그인 시도마다 한 번 생성되며 생성 후에는 변경되지 않습니다.
/// 백엔드 세션 교환이 끝나면 호출자에게 결과의 일부로 전달됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderIdentity {
    provider: AuthProvider,
    #[serde(skip_serializing)]
    id_token: String,
    email: Option<String>,
    display_name: Option<String>,
    photo_url: Option<String>,
}

impl ProviderIdentity {
    /// 프로필 필드는 앞뒤 공백을 제거하고, 빈 문자열은 값 없음으로 정규화합니다.
    pub fn new(
        provider: AuthProvider,
        id_token: impl Into<String>,
        email: Option<String>,
        display_name: Option<String>,
        photo_url: Option<String>,
    ) -> Self {
        Self {
            provider,
            id_token: id_token.into(),
            email: clean_optional_string(email),
            display_name: clean_optional_string(display_name),
            photo_url: clean_optional_string(photo_url),
        }
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }
}

/// 바이너리 리소스의 자기 기술적(self-describing) 인라인 표현
///
/// MIME 타입과 base64로 인코딩된 바이트를 함께 보관하며,
/// `data:` URL 형식으로 렌더링됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineAsset {
    mime_type: String,
    data: String,
}

impl InlineAsset {
    /// 원본 바이트를 base64(표준 알파벳, 패딩 포함)로 인코딩하여 생성합니다.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// base64 인코딩된 데이터
    pub fn data(&self) -> &str {
        &self.data
    }

    /// `data:<mime>;base64,<data>` 형식의 문자열
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}
