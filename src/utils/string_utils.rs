//! # 문자열 유틸리티
//!
//! 프로필 필드 정리, URL 조합, 느슨한 JSON 값 해석 등 공통 문자열 처리 함수들입니다.

use serde::Deserialize;

/// 앞뒤 공백을 제거하고, 빈 문자열이면 `None`을 반환합니다.
///
/// 프로바이더가 빈 이름이나 빈 이메일을 돌려주는 경우를
/// "값 없음"으로 통일하는 데 사용합니다.
///
/// # 예제
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  Ana  ".into())), Some("Ana".into()));
/// assert_eq!(clean_optional_string(Some("   ".into())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// serde `deserialize_with`용: 빈 문자열과 `null`을 모두 `None`으로 처리합니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// serde `deserialize_with`용: `true`/`false` 불리언과 `"true"`/`"false"` 문자열을 모두 허용합니다.
///
/// 푸시 메시지의 `data` 필드는 문자열 맵으로 전달되는 경우가 많아
/// 불리언 값이 문자열로 들어옵니다.
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    Ok(match Option::<BoolOrString>::deserialize(deserializer)? {
        Some(BoolOrString::Bool(b)) => Some(b),
        Some(BoolOrString::Text(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        None => None,
    })
}

/// 기본 URL과 경로를 `/` 하나로 이어 붙입니다.
///
/// # 예제
///
/// ```rust,ignore
/// assert_eq!(join_url("http://api/", "/auth/login-social"), "http://api/auth/login-social");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
