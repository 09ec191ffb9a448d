//! # 푸시 알림 모델
//!
//! 클라우드 메시징 벤더가 전달하는 백그라운드 메시지와
//! 화면에 표시할 알림 명세를 정의합니다.
//!
//! ## 메시지 형식
//!
//! ```json
//! {
//!   "notification": { "title": "Consulta pronta", "body": "Seu relatório está disponível" },
//!   "data": { "tag": "report-42", "requireInteraction": "true", "url": "/relatorios/42" }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::utils::string_utils::{deserialize_lenient_bool, deserialize_optional_string};

/// 백그라운드 푸시 메시지
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushMessage {
    #[serde(default)]
    pub notification: Option<PushNotificationContent>,
    #[serde(default)]
    pub data: Option<PushData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushNotificationContent {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushData {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    pub require_interaction: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub url: Option<String>,
}

/// 실제로 표시할 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSpec {
    pub title: String,
    pub body: String,
    pub tag: Option<String>,
    pub require_interaction: bool,
    /// 알림 클릭 시 이동할 대상 URL
    pub url: String,
}

/// 브라우저/앱 창 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowClient {
    pub id: String,
    pub url: String,
}

/// 알림 클릭 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// 대상 URL과 일치하는 기존 창에 포커스
    Focused(String),
    /// 새 창을 열었음
    Opened(String),
}
