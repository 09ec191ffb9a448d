//! # 푸시 알림 처리
//!
//! 클라우드 메시징 벤더가 전달한 백그라운드 메시지를 알림으로 표시하고,
//! 알림 클릭 시 대상 URL의 창으로 이동합니다.
//!
//! 실제 표시와 창 제어는 실행 환경이 제공하는 [`NotificationPresenter`],
//! [`WindowClients`] 구현체에 위임합니다.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::config::PushConfig;
use crate::domain::models::push::{ClickOutcome, NotificationSpec, PushMessage, WindowClient};
use crate::errors::PushError;

const DEFAULT_TARGET_URL: &str = "/";

/// 알림을 화면에 표시하는 실행 환경
#[async_trait]
pub trait NotificationPresenter: Send + Sync {
    async fn show(&self, notification: &NotificationSpec) -> Result<(), PushError>;
}

/// 열려 있는 창 목록과 창 제어
#[async_trait]
pub trait WindowClients: Send + Sync {
    async fn windows(&self) -> Vec<WindowClient>;

    async fn focus(&self, id: &str) -> Result<(), PushError>;

    async fn open_window(&self, url: &str) -> Result<(), PushError>;
}

pub struct PushNotificationService {
    presenter: Arc<dyn NotificationPresenter>,
    windows: Arc<dyn WindowClients>,
    default_title: String,
    default_body: String,
    /// 상대 경로 URL의 기준 주소. 없으면 URL을 문자열 그대로 비교합니다.
    origin: Option<Url>,
}

impl PushNotificationService {
    /// 기본 제목/본문은 `PUSH_DEFAULT_TITLE`, `PUSH_DEFAULT_BODY`에서,
    /// 웹 앱 주소는 `SAFEYOU_APP_URL`에서 읽습니다.
    pub fn new(presenter: Arc<dyn NotificationPresenter>, windows: Arc<dyn WindowClients>) -> Self {
        let origin = PushConfig::app_origin();
        let origin = match Url::parse(&origin) {
            Ok(url) => Some(url),
            Err(e) => {
                log::warn!("⚠️ SAFEYOU_APP_URL 파싱 실패 ({}): {}", origin, e);
                None
            }
        };

        Self {
            presenter,
            windows,
            default_title: PushConfig::default_title(),
            default_body: PushConfig::default_body(),
            origin,
        }
    }

    /// 절대 URL은 그대로, 상대 경로는 웹 앱 주소 기준으로 해석합니다.
    fn resolve(&self, url: &str) -> Option<Url> {
        Url::parse(url)
            .ok()
            .or_else(|| self.origin.as_ref()?.join(url).ok())
    }

    fn same_target(&self, window_url: &str, target: &str) -> bool {
        match (self.resolve(window_url), self.resolve(target)) {
            (Some(window), Some(target)) => window == target,
            _ => window_url == target,
        }
    }

    /// JSON 본문을 [`PushMessage`]로 파싱합니다.
    pub fn parse_message(payload: &str) -> Result<PushMessage, PushError> {
        serde_json::from_str(payload).map_err(|e| PushError::InvalidPayload(e.to_string()))
    }

    /// 메시지에 기본값을 채워 표시할 알림을 만듭니다.
    pub fn notification_for(&self, message: &PushMessage) -> NotificationSpec {
        let content = message.notification.clone().unwrap_or_default();
        let data = message.data.clone().unwrap_or_default();

        NotificationSpec {
            title: content.title.unwrap_or_else(|| self.default_title.clone()),
            body: content.body.unwrap_or_else(|| self.default_body.clone()),
            tag: data.tag,
            require_interaction: data.require_interaction.unwrap_or(false),
            url: data.url.unwrap_or_else(|| DEFAULT_TARGET_URL.to_string()),
        }
    }

    /// 백그라운드 메시지를 알림으로 표시합니다.
    pub async fn handle_background_message(
        &self,
        message: &PushMessage,
    ) -> Result<NotificationSpec, PushError> {
        let notification = self.notification_for(message);

        log::debug!("🔔 백그라운드 알림 표시: {}", notification.title);
        self.presenter.show(&notification).await?;

        Ok(notification)
    }

    /// 대상 URL과 일치하는 창이 있으면 포커스하고, 없으면 새 창을 엽니다.
    ///
    /// 창 URL은 보통 절대 주소이고 알림 대상은 상대 경로이므로,
    /// 둘 다 웹 앱 주소 기준의 절대 URL로 해석한 뒤 비교합니다.
    pub async fn handle_notification_click(
        &self,
        notification: &NotificationSpec,
    ) -> Result<ClickOutcome, PushError> {
        let target = notification.url.as_str();

        let existing = self
            .windows
            .windows()
            .await
            .into_iter()
            .find(|w| self.same_target(&w.url, target));

        match existing {
            Some(window) => {
                self.windows.focus(&window.id).await?;
                Ok(ClickOutcome::Focused(window.id))
            }
            None => {
                let url = self
                    .resolve(target)
                    .map(String::from)
                    .unwrap_or_else(|| target.to_string());
                self.windows.open_window(&url).await?;
                log::debug!("🪟 새 창 열기: {}", url);
                Ok(ClickOutcome::Opened(url))
            }
        }
    }
}
