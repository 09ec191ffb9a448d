//! 푸시 알림 경계 모듈
//!
//! 백그라운드 메시지 표시와 알림 클릭 처리를 담당합니다.

pub mod notification_service;

pub use notification_service::{NotificationPresenter, PushNotificationService, WindowClients};
