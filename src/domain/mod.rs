//! # Domain Layer
//!
//! 로그인 파이프라인이 다루는 데이터 타입을 정의합니다.
//!
//! ```text
//! ProviderIdentity ──► SessionExchangeRequest ──► (backend) ──► SessionExchangeResponse
//!        │                      ▲                                      │
//!        └─ photo_url ──► InlineAsset                                  ▼
//!                                                              PersistedSession
//! ```
//!
//! - [`models`] - 파이프라인 내부 모델 (신원, 세션, 푸시 알림)
//! - [`dto`] - 외부 HTTP 요청/응답 본문

pub mod dto;
pub mod models;

pub use dto::*;
pub use models::*;
