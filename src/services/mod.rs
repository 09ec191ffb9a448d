//! 클라이언트 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 도메인별로 모듈화되어 소셜 로그인, 인증된 API 호출, 푸시 알림 처리를 담당합니다.
//! 서비스 간 의존성은 생성자에서 `Arc<dyn Trait>`으로 명시적으로 주입합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::{api::ApiClient, auth::SocialSignInService};
//!
//! let outcome = sign_in_service.sign_in_with_google().await?;
//! let profile = ApiClient::from_env(store).get("/usuarios/me").send().await?;
//! ```

pub mod api;
pub mod auth;
pub mod push;
