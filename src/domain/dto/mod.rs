//! # Data Transfer Objects
//!
//! 외부 HTTP 엔드포인트와 주고받는 요청/응답 본문입니다.
//!
//! - [`session_exchange`] - 백엔드 `POST /auth/login-social`
//! - [`google_oauth_response`] - Google OAuth / OpenID Connect 엔드포인트

pub mod google_oauth_response;
pub mod session_exchange;

pub use google_oauth_response::*;
pub use session_exchange::*;
