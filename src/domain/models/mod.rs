//! # Domain Models
//!
//! - [`identity`] - Identity Provider 신원 정보와 인라인 에셋
//! - [`session`] - 영속 세션과 로그인 결과
//! - [`push`] - 푸시 메시지와 알림 명세

pub mod identity;
pub mod push;
pub mod session;

pub use identity::*;
pub use push::*;
pub use session::*;
