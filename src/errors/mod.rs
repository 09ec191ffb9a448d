//! 에러 타입 모듈
//!
//! - [`errors::AuthError`] - 로그인 파이프라인 에러 분류
//! - [`errors::StorageError`] - 세션 저장소 계층 에러

pub mod errors;

pub use errors::*;
