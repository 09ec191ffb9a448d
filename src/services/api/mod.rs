//! 인증된 백엔드 API 호출 모듈

pub mod api_client;

pub use api_client::ApiClient;
