//! Safe You 소셜 로그인 클라이언트
//!
//! Google 계정으로 로그인하고, 신뢰할 수 있는 백엔드와 세션을 교환한 뒤
//! 애플리케이션 세션을 로컬에 저장하는 클라이언트 라이브러리입니다.
//! 저장된 세션은 이후 API 요청의 Bearer 토큰으로 사용됩니다.
//!
//! # Features
//!
//! - **Identity Provider**: 시스템 브라우저 + 루프백 리디렉션 기반 Google 로그인 (PKCE)
//! - **Asset Normalizer**: 프로필 사진을 `data:` URL로 변환 (실패해도 로그인 계속)
//! - **Session Exchange**: `POST /auth/login-social`
//! - **Session Store**: 원자적 배치 쓰기, 기기 신뢰 토큰 보존
//! - **API Client**: 저장된 세션 토큰을 자동으로 첨부
//! - **Push**: 백그라운드 알림 표시와 클릭 처리
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────┐
//! │ SocialSignInService │ ← 로그인 오케스트레이션
//! └─────────────────────┘
//!     │        │       │
//!     ▼        ▼       ▼
//! ┌────────┐┌───────┐┌──────────┐
//! │Identity││ Asset ││ Session  │
//! │Provider││Normal.││ Exchange │
//! └────────┘└───────┘└──────────┘
//!          │
//!          ▼
//! ┌─────────────────────┐        ┌───────────┐
//! │    SessionStore     │ ◄───── │ ApiClient │
//! └─────────────────────┘        └───────────┘
//!          │
//!          ▼
//! ┌─────────────────────┐
//! │ FileStorage (JSON)  │
//! └─────────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use safe_you_client::services::auth::*;
//! use safe_you_client::storage::{FileStorage, SessionStore};
//!
//! let store = SessionStore::new(Arc::new(FileStorage::open("session.json")?));
//! let http = reqwest::Client::new();
//! let service = SocialSignInService::new(
//!     Arc::new(GoogleLoopbackProvider::from_env(http.clone())),
//!     Arc::new(HttpAssetNormalizer::from_env()),
//!     Arc::new(HttpSessionExchange::from_env(http)),
//!     store,
//! );
//!
//! let outcome = service.sign_in_with_google().await?;
//! println!("roles: {:?}", outcome.roles);
//! ```

pub mod config;
pub mod domain;
pub mod errors;
pub mod services;
pub mod storage;
pub mod utils;
