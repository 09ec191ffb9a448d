//! 소셜 로그인 서비스 모듈
//!
//! Identity Provider 로그인부터 애플리케이션 세션 저장까지의 파이프라인을 구성하는
//! 서비스들을 제공합니다. 각 단계는 trait으로 분리되어 있어 테스트에서 교체할 수 있습니다.
//!
//! # Features
//!
//! - Google 로그인 (시스템 브라우저 + 루프백 리디렉션 + PKCE)
//! - 프로필 사진 인라인 변환 (best-effort)
//! - 백엔드 세션 교환 (`POST /auth/login-social`)
//! - 중복 로그인 방지와 단계별 에러 매핑
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::services::auth::*;
//!
//! let http = reqwest::Client::new();
//! let service = SocialSignInService::new(
//!     Arc::new(GoogleLoopbackProvider::from_env(http.clone())),
//!     Arc::new(HttpAssetNormalizer::from_env()),
//!     Arc::new(HttpSessionExchange::from_env(http)),
//!     store,
//! );
//!
//! let outcome = service.sign_in_with_google().await?;
//! ```

pub mod asset_normalizer;
pub mod google_identity_provider;
pub mod identity_provider;
pub mod loopback;
pub mod pkce;
pub mod session_exchange;
pub mod social_sign_in;

pub use asset_normalizer::{AssetNormalizer, HttpAssetNormalizer};
pub use google_identity_provider::{BrowserLauncher, GoogleLoopbackProvider, SystemBrowser};
pub use identity_provider::{IdentityProvider, ProviderAccount, ProviderCredential, ProviderFailure};
pub use session_exchange::{HttpSessionExchange, SessionExchange};
pub use social_sign_in::SocialSignInService;
