//! # Configuration Module
//!
//! 로그인 클라이언트의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정은 환경 변수 기반이며, `.env` 파일은 바이너리 시작 시
//! `PROFILE` 값에 따라 로드됩니다.
//!
//! ## 모듈 구성
//!
//! - [`app_config`] - 실행 환경, 백엔드 주소, 타임아웃, 세션 파일, 푸시 알림 문구
//! - [`auth_config`] - Google OAuth, 콜백 리스너, 인증 프로바이더
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 백엔드
//! export SAFEYOU_API_URL="https://api.safeyou.com.br"
//! export SAFEYOU_EXCHANGE_TIMEOUT_SECS="15"   # 선택, 기본값 없음
//!
//! # Google 로그인
//! export GOOGLE_CLIENT_ID="your-client-id"
//!
//! # 세션 파일 (선택)
//! export SAFEYOU_SESSION_FILE="$HOME/.safe-you/session.json"
//! ```

pub mod app_config;
pub mod auth_config;

pub use app_config::*;
pub use auth_config::*;
