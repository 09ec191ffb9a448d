//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 선택 문자열 정리, 관대한 역직렬화, URL 결합
//! - [`display_terminal`] - 터미널 출력 포맷팅 함수들

pub mod string_utils;
pub mod display_terminal;
