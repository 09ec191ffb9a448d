//! 애플리케이션 및 백엔드 연결 설정 관리 모듈
//!
//! 실행 환경, 백엔드 API 주소, 타임아웃, 세션 파일 위치, 푸시 알림 기본 문구를 관리합니다.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        Self::from_str(&env::var("ENVIRONMENT").unwrap_or_else(|_| "production".to_string()))
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    /// 환경별 기본 로그 필터
    pub fn default_log_filter(&self) -> &'static str {
        match self {
            Environment::Development | Environment::Test => "debug",
            Environment::Staging | Environment::Production => "info,safe_you_client=debug",
        }
    }
}

/// 백엔드 API 연결 설정
pub struct BackendConfig;

impl BackendConfig {
    /// 백엔드 API 기본 주소 (끝의 `/`는 제거됨)
    pub fn api_url() -> String {
        env::var("SAFEYOU_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    /// 세션 교환 요청 타임아웃
    ///
    /// 기본값은 없습니다. 설정되지 않으면 타임아웃 없이 응답을 기다립니다.
    pub fn exchange_timeout() -> Option<Duration> {
        parse_secs(env::var("SAFEYOU_EXCHANGE_TIMEOUT_SECS").ok())
    }
}

pub const DEFAULT_ASSET_MAX_BYTES: usize = 5 * 1024 * 1024;

/// 프로필 사진 변환 설정
pub struct AssetConfig;

impl AssetConfig {
    /// 프로필 사진 다운로드 타임아웃 (기본값 없음)
    pub fn fetch_timeout() -> Option<Duration> {
        parse_secs(env::var("ASSET_FETCH_TIMEOUT_SECS").ok())
    }

    /// 인라인으로 변환할 프로필 사진의 최대 크기 (기본값: 5 MiB)
    pub fn max_bytes() -> usize {
        env::var("ASSET_MAX_BYTES")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(DEFAULT_ASSET_MAX_BYTES)
    }
}

/// 세션 저장소 설정
pub struct StorageConfig;

impl StorageConfig {
    /// 세션 파일 경로
    ///
    /// `SAFEYOU_SESSION_FILE`이 없으면 OS 설정 디렉터리 아래
    /// `safe-you/session.json`을 사용합니다.
    pub fn session_file() -> PathBuf {
        if let Ok(path) = env::var("SAFEYOU_SESSION_FILE") {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("safe-you")
            .join("session.json")
    }
}

/// 푸시 알림 기본 문구 설정
pub struct PushConfig;

impl PushConfig {
    pub fn default_title() -> String {
        env::var("PUSH_DEFAULT_TITLE").unwrap_or_else(|_| "Safe You".to_string())
    }

    pub fn default_body() -> String {
        env::var("PUSH_DEFAULT_BODY")
            .unwrap_or_else(|_| "Você tem uma nova notificação".to_string())
    }

    /// 알림의 상대 경로 `url`을 해석할 웹 앱 주소 (기본값: `http://localhost:3000`)
    pub fn app_origin() -> String {
        env::var("SAFEYOU_APP_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
    }
}

fn parse_secs(value: Option<String>) -> Option<Duration> {
    match value?.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(e) => {
            log::warn!("타임아웃 값 파싱 실패: {}. 타임아웃 없이 진행", e);
            None
        }
    }
}
