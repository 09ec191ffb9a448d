//! Safe You 로그인 CLI
//!
//! `safe-you login | logout | status`
//!
//! 시스템 브라우저로 Google 로그인을 진행하고, 백엔드와 교환한 세션을
//! 로컬 세션 파일에 저장합니다.

use std::process::ExitCode;
use std::sync::Arc;

use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};
use safe_you_client::config::{Environment, StorageConfig};
use safe_you_client::services::auth::{
    GoogleLoopbackProvider, HttpAssetNormalizer, HttpSessionExchange, SocialSignInService,
};
use safe_you_client::storage::{FileStorage, SessionStore};
use safe_you_client::utils::display_terminal::{
    print_auth_error, print_session_summary, print_sign_in_success,
};

const USAGE: &str = "uso: safe-you <login|logout|status>";

#[tokio::main]
async fn main() -> ExitCode {
    let (profile, loaded) = load_env_file();
    init_logging();
    report_env_file(&profile, loaded);

    let command = std::env::args().nth(1).unwrap_or_else(|| "status".to_string());

    let store = match open_session_store() {
        Ok(store) => store,
        Err(e) => {
            error!("❌ 세션 파일을 열 수 없습니다: {}", e);
            eprintln!("✗ Não foi possível abrir o arquivo de sessão: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match command.as_str() {
        "login" => {
            let service = build_sign_in_service(store);
            match service.sign_in_with_google().await {
                Ok(outcome) => {
                    print_sign_in_success(&outcome);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    print_auth_error(&e);
                    ExitCode::FAILURE
                }
            }
        }
        "logout" => {
            let service = build_sign_in_service(store.clone());
            match service.sign_out() {
                Ok(()) => {
                    print_session_summary(store.current_session().as_ref());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    print_auth_error(&e);
                    ExitCode::FAILURE
                }
            }
        }
        "status" => {
            print_session_summary(store.current_session().as_ref());
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("comando desconhecido: {}\n{}", other, USAGE);
            ExitCode::from(2)
        }
    }
}

/// `SAFEYOU_SESSION_FILE` 위치의 파일 저장소 위에 세션 저장소를 엽니다
fn open_session_store() -> Result<SessionStore, safe_you_client::errors::StorageError> {
    let path = StorageConfig::session_file();
    let storage = FileStorage::open(&path)?;

    info!("💾 세션 파일: {}", path.display());
    Ok(SessionStore::new(Arc::new(storage)))
}

/// 환경 변수 설정으로 로그인 파이프라인을 구성합니다
fn build_sign_in_service(store: SessionStore) -> SocialSignInService {
    let http = reqwest::Client::new();

    SocialSignInService::new(
        Arc::new(GoogleLoopbackProvider::from_env(http.clone())),
        Arc::new(HttpAssetNormalizer::from_env()),
        Arc::new(HttpSessionExchange::from_env(http)),
        store,
    )
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
///
/// `.env` 파일이 `RUST_LOG`를 정할 수 있도록 로거보다 먼저 호출되며,
/// 결과는 로거 초기화 후에 [`report_env_file`]로 기록합니다.
fn load_env_file() -> (String, Result<&'static str, dotenv::Error>) {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    (profile, loaded)
}

fn report_env_file(profile: &str, loaded: Result<&'static str, dotenv::Error>) {
    info!("Current profile: {}", profile);
    match loaded {
        Ok(file) => info!("{} 파일 로드 됨", file),
        Err(e) => warn!("환경 파일 로드 실패: {}", e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// `RUST_LOG`가 없으면 `ENVIRONMENT`별 기본 필터를 사용합니다.
/// (운영: `info,safe_you_client=debug`, 개발/테스트: `debug`)
fn init_logging() {
    let environment = Environment::current();
    env_logger::init_from_env(Env::default().default_filter_or(environment.default_log_filter()));
}
