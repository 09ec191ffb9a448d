//! 터미널 출력 포맷팅 유틸리티
//!
//! `safe-you` 바이너리가 로그인 결과와 세션 상태를 보여줄 때 사용합니다.

use crate::domain::models::session::{PersistedSession, SignInOutcome};
use crate::errors::AuthError;

/// 박스 형태로 둘러싸인 제목을 출력합니다
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                 Login concluído                  ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^50}║", title);
    println!("╚{}╝", border);
}

/// 세션 상태를 트리 형태의 줄 목록으로 만듭니다
///
/// 토큰 값은 출력하지 않습니다.
pub fn session_lines(session: Option<&PersistedSession>) -> Vec<String> {
    let Some(session) = session else {
        return vec!["   ├─ Estado: desconectado".to_string()];
    };

    let roles = if session.roles.is_empty() {
        "-".to_string()
    } else {
        session.roles.join(", ")
    };

    vec![
        "   ├─ Estado: conectado".to_string(),
        format!("   ├─ E-mail: {}", session.email.as_deref().unwrap_or("-")),
        format!("   ├─ Perfis: {}", roles),
        format!(
            "   └─ Dispositivo confiável: {}",
            if session.trusted_device_token.is_some() { "sim" } else { "não" }
        ),
    ]
}

pub fn print_session_summary(session: Option<&PersistedSession>) {
    print_boxed_title("Safe You - Sessão");
    for line in session_lines(session) {
        println!("{}", line);
    }
}

pub fn print_sign_in_success(outcome: &SignInOutcome) {
    print_boxed_title("Login concluído");
    println!(
        "   ├─ Conta: {}",
        outcome.identity.display_name().or(outcome.identity.email()).unwrap_or("-")
    );
    println!("   └─ Perfis: {}", outcome.roles.join(", "));
}

/// 사용자 메시지와 함께 에러 종류를 출력합니다
pub fn print_auth_error(error: &AuthError) {
    eprintln!("✗ {} [{}]", error.user_message(), error.kind());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_summary() {
        assert_eq!(session_lines(None), vec!["   ├─ Estado: desconectado"]);
    }

    #[test]
    fn test_signed_in_summary_hides_token() {
        let session = PersistedSession {
            token: "secret-token".to_string(),
            roles: vec!["USER".to_string(), "ADMIN".to_string()],
            is_logged_in: true,
            email: Some("ana@example.com".to_string()),
            trusted_device_token: None,
        };

        let lines = session_lines(Some(&session));

        assert_eq!(lines[1], "   ├─ E-mail: ana@example.com");
        assert_eq!(lines[2], "   ├─ Perfis: USER, ADMIN");
        assert_eq!(lines[3], "   └─ Dispositivo confiável: não");
        assert!(lines.iter().all(|l| !l.contains("secret-token")));
    }
}
