//! # OAuth 루프백 콜백 리스너
//!
//! 시스템 브라우저에서 진행된 Google 로그인의 리디렉션을 `127.0.0.1`에서 한 번 받아
//! 쿼리 파라미터(`code`, `state`, `error`)를 돌려줍니다.
//!
//! ```text
//! 브라우저 ── GET /callback?code=...&state=... ──► LoopbackListener
//!                                                     │
//!                      "Login concluído" 페이지 ◄──────┤
//!                                                     ▼
//!                                              CallbackParams
//! ```
//!
//! `/callback` 이외의 요청(예: `/favicon.ico`)에는 404로 응답하고 계속 기다립니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;

pub const CALLBACK_PATH: &str = "/callback";

/// 연결 하나가 요청 줄을 보내기까지 기다리는 최대 시간
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(10);

/// 리디렉션으로 전달된 쿼리 파라미터
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    fn from_query(query: &str) -> Self {
        let params = parse_query(query);
        Self {
            code: params.get("code").cloned(),
            state: params.get("state").cloned(),
            error: params.get("error").cloned(),
            error_description: params.get("error_description").cloned(),
        }
    }
}

/// 한 번의 콜백을 받기 위한 로컬 HTTP 리스너
pub struct LoopbackListener {
    listener: TcpListener,
    port: u16,
}

impl LoopbackListener {
    /// `127.0.0.1:<port>`에 바인딩합니다. `0`이면 OS가 포트를 고릅니다.
    pub async fn bind(port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("127.0.0.1", port)).await?;
        let port = listener.local_addr()?.port();

        log::debug!("🔌 OAuth 콜백 리스너 대기 중 (port {})", port);
        Ok(Self { listener, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Google 인가 요청에 넣을 `redirect_uri`
    pub fn redirect_uri(&self) -> String {
        format!("http://127.0.0.1:{}{}", self.port, CALLBACK_PATH)
    }

    /// 콜백 요청을 기다립니다.
    ///
    /// 연결마다 별도 태스크에서 처리하므로, 브라우저가 미리 열어 둔 빈 연결(preconnect)이
    /// 실제 `/callback` 요청의 수락을 막지 않습니다. 처음 도착한 콜백만 전달됩니다.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(params))` - 콜백 수신
    /// * `Ok(None)` - 시간 초과 (사용자가 로그인 창을 닫은 것으로 간주)
    pub async fn wait_for_callback(self, timeout: Duration) -> std::io::Result<Option<CallbackParams>> {
        let (tx, rx) = oneshot::channel::<CallbackParams>();
        let mut server = tokio::spawn(serve(self.listener, Arc::new(Mutex::new(Some(tx)))));

        let result = tokio::time::timeout(timeout, async {
            tokio::select! {
                received = rx => Ok(received.ok()),
                stopped = &mut server => Err(match stopped {
                    Ok(e) => e,
                    Err(e) => std::io::Error::other(e.to_string()),
                }),
            }
        })
        .await;

        server.abort();

        match result {
            Ok(received) => received,
            Err(_) => {
                log::info!("⏱️ OAuth 콜백 대기 시간 초과");
                Ok(None)
            }
        }
    }
}

type CallbackSender = Arc<Mutex<Option<oneshot::Sender<CallbackParams>>>>;

/// 연결을 계속 수락합니다. 수락 자체가 실패했을 때만 반환합니다.
async fn serve(listener: TcpListener, tx: CallbackSender) -> std::io::Error {
    loop {
        match listener.accept().await {
            Ok((socket, _)) => {
                tokio::spawn(forward_callback(socket, tx.clone()));
            }
            Err(e) => {
                log::error!("❌ 콜백 리스너 accept 실패: {}", e);
                return e;
            }
        }
    }
}

async fn forward_callback(mut socket: TcpStream, tx: CallbackSender) {
    match tokio::time::timeout(CONNECTION_TIMEOUT, handle_connection(&mut socket)).await {
        Ok(Ok(Some(params))) => {
            if let Some(sender) = tx.lock().ok().and_then(|mut slot| slot.take()) {
                let _ = sender.send(params);
            }
        }
        Ok(Ok(None)) => {}
        Ok(Err(e)) => log::warn!("⚠️ 콜백 연결 처리 실패: {}", e),
        Err(_) => log::debug!("유휴 콜백 연결 종료"),
    }
}

async fn handle_connection(socket: &mut TcpStream) -> std::io::Result<Option<CallbackParams>> {
    let (reader, mut writer) = socket.split();
    let mut reader = BufReader::new(reader);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;

    // GET /callback?code=...&state=... HTTP/1.1
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();

    if method != "GET" {
        send_response(&mut writer, "405 Method Not Allowed", "Method Not Allowed").await?;
        return Ok(None);
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path != CALLBACK_PATH {
        send_response(&mut writer, "404 Not Found", "Not Found").await?;
        return Ok(None);
    }

    let params = CallbackParams::from_query(query);
    let page = if params.error.is_some() {
        result_page("Login não concluído", "Você pode fechar esta janela e tentar novamente.")
    } else {
        result_page("Login concluído", "Você já pode fechar esta janela e voltar ao Safe You.")
    };
    send_response(&mut writer, "200 OK", &page).await?;

    Ok(Some(params))
}

async fn send_response(
    writer: &mut tokio::net::tcp::WriteHalf<'_>,
    status: &str,
    body: &str,
) -> std::io::Result<()> {
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    writer.write_all(response.as_bytes()).await?;
    writer.flush().await
}

fn result_page(title: &str, message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head><meta charset="utf-8"><title>Safe You - {title}</title></head>
<body style="font-family: system-ui; text-align: center; padding: 50px;">
<h1>{title}</h1>
<p>{message}</p>
</body>
</html>"#
    )
}

pub(crate) fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = value.replace('+', " ");
            let value = urlencoding::decode(&value).ok()?.into_owned();
            Some((key.to_string(), value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;

    async fn send_get(port: u16, target: &str) -> String {
        let mut stream = TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        let request = format!("GET {} HTTP/1.1\r\nHost: 127.0.0.1\r\n\r\n", target);
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn test_parse_query() {
        let params = parse_query("code=4%2F0AX4&state=abc&scope=openid+email");

        assert_eq!(params.get("code").unwrap(), "4/0AX4");
        assert_eq!(params.get("state").unwrap(), "abc");
        assert_eq!(params.get("scope").unwrap(), "openid email");
        assert!(parse_query("").is_empty());
    }

    #[tokio::test]
    async fn test_receives_callback_after_unrelated_request() {
        let listener = LoopbackListener::bind(0).await.unwrap();
        let port = listener.port();
        assert_eq!(listener.redirect_uri(), format!("http://127.0.0.1:{}/callback", port));

        let waiter = tokio::spawn(listener.wait_for_callback(Duration::from_secs(5)));

        let favicon = send_get(port, "/favicon.ico").await;
        assert!(favicon.starts_with("HTTP/1.1 404"));

        let page = send_get(port, "/callback?code=abc&state=xyz").await;
        assert!(page.starts_with("HTTP/1.1 200"));
        assert!(page.contains("Login concluído"));

        let params = waiter.await.unwrap().unwrap().unwrap();
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
        assert_eq!(params.error, None);
    }

    #[tokio::test]
    async fn test_idle_preconnect_does_not_block_callback() {
        let listener = LoopbackListener::bind(0).await.unwrap();
        let port = listener.port();
        let waiter = tokio::spawn(listener.wait_for_callback(Duration::from_secs(3)));

        // 브라우저가 미리 열어 두고 아무것도 보내지 않는 연결
        let _idle = TcpStream::connect(("127.0.0.1", port)).await.unwrap();

        let page = send_get(port, "/callback?code=abc&state=xyz").await;
        assert!(page.starts_with("HTTP/1.1 200"));

        let params = waiter.await.unwrap().unwrap().unwrap();
        assert_eq!(params.code.as_deref(), Some("abc"));
        assert_eq!(params.state.as_deref(), Some("xyz"));
    }

    #[tokio::test]
    async fn test_error_callback() {
        let listener = LoopbackListener::bind(0).await.unwrap();
        let port = listener.port();
        let waiter = tokio::spawn(listener.wait_for_callback(Duration::from_secs(5)));

        send_get(port, "/callback?error=access_denied&state=xyz").await;

        let params = waiter.await.unwrap().unwrap().unwrap();
        assert_eq!(params.error.as_deref(), Some("access_denied"));
        assert_eq!(params.code, None);
    }

    #[tokio::test]
    async fn test_timeout_returns_none() {
        let listener = LoopbackListener::bind(0).await.unwrap();

        let result = listener.wait_for_callback(Duration::from_millis(50)).await.unwrap();

        assert_eq!(result, None);
    }
}
