//! PKCE(RFC 7636)와 OAuth `state` 값 생성
//!
//! 난수 원천으로 UUID v4(122비트 난수)를 사용합니다.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// 64자 URL-safe code verifier (48바이트 난수 → base64url)
pub fn generate_code_verifier() -> String {
    let mut bytes = Vec::with_capacity(48);
    for _ in 0..3 {
        bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    }
    URL_SAFE_NO_PAD.encode(bytes)
}

/// `challenge = BASE64URL(SHA256(verifier))`
pub fn generate_code_challenge(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

/// 22자 URL-safe state 값
pub fn generate_state() -> String {
    URL_SAFE_NO_PAD.encode(Uuid::new_v4().as_bytes())
}
