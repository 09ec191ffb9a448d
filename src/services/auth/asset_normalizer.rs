//! # Asset Normalizer
//!
//! 원격 프로필 사진 URL을 요청 본문에 직접 넣을 수 있는 [`InlineAsset`]으로 변환합니다.
//!
//! 인터페이스에 에러 채널이 없습니다. 다운로드/디코딩 실패는 경고 로그만 남기고
//! `None`으로 흡수되므로, 프로필 사진이 없다는 이유로 로그인이 막히는 일은 없습니다.
//! 최대 크기(`ASSET_MAX_BYTES`)를 넘는 본문은 끝까지 읽지 않고 버립니다.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::{AssetConfig, DEFAULT_ASSET_MAX_BYTES};
use crate::domain::models::identity::InlineAsset;

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// 최선 노력(best-effort) 에셋 변환기
#[async_trait]
pub trait AssetNormalizer: Send + Sync {
    /// URL이 없거나 변환에 실패하면 `None`을 반환합니다.
    async fn normalize(&self, url: Option<&str>) -> Option<InlineAsset>;
}

/// HTTP로 리소스를 내려받아 base64 `data:` 표현으로 변환하는 구현체
///
/// 다운로드는 호출자 안에서 끝까지 기다리거나(타임아웃 시) 버려집니다.
/// 백그라운드 작업을 남기지 않습니다.
pub struct HttpAssetNormalizer {
    http: reqwest::Client,
    timeout: Option<Duration>,
    max_bytes: usize,
}

impl HttpAssetNormalizer {
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            timeout: None,
            max_bytes: DEFAULT_ASSET_MAX_BYTES,
        }
    }

    /// 환경 변수(`ASSET_FETCH_TIMEOUT_SECS`, `ASSET_MAX_BYTES`) 기반으로 생성합니다.
    pub fn from_env() -> Self {
        Self::new(reqwest::Client::new())
            .with_timeout(AssetConfig::fetch_timeout())
            .with_max_bytes(AssetConfig::max_bytes())
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    async fn fetch(&self, url: &str) -> Result<InlineAsset, String> {
        let mut request = self.http.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| format!("요청 실패: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status().as_u16()));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(essence)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        if let Some(length) = response.content_length() {
            if length > self.max_bytes as u64 {
                return Err(format!("크기 초과: {} > {} bytes", length, self.max_bytes));
            }
        }

        let mut response = response;
        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| format!("본문 읽기 실패: {}", e))?
        {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(format!("크기 초과: {} bytes 이상", self.max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        if bytes.is_empty() {
            return Err("빈 본문".to_string());
        }

        Ok(InlineAsset::from_bytes(mime_type, &bytes))
    }
}

#[async_trait]
impl AssetNormalizer for HttpAssetNormalizer {
    async fn normalize(&self, url: Option<&str>) -> Option<InlineAsset> {
        let url = url.map(str::trim).filter(|u| !u.is_empty())?;

        match self.fetch(url).await {
            Ok(asset) => {
                log::debug!("🖼️ 프로필 사진 변환 완료 ({})", asset.mime_type());
                Some(asset)
            }
            Err(e) => {
                log::warn!("⚠️ 프로필 사진 변환 실패, 사진 없이 진행합니다: {}", e);
                None
            }
        }
    }
}

/// `image/jpeg; charset=binary` → `image/jpeg`
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase()
}
