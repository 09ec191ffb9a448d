//! # 소셜 로그인 오케스트레이션
//!
//! Identity Provider → Asset Normalizer → Backend Session Exchange → Session Store
//! 순서로 한 번의 로그인 시도를 진행합니다.
//!
//! ```text
//! sign_in_with_google()
//!   ├─ 진행 중인 시도가 있으면 즉시 SignInInProgress
//!   ├─ provider.is_available()? 아니면 ProviderUnavailable (창을 열지 않음)
//!   ├─ identity_provider::sign_in      (창 + 새 ID 토큰)
//!   ├─ normalizer.normalize(photo_url) (실패해도 계속)
//!   ├─ exchange.exchange(request)
//!   └─ store.persist(response, email)  → SignInOutcome
//! ```
//!
//! 어느 단계에서 실패하든 세션 저장소는 변경되지 않습니다.
//! 재시도는 하지 않습니다. 창은 일회용이므로 사용자가 다시 시작해야 합니다.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::dto::session_exchange::SessionExchangeRequest;
use crate::domain::models::session::SignInOutcome;
use crate::errors::{AuthError, AuthResult};
use crate::services::auth::asset_normalizer::AssetNormalizer;
use crate::services::auth::identity_provider::{self, IdentityProvider};
use crate::services::auth::session_exchange::SessionExchange;
use crate::storage::SessionStore;

/// 소셜 로그인 서비스
///
/// 모든 협력 객체는 생성 시 주입됩니다.
pub struct SocialSignInService {
    provider: Arc<dyn IdentityProvider>,
    normalizer: Arc<dyn AssetNormalizer>,
    exchange: Arc<dyn SessionExchange>,
    store: SessionStore,
    in_flight: AtomicBool,
}

/// 진행 중 플래그를 해제하는 가드. 퓨처가 중간에 버려져도 해제됩니다.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SocialSignInService {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        normalizer: Arc<dyn AssetNormalizer>,
        exchange: Arc<dyn SessionExchange>,
        store: SessionStore,
    ) -> Self {
        Self {
            provider,
            normalizer,
            exchange,
            store,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Google 계정으로 로그인하고 애플리케이션 세션을 저장합니다.
    ///
    /// # Returns
    ///
    /// * `Ok(SignInOutcome)` - 세션 토큰, 역할, 프로바이더 신원
    /// * `Err(AuthError)` - 실패한 단계에 해당하는 에러. 저장소는 변경되지 않음
    pub async fn sign_in_with_google(&self) -> AuthResult<SignInOutcome> {
        let _guard = self.try_begin()?;

        let result = self.run_sign_in().await;

        match &result {
            Ok(outcome) => log::info!("✅ 소셜 로그인 성공 (roles: {:?})", outcome.roles),
            Err(e) if e.is_expected() => log::info!("↩️ 소셜 로그인 중단 [{}]: {}", e.kind(), e),
            Err(e) => log::error!("❌ 소셜 로그인 실패 [{}]: {}", e.kind(), e),
        }

        result
    }

    /// 로컬 세션을 삭제합니다. 기기 신뢰 토큰은 유지됩니다.
    pub fn sign_out(&self) -> AuthResult<()> {
        self.store.clear_session()?;
        log::info!("👋 로그아웃 완료");
        Ok(())
    }

    fn try_begin(&self) -> AuthResult<InFlightGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::info!("⏳ 이미 진행 중인 로그인이 있습니다");
            return Err(AuthError::SignInInProgress);
        }
        Ok(InFlightGuard(&self.in_flight))
    }

    async fn run_sign_in(&self) -> AuthResult<SignInOutcome> {
        if !self.provider.is_available() {
            return Err(AuthError::ProviderUnavailable);
        }

        log::debug!("🔑 {} 로그인 시작", self.provider.provider().as_str());
        let identity = identity_provider::sign_in(self.provider.as_ref()).await?;

        let photo = self.normalizer.normalize(identity.photo_url()).await;
        let request = SessionExchangeRequest::from_identity(&identity, photo.as_ref());

        let response = self.exchange.exchange(&request).await?;

        self.store.persist(&response, identity.email())?;

        Ok(SignInOutcome {
            token: response.token,
            roles: response.roles,
            identity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthProvider;
    use crate::domain::dto::session_exchange::SessionExchangeResponse;
    use crate::domain::models::identity::InlineAsset;
    use crate::errors::StorageError;
    use crate::services::auth::asset_normalizer::HttpAssetNormalizer;
    use crate::services::auth::identity_provider::{ProviderAccount, ProviderCredential, ProviderFailure};
    use crate::storage::{KeyValueStorage, MemoryStorage, WriteBatch};
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    type Events = Arc<Mutex<Vec<String>>>;

    struct FakeProvider {
        available: bool,
        popup: Result<ProviderAccount, ProviderFailure>,
        token: String,
        delay: Option<Duration>,
        events: Events,
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        fn provider(&self) -> AuthProvider {
            AuthProvider::Google
        }

        fn is_available(&self) -> bool {
            self.available
        }

        async fn open_popup(&self) -> Result<ProviderAccount, ProviderFailure> {
            self.events.lock().unwrap().push("popup".to_string());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.popup.clone()
        }

        async fn fresh_id_token(&self, _account: &ProviderAccount) -> Result<String, ProviderFailure> {
            self.events.lock().unwrap().push("token".to_string());
            Ok(self.token.clone())
        }
    }

    struct FakeNormalizer {
        asset: Option<InlineAsset>,
        events: Events,
    }

    #[async_trait]
    impl AssetNormalizer for FakeNormalizer {
        async fn normalize(&self, url: Option<&str>) -> Option<InlineAsset> {
            self.events
                .lock()
                .unwrap()
                .push(format!("normalize:{}", url.unwrap_or("-")));
            self.asset.clone()
        }
    }

    struct FakeExchange {
        result: Result<SessionExchangeResponse, AuthError>,
        requests: Mutex<Vec<SessionExchangeRequest>>,
        events: Events,
    }

    #[async_trait]
    impl SessionExchange for FakeExchange {
        async fn exchange(
            &self,
            request: &SessionExchangeRequest,
        ) -> Result<SessionExchangeResponse, AuthError> {
            self.events.lock().unwrap().push("exchange".to_string());
            self.requests.lock().unwrap().push(request.clone());
            self.result.clone()
        }
    }

    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }

        fn commit(&self, _batch: WriteBatch) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn snapshot(&self) -> Result<BTreeMap<String, String>, StorageError> {
            Ok(BTreeMap::new())
        }
    }

    fn account() -> ProviderAccount {
        ProviderAccount {
            subject: "1098".to_string(),
            email: Some("ana@example.com".to_string()),
            display_name: Some("Ana Souza".to_string()),
            photo_url: Some("https://photos.example/ana.jpg".to_string()),
            credential: ProviderCredential::default(),
        }
    }

    fn accepted(device: Option<&str>) -> Result<SessionExchangeResponse, AuthError> {
        Ok(SessionExchangeResponse {
            token: "abc".to_string(),
            roles: vec!["USER".to_string()],
            new_trusted_device_token: device.map(str::to_string),
        })
    }

    struct Harness {
        service: SocialSignInService,
        exchange: Arc<FakeExchange>,
        storage: Arc<MemoryStorage>,
        events: Events,
    }

    impl Harness {
        fn new(
            popup: Result<ProviderAccount, ProviderFailure>,
            exchange_result: Result<SessionExchangeResponse, AuthError>,
            storage: MemoryStorage,
        ) -> Self {
            Self::build(true, popup, None, exchange_result, storage)
        }

        fn build(
            available: bool,
            popup: Result<ProviderAccount, ProviderFailure>,
            delay: Option<Duration>,
            exchange_result: Result<SessionExchangeResponse, AuthError>,
            storage: MemoryStorage,
        ) -> Self {
            let events: Events = Arc::new(Mutex::new(Vec::new()));
            let provider = Arc::new(FakeProvider {
                available,
                popup,
                token: "fresh-id-token".to_string(),
                delay,
                events: events.clone(),
            });
            let normalizer = Arc::new(FakeNormalizer {
                asset: Some(InlineAsset::from_bytes("image/jpeg", b"jpeg")),
                events: events.clone(),
            });
            let exchange = Arc::new(FakeExchange {
                result: exchange_result,
                requests: Mutex::new(Vec::new()),
                events: events.clone(),
            });
            let storage = Arc::new(storage);
            let service = SocialSignInService::new(
                provider,
                normalizer,
                exchange.clone(),
                SessionStore::new(storage.clone()),
            );

            Self {
                service,
                exchange,
                storage,
                events,
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    #[tokio::test]
    async fn test_successful_sign_in_runs_steps_in_order() {
        let harness = Harness::new(Ok(account()), accepted(Some("dev123")), MemoryStorage::new());

        let outcome = harness.service.sign_in_with_google().await.unwrap();

        assert_eq!(
            harness.events(),
            vec![
                "popup",
                "token",
                "normalize:https://photos.example/ana.jpg",
                "exchange"
            ]
        );
        assert_eq!(outcome.token, "abc");
        assert_eq!(outcome.roles, vec!["USER"]);
        assert_eq!(outcome.identity.email(), Some("ana@example.com"));

        let requests = harness.exchange.requests.lock().unwrap();
        assert_eq!(requests[0].id_token, outcome.identity.id_token());
        assert_eq!(requests[0].id_token, "fresh-id-token");
        assert_eq!(requests[0].display_name.as_deref(), Some("Ana Souza"));
        assert_eq!(requests[0].photo.as_deref(), Some("data:image/jpeg;base64,anBlZw=="));

        let store = harness.service.store();
        assert_eq!(store.token().as_deref(), Some("abc"));
        assert!(store.is_logged_in());
        assert_eq!(store.roles(), vec!["USER"]);
        assert_eq!(store.email().as_deref(), Some("ana@example.com"));
        assert_eq!(store.trusted_device_token().as_deref(), Some("dev123"));
    }

    #[tokio::test]
    async fn test_unavailable_provider_never_opens_popup() {
        let harness = Harness::build(
            false,
            Ok(account()),
            None,
            accepted(None),
            MemoryStorage::new(),
        );

        let err = harness.service.sign_in_with_google().await.unwrap_err();

        assert_eq!(err, AuthError::ProviderUnavailable);
        assert!(harness.events().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_leaves_storage_untouched() {
        let storage = MemoryStorage::with_entries([("userToken", "old"), ("isLoggedIn", "true")]);
        let harness = Harness::new(
            Err(ProviderFailure::popup_closed("closed")),
            accepted(None),
            storage,
        );
        let before = harness.storage.snapshot().unwrap();

        let err = harness.service.sign_in_with_google().await.unwrap_err();

        assert_eq!(err, AuthError::UserCancelled);
        assert_eq!(harness.events(), vec!["popup"]);
        assert_eq!(harness.storage.snapshot().unwrap(), before);
    }

    fn signed_in_storage() -> MemoryStorage {
        MemoryStorage::with_entries([
            ("userToken", "old"),
            ("isLoggedIn", "true"),
            ("userRoles", "[\"USER\"]"),
            ("userEmail", "previous@example.com"),
            ("trustedDeviceToken", "dev-old"),
        ])
    }

    #[tokio::test]
    async fn test_backend_rejection_leaves_storage_untouched() {
        let rejection = AuthError::BackendRejected {
            status: 401,
            message: "invalid token".to_string(),
        };
        let harness = Harness::new(Ok(account()), Err(rejection.clone()), signed_in_storage());
        let before = harness.storage.snapshot().unwrap();

        let err = harness.service.sign_in_with_google().await.unwrap_err();

        assert_eq!(err, rejection);
        assert_eq!(err.user_message(), "invalid token");
        assert_eq!(harness.storage.snapshot().unwrap(), before);
        assert_eq!(harness.service.store().token().as_deref(), Some("old"));
    }

    async fn reject_login(_body: actix_web::web::Json<serde_json::Value>) -> actix_web::HttpResponse {
        actix_web::HttpResponse::Unauthorized().json(serde_json::json!({"message": "invalid token"}))
    }

    #[actix_web::test]
    async fn test_http_rejection_leaves_previous_session_in_place() {
        use crate::services::auth::session_exchange::{HttpSessionExchange, LOGIN_SOCIAL_PATH};
        use actix_web::{web, App, HttpServer};

        let server = HttpServer::new(|| {
            App::new().route(LOGIN_SOCIAL_PATH, web::post().to(reject_login))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let base = format!("http://{}", server.addrs()[0]);
        actix_web::rt::spawn(server.run());

        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let storage = Arc::new(signed_in_storage());
        let before = storage.snapshot().unwrap();
        let service = SocialSignInService::new(
            Arc::new(FakeProvider {
                available: true,
                popup: Ok(account()),
                token: "fresh-id-token".to_string(),
                delay: None,
                events: events.clone(),
            }),
            Arc::new(FakeNormalizer {
                asset: None,
                events,
            }),
            Arc::new(HttpSessionExchange::new(reqwest::Client::new(), base)),
            SessionStore::new(storage.clone()),
        );

        let err = service.sign_in_with_google().await.unwrap_err();

        assert_eq!(
            err,
            AuthError::BackendRejected {
                status: 401,
                message: "invalid token".to_string()
            }
        );
        assert_eq!(storage.snapshot().unwrap(), before);
        assert!(service.store().is_logged_in());
        assert_eq!(service.store().trusted_device_token().as_deref(), Some("dev-old"));
    }

    #[tokio::test]
    async fn test_missing_device_token_keeps_previous_value() {
        let storage = MemoryStorage::with_entries([("trustedDeviceToken", "old")]);
        let harness = Harness::new(Ok(account()), accepted(None), storage);

        harness.service.sign_in_with_google().await.unwrap();

        assert_eq!(
            harness.service.store().trusted_device_token().as_deref(),
            Some("old")
        );
    }

    #[tokio::test]
    async fn test_missing_email_removes_stale_email() {
        let storage = MemoryStorage::with_entries([("userEmail", "previous@example.com")]);
        let mut no_email = account();
        no_email.email = None;
        let harness = Harness::new(Ok(no_email), accepted(None), storage);

        harness.service.sign_in_with_google().await.unwrap();

        assert_eq!(harness.service.store().email(), None);
        assert_eq!(harness.exchange.requests.lock().unwrap()[0].email, None);
    }

    #[tokio::test]
    async fn test_unreachable_photo_does_not_block_sign_in() {
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let mut photo_account = account();
        photo_account.photo_url = Some("http://127.0.0.1:9/ana.jpg".to_string());
        let exchange = Arc::new(FakeExchange {
            result: accepted(None),
            requests: Mutex::new(Vec::new()),
            events: events.clone(),
        });
        let service = SocialSignInService::new(
            Arc::new(FakeProvider {
                available: true,
                popup: Ok(photo_account),
                token: "fresh-id-token".to_string(),
                delay: None,
                events: events.clone(),
            }),
            Arc::new(
                HttpAssetNormalizer::new(reqwest::Client::new())
                    .with_timeout(Some(Duration::from_secs(2))),
            ),
            exchange.clone(),
            SessionStore::new(Arc::new(MemoryStorage::new())),
        );

        let outcome = service.sign_in_with_google().await.unwrap();

        assert_eq!(outcome.token, "abc");
        assert_eq!(exchange.requests.lock().unwrap()[0].photo, None);
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let events: Events = Arc::new(Mutex::new(Vec::new()));
        let service = SocialSignInService::new(
            Arc::new(FakeProvider {
                available: true,
                popup: Ok(account()),
                token: "fresh-id-token".to_string(),
                delay: None,
                events: events.clone(),
            }),
            Arc::new(FakeNormalizer {
                asset: None,
                events: events.clone(),
            }),
            Arc::new(FakeExchange {
                result: accepted(None),
                requests: Mutex::new(Vec::new()),
                events: events.clone(),
            }),
            SessionStore::new(Arc::new(ReadOnlyStorage)),
        );

        let err = service.sign_in_with_google().await.unwrap_err();

        assert_eq!(err.kind(), "storage");
    }

    #[tokio::test]
    async fn test_concurrent_sign_in_is_rejected() {
        let harness = Harness::build(
            true,
            Ok(account()),
            Some(Duration::from_millis(100)),
            accepted(None),
            MemoryStorage::new(),
        );

        let (first, second) = tokio::join!(
            harness.service.sign_in_with_google(),
            harness.service.sign_in_with_google()
        );

        assert!(first.is_ok());
        assert_eq!(second.unwrap_err(), AuthError::SignInInProgress);
        assert_eq!(harness.exchange.requests.lock().unwrap().len(), 1);

        // 완료 후에는 다시 시도할 수 있음
        assert!(harness.service.sign_in_with_google().await.is_ok());
    }

    #[tokio::test]
    async fn test_sign_out_keeps_device_token() {
        let harness = Harness::new(Ok(account()), accepted(Some("dev123")), MemoryStorage::new());
        harness.service.sign_in_with_google().await.unwrap();

        harness.service.sign_out().unwrap();

        let store = harness.service.store();
        assert_eq!(store.token(), None);
        assert!(!store.is_logged_in());
        assert_eq!(store.current_session(), None);
        assert_eq!(store.trusted_device_token().as_deref(), Some("dev123"));
    }
}
