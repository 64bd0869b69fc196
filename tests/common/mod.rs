#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::extract::ConnectInfo;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use shortcode_service::domain::entities::{
    ClickEvent, MappingHistory, NewClick, NewMapping, ShortMapping,
};
use shortcode_service::domain::repositories::MappingStore;
use shortcode_service::error::AppError;
use shortcode_service::infrastructure::persistence::InMemoryMappingStore;
use shortcode_service::routes::api_router;
use shortcode_service::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

pub const BASE_URL: &str = "https://s.example.com";
pub const PEER_ADDR: &str = "127.0.0.1:12345";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// In-memory state with a fixed public base URL.
pub fn create_test_state() -> (AppState, Arc<InMemoryMappingStore>) {
    let store = Arc::new(InMemoryMappingStore::new());
    let state = AppState::new(store.clone(), Some(BASE_URL.to_string()), false);

    (state, store)
}

/// Full application router with a fake peer address.
pub fn test_app(state: AppState) -> Router {
    api_router(state).layer(MockConnectInfoLayer)
}

pub async fn create_mapping(
    store: &InMemoryMappingStore,
    code: &str,
    url: &str,
    created_at: DateTime<Utc>,
    validity_minutes: i64,
) -> ShortMapping {
    let new_mapping = NewMapping::with_validity(
        code.to_string(),
        url.to_string(),
        created_at,
        Some(validity_minutes),
    )
    .unwrap();

    store.insert(new_mapping).await.unwrap()
}

pub async fn create_live_mapping(store: &InMemoryMappingStore, code: &str, url: &str) -> ShortMapping {
    create_mapping(store, code, url, Utc::now(), 30).await
}

pub async fn create_expired_mapping(
    store: &InMemoryMappingStore,
    code: &str,
    url: &str,
) -> ShortMapping {
    create_mapping(store, code, url, Utc::now() - Duration::hours(1), 5).await
}

/// Store whose every call fails as if the database were unreachable.
pub struct UnavailableStore;

fn unavailable() -> AppError {
    AppError::unavailable("Database is temporarily unavailable", json!({}))
}

#[async_trait]
impl MappingStore for UnavailableStore {
    async fn exists(&self, _code: &str) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn get(&self, _code: &str) -> Result<Option<ShortMapping>, AppError> {
        Err(unavailable())
    }

    async fn insert(&self, _new_mapping: NewMapping) -> Result<ShortMapping, AppError> {
        Err(unavailable())
    }

    async fn append_click(&self, _code: &str, _new_click: NewClick) -> Result<ClickEvent, AppError> {
        Err(unavailable())
    }

    async fn get_all(&self, _code: &str) -> Result<Option<MappingHistory>, AppError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> bool {
        false
    }
}

pub fn create_unavailable_state() -> AppState {
    AppState::new(Arc::new(UnavailableStore), Some(BASE_URL.to_string()), false)
}
