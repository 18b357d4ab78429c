use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use minifig_tracker::{
    build_router,
    models::{minifigure::Minifigure, price::CurrentValue},
    scrapers::{PriceSource, SourceError},
    services::tracker::MinifigureTracker,
    store::{MemoryStore, RecordStore},
    AppState,
};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

/// Catalog stand-in whose answers tests set per identifier.
/// Unknown identifiers fail like an unreachable page.
#[derive(Default)]
pub struct ScriptedSource {
    prices: Mutex<HashMap<String, Result<CurrentValue, SourceError>>>,
    details: Mutex<HashMap<String, Minifigure>>,
    calls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn set_prices(&self, id: &str, new: Decimal, used: Decimal) {
        self.prices
            .lock()
            .insert(id.to_string(), Ok(CurrentValue::new(Some(new), Some(used))));
    }

    pub fn fail(&self, id: &str, reason: &str) {
        self.prices
            .lock()
            .insert(id.to_string(), Err(SourceError::Request(reason.to_string())));
    }

    pub fn set_details(&self, fig: Minifigure) {
        if let Some(id) = fig.id() {
            self.details.lock().insert(id.to_string(), fig.clone());
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl PriceSource for ScriptedSource {
    async fn fetch_details(&self, id: &str) -> Result<Minifigure, SourceError> {
        self.calls.lock().push(id.to_string());
        self.details
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| SourceError::Parse("Featurebox not found".to_string()))
    }

    async fn fetch_prices(&self, id: &str) -> Result<CurrentValue, SourceError> {
        self.calls.lock().push(id.to_string());
        self.prices
            .lock()
            .get(id)
            .cloned()
            .unwrap_or_else(|| Err(SourceError::Request("404 Not Found".to_string())))
    }
}

// Each test binary uses a different subset of the harness
#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub source: Arc<ScriptedSource>,
}

#[allow(dead_code)]
impl TestApp {
    pub fn with_records(records: Vec<Minifigure>) -> Self {
        let store = Arc::new(MemoryStore::with_records(records));
        let source = Arc::new(ScriptedSource::default());
        Self::with_store(store, source)
    }

    pub fn with_store(store: Arc<MemoryStore>, source: Arc<ScriptedSource>) -> Self {
        let store_dyn: Arc<dyn RecordStore> = store.clone();
        let source_dyn: Arc<dyn PriceSource> = source.clone();
        let state = AppState {
            tracker: MinifigureTracker::new(store_dyn, source_dyn),
        };

        Self {
            router: build_router(state),
            store,
            source,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

#[allow(dead_code)]
pub fn priced(id: &str, new: Decimal, used: Decimal) -> Minifigure {
    let mut fig = Minifigure::new(id);
    fig.current_value = Some(CurrentValue::new(Some(new), Some(used)));
    fig
}
