use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, HttpResponse, web};
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Fixed-window request counter keyed by client address.
///
/// Each client gets `limit` requests per window; windows are aligned to the
/// Unix epoch. Counters live in a cache and expire once their window is over.
pub struct FixedWindowLimiter {
    limit: u32,
    window: Duration,
    trust_forwarded: bool,
    counters: Cache<String, Arc<AtomicU32>>,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        let window = window.max(Duration::from_secs(1));
        Self {
            limit,
            window,
            trust_forwarded: false,
            counters: Cache::builder()
                .time_to_live(window * 2)
                .max_capacity(100_000)
                .build(),
        }
    }

    /// Key clients by `Forwarded`/`X-Forwarded-For` instead of the socket peer.
    /// Only sound when a proxy in front of the server rewrites those headers.
    pub fn trust_forwarded(mut self, trust: bool) -> Self {
        self.trust_forwarded = trust;
        self
    }

    /// Address a request is counted against.
    pub fn client_key(&self, req: &ServiceRequest) -> String {
        if self.trust_forwarded {
            if let Some(addr) = req.connection_info().realip_remote_addr() {
                return addr.to_string();
            }
        }

        req.peer_addr()
            .map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Count a request from `client` now. Returns false once the client is over the limit.
    pub async fn check(&self, client: &str) -> bool {
        self.check_at(client, chrono::Utc::now().timestamp()).await
    }

    /// Count a request from `client` at `now` (Unix seconds).
    pub async fn check_at(&self, client: &str, now: i64) -> bool {
        let window_index = now.div_euclid(self.window.as_secs() as i64);
        let key = format!("{client}:{window_index}");

        let counter = self
            .counters
            .get_with(key, async { Arc::new(AtomicU32::new(0)) })
            .await;

        let count = counter.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        count <= self.limit
    }
}

/// Middleware answering 429 once a client exceeds its window. `/health` is exempt.
pub async fn enforce(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if req.path() != "/health" {
        if let Some(limiter) = req.app_data::<web::Data<FixedWindowLimiter>>().cloned() {
            let client = limiter.client_key(&req);

            if !limiter.check(&client).await {
                tracing::warn!(client = %client, "Rate limit exceeded");
                let response = HttpResponse::TooManyRequests().json(serde_json::json!({
                    "error": "Rate limit exceeded",
                }));
                return Ok(req.into_response(response).map_into_right_body());
            }
        }
    }

    next.call(req).await.map(ServiceResponse::map_into_left_body)
}
