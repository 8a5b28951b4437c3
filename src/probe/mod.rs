//! Reachability probing.
//!
//! # Responsibilities
//! - Answer one question per poll tick: is the internet reachable right now
//! - Map every failure mode (connect error, bad status, timeout) to offline
//!
//! # Design Decisions
//! - Probe errors are normal offline samples, never crashes; there is no
//!   retry beyond the natural next poll tick
//! - A single always-up HTTP endpoint stands in for "the internet"; no
//!   multi-target aggregation

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::Empty;
use hyper::http::uri::InvalidUri;
use hyper::{Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;

use crate::config::ProbeConfig;

/// A boolean reachability check. Implementations may block on network I/O;
/// the monitor never awaits one inline.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn check(&self) -> bool;
}

/// Probes reachability with a GET against an always-up endpoint.
pub struct HttpProbe {
    client: Client<HttpConnector, Empty<Bytes>>,
    endpoint: Uri,
    timeout: Duration,
}

impl HttpProbe {
    pub fn new(config: &ProbeConfig) -> Result<Self, InvalidUri> {
        let endpoint: Uri = config.url.parse()?;
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Ok(Self {
            client,
            endpoint,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn check(&self) -> bool {
        let request = match Request::builder()
            .method("GET")
            .uri(self.endpoint.clone())
            .header("user-agent", "netprobe-reachability-check")
            .body(Empty::new())
        {
            Ok(request) => request,
            Err(error) => {
                tracing::error!(%error, "failed to build probe request");
                return false;
            }
        };

        match time::timeout(self.timeout, self.client.request(request)).await {
            Ok(Ok(response)) => {
                let reachable = response.status().is_success();
                if !reachable {
                    tracing::debug!(status = %response.status(), "probe got non-success status");
                }
                reachable
            }
            Ok(Err(error)) => {
                tracing::debug!(%error, "probe failed: connection error");
                false
            }
            Err(_) => {
                tracing::debug!(timeout_secs = self.timeout.as_secs(), "probe timed out");
                false
            }
        }
    }
}
