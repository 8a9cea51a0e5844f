//! Per-client request statistics, shown by /status

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiStats {
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub cache_hits: u64,
    pub average_response_time_ms: f64,
    pub last_request_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl ApiStats {
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.successful_requests as f64 / self.total_requests as f64 * 100.0
    }
}

pub struct ApiStatsTracker {
    inner: Mutex<ApiStats>,
}

impl ApiStatsTracker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ApiStats::default()),
        }
    }

    /// Record a finished request (latency in milliseconds)
    pub async fn record_request(&self, success: bool, elapsed_ms: f64) {
        let mut stats = self.inner.lock().await;
        let previous_total = stats.total_requests as f64;
        stats.total_requests += 1;
        if success {
            stats.successful_requests += 1;
        } else {
            stats.failed_requests += 1;
        }
        // running mean
        stats.average_response_time_ms =
            (stats.average_response_time_ms * previous_total + elapsed_ms)
                / stats.total_requests as f64;
        stats.last_request_at = Some(Utc::now());
    }

    pub async fn record_error(&self, elapsed_ms: f64, error: &str) {
        self.record_request(false, elapsed_ms).await;
        self.inner.lock().await.last_error = Some(error.to_string());
    }

    pub async fn record_cache_hit(&self) {
        self.inner.lock().await.cache_hits += 1;
    }

    pub async fn get_stats(&self) -> ApiStats {
        self.inner.lock().await.clone()
    }
}

impl Default for ApiStatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stats_accumulate() {
        let tracker = ApiStatsTracker::new();
        tracker.record_request(true, 100.0).await;
        tracker.record_request(true, 300.0).await;
        tracker.record_error(200.0, "HTTP 500").await;
        tracker.record_cache_hit().await;

        let stats = tracker.get_stats().await;
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.successful_requests, 2);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.cache_hits, 1);
        assert!((stats.average_response_time_ms - 200.0).abs() < 1e-9);
        assert_eq!(stats.last_error.as_deref(), Some("HTTP 500"));
        assert!(stats.last_request_at.is_some());
        assert!((stats.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_success_rate() {
        assert_eq!(ApiStats::default().success_rate(), 0.0);
    }
}
