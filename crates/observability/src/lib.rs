use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    requests_total: AtomicU64,
    plans_total: AtomicU64,
    rejected_total: AtomicU64,
    empty_days_total: AtomicU64,
    places_dropped_total: AtomicU64,
    total_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests_total: u64,
    pub plans_total: u64,
    pub rejected_total: u64,
    pub empty_days_total: u64,
    pub places_dropped_total: u64,
    pub avg_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_plan(&self) {
        self.plans_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_rejected(&self) {
        self.rejected_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_empty_days(&self, days: usize) {
        self.empty_days_total
            .fetch_add(days as u64, Ordering::Relaxed);
    }

    /// Places left out of a day because it was over the per-day cap.
    pub fn add_places_dropped(&self, places: usize) {
        self.places_dropped_total
            .fetch_add(places as u64, Ordering::Relaxed);
    }

    pub fn observe_latency(&self, duration: Duration) {
        self.total_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let plans = self.plans_total.load(Ordering::Relaxed);
        let latency = self.total_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests_total: self.requests_total.load(Ordering::Relaxed),
            plans_total: plans,
            rejected_total: self.rejected_total.load(Ordering::Relaxed),
            empty_days_total: self.empty_days_total.load(Ordering::Relaxed),
            places_dropped_total: self.places_dropped_total.load(Ordering::Relaxed),
            avg_latency_millis: if plans == 0 {
                0.0
            } else {
                latency as f64 / plans as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,dayroute_api=info,dayroute_agents=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}
