//! Liveness and readiness probes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, web};

/// Shared readiness flag flipped once startup wiring completes.
#[derive(Clone, Default)]
pub struct HealthState {
    ready: Arc<AtomicBool>,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the process ready to serve traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Liveness probe: the process is up.
#[utoipa::path(
    get,
    path = "/healthz/live",
    responses((status = 200, description = "Process is live")),
    tags = ["health"],
    operation_id = "live"
)]
#[get("/healthz/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().finish()
}

/// Readiness probe: startup wiring has completed.
#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses(
        (status = 200, description = "Ready to serve traffic"),
        (status = 503, description = "Still starting")
    ),
    tags = ["health"],
    operation_id = "ready"
)]
#[get("/healthz/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    if state.is_ready() {
        HttpResponse::Ok().finish()
    } else {
        HttpResponse::ServiceUnavailable().finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_flips_once_marked() {
        let state = HealthState::new();
        assert!(!state.is_ready());
        state.mark_ready();
        assert!(state.is_ready());
    }
}
