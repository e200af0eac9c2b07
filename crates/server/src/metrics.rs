use axum::http::StatusCode;
use once_cell::sync::Lazy;
use prometheus::{register_int_counter_vec, Encoder, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

pub static STORE_OPERATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "gestor_store_operations_total",
        "Store operations by family, operation and outcome",
        &["family", "op", "outcome"]
    )
    .expect("register store_operations_total")
});

fn outcome<T>(res: &Result<T, ServiceError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(ServiceError::Validation(_)) => "validation",
        Err(ServiceError::Conflict(_)) => "conflict",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Unauthorized) => "unauthorized",
        Err(ServiceError::Unavailable(_)) => "unavailable",
        Err(ServiceError::Hash(_)) => "error",
    }
}

/// Count one store operation; returns the result untouched.
pub fn observe<T>(family: &str, op: &str, res: Result<T, ServiceError>) -> Result<T, ServiceError> {
    STORE_OPERATIONS_TOTAL.with_label_values(&[family, op, outcome(&res)]).inc();
    res
}

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}
