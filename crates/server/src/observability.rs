use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static STUDENTS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "student_api_students_created_total",
        "Total student records created"
    )
    .expect("register students_created_total")
});

pub static STUDENTS_REPLACED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "student_api_students_replaced_total",
        "Total student records replaced or patched"
    )
    .expect("register students_replaced_total")
});

pub static STUDENTS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "student_api_students_deleted_total",
        "Total student records deleted"
    )
    .expect("register students_deleted_total")
});

pub static NOT_FOUND_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "student_api_not_found_total",
        "Total lookups of unknown student ids"
    )
    .expect("register not_found_total")
});

pub static DECODE_REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "student_api_decode_requests_total",
        "Total percent-decode requests"
    )
    .expect("register decode_requests_total")
});

/// Force registration so every series shows up at zero before first use.
pub fn init_metrics() {
    Lazy::force(&STUDENTS_CREATED_TOTAL);
    Lazy::force(&STUDENTS_REPLACED_TOTAL);
    Lazy::force(&STUDENTS_DELETED_TOTAL);
    Lazy::force(&NOT_FOUND_TOTAL);
    Lazy::force(&DECODE_REQUESTS_TOTAL);
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
