use once_cell::sync::Lazy;
use prometheus::{
    register_histogram, register_int_counter, register_int_counter_vec, Histogram, IntCounter,
    IntCounterVec,
};

pub static REQ_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "path_decoder_requests_total",
        "Requests seen, by request-target form",
        &["form"]
    )
    .expect("register path_decoder_requests_total")
});

pub static REWRITES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "path_decoder_rewrites_total",
        "Requests whose normalized path differs from the server-parsed path"
    )
    .expect("register path_decoder_rewrites_total")
});

pub static REJECTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "path_decoder_rejections_total",
        "Requests rejected before routing",
        &["reason"]
    )
    .expect("register path_decoder_rejections_total")
});

pub static REQ_DURATION: Lazy<Histogram> = Lazy::new(|| {
    let buckets = vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0];
    register_histogram!(
        "path_decoder_request_duration_seconds",
        "Handler duration in seconds",
        buckets
    )
    .expect("register path_decoder_request_duration_seconds")
});

#[inline]
pub fn on_request(form: &str) {
    REQ_TOTAL.with_label_values(&[form]).inc();
}

#[inline]
pub fn on_rewrite() {
    REWRITES_TOTAL.inc();
}

#[inline]
pub fn on_reject(reason: &str) {
    REJECTIONS_TOTAL.with_label_values(&[reason]).inc();
}

#[inline]
pub fn on_done(secs: f64) {
    REQ_DURATION.observe(secs);
}
