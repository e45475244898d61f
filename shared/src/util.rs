/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a client-side report id: "R" + last six digits of the
/// millisecond clock.
///
/// The classifier normally assigns the id (it is handed this value in the
/// input payload and echoes it back); history inserts are idempotent
/// upserts, so a clock collision overwrites instead of duplicating.
pub fn report_id() -> String {
    let millis = now_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(6)..];
    format!("R{tail}")
}

/// Generate a unique id for a pending (offline-queued) report
pub fn pending_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
