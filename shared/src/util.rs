/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque resource id (UUID v4, hyphenated).
pub fn new_resource_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
