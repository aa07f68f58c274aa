//! AWS test utilities
//!
//! Provides region detection and unique names for AWS integration tests.

use chrono::Utc;

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-2
///
/// # Example
///
/// ```
/// use tagsync_test_utils::aws::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-2".to_string())
}

/// Generate a unique run ID for test resources.
///
/// Format: `test-{timestamp_ms}-{counter}`, unique even when tests start
/// simultaneously within one process.
///
/// # Example
///
/// ```
/// use tagsync_test_utils::aws::test_run_id;
///
/// let run_id = test_run_id();
/// assert!(run_id.starts_with("test-"));
/// ```
pub fn test_run_id() -> String {
    use std::sync::atomic::{AtomicU32, Ordering};
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{}-{}", ts, counter)
}

/// Generate a unique S3 bucket name for test resources.
///
/// Format: `tagsync-test-{timestamp_ms}-{counter}`
///
/// # Example
///
/// ```
/// use tagsync_test_utils::aws::test_bucket_name;
///
/// let bucket = test_bucket_name();
/// assert!(bucket.starts_with("tagsync-test-"));
/// ```
pub fn test_bucket_name() -> String {
    format!("tagsync-{}", test_run_id())
}

/// ARN of an S3 bucket (bucket ARNs carry no region or account)
pub fn s3_bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}
