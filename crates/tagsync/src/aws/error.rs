//! Tagging API error classification
//!
//! Provides typed errors for Resource Groups Tagging API operations using the
//! `.code()` method instead of string matching on Debug format.
//!
//! Classification is informational: the synchronizer returns remote errors
//! unchanged, and nothing here retries.

use aws_sdk_resourcegroupstagging::types::FailureInfo;
use std::collections::HashMap;
use thiserror::Error;

/// Tagging API error categories
#[derive(Debug, Clone, Error)]
pub enum TaggingError {
    /// Rate limit exceeded (retryable with backoff)
    #[error("Rate limit exceeded")]
    Throttled,

    /// Caller lacks permission to tag the resource
    #[error("Access denied: {message}")]
    AccessDenied { message: String },

    /// Request was rejected, e.g. a tag key or value violates service constraints
    #[error("Invalid parameter: {message}")]
    InvalidParameter { message: String },

    /// The service accepted the request but failed for one resource
    #[error("Tagging failed for '{resource_arn}': {message}")]
    ResourceFailure {
        resource_arn: String,
        code: Option<String>,
        status_code: Option<i32>,
        message: String,
    },

    /// Generic AWS SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl TaggingError {
    /// Check if this is a retryable error
    pub fn is_retryable(&self) -> bool {
        match self {
            TaggingError::Throttled => true,
            TaggingError::ResourceFailure { status_code, code, .. } => {
                status_code.is_some_and(|s| s >= 500)
                    || code.as_deref() == Some("InternalServiceException")
            }
            TaggingError::Sdk { code: Some(c), .. } => c == "InternalServiceException",
            _ => false,
        }
    }

    /// The AWS error code, when one was reported
    pub fn code(&self) -> Option<&str> {
        match self {
            TaggingError::Throttled => Some("ThrottledException"),
            TaggingError::AccessDenied { .. } => Some("AccessDeniedException"),
            TaggingError::InvalidParameter { .. } => Some("InvalidParameterException"),
            TaggingError::ResourceFailure { code, .. } | TaggingError::Sdk { code, .. } => {
                code.as_deref()
            }
        }
    }

    /// Get a user-friendly suggestion for resolving this error, if available.
    pub fn suggestion(&self) -> Option<String> {
        self.code().and_then(suggestion_for_code)
    }
}

/// Known error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &["ThrottledException", "Throttling", "ThrottlingException"];

/// Known error codes for authorization failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDeniedException",
    "AccessDenied",
    "UnauthorizedOperation",
];

/// Known error codes for rejected requests
const INVALID_PARAMETER_CODES: &[&str] = &[
    "InvalidParameterException",
    "ConstraintViolationException",
    "ValidationException",
];

/// Classify a tagging API error using the error code.
pub fn classify_tagging_error(code: Option<&str>, message: Option<&str>) -> TaggingError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if THROTTLING_CODES.contains(&c) => TaggingError::Throttled,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => TaggingError::AccessDenied { message },
        Some(c) if INVALID_PARAMETER_CODES.contains(&c) => {
            TaggingError::InvalidParameter { message }
        }
        _ => TaggingError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Turn the first entry of a `FailedResourcesMap` into an error.
///
/// Tag and untag calls succeed at the HTTP level even when individual
/// resources fail; those failures are reported in this map.
pub fn check_failed_resources(
    failed: Option<&HashMap<String, FailureInfo>>,
) -> Result<(), TaggingError> {
    let Some((arn, info)) = failed.and_then(|m| m.iter().next()) else {
        return Ok(());
    };

    Err(TaggingError::ResourceFailure {
        resource_arn: arn.clone(),
        code: info.error_code().map(|c| c.as_str().to_string()),
        status_code: Option::<i32>::from(info.status_code()),
        message: info
            .error_message()
            .unwrap_or("Unknown error")
            .to_string(),
    })
}

/// Classify an error from an anyhow::Error by extracting the AWS error code.
///
/// Walks the error chain using `ProvideErrorMetadata` to extract `.code()` and
/// `.message()` from the tagging API operation errors.
pub fn classify_anyhow_error(error: &anyhow::Error) -> TaggingError {
    use aws_sdk_resourcegroupstagging::error::{ProvideErrorMetadata, SdkError};
    use aws_sdk_resourcegroupstagging::operation::{
        get_resources::GetResourcesError, tag_resources::TagResourcesError,
        untag_resources::UntagResourcesError,
    };

    for cause in error.chain() {
        if let Some(e) = cause.downcast_ref::<TaggingError>() {
            return e.clone();
        }
        if let Some(e) = cause.downcast_ref::<SdkError<TagResourcesError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_tagging_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<SdkError<UntagResourcesError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_tagging_error(meta.code(), meta.message());
        }
        if let Some(e) = cause.downcast_ref::<SdkError<GetResourcesError>>() {
            let meta = ProvideErrorMetadata::meta(e);
            return classify_tagging_error(meta.code(), meta.message());
        }
    }

    TaggingError::Sdk {
        code: None,
        message: error.to_string(),
    }
}

/// Error code to user-friendly suggestion mapping
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "ThrottledException",
        "Tagging API rate limit hit. Retry the sync later.",
    ),
    (
        "Throttling",
        "Tagging API rate limit hit. Retry the sync later.",
    ),
    (
        "ThrottlingException",
        "Tagging API rate limit hit. Retry the sync later.",
    ),
    (
        "AccessDeniedException",
        "Grant tag:TagResources (and the service's own tagging permission) to the caller.",
    ),
    (
        "InvalidParameterException",
        "Check tag keys (max 128 chars) and values (max 256 chars) and the resource ARN.",
    ),
    (
        "ConstraintViolationException",
        "Check tag keys (max 128 chars) and values (max 256 chars) and the resource ARN.",
    ),
    (
        "InternalServiceException",
        "The tagging service failed internally. Retry the sync later.",
    ),
];

/// Get a user-friendly suggestion for a known error code.
fn suggestion_for_code(code: &str) -> Option<String> {
    SUGGESTIONS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, s)| (*s).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_resourcegroupstagging::types::ErrorCode;

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            let err = classify_tagging_error(Some(code), Some("slow down"));
            assert!(err.is_retryable(), "Expected retryable for code: {code}");
            assert!(matches!(err, TaggingError::Throttled));
        }
    }

    #[test]
    fn access_denied_codes() {
        for code in ACCESS_DENIED_CODES {
            let err = classify_tagging_error(Some(code), Some("not allowed"));
            assert!(matches!(err, TaggingError::AccessDenied { .. }));
            assert!(!err.is_retryable());
        }
    }

    #[test]
    fn invalid_parameter_codes() {
        for code in INVALID_PARAMETER_CODES {
            let err = classify_tagging_error(Some(code), Some("bad tag"));
            assert!(
                matches!(&err, TaggingError::InvalidParameter { message } if message == "bad tag"),
                "Expected InvalidParameter for code: {code}"
            );
        }
    }

    #[test]
    fn unknown_and_missing_codes() {
        let err = classify_tagging_error(Some("SomeNewError"), Some("details"));
        assert!(matches!(err, TaggingError::Sdk { .. }));
        assert_eq!(err.code(), Some("SomeNewError"));

        let err2 = classify_tagging_error(None, None);
        assert!(matches!(
            &err2,
            TaggingError::Sdk { code: None, message } if message == "Unknown error"
        ));
    }

    #[test]
    fn internal_service_error_is_retryable() {
        let err = classify_tagging_error(Some("InternalServiceException"), Some("oops"));
        assert!(err.is_retryable());
    }

    #[test]
    fn no_failed_resources() {
        assert!(check_failed_resources(None).is_ok());
        assert!(check_failed_resources(Some(&HashMap::new())).is_ok());
    }

    #[test]
    fn failed_resource_is_reported() {
        let arn = "arn:aws:s3:::my-bucket".to_string();
        let info = FailureInfo::builder()
            .status_code(400)
            .error_code(ErrorCode::InvalidParameterException)
            .error_message("tag value too long")
            .build();
        let failed = HashMap::from([(arn.clone(), info)]);

        let err = check_failed_resources(Some(&failed)).unwrap_err();
        match &err {
            TaggingError::ResourceFailure {
                resource_arn,
                code,
                status_code,
                message,
            } => {
                assert_eq!(resource_arn, &arn);
                assert_eq!(code.as_deref(), Some("InvalidParameterException"));
                assert_eq!(*status_code, Some(400));
                assert_eq!(message, "tag value too long");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!err.is_retryable());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn classify_anyhow_finds_tagging_error_in_chain() {
        let err = anyhow::Error::new(TaggingError::Throttled).context("sync failed");
        assert!(matches!(classify_anyhow_error(&err), TaggingError::Throttled));
    }

    #[test]
    fn classify_anyhow_falls_back_to_message() {
        let err = anyhow::anyhow!("connection refused");
        assert!(matches!(
            classify_anyhow_error(&err),
            TaggingError::Sdk { code: None, message } if message == "connection refused"
        ));
    }

    #[test]
    fn suggestions_for_known_codes() {
        for (code, _) in SUGGESTIONS {
            assert!(
                suggestion_for_code(code).is_some(),
                "No suggestion for code: {code}"
            );
        }
        assert!(suggestion_for_code("SomeUnknownCode").is_none());
        assert!(TaggingError::Throttled.suggestion().is_some());
    }
}
