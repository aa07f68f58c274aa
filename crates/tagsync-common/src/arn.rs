//! Resource ARN parsing
//!
//! ARNs are colon-delimited (`arn:partition:service:region:account:resource`).
//! Only the service segment is interpreted here; it scopes tag listings to
//! resources of the same type as the target.

use thiserror::Error;

/// Index of the service segment in a colon-delimited ARN
const SERVICE_SEGMENT: usize = 2;

/// Errors from parsing a resource ARN
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArnError {
    /// The identifier was empty
    #[error("resource ARN cannot be empty")]
    Empty,

    /// The identifier has no service segment
    #[error(
        "malformed resource ARN '{arn}': expected at least 3 ':'-delimited segments, found {found}"
    )]
    TooFewSegments { arn: String, found: usize },
}

/// Validated resource ARN.
///
/// Guarantees a service segment is present, so [`ResourceArn::service`]
/// cannot fail.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::Deref)]
pub struct ResourceArn(String);

impl ResourceArn {
    /// Parse an ARN, requiring at least 3 colon-delimited segments.
    pub fn parse(arn: &str) -> Result<Self, ArnError> {
        service_from_arn(arn)?;
        Ok(Self(arn.to_string()))
    }

    /// The service segment (3rd field), e.g. `s3` for `arn:aws:s3:::bucket`.
    pub fn service(&self) -> &str {
        // Validated in `parse`
        self.0.split(':').nth(SERVICE_SEGMENT).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for ResourceArn {
    type Err = ArnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Extract the service segment (3rd colon-delimited field) from an ARN.
pub fn service_from_arn(arn: &str) -> Result<&str, ArnError> {
    if arn.is_empty() {
        return Err(ArnError::Empty);
    }

    arn.split(':')
        .nth(SERVICE_SEGMENT)
        .ok_or_else(|| ArnError::TooFewSegments {
            arn: arn.to_string(),
            found: arn.split(':').count(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_from_well_formed_arn() {
        assert_eq!(
            service_from_arn("arn:aws:s3:us-east-1:123456789:bucket/x"),
            Ok("s3")
        );
        assert_eq!(
            service_from_arn("arn:aws:ec2:us-east-2:123456789012:instance/i-0abc"),
            Ok("ec2")
        );
    }

    #[test]
    fn test_service_with_exactly_three_segments() {
        assert_eq!(service_from_arn("arn:aws:sqs"), Ok("sqs"));
        // Empty third segment is still a segment
        assert_eq!(service_from_arn("arn:aws:"), Ok(""));
    }

    #[test]
    fn test_too_few_segments() {
        assert_eq!(
            service_from_arn("arn:aws"),
            Err(ArnError::TooFewSegments {
                arn: "arn:aws".to_string(),
                found: 2
            })
        );
        assert!(matches!(
            service_from_arn("not-an-arn"),
            Err(ArnError::TooFewSegments { found: 1, .. })
        ));
    }

    #[test]
    fn test_empty_arn() {
        assert_eq!(service_from_arn(""), Err(ArnError::Empty));
        assert_eq!(ResourceArn::parse(""), Err(ArnError::Empty));
    }

    #[test]
    fn test_parse_and_service() {
        let raw = "arn:aws:dynamodb:us-west-2:123456789012:table/orders";
        let arn = ResourceArn::parse(raw).unwrap();
        assert_eq!(arn.service(), "dynamodb");
        assert_eq!(arn.as_str(), raw);
        assert_eq!(arn.to_string(), arn.as_str());
    }

    #[test]
    fn test_from_str() {
        let arn: ResourceArn = "arn:aws-cn:sns:cn-north-1:123456789012:topic".parse().unwrap();
        assert_eq!(arn.service(), "sns");
        assert!("arn".parse::<ResourceArn>().is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ResourceArn::parse("arn:aws").unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed resource ARN 'arn:aws': expected at least 3 ':'-delimited segments, found 2"
        );
    }
}
