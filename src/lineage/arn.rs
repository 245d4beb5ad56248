//! ARN parsing and construction helpers shared by the lineage inference
//! paths.

use super::flow::ResourceType;

/// A parsed Amazon Resource Name: `arn:partition:service:region:account:resource`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account: String,
    pub resource: String,
}

impl Arn {
    /// Parses `s` into its six colon-delimited segments.
    ///
    /// Returns `None` if `s` doesn't start with `arn:` or has fewer than
    /// six segments (the resource segment may itself contain colons, so
    /// it's everything after the fifth).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let mut parts = s.splitn(6, ':');
        if parts.next()? != "arn" {
            return None;
        }
        let partition = parts.next()?.to_string();
        let service = parts.next()?.to_string();
        let region = parts.next()?.to_string();
        let account = parts.next()?.to_string();
        let resource = parts.next()?.to_string();
        Some(Self {
            partition,
            service,
            region,
            account,
            resource,
        })
    }

    /// The resource type implied by this ARN's service segment.
    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        resource_type_from_service(&self.service)
    }

    /// The resource's short name: the last `/`-delimited segment of the
    /// resource portion (e.g. `table/Orders` → `Orders`).
    #[must_use]
    pub fn resource_name(&self) -> &str {
        self.resource.rsplit('/').next().unwrap_or(&self.resource)
    }
}

/// Maps an ARN service segment (`s3`, `dynamodb`, `sqs`, ...) to a
/// [`ResourceType`]. Unknown services map to [`ResourceType::Unknown`].
#[must_use]
pub fn resource_type_from_service(service: &str) -> ResourceType {
    match service {
        "s3" => ResourceType::S3Bucket,
        "dynamodb" => ResourceType::DynamoDbTable,
        "sqs" => ResourceType::SqsQueue,
        "sns" => ResourceType::SnsTopic,
        "kinesis" => ResourceType::KinesisStream,
        "rds" => ResourceType::RdsInstance,
        "lambda" => ResourceType::LambdaFunction,
        _ => ResourceType::Unknown,
    }
}

/// Constructs an S3 bucket ARN from a bucket name.
#[must_use]
pub fn s3_bucket_arn(bucket: &str) -> String {
    format!("arn:aws:s3:::{bucket}")
}

/// Constructs a DynamoDB table ARN from a table name, using wildcard
/// region/account segments since env vars rarely carry that detail.
#[must_use]
pub fn dynamodb_table_arn(table: &str) -> String {
    format!("arn:aws:dynamodb:*:*:table/{table}")
}

// ── Tests ──────────────────────────────────────────────────────────────
