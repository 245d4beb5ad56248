//! Lineage inference from serverless function configuration: environment
//! variables and event-source mappings.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::arn::{Arn, dynamodb_table_arn, s3_bucket_arn};
use super::flow::{FlowType, InferenceSource, InferredFlow, ResourceType};

/// A serverless function's configuration, as read from the cloud
/// connector the core doesn't implement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionConfig {
    pub function_arn: String,
    pub function_name: String,
    pub env_vars: BTreeMap<String, String>,
    pub event_sources: Vec<EventSourceConfig>,
}

/// One event-source mapping attached to a function.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventSourceConfig {
    pub arn: String,
    pub state: String,
    pub batch_size: u32,
    pub event_type: String,
}

/// A `(name pattern, value pattern)` pair mapped to a resource type and
/// flow direction, used to recognize a resource reference in an
/// environment variable.
pub struct EnvVarPattern {
    pub name_pattern: Regex,
    pub value_pattern: Regex,
    pub resource_type: ResourceType,
    pub flow_type: FlowType,
}

/// Returns the default environment-variable pattern catalog.
#[must_use]
pub fn default_env_var_patterns() -> Vec<EnvVarPattern> {
    vec![
        // More specific write-direction bucket pattern checked before the
        // generic read-direction one, since both match on "bucket".
        EnvVarPattern {
            name_pattern: Regex::new(r"(?i)output.*bucket|destination.*bucket").unwrap(),
            value_pattern: Regex::new(r".+").unwrap(),
            resource_type: ResourceType::S3Bucket,
            flow_type: FlowType::WritesTo,
        },
        EnvVarPattern {
            name_pattern: Regex::new(r"(?i)bucket|s3").unwrap(),
            value_pattern: Regex::new(r".+").unwrap(),
            resource_type: ResourceType::S3Bucket,
            flow_type: FlowType::ReadsFrom,
        },
        EnvVarPattern {
            name_pattern: Regex::new(r"(?i)table|dynamodb").unwrap(),
            value_pattern: Regex::new(r".+").unwrap(),
            resource_type: ResourceType::DynamoDbTable,
            flow_type: FlowType::ReadsFrom,
        },
        EnvVarPattern {
            name_pattern: Regex::new(r"(?i)db.*host|database.*host|rds").unwrap(),
            value_pattern: Regex::new(r"(?i).+\.rds\.amazonaws\.com$").unwrap(),
            resource_type: ResourceType::RdsInstance,
            flow_type: FlowType::ReadsFrom,
        },
        EnvVarPattern {
            name_pattern: Regex::new(r"(?i)queue|sqs").unwrap(),
            value_pattern: Regex::new(r"^https://sqs\.").unwrap(),
            resource_type: ResourceType::SqsQueue,
            flow_type: FlowType::WritesTo,
        },
        EnvVarPattern {
            name_pattern: Regex::new(r"(?i)topic|sns").unwrap(),
            value_pattern: Regex::new(r"^arn:aws:sns:").unwrap(),
            resource_type: ResourceType::SnsTopic,
            flow_type: FlowType::WritesTo,
        },
    ]
}

fn target_arn_for(resource_type: ResourceType, value: &str) -> Option<String> {
    match resource_type {
        ResourceType::S3Bucket => Some(s3_bucket_arn(value)),
        ResourceType::DynamoDbTable => Some(dynamodb_table_arn(value)),
        ResourceType::SqsQueue | ResourceType::SnsTopic => Some(value.to_string()),
        _ => None,
    }
}

/// Infers flows from a function's environment variables against
/// `patterns`. Every pattern that matches `(name, value)` emits its own
/// flow — a single env var can satisfy more than one pattern (e.g. a
/// bucket name matching both a generic `bucket` rule and a more specific
/// `output.*bucket` rule).
#[must_use]
pub fn infer_from_env_vars(config: &FunctionConfig, patterns: &[EnvVarPattern]) -> Vec<InferredFlow> {
    let mut flows = Vec::new();
    for (name, value) in &config.env_vars {
        for pattern in patterns {
            if !pattern.name_pattern.is_match(name) || !pattern.value_pattern.is_match(value) {
                continue;
            }
            let Some(target_arn) = target_arn_for(pattern.resource_type, value) else {
                continue;
            };
            let evidence = serde_json::json!({
                "env_var_name": name,
                "env_var_value": value,
                "pattern_used": pattern.name_pattern.as_str(),
            });

            let (source_arn, source_type, source_name, target_arn, target_type, target_name) =
                if pattern.flow_type == FlowType::ReadsFrom {
                    (
                        target_arn.clone(),
                        pattern.resource_type,
                        value.clone(),
                        config.function_arn.clone(),
                        ResourceType::LambdaFunction,
                        config.function_name.clone(),
                    )
                } else {
                    (
                        config.function_arn.clone(),
                        ResourceType::LambdaFunction,
                        config.function_name.clone(),
                        target_arn.clone(),
                        pattern.resource_type,
                        value.clone(),
                    )
                };

            flows.push(InferredFlow {
                source_arn,
                source_type,
                source_name,
                target_arn,
                target_type,
                target_name,
                flow_type: pattern.flow_type,
                inferred_from: InferenceSource::EnvVariable,
                confidence: 0.75,
                evidence,
            });
        }
    }
    flows
}

/// Infers `ReadsFrom` flows from a function's enabled event sources.
#[must_use]
pub fn infer_from_event_sources(config: &FunctionConfig) -> Vec<InferredFlow> {
    config
        .event_sources
        .iter()
        .filter(|es| es.state == "Enabled")
        .filter_map(|es| {
            let arn = Arn::parse(&es.arn)?;
            let resource_type = arn.resource_type();
            let evidence = serde_json::json!({
                "event_source_arn": es.arn,
                "batch_size": es.batch_size,
                "event_type": es.event_type,
            });
            Some(InferredFlow {
                source_arn: es.arn.clone(),
                source_type: resource_type,
                source_name: arn.resource_name().to_string(),
                target_arn: config.function_arn.clone(),
                target_type: ResourceType::LambdaFunction,
                target_name: config.function_name.clone(),
                flow_type: FlowType::ReadsFrom,
                inferred_from: InferenceSource::EventSource,
                confidence: 0.95,
                evidence,
            })
        })
        .collect()
}

// ── Tests ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> FunctionConfig {
        FunctionConfig {
            function_arn: "arn:aws:lambda:us-east-1:1:function:ingest".to_string(),
            function_name: "ingest".to_string(),
            env_vars: BTreeMap::new(),
            event_sources: Vec::new(),
        }
    }

    #[test]
    fn s3_bucket_env_var_infers_reads_from() {
        let mut config = base_config();
        config.env_vars.insert("SOURCE_BUCKET".to_string(), "raw-data".to_string());
        let flows = infer_from_env_vars(&config, &default_env_var_patterns());
        assert_eq!(flows.len(), 1);
        let f = &flows[0];
        assert_eq!(f.flow_type, FlowType::ReadsFrom);
        assert_eq!(f.source_arn, "arn:aws:s3:::raw-data");
        assert_eq!(f.target_arn, config.function_arn);
        assert_eq!(f.confidence, 0.75);
    }

    #[test]
    fn output_bucket_env_var_infers_writes_to_and_reads_from() {
        // "OUTPUT_BUCKET" satisfies both the specific output-bucket
        // pattern and the generic bucket pattern, so it must emit both
        // flows rather than stopping at the first match.
        let mut config = base_config();
        config
            .env_vars
            .insert("OUTPUT_BUCKET".to_string(), "processed-data".to_string());
        let flows = infer_from_env_vars(&config, &default_env_var_patterns());
        assert_eq!(flows.len(), 2);

        let writes = flows.iter().find(|f| f.flow_type == FlowType::WritesTo).unwrap();
        assert_eq!(writes.source_arn, config.function_arn);
        assert_eq!(writes.target_arn, "arn:aws:s3:::processed-data");

        let reads = flows.iter().find(|f| f.flow_type == FlowType::ReadsFrom).unwrap();
        assert_eq!(reads.source_arn, "arn:aws:s3:::processed-data");
        assert_eq!(reads.target_arn, config.function_arn);
    }

    #[test]
    fn sqs_url_required_for_queue_match() {
        let mut config = base_config();
        config
            .env_vars
            .insert("TARGET_QUEUE".to_string(), "not-a-url".to_string());
        let flows = infer_from_env_vars(&config, &default_env_var_patterns());
        assert!(flows.is_empty());
    }

    #[test]
    fn enabled_event_source_infers_reads_from() {
        let mut config = base_config();
        config.event_sources.push(EventSourceConfig {
            arn: "arn:aws:sqs:us-east-1:1:my-queue".to_string(),
            state: "Enabled".to_string(),
            batch_size: 10,
            event_type: "sqs".to_string(),
        });
        let flows = infer_from_event_sources(&config);
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].flow_type, FlowType::ReadsFrom);
        assert_eq!(flows[0].confidence, 0.95);
    }

    #[test]
    fn disabled_event_source_is_skipped() {
        let mut config = base_config();
        config.event_sources.push(EventSourceConfig {
            arn: "arn:aws:sqs:us-east-1:1:my-queue".to_string(),
            state: "Disabled".to_string(),
            batch_size: 10,
            event_type: "sqs".to_string(),
        });
        assert!(infer_from_event_sources(&config).is_empty());
    }
}
