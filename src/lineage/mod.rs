//! C4: lineage inference — derives typed data-flow edges from serverless
//! function configuration and IAM policy documents, plus bounded-depth
//! traversal for visualization.

mod arn;
mod flow;
mod function_config;
mod graph;
mod policy;

pub use arn::{Arn, dynamodb_table_arn, resource_type_from_service, s3_bucket_arn};
pub use flow::{FlowType, InferenceSource, InferredFlow, ResourceType};
pub use function_config::{
    EnvVarPattern, EventSourceConfig, FunctionConfig, default_env_var_patterns, infer_from_env_vars,
    infer_from_event_sources,
};
pub use graph::{LineageEdge, LineageGraph, LineageNode, LineageSubgraph};
pub use policy::{PolicyDocument, PolicyStatement, infer_from_policy};
