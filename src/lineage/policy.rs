//! Lineage inference from IAM policy documents.

use serde::{Deserialize, Serialize};

use super::arn::Arn;
use super::flow::{FlowType, InferenceSource, InferredFlow, ResourceType};

/// A single IAM policy statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyStatement {
    pub effect: String,
    pub actions: Vec<String>,
    pub resources: Vec<String>,
}

/// A minimal IAM policy document: the statements that drive lineage
/// inference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDocument {
    pub statements: Vec<PolicyStatement>,
}

const WRITE_VERBS: &[&str] = &["put", "create", "write", "update", "delete", "insert"];
const READ_VERBS: &[&str] = &["get", "list", "describe", "read", "select"];

fn action_verb(action: &str) -> &str {
    action.split(':').next_back().unwrap_or(action)
}

fn flow_type_for_actions(actions: &[String]) -> Option<FlowType> {
    let verbs: Vec<String> = actions.iter().map(|a| action_verb(a).to_lowercase()).collect();
    if verbs.iter().any(|v| WRITE_VERBS.iter().any(|w| v.contains(w))) {
        return Some(FlowType::WritesTo);
    }
    if verbs.iter().any(|v| READ_VERBS.iter().any(|r| v.contains(r))) {
        return Some(FlowType::ReadsFrom);
    }
    None
}

/// Infers flows from `policy`'s `Allow` statements, treating
/// `(principal_arn, principal_name)` as the acting identity (typically a
/// function's execution role).
#[must_use]
pub fn infer_from_policy(
    policy: &PolicyDocument,
    principal_arn: &str,
    principal_name: &str,
    principal_type: ResourceType,
) -> Vec<InferredFlow> {
    let mut flows = Vec::new();
    for statement in &policy.statements {
        if statement.effect != "Allow" {
            continue;
        }
        let Some(flow_type) = flow_type_for_actions(&statement.actions) else {
            continue;
        };
        for resource in &statement.resources {
            if resource == "*" {
                continue;
            }
            let Some(arn) = Arn::parse(resource) else {
                continue;
            };
            let resource_type = arn.resource_type();
            let evidence = serde_json::json!({
                "actions": statement.actions,
                "resources": statement.resources,
            });

            let (source_arn, source_type, source_name, target_arn, target_type, target_name) =
                if flow_type == FlowType::ReadsFrom {
                    (
                        resource.clone(),
                        resource_type,
                        arn.resource_name().to_string(),
                        principal_arn.to_string(),
                        principal_type,
                        principal_name.to_string(),
                    )
                } else {
                    (
                        principal_arn.to_string(),
                        principal_type,
                        principal_name.to_string(),
                        resource.clone(),
                        resource_type,
                        arn.resource_name().to_string(),
                    )
                };

            flows.push(InferredFlow {
                source_arn,
                source_type,
                source_name,
                target_arn,
                target_type,
                target_name,
                flow_type,
                inferred_from: InferenceSource::IamPolicy,
                confidence: 0.60,
                evidence,
            });
        }
    }
    flows
}

// ── Tests ──────────────────────────────────────────────────────────────
