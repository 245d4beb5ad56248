//! CRUD for custom classification rules and their pattern lists.

use async_trait::async_trait;
use uuid::Uuid;

use super::StoreError;
use super::dto::{CustomRulePattern, CustomRuleRecord, CustomRuleWithPatterns};

/// Admin surface for rules an operator defines beyond the built-in set.
/// A rule and its patterns are always fetched together, since a pattern
/// list with no owning rule (or vice versa) isn't a usable rule.
#[async_trait]
pub trait RulesAdminStore: Send + Sync {
    async fn create_rule(&self, rule: CustomRuleRecord) -> Result<Uuid, StoreError>;
    async fn update_rule(&self, rule: CustomRuleRecord) -> Result<(), StoreError>;
    async fn get_rule(&self, id: Uuid) -> Result<Option<CustomRuleWithPatterns>, StoreError>;
    async fn list_rules(&self) -> Result<Vec<CustomRuleWithPatterns>, StoreError>;
    async fn delete_rule(&self, id: Uuid) -> Result<(), StoreError>;

    async fn set_patterns(&self, rule_id: Uuid, patterns: Vec<CustomRulePattern>) -> Result<(), StoreError>;
}
