//! ```text
//! EngineConfig ─┬─► EngineConfigBuilder ─► Runtime config
//!               │                           │
//!               │                           ├─► ClassificationEngine (C1) ──► Match, ClassificationResult
//!               │                           │        │
//!               │                           │        ├─► RuleEntityRecognizer / CompositeRecognizer (C3)
//!               │                           │        └─► ConfidenceScorer (C2) ──► EnhancedMatch, ReviewDecision
//!               │                           │
//!               │                           ├─► Lineage inference (C4) ──► InferredFlow ──► LineageGraph
//!               │                           │
//!               │                           └─► Risk scorers (C5) ──► event/model/flow risk
//!               │
//!               └─► store trait family (consumed, implemented by the surrounding service)
//! ```
//!
//! # dspm-core
//!
//! **Classification, confidence scoring, and lineage inference core for a
//! data security posture management engine.**
//!
//! `dspm-core` finds sensitive data in documents and structured content,
//! fuses rule-based and model-based signals into a calibrated confidence
//! score, infers data-flow lineage from cloud connector configuration, and
//! scores the resulting risk. It does not own a database, a cloud
//! connector, or an HTTP/CLI surface — those are the surrounding service's
//! job, expressed here only as the trait contracts ([`store`]) this crate
//! consumes.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dspm_core::prelude::*;
//!
//! let config = EngineConfigBuilder::new()
//!     .with_file("dspm-core.toml")?
//!     .with_env()
//!     .build()?;
//!
//! let engine = ClassificationEngine::with_builtin_rules()?;
//! let result = engine.classify("Customer SSN: 123-45-6789 on file");
//! assert_eq!(result.total_findings, 1);
//! ```
//!
//! ## Key Features
//!
//! - **Rule-based classification** – Regex + validator rules with contextual
//!   gates, negative gates, and format-preserving redaction
//! - **ML confidence fusion** – Pattern, context, frequency, and NER signals
//!   combined into a single calibrated score with a human-review gate
//! - **Pluggable NER** – A narrow `EntityRecognizer` capability trait so a
//!   model-backed recognizer can compose with the bundled rule-based one
//! - **Lineage inference** – Serverless function configuration and IAM
//!   policies turned into a traversable `LineageGraph`
//! - **Bounded risk scoring** – Additive, capped-at-100 scorers for
//!   processing events, model training exposure, and inferred flows
//!
//! ## Modules
//!
//! - [`config`] – Engine configuration, builder pattern, YAML/TOML/JSON + env loading
//! - [`model`] – The `Sensitivity`/`Category` vocabularies shared by every component
//! - [`classifier`] – C1: the sensitive-data classification engine
//! - [`entities`] – C3: rule-based named-entity recognition
//! - [`confidence`] – C2: ML confidence fusion and the human-review gate
//! - [`lineage`] – C4: lineage inference from function config and IAM policy
//! - [`risk`] – C5: event, model-training, and flow risk scorers
//! - [`store`] – DTOs and trait contracts for the persistence layer this crate consumes

#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod classifier;
pub mod config;
pub mod confidence;
pub mod entities;
pub mod lineage;
pub mod model;
pub mod risk;
pub mod store;

/// Re-exports for convenient access to core types.
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig, EngineConfigBuilder};
    pub use crate::model::{Category, Sensitivity};

    pub use crate::classifier::{ClassificationEngine, ClassificationResult, ClassifierError, Match};
    pub use crate::confidence::{ConfidenceScorer, EnhancedMatch, ReviewDecision, ReviewReason};
    pub use crate::entities::{CompositeRecognizer, Entity, EntityRecognizer, EntityType, RuleEntityRecognizer};
    pub use crate::lineage::{FlowType, InferredFlow, LineageGraph};
    pub use crate::risk::{event_risk, flow_risk, model_risk};
    pub use crate::store::StoreError;
}
