//! C5: bounded additive risk scorers for AI-processing events, model
//! training exposure, and inferred data flows.

mod event;
mod flow;
mod model;
mod weights;

pub use event::{EventType, event_risk};
pub use flow::flow_risk;
pub use model::model_risk;
pub use weights::RiskFactorWeights;
