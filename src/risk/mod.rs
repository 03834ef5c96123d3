//! Route risk classification
//!
//! Turns per-point weather observations into a severity-classified route
//! risk report with human-readable explanations.

pub mod classifier;

pub use classifier::{
    summary_for_label, RiskClassifier, RiskDetail, RiskFactor, RiskFactorKind, RouteRiskReport,
    Severity,
};
