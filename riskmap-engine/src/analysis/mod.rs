//! Coverage analysis: pure, deterministic set algebra over the
//! mapping store snapshot.

pub mod analyzer;
pub mod report;

pub use analyzer::CoverageAnalyzer;
pub use report::{
    ActiveControlEntry, AnalysisRequest, CoverageReport, ExposedRiskEntry,
    PartiallyCoveredRiskEntry,
};
