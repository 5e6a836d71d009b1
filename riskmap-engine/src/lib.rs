//! # riskmap-engine
//!
//! The Riskmap core: the coverage analyzer (set algebra classifying
//! every risk as fully covered, partially covered, or exposed under an
//! active capability/control selection) and the scenario manager
//! (CRUD over saved what-if selections with per-user ownership).

pub mod analysis;
pub mod scenarios;

pub use analysis::{AnalysisRequest, CoverageAnalyzer, CoverageReport};
pub use scenarios::ScenarioManager;
