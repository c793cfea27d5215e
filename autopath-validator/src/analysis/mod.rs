//! Trajectory analysis
//!
//! Whole-path statistics and the first-problem route scan.

pub mod route_analyzer;
pub mod statistics;

pub use route_analyzer::{
    analyze_first_problem, IssueKind, ProblemSeverity, RouteAnalysis, RouteAnalyzer, RouteIssue,
    Suggestion,
};
pub use statistics::PathStatistics;
