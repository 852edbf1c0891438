//! Encryption confidence scoring.
//!
//! Combines the chi-square statistic and the Monte Carlo pi error into a
//! percentage. The score is an empirical heuristic, not a probability.

mod heuristic;

pub use heuristic::{classify, Classification, HeuristicRules, Rule, RulesError};
