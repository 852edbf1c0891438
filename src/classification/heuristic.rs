//! Empirical rule table fusing chi-square and Monte Carlo error.
//!
//! Rules are evaluated in a fixed order:
//!
//! 1. pi error below 0.01% adds 95.
//! 2. chi-square above 300 with pi error below 0.03% adds 75.
//! 3. chi-square below 300 with pi error above 0.03% adds 60.
//! 4. chi-square above 2000 with pi error above 20% resets the total to 0.
//! 5. A total of 100 or more is capped at 99.
//!
//! Rule 3 describes data that usually looks compressed rather than
//! encrypted, yet it still raises the score. That is preserved as is and
//! made visible through [`Classification::fired`].
//!
//! Reference thresholds follow
//! <http://www.devttys0.com/2013/06/differentiate-encryption-from-compression-using-math/>.

use serde::{Deserialize, Serialize};

/// A rule of the heuristic that contributed to a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Near-perfect pi approximation.
    HighPiAccuracy,
    /// High chi-square with a low pi error.
    HighChiLowError,
    /// Low chi-square with a high pi error (usually compression).
    LowChiHighError,
    /// Strong deviation in both statistics reset the score.
    StrongDeviationReset,
    /// The accumulated score was capped.
    Capped,
}

impl Rule {
    /// Short human-readable description.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::HighPiAccuracy => "near-perfect pi approximation",
            Self::HighChiLowError => "high chi-square with low pi error",
            Self::LowChiHighError => "low chi-square with high pi error (compression-like)",
            Self::StrongDeviationReset => "strong deviation in both statistics",
            Self::Capped => "score capped",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Outcome of the heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Confidence of encryption in percent, 0 to 99.
    pub confidence: u8,
    /// Rules that fired, in evaluation order.
    pub fired: Vec<Rule>,
}

/// Thresholds and weights of the rule table.
///
/// The default reproduces the reference heuristic exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicRules {
    /// Chi-square reference, about the p = 0.05 critical value for 255
    /// degrees of freedom (293.25) rounded up.
    pub chi_square_reference: f64,
    /// Pi error (percent) below which rule 1 fires.
    pub accurate_pi_error: f64,
    /// Score added by rule 1.
    pub accurate_pi_weight: u32,
    /// Pi error (percent) separating rules 2 and 3.
    pub pi_error_reference: f64,
    /// Score added by rule 2.
    pub high_chi_weight: u32,
    /// Score added by rule 3.
    pub low_chi_weight: u32,
    /// Chi-square above which rule 4 may reset.
    pub reset_chi_square: f64,
    /// Pi error (percent) above which rule 4 may reset.
    pub reset_pi_error: f64,
    /// Largest score ever returned.
    pub cap: u8,
}

impl Default for HeuristicRules {
    fn default() -> Self {
        Self {
            chi_square_reference: 300.0,
            accurate_pi_error: 0.01,
            accurate_pi_weight: 95,
            pi_error_reference: 0.03,
            high_chi_weight: 75,
            low_chi_weight: 60,
            reset_chi_square: 2000.0,
            reset_pi_error: 20.0,
            cap: 99,
        }
    }
}

impl HeuristicRules {
    /// Validates thresholds and cap.
    pub fn validate(&self) -> Result<(), RulesError> {
        let thresholds = [
            ("chi_square_reference", self.chi_square_reference),
            ("accurate_pi_error", self.accurate_pi_error),
            ("pi_error_reference", self.pi_error_reference),
            ("reset_chi_square", self.reset_chi_square),
            ("reset_pi_error", self.reset_pi_error),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(RulesError::InvalidThreshold { name, value });
            }
        }
        if self.cap > 99 {
            return Err(RulesError::CapTooLarge(self.cap));
        }
        Ok(())
    }

    /// Classifies a pair of statistics.
    ///
    /// Pure: the same inputs always give the same result, and the
    /// confidence never exceeds `cap`.
    pub fn classify(&self, chi_square: f64, pi_error_percent: f64) -> Classification {
        let mut total: u32 = 0;
        let mut fired = Vec::new();

        if pi_error_percent < self.accurate_pi_error {
            total = total.saturating_add(self.accurate_pi_weight);
            fired.push(Rule::HighPiAccuracy);
        }
        if chi_square > self.chi_square_reference && pi_error_percent < self.pi_error_reference {
            total = total.saturating_add(self.high_chi_weight);
            fired.push(Rule::HighChiLowError);
        }
        if chi_square < self.chi_square_reference && pi_error_percent > self.pi_error_reference {
            total = total.saturating_add(self.low_chi_weight);
            fired.push(Rule::LowChiHighError);
        }
        if chi_square > self.reset_chi_square && pi_error_percent > self.reset_pi_error {
            total = 0;
            fired.push(Rule::StrongDeviationReset);
        }
        if total >= 100 || total > self.cap as u32 {
            total = self.cap as u32;
            fired.push(Rule::Capped);
        }

        Classification {
            confidence: total as u8,
            fired,
        }
    }
}

/// Invalid rule table configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RulesError {
    #[error("threshold {name} must be finite and non-negative, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("cap must be at most 99, got {0}")]
    CapTooLarge(u8),
}

/// Classifies with the reference rule table.
pub fn classify(chi_square: f64, pi_error_percent: f64) -> u8 {
    HeuristicRules::default()
        .classify(chi_square, pi_error_percent)
        .confidence
}
