//! Display formatting for evaluation results.
//!
//! Long fractional parts are folded into a short mantissa and an explicit
//! `e10^<k>` suffix. Folding is lossy and for display only; the raw result
//! is what gets carried forward on commit.

use serde::{Deserialize, Serialize};

/// Thresholds for scientific-notation folding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoldPolicy {
    /// Fractional lengths at or above this fold.
    pub threshold: usize,
    /// Fractional digits kept after folding.
    pub width: usize,
}

impl FoldPolicy {
    pub const fn standard() -> Self {
        Self {
            threshold: 7,
            width: 4,
        }
    }

    /// Simplified variant: fold from 3 fractional digits, keep 3.
    pub const fn compact() -> Self {
        Self {
            threshold: 3,
            width: 3,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.width >= 1 && self.width <= self.threshold
    }
}

impl Default for FoldPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// Turns raw result text into bounded-width display text.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResultFormatter {
    policy: FoldPolicy,
}

impl ResultFormatter {
    pub fn new(policy: FoldPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> FoldPolicy {
        self.policy
    }

    /// Format a raw numeric result for display.
    ///
    /// Input without a `.`, with a short fractional part, or with a
    /// fractional part that is not all digits is returned unchanged.
    pub fn format(&self, result: &str) -> String {
        let Some((integer, fraction)) = result.split_once('.') else {
            return result.to_string();
        };

        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return result.to_string();
        }

        let length = fraction.len();
        if length < self.policy.threshold {
            return result.to_string();
        }

        let kept = self.policy.width.min(length);
        format!("{}.{}e10^{}", integer, &fraction[..kept], length - kept)
    }
}

/// Split a result into integer and fractional parts and drop a fractional
/// part made only of zeros (`"12.0"` becomes `"12"`).
pub fn trim_zero_fraction(result: &str) -> &str {
    match result.split_once('.') {
        Some((integer, fraction)) if fraction.chars().all(|c| c == '0') && !integer.is_empty() => {
            integer
        }
        _ => result,
    }
}
