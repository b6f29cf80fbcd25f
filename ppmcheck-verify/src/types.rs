//! Verification types.

use std::fmt;

use serde::Serialize;

/// Outcome of comparing one generated file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Normalised generated bytes equal the reference bytes.
    Match,
    /// Bytes differ.
    Mismatch,
    /// No reference file with the same name.
    MissingReference,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Match => "MATCH",
            Verdict::Mismatch => "MISMATCH",
            Verdict::MissingReference => "MISSING_REFERENCE",
        };
        f.write_str(s)
    }
}

/// Where two byte sequences first diverge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ByteDiff {
    /// Length of the reference file.
    pub expected_len: usize,
    /// Length of the generated file after normalisation.
    pub actual_len: usize,
    /// Offset of the first differing byte. When one side is a prefix of
    /// the other this is the length of the shorter side.
    pub first_diff_offset: usize,
}

impl ByteDiff {
    /// Diff `expected` against `actual`, or `None` when they are equal.
    pub fn new(expected: &[u8], actual: &[u8]) -> Option<Self> {
        if expected == actual {
            return None;
        }

        let first_diff_offset = expected
            .iter()
            .zip(actual.iter())
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| expected.len().min(actual.len()));

        Some(Self {
            expected_len: expected.len(),
            actual_len: actual.len(),
            first_diff_offset,
        })
    }
}

/// Result for a single generated file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub file: String,
    pub verdict: Verdict,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<ByteDiff>,
}

impl Comparison {
    pub fn matched(file: &str) -> Self {
        Self {
            file: file.to_string(),
            verdict: Verdict::Match,
            diff: None,
        }
    }

    pub fn mismatched(file: &str, diff: ByteDiff) -> Self {
        Self {
            file: file.to_string(),
            verdict: Verdict::Mismatch,
            diff: Some(diff),
        }
    }

    pub fn missing_reference(file: &str) -> Self {
        Self {
            file: file.to_string(),
            verdict: Verdict::MissingReference,
            diff: None,
        }
    }
}

/// All comparisons of one verification phase, in reporting order, with
/// the tallies kept up to date by [`push`](Self::push).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    comparisons: Vec<Comparison>,
    matched: usize,
    mismatched: usize,
    missing_references: usize,
}

impl VerificationSummary {
    pub fn push(&mut self, comparison: Comparison) {
        match comparison.verdict {
            Verdict::Match => self.matched += 1,
            Verdict::Mismatch => self.mismatched += 1,
            Verdict::MissingReference => self.missing_references += 1,
        }
        self.comparisons.push(comparison);
    }

    pub fn comparisons(&self) -> &[Comparison] {
        &self.comparisons
    }

    pub fn matched(&self) -> usize {
        self.matched
    }

    /// The mismatch tally.
    pub fn mismatched(&self) -> usize {
        self.mismatched
    }

    pub fn missing_references(&self) -> usize {
        self.missing_references
    }

    /// No generated file differs from its reference. Files without a
    /// reference do not count.
    pub fn all_identical(&self) -> bool {
        self.mismatched == 0
    }
}
