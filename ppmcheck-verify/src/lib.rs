//! PPM verification.
//!
//! Compares the PPM files produced by the painter with trusted reference
//! files, byte for byte.
//!
//! # Overview
//!
//! For every generated file:
//!
//! 1. Look up a reference file with the same name
//! 2. Normalise CR-LF line endings in the generated bytes
//! 3. Compare against the raw reference bytes
//!
//! Each file gets a [`Verdict`]. Only [`Verdict::Mismatch`] counts toward
//! the mismatch tally; a missing reference is reported but tolerated.

pub mod normalize;
pub mod types;
pub mod verifier;

pub use normalize::normalize_line_endings;
pub use types::{ByteDiff, Comparison, VerificationSummary, Verdict};
pub use verifier::{compare_bytes, Verifier, VerifyError};
