//! Course record aggregation and grade-point conversion.
//!
//! This module holds the decoded record types, the letter-grade conversion
//! table, and the credit-weighted averaging over both point scales.

pub mod aggregate;
pub mod scale;
pub mod types;
pub mod utility;
