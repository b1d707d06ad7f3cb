//! Section aggregation and efficiency grading.
//!
//! This module turns each section's provider records into tidy rows with
//! percentages, pivots them for display, grades per-provider efficiency and
//! drives a full report run.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod types;
