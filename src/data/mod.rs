//! Data layer for the Dataset accessor
//!
//! This module normalizes keyed and positional rows behind one interface
//! for column resolution, value access, type guessing and aggregation.

// Core data modules
pub mod datavalue;
pub mod row;
pub mod dataset;
pub mod accessor;

// Inference and aggregation
pub mod aggregates;
pub mod datavalue_compare;
pub mod type_inference;

// Construction from external representations
pub mod json;
