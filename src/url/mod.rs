//! URL handling module for Sumi-Sift
//!
//! This module provides scheme normalization for user input and the
//! network-location comparison used to classify links.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{is_same_location, network_location};
pub use normalize::normalize_url;
