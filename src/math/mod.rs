//! Mathematical utilities for the search

/// Whitening and k-means clustering
pub mod clustering;
