//! Compass API: personalized course recommendations.
//!
//! The scoring engine combines four independent signals (interest match,
//! engagement, view frequency/recency, catalog popularity) into a single
//! weighted score per course. Two execution strategies produce the same
//! rankings: a row-wise in-process evaluation and a set-oriented bulk
//! aggregation pushed down to the store.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod scoring;
pub mod services;
pub mod store;
