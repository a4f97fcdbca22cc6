//! Wealth portfolio analytics core.
//!
//! Synthesizes a fictional private-banking client book from a single seed,
//! derives KPIs and grouped breakdowns over any filtered view of it, and
//! builds the prompt handed to an external narrative service.

pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod generator;
pub mod narrative;
pub mod portfolio;
pub mod rng;
pub mod summary;
pub mod types;
