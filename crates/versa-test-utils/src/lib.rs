//! Shared test utilities for the versa workspace.
//!
//! This crate provides standardised fixtures so each crate's test suite does
//! not rebuild `.ai/` trees by hand. It is a dev-dependency only, never
//! published.
//!
//! # Modules
//!
//! - [`markers`]: directory markers that bound root discovery
//! - [`root`]: [`TestRoot`] builder for `.ai/` configuration roots

pub mod markers;
pub mod root;

pub use root::TestRoot;
