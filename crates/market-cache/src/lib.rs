#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/market/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Symbol-keyed record cache.
//!
//! This crate provides [`CacheStore`], the explicitly owned store that the
//! query client writes decoded records into and the analytics layer reads
//! from:
//!
//! - [`CacheStore::get_or_create`] - Returns the record for a key, allocating a zero-valued one
//! - [`CacheStore::get`] - Read-only lookup that never allocates
//! - [`CacheStore::for_each`] - Snapshot iteration safe against concurrent refreshes

/// The cache store and its per-kind tables.
pub mod store;

pub use store::{CacheStore, Cached, Shared, Table};
