//! # crawl-sep Core
//!
//! Core types for evaluating crawler access policies.
//!
//! A crawler access policy declares which user agents belong to which
//! semantic group (search indexing, AI-training data collection, ...) and
//! which paths each group may access. This crate provides:
//!
//! - [`Policy`] - the validated policy document
//! - [`validate_shape`] - structural validation of raw JSON
//! - [`load_policy_from_file`] / [`resolve_policy_path`] - policy file access
//! - [`sample_policy`] / [`write_sample`] - the canonical sample policy
//!
//! ## Example
//!
//! ```rust
//! use crawlsep_core::Policy;
//!
//! let policy: Policy = r#"{
//!     "site": "example.com",
//!     "userAgents": { "indexing": ["Googlebot"], "training": ["CCBot"] },
//!     "rules": [{ "group": "training", "disallow": ["/"] }]
//! }"#
//! .parse()
//! .unwrap();
//! assert_eq!(policy.user_agents.len(), 2);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod policy;
pub mod shape;


pub use error::{Error, Result};
pub use loader::{load_policy_from_file, resolve_policy_path, sample_policy, write_sample};
pub use policy::{Policy, Rule, UserAgents};
pub use shape::{validate_shape, ShapeError, ShapeErrorKind};
