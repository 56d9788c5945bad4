//! Shared test utilities for the imgcheck workspace.
//!
//! This crate is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`] builder for paired reference/live trees
//! - [`perms`]: permission helpers for unreadable-file scenarios

pub mod perms;
pub mod tree;

pub use perms::{PermissionGuard, is_root};
pub use tree::TestTree;
