//! # bidsprep Common Library
//!
//! Shared code for the bidsprep tools including:
//! - Subject/session identifier normalization
//! - Dataset layout resolution (subject and session directories)
//! - Configuration loading
//! - Common error types

pub mod config;
pub mod error;
pub mod fs_util;
pub mod ids;
pub mod layout;

pub use error::{Error, Result};
pub use ids::{SessionId, SubjectId};
pub use layout::SessionDir;
