//! Page generation modules
//!
//! The review page is the only page: it shows either the compose text or
//! the rendered content with its comments, built from shared components.

pub mod review;
