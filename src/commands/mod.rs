//! CLI command implementations for csvmill.
//!
//! This module contains all the command implementations for the csvmill CLI
//! tool. Each submodule implements a specific command.
//!
//! # Command Categories
//!
//! ## Transform
//! - [`merge`] - Merge two CSV files into one
//! - [`split`] - Split a CSV by filter expression or random percentage
//! - [`onehot`] - One-hot encode a categorical column
//!
//! ## Inspect
//! - [`analyze`] - Analyze per-column value distributions

// Blanket clippy pedantic allows for command implementations.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unused_self,
    clippy::unnecessary_wraps,
    clippy::similar_names,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::must_use_candidate,
    clippy::items_after_statements,
    clippy::too_many_lines,
    clippy::redundant_closure_for_method_calls,
    clippy::explicit_iter_loop,
    clippy::uninlined_format_args,
    clippy::map_unwrap_or
)]

pub mod analyze;
pub mod command;
pub mod common;
pub mod merge;
pub mod onehot;
pub mod split;
