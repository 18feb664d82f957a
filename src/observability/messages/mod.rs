// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! # Usage Pattern
//!
//! ```rust
//! use chainline::observability::messages::chain::ChainExecStarted;
//! use chainline::observability::StructuredLog;
//!
//! let msg = ChainExecStarted {
//!     chain: "camera_pipeline",
//!     id: 42,
//!     run: 7,
//! };
//!
//! msg.log();
//! ```

pub mod chain;
pub mod module;
