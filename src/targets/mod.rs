// src/targets/mod.rs
// =============================================================================
// This module decides which domains to enumerate.
//
// Exactly one source is used, picked in this order:
// 1. --domain (a single value)
// 2. --list (a newline-delimited file)
// 3. piped standard input (newline-delimited)
// =============================================================================

mod source;

pub use source::TargetSource;
