//! Integration tests for imgblend crates.
//!
//! These exercise the compositor, the mode library and the HSL conversion
//! together, through the public API only.
