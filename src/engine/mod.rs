//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer holds the checks that guard construction and evaluation.
//! The validator is consulted by the lower layers as well as by the API.
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Formula
//!   ↓
//! Layer 3: Terms
//!   ↓
//! Layer 2: Data
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input validation.
pub mod validator;
