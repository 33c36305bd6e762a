//! Layer 2: Data
//!
//! # Purpose
//!
//! This layer holds the caller-owned state that terms are built and
//! evaluated against:
//! - `Namespace`: variable name to data
//! - `TermRegistry`: termname to term
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Formula
//!   ↓
//! Layer 3: Terms
//!   ↓
//! Layer 2: Data ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Variable namespace.
pub mod namespace;

/// Term registry.
pub mod registry;
