//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the primitive abstractions, data structures, and
//! utility types used throughout the crate. It has zero internal
//! dependencies within the crate.
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
//! Layer 2: Data
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Shared error types.
pub mod errors;

/// Dense numeric arrays.
pub mod array;

/// Categorical level values.
pub mod level;

/// Extra keyword arguments.
pub mod keywords;
