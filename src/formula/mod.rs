//! Layer 4: Formula
//!
//! # Purpose
//!
//! This layer combines terms into formulas and realizes them:
//! - `Formula`: ordered terms with label caches and lookups
//! - Operators `+`, `-`, `*`
//! - Assembly of the design matrix
//! - Nesting test between factors
//!
//! # Architecture
//!
//! ```text
//! Layer 6: API
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Formula ← You are here
//!   ↓
//! Layer 3: Terms
//!   ↓
//! Layer 2: Data
//!   ↓
//! Layer 1: Primitives
//! ```

/// Formula type and lookups.
pub mod expression;

/// Formula operators.
pub mod algebra;

/// Design matrix assembly.
pub mod assembly;

/// Nesting test.
pub mod nesting;
