//! Layer 3: Terms
//!
//! # Purpose
//!
//! This layer provides the symbolic model terms:
//! - `Term`: named quantity, looked up or derived
//! - `Factor`: categorical term with indicator or ordinal coding
//! - `Quantitative` / `FuncQuant`: numeric terms, powers and transforms
//! - Interaction terms built from pairs of terms
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
//! Layer 3: Terms ← You are here
//!   ↓
//! Layer 2: Data
//!   ↓
//! Layer 1: Primitives
//! ```

/// Core term type and derivations.
pub mod term;

/// Categorical factors.
pub mod factor;

/// Quantitative terms, powers and function terms.
pub mod quantitative;

/// Interaction term construction.
pub mod interaction;
