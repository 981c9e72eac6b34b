// lazychains-core - Lazily expanded singly-linked chains
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # lazychains-core
//!
//! Immutable singly-linked chains whose nodes are filled in on demand.
//!
//! A [`Chain`] node is unexpanded (holding a [`Producer`]), a resolved
//! value-and-successor, or the end. Forcing runs a producer at most once per
//! node and caches the result, so chains behave as immutable values while
//! expanding monotonically underneath. Tails are shared freely between
//! chains, and infinite chains are fine as long as nobody asks for all of it.

pub mod display;
pub mod error;
pub mod node;
pub mod producer;
pub mod sequence;
pub mod transform;

pub use display::{get_print_length, set_print_length};
pub use error::{Error, Result};
pub use node::{Chain, Step};
pub use producer::{DeferredCallSource, IteratorSource, Produced, Producer};
pub use sequence::Iter;
