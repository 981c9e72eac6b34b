// lazychains - Conversions between chains and Rust collections
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Conversions between chains and Rust collections.
//!
//! This module provides the [`IntoChain`] and [`FromChain`] traits.
//!
//! # Built-in Conversions
//!
//! | Rust Type | Into chain | From chain |
//! |-----------|------------|------------|
//! | `Chain<T>` | as is | shares nodes, forces everything |
//! | `Vec<T>` | resolved | yes |
//! | `im::Vector<T>` | resolved | yes |
//! | `Option<T>` | zero or one element | no |
//! | `&str` / `String` | chain of `char` | from `Chain<char>` |
//!
//! Converting *from* a chain forces it completely, so it never returns for
//! an infinite chain.
//!
//! # Custom Conversions
//!
//! ```rust
//! use lazychains::{Chain, FromChain, IntoChain, Result};
//!
//! struct Stack(Vec<i64>);
//!
//! impl IntoChain<i64> for Stack {
//!     fn into_chain(self) -> Chain<i64> {
//!         // top of the stack first
//!         self.0.into_iter().rev().collect()
//!     }
//! }
//!
//! impl FromChain<i64> for Stack {
//!     fn from_chain(chain: &Chain<i64>) -> Result<Self> {
//!         let mut items = chain.to_vec()?;
//!         items.reverse();
//!         Ok(Stack(items))
//!     }
//! }
//!
//! let c = Stack(vec![1, 2, 3]).into_chain();
//! assert_eq!(c.head().unwrap(), 3);
//! assert_eq!(Stack::from_chain(&c).unwrap().0, vec![1, 2, 3]);
//! ```

use im::Vector;

use lazychains_core::{Chain, Result};

/// Convert a Rust value into a chain.
pub trait IntoChain<T> {
    fn into_chain(self) -> Chain<T>;
}

/// Build a Rust value from a chain.
pub trait FromChain<T>: Sized {
    fn from_chain(chain: &Chain<T>) -> Result<Self>;
}

// ============================================================================
// IntoChain implementations
// ============================================================================

impl<T> IntoChain<T> for Chain<T> {
    fn into_chain(self) -> Chain<T> {
        self
    }
}

impl<T> IntoChain<T> for Vec<T> {
    fn into_chain(self) -> Chain<T> {
        self.into_iter().collect()
    }
}

impl<T: Clone> IntoChain<T> for Vector<T> {
    fn into_chain(self) -> Chain<T> {
        self.into_iter().collect()
    }
}

impl<T> IntoChain<T> for Option<T> {
    fn into_chain(self) -> Chain<T> {
        match self {
            Some(value) => Chain::cons(value, Chain::empty()),
            None => Chain::empty(),
        }
    }
}

impl IntoChain<char> for &str {
    fn into_chain(self) -> Chain<char> {
        self.chars().collect()
    }
}

impl IntoChain<char> for String {
    fn into_chain(self) -> Chain<char> {
        self.chars().collect()
    }
}

// ============================================================================
// FromChain implementations
// ============================================================================

impl<T> FromChain<T> for Chain<T> {
    fn from_chain(chain: &Chain<T>) -> Result<Self> {
        chain.expand_all()
    }
}

impl<T: Clone> FromChain<T> for Vec<T> {
    fn from_chain(chain: &Chain<T>) -> Result<Self> {
        chain.to_vec()
    }
}

impl<T: Clone> FromChain<T> for Vector<T> {
    fn from_chain(chain: &Chain<T>) -> Result<Self> {
        chain.iter().collect()
    }
}

impl FromChain<char> for String {
    fn from_chain(chain: &Chain<char>) -> Result<Self> {
        chain.iter().collect()
    }
}

// ============================================================================
// Convenience functions
// ============================================================================

/// Convert a Rust value into a chain.
///
/// This is a convenience function that calls `IntoChain::into_chain`.
pub fn to_chain<T, V: IntoChain<T>>(value: V) -> Chain<T> {
    value.into_chain()
}

/// Build a Rust value from a chain.
///
/// This is a convenience function that calls `FromChain::from_chain`.
pub fn from_chain<T, V: FromChain<T>>(chain: &Chain<T>) -> Result<V> {
    V::from_chain(chain)
}
