// lazychains - Immutable, lazily expanded chains
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # lazychains
//!
//! A chain is a singly linked list that can share tails with other chains
//! and can be filled in on demand from an iterator or a deferred call. That
//! makes it a good fit for very large or infinite sequences, and for many
//! sequences derived from a common suffix.
//!
//! ## Quick Start
//!
//! ```rust
//! use lazychains::{chain, lazychain};
//!
//! let lines = lazychain(vec!["one", "two", "three"]);
//! assert_eq!(lines.head().unwrap(), "one");
//! // only the first line has been pulled so far
//! assert_eq!(lines.expanded_len(), 1);
//!
//! let all = chain(vec!["one", "two", "three"]);
//! assert_eq!(all.expanded_len(), 3);
//! assert_eq!(lines, all);
//! ```
//!
//! ## Generative Sequences
//!
//! ```rust
//! use lazychains::{Chain, lazycall, lazychain};
//!
//! fn sieve(numbers: Chain<u64>) -> Chain<u64> {
//!     lazycall(
//!         |numbers: Chain<u64>| {
//!             let (p, rest) = numbers.dest()?;
//!             Ok(sieve(rest.filter(move |n| n % p != 0)).prepend(p))
//!         },
//!         numbers,
//!     )
//! }
//!
//! let primes = sieve(lazychain(2u64..));
//! assert_eq!(primes.get(9).unwrap(), 29);
//! ```
//!
//! Chains are single-threaded: handles are neither `Send` nor `Sync`.

mod convert;

pub use convert::{FromChain, IntoChain, from_chain, to_chain};

// Re-export core types for convenience
pub use lazychains_core::{
    Chain, DeferredCallSource, Error, Iter, IteratorSource, Produced, Producer, Result, Step,
    get_print_length, set_print_length,
};

use tracing::trace;

/// A fully resolved chain holding every item of `source`.
///
/// The chain does not depend on `source` afterwards.
pub fn chain<I>(source: I) -> Chain<I::Item>
where
    I: IntoIterator,
{
    Chain::eager(source)
}

/// An unexpanded chain over `source`. Items are pulled one at a time as the
/// chain is forced, which allows very large or infinite sources.
pub fn lazychain<I>(source: I) -> Chain<I::Item>
where
    I: IntoIterator,
    I::IntoIter: 'static,
    I::Item: 'static,
{
    Chain::lazy(source)
}

/// An unexpanded chain whose contents are `call(args)`, evaluated once when
/// the chain is first forced.
pub fn lazycall<T, F, A>(call: F, args: A) -> Chain<T>
where
    T: Clone + 'static,
    F: FnOnce(A) -> Result<Chain<T>> + 'static,
    A: 'static,
{
    trace!("deferring chain construction");
    Chain::deferred_with(call, args)
}

/// The canonical empty chain.
pub fn empty<T>() -> Chain<T> {
    Chain::empty()
}
