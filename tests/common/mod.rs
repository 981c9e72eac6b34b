// lazychains - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for lazychains integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```
//!
//! # Available Helpers
//!
//! - [`Pulls`] - Counts how many times a producer was pulled
//! - [`counted`] - A lazy chain over a vector that records every pull
//! - [`naturals`] - The infinite chain 0, 1, 2, ...
//! - [`poisoned`] - A chain that fails if it is ever forced

use std::cell::Cell;
use std::rc::Rc;

#[allow(unused_imports)]
pub use lazychains::{Chain, Error, Result, chain, lazycall, lazychain};

/// Shared pull counter.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct Pulls(Rc<Cell<usize>>);

impl Pulls {
    #[allow(dead_code)]
    pub fn get(&self) -> usize {
        self.0.get()
    }

    #[allow(dead_code)]
    fn bump(&self) {
        self.0.set(self.0.get() + 1);
    }
}

/// A lazy chain over `items` that records every pull on `pulls`.
///
/// The iterator gives no size hint, so the chain ends with a resolved
/// empty node rather than the canonical empty chain.
#[allow(dead_code)]
pub fn counted<T: 'static>(items: Vec<T>, pulls: &Pulls) -> Chain<T> {
    let pulls = pulls.clone();
    let mut items = items.into_iter();
    lazychain(std::iter::from_fn(move || {
        pulls.bump();
        items.next()
    }))
}

/// The infinite chain of natural numbers.
#[allow(dead_code)]
pub fn naturals() -> Chain<u64> {
    lazychain(0u64..)
}

/// A chain that reports an error the moment anything forces it.
#[allow(dead_code)]
pub fn poisoned<T: Clone + 'static>() -> Chain<T> {
    Chain::deferred(|| Err(Error::invalid_source("poisoned chain was forced")))
}
