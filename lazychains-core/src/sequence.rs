// lazychains-core - Sequence protocol
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Indexing, membership, equality, bounded length checks and iteration.
//!
//! Every walk here is a loop over the successor spine, so chains of any
//! length are handled without growing the call stack.

use std::ops::ControlFlow;

use crate::error::{Error, Result};
use crate::node::Chain;

impl<T> Chain<T> {
    /// True if the chain has at least `n` elements. Forces at most `n` steps.
    pub fn len_is_at_least(&self, n: usize) -> Result<bool> {
        let mut current = self.clone();
        for _ in 0..n {
            match current.force_with(|_, next| next.clone())? {
                Some(next) => current = next,
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    /// True if the chain has more than `n` elements. Forces at most `n + 1` steps.
    pub fn len_is_more_than(&self, n: usize) -> Result<bool> {
        self.len_is_at_least(n.saturating_add(1))
    }

    /// True if the chain has at most `n` elements. Forces at most `n + 1` steps.
    pub fn len_is_at_most(&self, n: usize) -> Result<bool> {
        Ok(!self.len_is_more_than(n)?)
    }

    /// True if the chain has fewer than `n` elements. Forces at most `n` steps.
    pub fn len_is_less_than(&self, n: usize) -> Result<bool> {
        Ok(!self.len_is_at_least(n)?)
    }

    /// Lock-step comparison, forcing both chains only as far as needed.
    /// Handles that share a node are equal without forcing anything further.
    pub fn equals(&self, other: &Chain<T>) -> Result<bool>
    where
        T: PartialEq,
    {
        let mut left = self.clone();
        let mut right = other.clone();
        loop {
            if left.same_node(&right) {
                return Ok(true);
            }
            match (left.resolve()?, right.resolve()?) {
                (false, false) => return Ok(true),
                (true, true) => {}
                _ => return Ok(false),
            }
            let successors = left
                .peek(|a, left_next| {
                    right.peek(|b, right_next| (a == b).then(|| (left_next.clone(), right_next.clone())))
                })
                .flatten()
                .flatten();
            match successors {
                Some((left_next, right_next)) => {
                    left = left_next;
                    right = right_next;
                }
                None => return Ok(false),
            }
        }
    }

    /// True if some element equals `value`. Stops at the first match.
    pub fn contains(&self, value: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        let mut current = self.clone();
        loop {
            let step = current.force_with(|item, next| {
                if item == value {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(next.clone())
                }
            })?;
            match step {
                None => return Ok(false),
                Some(ControlFlow::Break(())) => return Ok(true),
                Some(ControlFlow::Continue(next)) => current = next,
            }
        }
    }
}

impl<T: Clone> Chain<T> {
    /// The element at `index`.
    ///
    /// A non-negative index forces at most `index + 1` steps. A negative
    /// index counts back from the end, which needs the full length and so
    /// forces the whole chain.
    pub fn get(&self, index: i64) -> Result<T> {
        if index < 0 {
            let length = self.length()?;
            let target = length as i64 + index;
            if target < 0 {
                return Err(Error::index(index, length));
            }
            return self.get(target);
        }

        let target = index as usize;
        let mut position = 0usize;
        let mut current = self.clone();
        loop {
            let step = current.force_with(|value, next| {
                if position == target {
                    ControlFlow::Break(value.clone())
                } else {
                    ControlFlow::Continue(next.clone())
                }
            })?;
            match step {
                None => return Err(Error::index(index, position)),
                Some(ControlFlow::Break(value)) => return Ok(value),
                Some(ControlFlow::Continue(next)) => {
                    current = next;
                    position += 1;
                }
            }
        }
    }

    /// Iterate over the elements, expanding the chain as it goes.
    pub fn iter(&self) -> Iter<T> {
        Iter {
            current: Some(self.clone()),
        }
    }

    /// Collect every element. Forces the whole chain.
    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }
}

/// Iterator over a chain's elements.
///
/// Yields `Err` once and then stops if a producer fails part way through.
pub struct Iter<T> {
    current: Option<Chain<T>>,
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Result<T>> {
        let current = self.current.take()?;
        match current.force_with(|value, next| (value.clone(), next.clone())) {
            Ok(Some((value, next))) => {
                self.current = Some(next);
                Some(Ok(value))
            }
            Ok(None) => None,
            Err(err) => Some(Err(err)),
        }
    }
}

impl<T: Clone> IntoIterator for &Chain<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for Chain<T> {
    type Item = Result<T>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Iter<T> {
        Iter {
            current: Some(self),
        }
    }
}

/// Equality by value sequence, whatever either side's expansion state.
/// A chain whose producer fails compares unequal; use [`Chain::equals`] to
/// see the error.
impl<T: PartialEq> PartialEq for Chain<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Chain<char> {
        Chain::lazy("abc".chars())
    }

    #[test]
    fn test_get_positive() {
        let c = letters();
        assert_eq!(c.get(1).unwrap(), 'b');
        assert_eq!(c.expanded_len(), 2);
        assert_eq!(c.get(0).unwrap(), 'a');
        assert_eq!(c.get(3).unwrap_err(), Error::index(3, 3));
    }

    #[test]
    fn test_get_negative() {
        let c = letters();
        assert_eq!(c.get(-1).unwrap(), 'c');
        assert_eq!(c.get(-3).unwrap(), 'a');
        assert_eq!(c.get(-4).unwrap_err(), Error::index(-4, 3));
    }

    #[test]
    fn test_get_on_infinite_chain() {
        let c = Chain::lazy(0u64..);
        assert_eq!(c.get(1000).unwrap(), 1000);
        assert_eq!(c.expanded_len(), 1001);
    }

    #[test]
    fn test_contains_stops_at_match() {
        let c = Chain::lazy(0..);
        assert!(c.contains(&5).unwrap());
        assert_eq!(c.expanded_len(), 6);
        assert!(!letters().contains(&'z').unwrap());
    }

    #[test]
    fn test_equals_ignores_expansion_state() {
        let lazy = letters();
        let eager = Chain::eager("abc".chars());
        lazy.head().unwrap();
        assert!(lazy.equals(&eager).unwrap());
        assert_eq!(lazy, eager);
        assert_ne!(letters(), Chain::eager("ab".chars()));
        assert_ne!(letters(), Chain::eager("abd".chars()));
    }

    #[test]
    fn test_equals_same_node_does_not_force() {
        let c = Chain::lazy(0..);
        assert!(c.equals(&c.clone()).unwrap());
        assert_eq!(c.expanded_len(), 0);
    }

    #[test]
    fn test_bounded_length_checks() {
        let c = Chain::lazy(0..);
        assert!(c.len_is_at_least(10).unwrap());
        assert!(c.len_is_more_than(10).unwrap());
        assert!(!c.len_is_at_most(10).unwrap());
        assert!(!c.len_is_less_than(10).unwrap());
        assert_eq!(c.expanded_len(), 11);

        let short = letters();
        assert!(short.len_is_at_least(3).unwrap());
        assert!(!short.len_is_more_than(3).unwrap());
        assert!(short.len_is_at_most(3).unwrap());
        assert!(short.len_is_less_than(4).unwrap());
    }

    #[test]
    fn test_iter_expands_gradually() {
        let c = letters();
        let mut it = c.iter();
        assert_eq!(it.next().unwrap().unwrap(), 'a');
        assert_eq!(c.expanded_len(), 1);
        let rest: Vec<char> = it.map(|r| r.unwrap()).collect();
        assert_eq!(rest, vec!['b', 'c']);
    }

    #[test]
    fn test_iter_stops_after_error() {
        let c = Chain::cons(
            1,
            Chain::deferred(|| Err(Error::invalid_source("broken"))),
        );
        let items: Vec<Result<i32>> = c.iter().collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
        assert!(c.to_vec().is_err());
    }
}
