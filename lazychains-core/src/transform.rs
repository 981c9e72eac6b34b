// lazychains-core - Derived lazy transforms
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! map, filter, zip and concat.
//!
//! Each transform returns an unexpanded chain wrapping a composed producer.
//! Pulling that producer forces the source chain(s) only as far as needed
//! for one output value, then hands back a fresh composed producer for the
//! remainder. Nothing is computed when the transform is called.

use std::ops::Add;
use std::rc::Rc;

use im::Vector;

use crate::error::Result;
use crate::node::{Chain, NodeState};
use crate::producer::{Produced, Producer};

/// Wrap `producer` unless the source it would read from is already known
/// to be finished.
fn continue_with<T, P>(source_done: bool, producer: P) -> Chain<T>
where
    P: Producer<T> + 'static,
{
    if source_done {
        Chain::empty()
    } else {
        Chain::unexpanded(producer)
    }
}

// ============================================================================
// map
// ============================================================================

struct MapSource<T, F> {
    source: Chain<T>,
    f: Rc<F>,
}

impl<T, U, F> Producer<U> for MapSource<T, F>
where
    T: 'static,
    U: 'static,
    F: Fn(&T) -> U + 'static,
{
    fn produce(self: Box<Self>) -> Result<Produced<U>> {
        let MapSource { source, f } = *self;
        let Some((value, next)) = source.force_with(|value, next| ((*f)(value), next.clone()))? else {
            return Ok(Produced::Exhausted);
        };
        let rest = continue_with(next.is_known_empty(), MapSource { source: next, f });
        Ok(Produced::Item(value, rest))
    }
}

// ============================================================================
// filter
// ============================================================================

struct FilterSource<T, P> {
    source: Chain<T>,
    pred: Rc<P>,
}

impl<T, P> Producer<T> for FilterSource<T, P>
where
    T: Clone + 'static,
    P: Fn(&T) -> bool + 'static,
{
    fn produce(self: Box<Self>) -> Result<Produced<T>> {
        let FilterSource { mut source, pred } = *self;
        // Skipped values stay memoized on the source but never become nodes
        // of the filtered chain.
        loop {
            let Some((kept, next)) =
                source.force_with(|value, next| ((*pred)(value).then(|| value.clone()), next.clone()))?
            else {
                return Ok(Produced::Exhausted);
            };
            match kept {
                Some(value) => {
                    let rest = continue_with(
                        next.is_known_empty(),
                        FilterSource { source: next, pred },
                    );
                    return Ok(Produced::Item(value, rest));
                }
                None => source = next,
            }
        }
    }

    fn release(self: Box<Self>, pending: &mut Vec<Chain<T>>) {
        pending.push(self.source);
    }
}

// ============================================================================
// zip
// ============================================================================

struct ZipSource<T, U> {
    left: Chain<T>,
    right: Chain<U>,
}

impl<T, U> Producer<(T, U)> for ZipSource<T, U>
where
    T: Clone + 'static,
    U: Clone + 'static,
{
    fn produce(self: Box<Self>) -> Result<Produced<(T, U)>> {
        let ZipSource { left, right } = *self;
        let Some((a, left_next)) = left.force_with(|v, next| (v.clone(), next.clone()))? else {
            return Ok(Produced::Exhausted);
        };
        let Some((b, right_next)) = right.force_with(|v, next| (v.clone(), next.clone()))? else {
            return Ok(Produced::Exhausted);
        };
        let done = left_next.is_known_empty() || right_next.is_known_empty();
        let rest = continue_with(
            done,
            ZipSource {
                left: left_next,
                right: right_next,
            },
        );
        Ok(Produced::Item((a, b), rest))
    }
}

// ============================================================================
// concat
// ============================================================================

/// A pending concatenation: the operands still to be walked, front first.
///
/// The operands live in a persistent vector, so concatenating onto an
/// unexpanded concat copies its operand list in O(1) and splices it rather
/// than wrapping it. No operand is itself an unexpanded concat, so however
/// deeply `+` is nested, forcing one step forces one operand step and
/// dropping the chain never nests.
struct ConcatSource<T> {
    parts: Vector<Chain<T>>,
}

impl<T> Producer<T> for ConcatSource<T>
where
    T: Clone + 'static,
{
    fn produce(self: Box<Self>) -> Result<Produced<T>> {
        let ConcatSource { mut parts } = *self;
        while let Some(front) = parts.pop_front() {
            if let Some((value, next)) = front.force_with(|v, next| (v.clone(), next.clone()))? {
                // With nothing queued behind it, the rest is `next` itself.
                let rest = if parts.is_empty() {
                    next
                } else {
                    let mut remaining = next.concat_operands();
                    remaining.append(parts);
                    Chain::from_operands(remaining)
                };
                return Ok(Produced::Item(value, rest));
            }
        }
        Ok(Produced::Exhausted)
    }

    fn concat_parts(&self) -> Option<Vector<Chain<T>>> {
        Some(self.parts.clone())
    }
}

impl<T: Clone + 'static> Chain<T> {
    /// This chain as a list of concat operands: the operands of a still
    /// unexpanded concatenation, nothing for a known-empty chain, or
    /// the chain itself.
    fn concat_operands(&self) -> Vector<Chain<T>> {
        if self.is_known_empty() {
            return Vector::new();
        }
        if let Some(node) = &self.node
            && let NodeState::Unexpanded(producer) = &*node.borrow()
            && let Some(parts) = producer.concat_parts()
        {
            return parts;
        }
        Vector::unit(self.clone())
    }

    fn from_operands(mut parts: Vector<Chain<T>>) -> Chain<T> {
        while parts.front().is_some_and(|front| front.is_known_empty()) {
            parts.pop_front();
        }
        match parts.len() {
            0 => Chain::empty(),
            1 => parts.pop_front().unwrap_or_default(),
            _ => Chain::unexpanded(ConcatSource { parts }),
        }
    }
}

impl<T: 'static> Chain<T> {
    /// A chain of `f` applied to each element. Forces nothing now.
    pub fn map<U, F>(&self, f: F) -> Chain<U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        if self.is_known_empty() {
            return Chain::empty();
        }
        Chain::unexpanded(MapSource {
            source: self.clone(),
            f: Rc::new(f),
        })
    }
}

impl<T: Clone + 'static> Chain<T> {
    /// A chain of the elements satisfying `pred`. Forces nothing now.
    pub fn filter<P>(&self, pred: P) -> Chain<T>
    where
        P: Fn(&T) -> bool + 'static,
    {
        if self.is_known_empty() {
            return Chain::empty();
        }
        Chain::unexpanded(FilterSource {
            source: self.clone(),
            pred: Rc::new(pred),
        })
    }

    /// Pairs of elements from both chains, ending with the shorter one.
    /// Forces nothing now.
    pub fn zip<U: Clone + 'static>(&self, other: &Chain<U>) -> Chain<(T, U)> {
        if self.is_known_empty() || other.is_known_empty() {
            return Chain::empty();
        }
        Chain::unexpanded(ZipSource {
            left: self.clone(),
            right: other.clone(),
        })
    }

    /// This chain's elements followed by `other`'s.
    ///
    /// Forces nothing now. Later, `other` is not touched until this chain is
    /// exhausted, so `self` may be infinite. Once it is exhausted the result
    /// continues with the nodes of `other` itself.
    pub fn concat(&self, other: &Chain<T>) -> Chain<T> {
        if self.is_known_empty() {
            return other.clone();
        }
        if other.is_known_empty() {
            return self.clone();
        }
        let mut parts = self.concat_operands();
        parts.append(other.concat_operands());
        Chain::from_operands(parts)
    }
}

impl<T: Clone + 'static> Add for Chain<T> {
    type Output = Chain<T>;

    fn add(self, rhs: Chain<T>) -> Chain<T> {
        self.concat(&rhs)
    }
}

impl<T: Clone + 'static> Add for &Chain<T> {
    type Output = Chain<T>;

    fn add(self, rhs: &Chain<T>) -> Chain<T> {
        self.concat(rhs)
    }
}
