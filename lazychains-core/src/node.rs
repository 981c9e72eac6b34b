// lazychains-core - Chain nodes and the forcing engine
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The chain handle, its node states, and the single forcing primitive.
//!
//! A chain is a handle to a node. Each node starts out either resolved
//! (built with [`Chain::cons`]) or unexpanded (built from a [`Producer`]).
//! Forcing an unexpanded node runs its producer exactly once and overwrites
//! the node with the result, dropping the producer in the same step.
//! Every other operation in this crate goes through `resolve`.
//!
//! Nodes live behind `Rc<RefCell<_>>`, so chains are `!Send` and `!Sync`:
//! forcing is single-threaded and cooperative, and the compiler enforces it.

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::producer::{DeferredCallSource, IteratorSource, Produced, Producer};

pub(crate) type Link<T> = Rc<RefCell<NodeState<T>>>;

/// Internal state of a chain node.
pub(crate) enum NodeState<T> {
    /// Not yet forced - holds the producer for this position
    Unexpanded(Box<dyn Producer<T>>),
    /// The producer is running right now
    Forcing,
    /// Resolved: one value and the successor chain
    Node(T, Chain<T>),
    /// Resolved: end of chain
    Empty,
    /// The producer reported an error; re-reported on every force
    Failed(Error),
}

/// A persistent, lazily populated singly linked sequence.
///
/// Cloning a chain clones the handle, not the nodes: clones share every
/// node, and forcing through one clone is visible through all of them.
pub struct Chain<T> {
    /// `None` is the canonical empty chain and needs no allocation.
    pub(crate) node: Option<Link<T>>,
}

/// The resolved view of a chain's first node.
#[derive(Debug, Clone)]
pub enum Step<T> {
    /// The chain has no elements
    Empty,
    /// First element and the rest of the chain
    Cons(T, Chain<T>),
}

impl<T> Clone for Chain<T> {
    fn clone(&self) -> Self {
        Chain {
            node: self.node.clone(),
        }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Self {
        Chain::empty()
    }
}

// Resolved chains can be arbitrarily long, and unexpanded ones can wrap
// producers that wrap further chains of the same type (filter over filter).
// Release both with a loop so that dropping the last handle does not
// recurse once per node.
impl<T> Drop for Chain<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Chain<T>> = Vec::new();
        let mut next = self.node.take();
        loop {
            let link = match next.take() {
                Some(link) => link,
                None => match pending.pop() {
                    Some(mut chain) => {
                        next = chain.node.take();
                        continue;
                    }
                    None => break,
                },
            };
            if let Ok(cell) = Rc::try_unwrap(link) {
                match cell.into_inner() {
                    NodeState::Node(_, mut tail) => next = tail.node.take(),
                    NodeState::Unexpanded(producer) => producer.release(&mut pending),
                    _ => {}
                }
            }
        }
    }
}

/// Marks a node `Failed` if its producer unwinds instead of returning.
struct ForcingGuard<'a, T> {
    node: &'a Link<T>,
    armed: bool,
}

impl<T> Drop for ForcingGuard<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!("chain producer panicked");
        if let Ok(mut state) = self.node.try_borrow_mut() {
            *state = NodeState::Failed(Error::invalid_source("chain producer panicked"));
        }
    }
}

impl<T> Chain<T> {
    /// The canonical empty chain.
    pub const fn empty() -> Self {
        Chain { node: None }
    }

    /// Build a resolved node holding `value` in front of `tail`.
    /// O(1); `tail` is not forced.
    pub fn cons(value: T, tail: Chain<T>) -> Self {
        Chain::from_state(NodeState::Node(value, tail))
    }

    /// Build an unexpanded chain backed by `producer`.
    pub fn unexpanded(producer: impl Producer<T> + 'static) -> Self {
        Chain::from_state(NodeState::Unexpanded(Box::new(producer)))
    }

    fn from_state(state: NodeState<T>) -> Self {
        Chain {
            node: Some(Rc::new(RefCell::new(state))),
        }
    }

    /// True if this chain is already known to be empty, without forcing.
    pub(crate) fn is_known_empty(&self) -> bool {
        match &self.node {
            None => true,
            Some(node) => matches!(*node.borrow(), NodeState::Empty),
        }
    }

    /// True if both handles point at the same node.
    pub(crate) fn same_node(&self, other: &Chain<T>) -> bool {
        match (&self.node, &other.node) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Returns true if the first node no longer needs its producer run.
    /// This should rarely matter to callers, but it is useful when debugging.
    pub fn is_expanded(&self) -> bool {
        match &self.node {
            None => true,
            Some(node) => matches!(
                *node.borrow(),
                NodeState::Node(..) | NodeState::Empty | NodeState::Failed(_)
            ),
        }
    }

    /// Force the first node if needed. Returns whether the chain is non-empty.
    ///
    /// This is the only place a producer is ever invoked. The node is moved
    /// to `Forcing` while the producer runs, so a producer that ends up
    /// forcing its own node is reported instead of being run twice.
    pub(crate) fn resolve(&self) -> Result<bool> {
        let Some(node) = &self.node else {
            return Ok(false);
        };

        match &*node.borrow() {
            NodeState::Node(..) => return Ok(true),
            NodeState::Empty => return Ok(false),
            NodeState::Failed(err) => return Err(err.clone()),
            NodeState::Forcing => {
                return Err(Error::invalid_source(
                    "chain node was forced again while its producer was running",
                ));
            }
            NodeState::Unexpanded(_) => {}
        }

        let producer = {
            let mut state = node.borrow_mut();
            match mem::replace(&mut *state, NodeState::Forcing) {
                NodeState::Unexpanded(producer) => producer,
                other => {
                    let nonempty = matches!(other, NodeState::Node(..));
                    *state = other;
                    return Ok(nonempty);
                }
            }
        };

        // The borrow is released: the producer may force other nodes freely.
        let mut guard = ForcingGuard { node, armed: true };
        let outcome = producer.produce();
        guard.armed = false;

        let mut state = node.borrow_mut();
        match outcome {
            Ok(Produced::Item(value, rest)) => {
                trace!(rest_known_empty = rest.is_known_empty(), "chain node resolved");
                *state = NodeState::Node(value, rest);
                Ok(true)
            }
            Ok(Produced::Exhausted) => {
                trace!("chain producer exhausted");
                *state = NodeState::Empty;
                Ok(false)
            }
            Err(err) => {
                debug!(error = %err, "chain producer failed");
                *state = NodeState::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Look at an already resolved first node without forcing anything.
    pub(crate) fn peek<R>(&self, f: impl FnOnce(&T, &Chain<T>) -> R) -> Option<R> {
        let node = self.node.as_ref()?;
        match &*node.borrow() {
            NodeState::Node(value, next) => Some(f(value, next)),
            _ => None,
        }
    }

    /// Force the first node and, if there is one, hand its value and
    /// successor to `f`. Returns `None` for an empty chain.
    pub(crate) fn force_with<R>(&self, f: impl FnOnce(&T, &Chain<T>) -> R) -> Result<Option<R>> {
        if self.resolve()? {
            Ok(self.peek(f))
        } else {
            Ok(None)
        }
    }

    /// True if the chain has at least one element. Forces exactly one step.
    pub fn is_nonempty(&self) -> Result<bool> {
        self.resolve()
    }

    /// The chain after the first element. Forces one step.
    ///
    /// Chains form singly linked lists, so this always yields the identical
    /// successor node.
    pub fn tail(&self) -> Result<Chain<T>> {
        self.force_with(|_, next| next.clone())?
            .ok_or_else(|| Error::empty("tail"))
    }

    /// Counts the nodes already resolved at the front of the chain.
    /// Never forces; stops at the first unexpanded node or the end.
    pub fn expanded_len(&self) -> usize {
        let mut count = 0;
        let mut current = self.clone();
        while let Some(next) = current.peek(|_, next| next.clone()) {
            count += 1;
            current = next;
        }
        count
    }

    /// Force every node and return how many elements there are.
    fn force_spine(&self) -> Result<usize> {
        let mut count = 0;
        let mut current = self.clone();
        while let Some(next) = current.force_with(|_, next| next.clone())? {
            count += 1;
            current = next;
        }
        Ok(count)
    }

    /// Force the whole chain, returning it.
    ///
    /// Does not return if the chain is backed by an infinite producer.
    pub fn expand_all(&self) -> Result<Chain<T>> {
        let count = self.force_spine()?;
        debug!(count, "expanded chain");
        Ok(self.clone())
    }

    /// Number of elements. Forces the whole chain, so unlike a slice length
    /// this costs time proportional to the length and never returns on an
    /// infinite chain.
    pub fn length(&self) -> Result<usize> {
        self.force_spine()
    }

    /// A new chain with `value` in front of this one. O(1), never forces.
    pub fn prepend(&self, value: T) -> Chain<T> {
        Chain::cons(value, self.clone())
    }

    /// A fully resolved chain holding every item of `source`.
    pub fn eager<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        source.into_iter().collect()
    }
}

impl<T: 'static> Chain<T> {
    /// An unexpanded chain over `source`. Nothing is pulled until forced.
    ///
    /// The iterator's `size_hint` upper bound is trusted: a source that
    /// reports `Some(0)`, up front or after any pull, ends the chain at that
    /// point without calling `next` again. Wrap an iterator whose hint may
    /// be wrong in one that reports `(0, None)`, such as
    /// `std::iter::from_fn(move || iter.next())`.
    pub fn lazy<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        let iter = source.into_iter();
        if iter.size_hint().1 == Some(0) {
            return Chain::empty();
        }
        Chain::unexpanded(IteratorSource::new(iter))
    }
}

impl<T: Clone + 'static> Chain<T> {
    /// An unexpanded chain whose contents come from calling `call` once,
    /// when first forced.
    pub fn deferred<F>(call: F) -> Self
    where
        F: FnOnce() -> Result<Chain<T>> + 'static,
    {
        Chain::deferred_with(move |()| call(), ())
    }

    /// Like [`Chain::deferred`], with the call's arguments captured up front.
    pub fn deferred_with<F, A>(call: F, args: A) -> Self
    where
        F: FnOnce(A) -> Result<Chain<T>> + 'static,
        A: 'static,
    {
        Chain::unexpanded(DeferredCallSource::new(call, args))
    }
}

impl<T: Clone> Chain<T> {
    /// Force the first node and return its resolved view.
    /// Repeated calls return the cached result.
    pub fn force_one(&self) -> Result<Step<T>> {
        Ok(self
            .force_with(|value, next| Step::Cons(value.clone(), next.clone()))?
            .unwrap_or(Step::Empty))
    }

    /// The first element. Forces one step.
    pub fn head(&self) -> Result<T> {
        self.force_with(|value, _| value.clone())?
            .ok_or_else(|| Error::empty("head"))
    }

    /// The first element and the rest, from a single force.
    pub fn dest(&self) -> Result<(T, Chain<T>)> {
        self.force_with(|value, next| (value.clone(), next.clone()))?
            .ok_or_else(|| Error::empty("dest"))
    }
}

impl<T> FromIterator<T> for Chain<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(Chain::empty(), |tail, value| Chain::cons(value, tail))
    }
}
