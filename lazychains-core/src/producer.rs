// lazychains-core - Producers behind unexpanded nodes
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! The producer capability: produce the next value and the chain that
//! follows it, or report that there is nothing more.
//!
//! The forcing engine only ever sees `Box<dyn Producer<T>>`, so iterators,
//! deferred calls and the composed producers behind `map`/`filter`/`zip`/
//! `concat` all take the same code path.

use im::Vector;

use crate::error::Result;
use crate::node::{Chain, Step};

/// Outcome of running a producer once.
pub enum Produced<T> {
    /// One value plus the chain for everything after it
    Item(T, Chain<T>),
    /// No more values
    Exhausted,
}

/// A source of chain elements.
///
/// `produce` consumes the producer: whatever state is needed for the rest of
/// the sequence must travel inside the returned continuation chain, usually
/// as a fresh [`Chain::unexpanded`] node. The node that ran the producer
/// keeps nothing of it.
pub trait Producer<T> {
    fn produce(self: Box<Self>) -> Result<Produced<T>>;

    /// The operands of a pending concatenation, if this producer is one.
    /// Lets `concat` splice operand lists instead of nesting producers.
    #[doc(hidden)]
    fn concat_parts(&self) -> Option<Vector<Chain<T>>> {
        None
    }

    /// Hand over any chains of the same element type this producer holds,
    /// so dropping a chain can release them without recursing.
    #[doc(hidden)]
    fn release(self: Box<Self>, _pending: &mut Vec<Chain<T>>) {}
}

/// Pull-based producer over an iterator. One `next()` per force.
///
/// After each pull the iterator's `size_hint` is consulted: an upper bound
/// of `Some(0)` ends the chain there and drops the iterator. The standard
/// library's iterators report this bound correctly. An iterator whose hint
/// claims it is done while it still has items gets cut short.
pub struct IteratorSource<I> {
    iter: I,
}

impl<I> IteratorSource<I> {
    pub fn new(iter: I) -> Self {
        IteratorSource { iter }
    }
}

impl<I> Producer<I::Item> for IteratorSource<I>
where
    I: Iterator + 'static,
{
    fn produce(mut self: Box<Self>) -> Result<Produced<I::Item>> {
        let Some(value) = self.iter.next() else {
            return Ok(Produced::Exhausted);
        };
        // An iterator that already knows it is done does not need another
        // unexpanded node; end the chain now and drop the iterator.
        let rest = if self.iter.size_hint().1 == Some(0) {
            Chain::empty()
        } else {
            Chain::unexpanded(*self)
        };
        Ok(Produced::Item(value, rest))
    }
}

/// Producer that calls `call(args)` once and takes the first step of the
/// returned chain as its own.
///
/// Because the returned chain may itself contain deferred calls, this is
/// how self-referential and generative sequences are written.
pub struct DeferredCallSource<F, A> {
    call: F,
    args: A,
}

impl<F, A> DeferredCallSource<F, A> {
    pub fn new(call: F, args: A) -> Self {
        DeferredCallSource { call, args }
    }
}

impl<T, F, A> Producer<T> for DeferredCallSource<F, A>
where
    T: Clone,
    F: FnOnce(A) -> Result<Chain<T>>,
{
    fn produce(self: Box<Self>) -> Result<Produced<T>> {
        let DeferredCallSource { call, args } = *self;
        let chain = call(args)?;
        Ok(match chain.force_one()? {
            Step::Cons(value, rest) => Produced::Item(value, rest),
            Step::Empty => Produced::Exhausted,
        })
    }
}
