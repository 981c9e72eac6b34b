// lazychains-core - Rendering chains without forcing them
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! `Debug` and `Display` for chains.
//!
//! Both render the already resolved prefix and an ellipsis for anything
//! still unexpanded: `chain([a, b, ...])`. Rendering never runs a producer.

use std::cell::Cell;
use std::fmt;

use crate::node::{Chain, NodeState};

// Thread-local print settings (can be configured by callers)
thread_local! {
    /// Maximum number of elements to print for a chain.
    /// None means unlimited, Some(n) means print at most n elements.
    /// Default: None (unlimited)
    static PRINT_LENGTH: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Get the current print-length setting.
pub fn get_print_length() -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.get())
}

/// Set the print-length setting. Returns the previous value.
pub fn set_print_length(len: Option<usize>) -> Option<usize> {
    PRINT_LENGTH.with(|pl| pl.replace(len))
}

enum Resolved<T> {
    Item(T),
    End,
    Pending,
}

fn render<T>(
    chain: &Chain<T>,
    f: &mut fmt::Formatter<'_>,
    item: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    write!(f, "chain([")?;
    let max_display = get_print_length();
    let mut current = chain.clone();
    let mut count = 0usize;

    loop {
        let step = match &current.node {
            None => Resolved::End,
            Some(node) => match &*node.borrow() {
                NodeState::Node(value, next) => {
                    if max_display.is_some_and(|max| count >= max) {
                        Resolved::Pending
                    } else {
                        if count > 0 {
                            write!(f, ", ")?;
                        }
                        item(value, f)?;
                        Resolved::Item(next.clone())
                    }
                }
                NodeState::Empty => Resolved::End,
                NodeState::Unexpanded(_) | NodeState::Forcing | NodeState::Failed(_) => {
                    Resolved::Pending
                }
            },
        };
        match step {
            Resolved::Item(next) => {
                current = next;
                count += 1;
            }
            Resolved::End => break,
            Resolved::Pending => {
                if count > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "...")?;
                break;
            }
        }
    }
    write!(f, "])")
}

impl<T: fmt::Debug> fmt::Debug for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f, |value, f| write!(f, "{:?}", value))
    }
}

impl<T: fmt::Display> fmt::Display for Chain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, f, |value, f| write!(f, "{}", value))
    }
}
