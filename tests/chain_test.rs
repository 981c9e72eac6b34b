// lazychains - Chain behaviour integration tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for construction, forcing, and the sequence protocol.

mod common;

use common::*;

// =============================================================================
// Construction
// =============================================================================

#[test]
fn test_chain_is_fully_resolved() {
    let c = chain(vec![1, 2, 3]);
    assert_eq!(c.expanded_len(), 3);
    let same = c.expand_all().unwrap();
    assert_eq!(same.expanded_len(), 3);
    assert_eq!(same, c);
}

#[test]
fn test_lazychain_starts_unexpanded() {
    let pulls = Pulls::default();
    let c = counted(vec![1, 2, 3], &pulls);
    assert!(!c.is_expanded());
    assert_eq!(c.expanded_len(), 0);
    assert_eq!(pulls.get(), 0);

    c.expand_all().unwrap();
    assert_eq!(c, chain(vec![1, 2, 3]));
    // three values plus the exhausted pull
    assert_eq!(pulls.get(), 4);
}

#[test]
fn test_empty_constructors() {
    let a: Chain<i32> = lazychains::empty();
    let b: Chain<i32> = chain(Vec::new());
    let c: Chain<i32> = lazychain(Vec::new());
    assert_eq!(a.length().unwrap(), 0);
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert!(c.is_expanded());
}

// =============================================================================
// Original usage walk-through
// =============================================================================

#[test]
fn test_basic_functionality() {
    let c = lazychain(vec!["a", "b", "c"]);
    assert_eq!(c.head().unwrap(), "a");
    assert_eq!(c.get(1).unwrap(), "b");

    let c = c.tail().unwrap().tail().unwrap();
    assert!(!c.is_expanded());
    assert_eq!(c.head().unwrap(), "c");
    assert!(c.is_expanded());
    assert!(!c.tail().unwrap().is_nonempty().unwrap());

    let c = c.prepend("first item");
    assert_eq!(c.length().unwrap(), 2);
    assert_eq!(c.to_vec().unwrap(), vec!["first item", "c"]);
    assert_eq!(c.get(-1).unwrap(), "c");

    let c = c.tail().unwrap().prepend("z").prepend("y").prepend("x");
    assert_eq!(c.to_vec().unwrap().join(", "), "x, y, z, c");
    assert!(c.contains(&"y").unwrap() && !c.contains(&"pqr").unwrap());
    assert!(c.get(0).unwrap() == "x" && c.get(-1).unwrap() == "c");
    assert!(c.get(1).unwrap() == "y" && c.get(-2).unwrap() == "z");
    assert!(c.get(2).unwrap() == "z" && c.get(-3).unwrap() == "y");
    assert!(c.get(3).unwrap() == "c" && c.get(-4).unwrap() == "x");
}

#[test]
fn test_display_scenario() {
    let c = lazychain(vec!['a', 'b', 'c']);
    assert_eq!(format!("{:?}", c), "chain([...])");

    assert_eq!(c.get(1).unwrap(), 'b');
    assert_eq!(c.expanded_len(), 2);
    assert_eq!(format!("{:?}", c), "chain(['a', 'b', ...])");

    c.expand_all().unwrap();
    assert_eq!(format!("{:?}", c), "chain(['a', 'b', 'c'])");
    assert_eq!(c, chain(vec!['a', 'b', 'c']));
}

// =============================================================================
// Forcing boundaries
// =============================================================================

#[test]
fn test_head_tail_dest_force_one_step() {
    let pulls = Pulls::default();
    let c = counted(vec![10, 20, 30], &pulls);

    assert_eq!(c.head().unwrap(), 10);
    assert_eq!(pulls.get(), 1);
    c.tail().unwrap();
    c.dest().unwrap();
    c.is_nonempty().unwrap();
    assert_eq!(pulls.get(), 1);
}

#[test]
fn test_expanded_len_never_forces() {
    let pulls = Pulls::default();
    let c = counted(vec![1, 2, 3, 4], &pulls);
    c.get(1).unwrap();
    let before = pulls.get();
    assert_eq!(c.expanded_len(), 2);
    assert_eq!(pulls.get(), before);
}

#[test]
fn test_expanded_len_matches_length_after_full_expansion() {
    let pulls = Pulls::default();
    let c = counted(vec![1, 2, 3, 4, 5], &pulls);
    assert!(c.expanded_len() <= 5);
    let length = c.length().unwrap();
    assert_eq!(length, 5);
    assert_eq!(c.expanded_len(), length);

    let hinted = lazychain(vec![1, 2, 3, 4, 5]);
    hinted.expand_all().unwrap();
    assert_eq!(hinted.expanded_len(), hinted.length().unwrap());
}

#[test]
fn test_get_positive_forces_index_plus_one() {
    let pulls = Pulls::default();
    let c = counted((0..100).collect(), &pulls);
    assert_eq!(c.get(9).unwrap(), 9);
    assert_eq!(pulls.get(), 10);
    assert_eq!(c.expanded_len(), 10);
}

#[test]
fn test_get_out_of_range() {
    let c = chain(vec![1, 2, 3]);
    assert_eq!(
        c.get(3).unwrap_err(),
        Error::IndexOutOfBounds {
            index: 3,
            length: 3
        }
    );
    assert_eq!(
        c.get(-4).unwrap_err(),
        Error::IndexOutOfBounds {
            index: -4,
            length: 3
        }
    );
    assert!(matches!(
        lazychains::empty::<i32>().get(0),
        Err(Error::IndexOutOfBounds { .. })
    ));
}

#[test]
fn test_head_of_empty_chain() {
    let c: Chain<i32> = chain(Vec::new());
    assert!(matches!(c.head(), Err(Error::EmptySequence { .. })));
    assert!(matches!(c.tail(), Err(Error::EmptySequence { .. })));
    assert!(matches!(c.dest(), Err(Error::EmptySequence { .. })));
}

// =============================================================================
// Sharing
// =============================================================================

#[test]
fn test_prepend_does_not_force() {
    let pulls = Pulls::default();
    let c = counted(vec![1, 2], &pulls);
    let d = c.prepend(0);
    assert_eq!(d.head().unwrap(), 0);
    assert_eq!(d.tail().unwrap(), c);
    assert_eq!(pulls.get(), 0);
}

#[test]
fn test_shared_tail_is_forced_once() {
    let pulls = Pulls::default();
    let shared = counted(vec![1, 2, 3], &pulls);
    let a = shared.prepend(10);
    let b = shared.prepend(20);

    assert_eq!(a.to_vec().unwrap(), vec![10, 1, 2, 3]);
    let after_a = pulls.get();
    assert_eq!(b.to_vec().unwrap(), vec![20, 1, 2, 3]);
    assert_eq!(pulls.get(), after_a);
    assert_eq!(shared.expanded_len(), 3);
}

#[test]
fn test_equality_across_expansion_states() {
    let a = lazychain(1..=5);
    let b = lazychain(1..=5);
    a.get(2).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, chain(1..=5));
    assert_ne!(a, chain(1..=4));
}

// =============================================================================
// Deferred calls
// =============================================================================

fn sieve(numbers: Chain<u64>) -> Chain<u64> {
    lazycall(
        |numbers: Chain<u64>| {
            let (p, rest) = numbers.dest()?;
            Ok(sieve(rest.filter(move |n| n % p != 0)).prepend(p))
        },
        numbers,
    )
}

#[test]
fn test_sieve_of_primes() {
    let primes = sieve(lazychain(2u64..));
    let first: Vec<u64> = primes.iter().take(10).map(|r| r.unwrap()).collect();
    assert_eq!(first, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    assert!(primes.contains(&97).unwrap());
}

#[test]
fn test_lazycall_defers_until_forced() {
    let pulls = Pulls::default();
    let source = counted(vec![1, 2, 3], &pulls);
    let c = lazycall(|source: Chain<i32>| Ok(source.map(|x| x * 10)), source);
    assert!(!c.is_expanded());
    assert_eq!(pulls.get(), 0);

    assert_eq!(c.head().unwrap(), 10);
    assert_eq!(pulls.get(), 1);
    assert_eq!(c.to_vec().unwrap(), vec![10, 20, 30]);
}

#[test]
fn test_generated_fibonacci() {
    fn fib(a: u64, b: u64) -> Chain<u64> {
        lazycall(|(a, b): (u64, u64)| Ok(fib(b, a + b).prepend(a)), (a, b))
    }
    let c = fib(0, 1);
    assert_eq!(c.get(10).unwrap(), 55);
    assert_eq!(c.expanded_len(), 11);
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_poisoned_chain_reports_invalid_source() {
    let c: Chain<i32> = poisoned();
    assert!(matches!(c.head(), Err(Error::InvalidSource(_))));
    assert!(matches!(c.length(), Err(Error::InvalidSource(_))));
    // a chain that fails to force is not equal to anything
    assert_ne!(c, lazychains::empty());
}

#[test]
fn test_long_chain_is_safe() {
    let c = lazychain(0..500_000u32);
    assert_eq!(c.length().unwrap(), 500_000);
    assert_eq!(c.get(-1).unwrap(), 499_999);
    assert_eq!(c, chain(0..500_000u32));
}
