//! Order module: total preorders supplied to a machine at construction.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::cmp::Ordering;

/// A total preorder over `T`.
///
/// `compare(a, b)` returning `Less` or `Equal` means `a` sorts no later than
/// `b`. `Equal` only means the two are order-equivalent; they need not be
/// identical (see [`CaseInsensitive`]). The relation must be reflexive,
/// transitive and total. Machines trust this and do not validate it.
pub trait Order<T: ?Sized> {
    /// Compare two elements under this order.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// True when `a` sorts no later than `b`.
    fn le(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) != Ordering::Greater
    }

    /// True when `a` and `b` are order-equivalent.
    fn equivalent(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }
}

impl<T: ?Sized, F> Order<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}

/// The element type's own `Ord`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord + ?Sized> Order<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Lexicographic order on strings, ignoring case.
///
/// Characters at the same position match if they are equal, equal after
/// uppercasing, or equal after lowercasing that uppercase form. The first
/// mismatch decides by the lowercased forms; if one string is a prefix of
/// the other, the shorter sorts first. `"A"` and `"a"` are order-equivalent
/// but distinct.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaseInsensitive;

impl<S: AsRef<str> + ?Sized> Order<S> for CaseInsensitive {
    fn compare(&self, a: &S, b: &S) -> Ordering {
        let mut a = a.as_ref().chars();
        let mut b = b.as_ref().chars();
        loop {
            match (a.next(), b.next()) {
                (Some(x), Some(y)) => match fold_case(x, y) {
                    Ordering::Equal => continue,
                    decided => return decided,
                },
                (None, None) => return Ordering::Equal,
                (None, Some(_)) => return Ordering::Less,
                (Some(_), None) => return Ordering::Greater,
            }
        }
    }
}

fn fold_case(x: char, y: char) -> Ordering {
    if x == y {
        return Ordering::Equal;
    }
    let (ux, uy) = (simple_upper(x), simple_upper(y));
    if ux == uy {
        return Ordering::Equal;
    }
    simple_lower(ux).cmp(&simple_lower(uy))
}

// Single-char case mappings: multi-char uppercase expansions (`ß` -> `SS`)
// keep the original char; `İ` lowercases to its leading `i`.
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Another order, reversed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reverse<O>(pub O);

impl<T: ?Sized, O: Order<T>> Order<T> for Reverse<O> {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self.0.compare(b, a)
    }
}
