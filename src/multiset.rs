//! Multiset comparison over unordered storage.
//!
//! Machines keep their elements in a `Vec` whose arrangement depends on the
//! mode and the heap history, so equality of contents is bag equality.

/// True when `a` and `b` hold the same elements with the same
/// multiplicities, pairing elements with `same`.
///
/// `same` must be an equivalence relation. Quadratic; no hashing or ordering
/// is required of `T`.
pub fn eq_by<T, F>(a: &[T], b: &[T], mut same: F) -> bool
where
    F: FnMut(&T, &T) -> bool,
{
    if a.len() != b.len() {
        return false;
    }
    let mut matched = vec![false; b.len()];
    'outer: for x in a {
        for (j, y) in b.iter().enumerate() {
            if !matched[j] && same(x, y) {
                matched[j] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}

/// Bag equality under `PartialEq`.
pub fn eq<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    eq_by(a, b, |x, y| x == y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrangement_is_ignored() {
        assert!(eq(&["a", "b", "a"], &["a", "a", "b"]));
        assert!(eq::<i32>(&[], &[]));
    }

    #[test]
    fn multiplicity_matters() {
        assert!(!eq(&["a", "a", "b"], &["a", "b", "b"]));
        assert!(!eq(&["a"], &["a", "a"]));
    }

    #[test]
    fn custom_pairing() {
        assert!(eq_by(&["A", "b"], &["B", "a"], |x, y| x.eq_ignore_ascii_case(y)));
        assert!(!eq(&["A", "b"], &["B", "a"]));
    }
}
