use avl::balanced::Tree;

use std::collections::{BTreeSet, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and a `BTreeSet`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut BTreeSet<T>) -> bool
where
    T: Ord + Clone,
{
    init_logging();
    ops.iter().all(|op| {
        let agreed = match op {
            Op::Insert(v) => bst.insert(v.clone()) == set.insert(v.clone()),
            Op::Delete(v) => bst.delete(v) == set.take(v),
        };
        agreed && bst.is_balanced()
    })
}

/// The worst case height of an AVL tree holding `len` values.
fn height_bound(len: usize) -> f64 {
    1.44 * ((len + 2) as f64).log2()
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = BTreeSet::new();

        do_ops(&ops, &mut tree, &mut set)
            && tree.len() == set.len()
            && tree.iter().eq(set.iter())
    }
}

quickcheck::quickcheck! {
    fn contains(xs: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();

        xs.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<_> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().collect();
        for delete in &deletes {
            tree.delete(delete);
        }

        let mut still_present = xs;
        for delete in &deletes {
            // We may have inserted the same value multiple times - delete each one.
            while let Some(pos) = still_present.iter().position(|x| x == delete) {
                still_present.swap_remove(pos);
            }
        }

        deletes.iter().all(|x| !tree.contains(x))
            && still_present.iter().all(|x| tree.contains(x))
    }
}

quickcheck::quickcheck! {
    fn insert_twice_changes_nothing(xs: Vec<i8>) -> bool {
        let once: Tree<_> = xs.iter().copied().collect();
        let mut twice = once.clone();
        for x in &xs {
            twice.insert(*x);
        }

        once.len() == twice.len() && once.to_ordered_vec() == twice.to_ordered_vec()
    }
}

quickcheck::quickcheck! {
    fn delete_missing_changes_nothing(xs: Vec<i8>, missing: i8) -> bool {
        let mut tree: Tree<_> = xs.iter().copied().filter(|x| *x != missing).collect();
        let before = tree.to_ordered_vec();

        tree.delete(&missing).is_none() && tree.to_ordered_vec() == before
    }
}

quickcheck::quickcheck! {
    fn ordered_without_duplicates(ops: Vec<Op<i16>>) -> bool {
        let mut tree = Tree::new();
        for op in &ops {
            match op {
                Op::Insert(v) => {
                    tree.insert(*v);
                }
                Op::Delete(v) => {
                    tree.delete(v);
                }
            }
        }

        let values = tree.to_ordered_vec();
        values.windows(2).all(|w| w[0] < w[1])
    }
}

quickcheck::quickcheck! {
    fn height_is_logarithmic(ops: Vec<Op<i16>>) -> bool {
        let mut tree = Tree::new();
        ops.iter().all(|op| {
            match op {
                Op::Insert(v) => {
                    tree.insert(*v);
                }
                Op::Delete(v) => {
                    tree.delete(v);
                }
            }
            tree.height() as f64 <= height_bound(tree.len())
        })
    }
}

#[test]
fn sorted_inserts_stay_logarithmic() {
    init_logging();
    let mut tree = Tree::new();
    for x in 0..10_000 {
        tree.insert(x);
        assert!(tree.height() as f64 <= height_bound(tree.len()));
    }
    for x in (0..10_000).step_by(2) {
        tree.delete(&x);
        assert!(tree.height() as f64 <= height_bound(tree.len()));
    }
    assert!(tree.is_balanced());
}
