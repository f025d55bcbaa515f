use serde::Serialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Tree;

fn all_dir_sizes(tree: &Tree) -> impl Iterator<Item = u64> + '_ {
    tree.root()
        .into_iter()
        .flat_map(move |root| tree.dirs_preorder(root))
        .map(move |d| tree.total_size(d))
}

/// Sum of the total sizes of every directory no larger than `threshold`.
/// Nested directories are each counted on their own.
pub fn small_dirs_sum(tree: &Tree, threshold: u64) -> u64 {
    all_dir_sizes(tree)
        .filter(|&s| s <= threshold)
        .fold(0u64, u64::saturating_add)
}

/// Smallest directory total size that is at least `min_space`.
pub fn deletion_candidate(tree: &Tree, min_space: u64) -> Result<u64> {
    all_dir_sizes(tree)
        .filter(|&s| s >= min_space)
        .min()
        .ok_or(Error::NoCandidate { min_space })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answers {
    pub used: u64,
    pub small_dirs_sum: u64,
    pub min_space: u64,
    pub deletion_candidate: u64,
}

impl Answers {
    pub fn compute(tree: &Tree, config: &Config) -> Result<Self> {
        let used = tree.root().map(|r| tree.total_size(r)).unwrap_or(0);
        let min_space = config.min_space(used);
        let (small, candidate) = rayon::join(
            || small_dirs_sum(tree, config.threshold),
            || deletion_candidate(tree, min_space),
        );
        Ok(Self {
            used,
            small_dirs_sum: small,
            min_space,
            deletion_candidate: candidate?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::parse_transcript;

    fn single_file() -> Tree {
        parse_transcript("$ cd /\n$ ls\n10 a\n").unwrap()
    }

    #[test]
    fn single_file_edge_case() {
        let tree = single_file();
        assert_eq!(tree.total_size(tree.root().unwrap()), 10);
        assert_eq!(small_dirs_sum(&tree, 100_000), 10);
        assert_eq!(deletion_candidate(&tree, 5).unwrap(), 10);
    }

    #[test]
    fn threshold_is_inclusive() {
        let tree = single_file();
        assert_eq!(small_dirs_sum(&tree, 10), 10);
        assert_eq!(small_dirs_sum(&tree, 9), 0);
    }

    #[test]
    fn no_candidate_above_root() {
        let tree = single_file();
        assert!(matches!(
            deletion_candidate(&tree, 11),
            Err(Error::NoCandidate { min_space: 11 })
        ));
    }

    #[test]
    fn empty_tree() {
        let tree = Tree::new();
        assert_eq!(small_dirs_sum(&tree, 100), 0);
        assert!(deletion_candidate(&tree, 0).is_err());
        assert!(Answers::compute(&tree, &Config::default()).is_err());
    }

    #[test]
    fn nested_dirs_are_both_counted() {
        let tree = parse_transcript("$ cd /\n$ cd a\n$ ls\n4 f\n").unwrap();
        // "/" and "/a" are both 4
        assert_eq!(small_dirs_sum(&tree, 100), 8);
    }
}
