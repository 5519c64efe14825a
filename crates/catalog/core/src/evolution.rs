//! Evolution chain flattening.
use crate::document::{ChainLink, NamedRef};

/// Deepest chain accepted before the document is treated as malformed.
pub const MAX_CHAIN_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("evolution chain revisits species `{species}` on its own lineage")]
    Cycle { species: String },

    #[error("evolution chain exceeds {max} levels (reached {depth})", max = MAX_CHAIN_DEPTH)]
    TooDeep { depth: usize },
}

/// Pre-order flattening of an evolution tree.
///
/// A node's species comes before its children, and children keep the order
/// the provider gave them. Repeated species in different branches are kept;
/// a species reappearing among its own ancestors is a [`ChainError::Cycle`].
pub fn flatten_chain(root: &ChainLink) -> Result<Vec<NamedRef>, ChainError> {
    let mut order = Vec::new();
    // Species urls from the root down to the node being visited.
    let mut lineage: Vec<&str> = Vec::new();
    let mut stack: Vec<(&ChainLink, usize)> = vec![(root, 0)];

    while let Some((node, depth)) = stack.pop() {
        if depth >= MAX_CHAIN_DEPTH {
            return Err(ChainError::TooDeep { depth: depth + 1 });
        }

        lineage.truncate(depth);
        if lineage.contains(&node.species.url.as_str()) {
            return Err(ChainError::Cycle {
                species: node.species.name.clone(),
            });
        }
        lineage.push(&node.species.url);
        order.push(node.species.clone());

        // Reversed so the first child is popped first.
        for child in node.evolves_to.iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn species(name: &str, id: u32) -> NamedRef {
        NamedRef::new(
            name,
            format!("https://pokeapi.co/api/v2/pokemon-species/{id}/"),
        )
    }

    fn names(refs: &[NamedRef]) -> Vec<&str> {
        refs.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn single_node_chain() {
        let chain = ChainLink::leaf(species("tauros", 128));
        assert_eq!(names(&flatten_chain(&chain).unwrap()), vec!["tauros"]);
    }

    #[test]
    fn siblings_follow_their_parent() {
        // root -> [A] -> [B, C]
        let chain = ChainLink::with_children(
            species("root", 1),
            vec![ChainLink::with_children(
                species("a", 2),
                vec![ChainLink::leaf(species("b", 3)), ChainLink::leaf(species("c", 4))],
            )],
        );
        assert_eq!(
            names(&flatten_chain(&chain).unwrap()),
            vec!["root", "a", "b", "c"]
        );
    }

    #[test]
    fn deeper_branch_finishes_before_next_sibling() {
        // root -> [A -> [B], D]
        let chain = ChainLink::with_children(
            species("root", 1),
            vec![
                ChainLink::with_children(species("a", 2), vec![ChainLink::leaf(species("b", 3))]),
                ChainLink::leaf(species("d", 4)),
            ],
        );
        assert_eq!(
            names(&flatten_chain(&chain).unwrap()),
            vec!["root", "a", "b", "d"]
        );
    }

    #[test]
    fn provider_order_is_not_sorted() {
        let chain = ChainLink::with_children(
            species("eevee", 133),
            vec![
                ChainLink::leaf(species("vaporeon", 134)),
                ChainLink::leaf(species("jolteon", 135)),
                ChainLink::leaf(species("flareon", 136)),
            ],
        );
        assert_eq!(
            names(&flatten_chain(&chain).unwrap()),
            vec!["eevee", "vaporeon", "jolteon", "flareon"]
        );
    }

    #[test]
    fn repeated_species_in_separate_branches_is_kept() {
        let chain = ChainLink::with_children(
            species("root", 1),
            vec![
                ChainLink::leaf(species("same", 2)),
                ChainLink::leaf(species("same", 2)),
            ],
        );
        assert_eq!(
            names(&flatten_chain(&chain).unwrap()),
            vec!["root", "same", "same"]
        );
    }

    #[test]
    fn ancestor_repeat_is_a_cycle() {
        let chain = ChainLink::with_children(
            species("root", 1),
            vec![ChainLink::with_children(
                species("a", 2),
                vec![ChainLink::leaf(species("root", 1))],
            )],
        );
        assert_eq!(
            flatten_chain(&chain),
            Err(ChainError::Cycle {
                species: "root".into()
            })
        );
    }

    #[test]
    fn overly_deep_chain_is_rejected() {
        let mut chain = ChainLink::leaf(species("n", MAX_CHAIN_DEPTH as u32 + 10));
        for id in (1..MAX_CHAIN_DEPTH as u32 + 10).rev() {
            chain = ChainLink::with_children(species("n", id), vec![chain]);
        }
        assert!(matches!(
            flatten_chain(&chain),
            Err(ChainError::TooDeep { .. })
        ));
    }

    #[test]
    fn chain_at_depth_limit_is_accepted() {
        let mut chain = ChainLink::leaf(species("n", MAX_CHAIN_DEPTH as u32));
        for id in (1..MAX_CHAIN_DEPTH as u32).rev() {
            chain = ChainLink::with_children(species("n", id), vec![chain]);
        }
        assert_eq!(flatten_chain(&chain).unwrap().len(), MAX_CHAIN_DEPTH);
    }
}
