//! Pure kinship queries over the relationship edge lists
//!
//! These are the explicit-traversal replacements for the graph pattern
//! queries the backend would otherwise run: siblings is a two-hop walk
//! (child→parent→child), most-children is a grouped distinct count.

use crate::person::PersonKey;
use crate::relationship::{Marriage, Parentage, TreeEdge};
use std::collections::{HashMap, HashSet};

/// Every person sharing at least one parent with `key`, excluding `key`
/// itself. Half-siblings and full siblings are both included, deduplicated.
/// Result is sorted by key for stable output.
pub fn siblings_of(key: &PersonKey, parentage: &[Parentage]) -> Vec<PersonKey> {
    let parents: HashSet<&PersonKey> = parentage
        .iter()
        .filter(|edge| &edge.child == key)
        .map(|edge| &edge.parent)
        .collect();

    let mut siblings: Vec<PersonKey> = parentage
        .iter()
        .filter(|edge| &edge.child != key && parents.contains(&edge.parent))
        .map(|edge| edge.child.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    siblings.sort();

    tracing::debug!(
        "siblings_of {}: {} parents, {} siblings",
        key,
        parents.len(),
        siblings.len()
    );
    siblings
}

/// Distinct-children counts per parent. Parents with no children do not
/// appear.
pub fn children_by_parent(parentage: &[Parentage]) -> HashMap<PersonKey, HashSet<PersonKey>> {
    let mut map: HashMap<PersonKey, HashSet<PersonKey>> = HashMap::new();
    for edge in parentage {
        map.entry(edge.parent.clone())
            .or_default()
            .insert(edge.child.clone());
    }
    map
}

/// All persons tied for the maximum distinct-children count. Empty when
/// nobody has children. Sorted by key.
pub fn most_children(parentage: &[Parentage]) -> Vec<PersonKey> {
    let counts = children_by_parent(parentage);
    let max = counts.values().map(|children| children.len()).max();

    let Some(max) = max else {
        return Vec::new();
    };

    let mut winners: Vec<PersonKey> = counts
        .into_iter()
        .filter(|(_, children)| children.len() == max)
        .map(|(parent, _)| parent)
        .collect();
    winners.sort();

    tracing::debug!("most_children: max {} children, {} tied", max, winners.len());
    winners
}

/// The combined edge list for external visualization: every parentage edge
/// as (child, parent, child) and every marriage once as (a, b, married).
pub fn tree_edges(marriages: &[Marriage], parentage: &[Parentage]) -> Vec<TreeEdge> {
    let mut edges = Vec::with_capacity(parentage.len() + marriages.len());
    for edge in parentage {
        edges.push(TreeEdge::child(edge.child.clone(), edge.parent.clone()));
    }
    // Marriages are stored with normalized endpoints, so each pair appears
    // exactly once here.
    for marriage in marriages {
        edges.push(TreeEdge::married(marriage.a.clone(), marriage.b.clone()));
    }
    edges
}
