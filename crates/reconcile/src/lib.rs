//! Scoped reconciliation: merge a freshly compiled fragment into the live
//! tree for one changed dependency name.
//!
//! Most template regions carry no content-addressed children and are swapped
//! wholesale, which is cheap and correct. Regions rendering a
//! content-addressed list preserve already-rendered items instead, so
//! transient UI state (focus, animation, scroll position) survives a
//! re-render. That preservation is an additive merge: tagged nodes that
//! vanish from the new render are never pruned. Removals are a known
//! limitation of the additive policy.

use anyhow::Error;
use fragment::{DependencyMap, FragmentTree};
use indextree::NodeId;
use log::{debug, warn};

/// Reconcile the elements registered under `changed` against their freshly
/// compiled counterparts, positionally. Returns whether any pair was
/// wholesale-replaced, in which case the nested dependency entries of the
/// old map have been repointed at the new subtrees.
pub fn reconcile(
    tree: &mut FragmentTree,
    old_map: &mut DependencyMap,
    new_map: &DependencyMap,
    changed: &str,
) -> Result<bool, Error> {
    let old_elements = old_map.get(changed).to_vec();
    let new_elements = new_map.get(changed).to_vec();

    let mut replaced: Vec<(usize, NodeId)> = Vec::new();
    for (index, old_element) in old_elements.iter().copied().enumerate() {
        let Some(new_element) = new_elements.get(index).copied() else {
            warn!("no compiled counterpart for {changed}[{index}]");
            continue;
        };
        if !tree.is_attached(old_element) {
            // External mutation can leave map entries pointing at detached
            // nodes; the pair is skipped rather than failing the pass.
            warn!("reconciliation target {changed}[{index}] is not in the live tree");
            continue;
        }
        if merge_or_replace(tree, old_element, new_element)? {
            replaced.push((index, old_element));
        }
    }

    for (index, old_element) in &replaced {
        repoint_nested(tree, old_map, new_map, *index, *old_element);
    }

    debug!(
        "reconciled {changed}: {} of {} pairs replaced",
        replaced.len(),
        old_elements.len()
    );
    Ok(!replaced.is_empty())
}

/// Swap the old element out wholesale when its subtree carries no identity
/// tags; otherwise additively merge the new subtree's unseen tagged nodes
/// into the old one. Returns whether a wholesale replacement happened.
fn merge_or_replace(
    tree: &mut FragmentTree,
    old_element: NodeId,
    new_element: NodeId,
) -> Result<bool, Error> {
    if tree.first_tagged(old_element).is_none() {
        tree.replace(old_element, new_element)?;
        return Ok(true);
    }
    merge_tagged(tree, old_element, new_element)?;
    Ok(false)
}

/// Walk the new subtree depth-first and append every tagged node whose
/// digest has no match under the old element. The anchor is the parent of
/// the old element's first tagged descendant. Nodes already present are left
/// untouched; once a node is moved, its own tagged descendants move with it
/// and later candidates find them in place.
fn merge_tagged(
    tree: &mut FragmentTree,
    old_element: NodeId,
    new_element: NodeId,
) -> Result<(), Error> {
    let candidates = tree.tagged_subtree(new_element);
    for (node, digest) in candidates {
        if tree.find_tagged(old_element, &digest).is_some() {
            continue;
        }
        let Some(anchor) = tree.first_tagged(old_element).and_then(|tagged| tree.parent(tagged))
        else {
            warn!("tagged subtree lost its anchor during merge");
            continue;
        };
        tree.append_child(anchor, node)?;
        debug!("appended new tagged node {digest}");
    }
    Ok(())
}

/// After a wholesale replacement, entries registered under the old element's
/// own names, and under any names nested inside the replacement, would point
/// at detached nodes. Repoint each positional entry at its counterpart from
/// the new map.
fn repoint_nested(
    tree: &FragmentTree,
    old_map: &mut DependencyMap,
    new_map: &DependencyMap,
    index: usize,
    old_element: NodeId,
) {
    for name in tree.ref_names(old_element) {
        let nested = new_map
            .get(&name)
            .get(index)
            .map(|&fresh| nested_names(tree, fresh))
            .unwrap_or_default();

        if let Some(&fresh) = new_map.get(&name).get(index) {
            old_map.set(&name, index, fresh);
        }
        for nested_name in nested {
            if let Some(&fresh) = new_map.get(&nested_name).get(index) {
                old_map.set(&nested_name, index, fresh);
            }
        }
    }
}

/// Distinct dependency names declared inside `scope`'s subtree.
fn nested_names(tree: &FragmentTree, scope: NodeId) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for element in tree.referenced(scope) {
        for name in tree.ref_names(element) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
