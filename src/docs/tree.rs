//! Documentation tree construction.
//!
//! Walks a composed [`CommandGroup`] into an arena-backed tree of display
//! metadata. Nodes reference their parent and children by arena index, so the
//! tree has no ownership cycles and is immutable once returned.

use thiserror::Error;

use crate::docs::info::{Info, extract_info, extract_subgroup_info};
use crate::plugins::group::CommandGroup;

/// Maximum group nesting the builder will follow before giving up.
pub const MAX_DEPTH: usize = 64;

/// Index of a node within its [`DocTree`] arena.
pub type NodeId = usize;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("command group nesting too deep (possible cycle in the group graph)")]
    DepthExceeded,
}

/// One command group in the documentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocNode {
    /// Arena index of the parent node, absent for the root.
    pub parent: Option<NodeId>,
    pub info: Info,
    /// Visible leaf commands, in registration order.
    pub commands: Vec<Info>,
    /// Visible subgroups, in registration order.
    pub children: Vec<NodeId>,
}

/// Arena-backed documentation tree; node 0 is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocTree {
    pub nodes: Vec<DocNode>,
}

impl DocTree {
    /// The root node; a built tree always has one.
    #[must_use]
    pub fn root(&self) -> Option<&DocNode> {
        self.nodes.first()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> &DocNode {
        &self.nodes[id]
    }
}

/// Build the documentation tree for a composed command group.
///
/// Hidden commands and hidden subgroups are skipped; everything else appears
/// in registration order.
///
/// # Errors
///
/// Returns `DocsError::DepthExceeded` when nesting goes deeper than
/// [`MAX_DEPTH`]. The group graph is acyclic by construction, so this only
/// fires on a pathological or self-referential graph.
pub fn build_tree(group: &CommandGroup) -> Result<DocTree, DocsError> {
    let mut tree = DocTree::default();
    build_node(&mut tree, group, None, None, 0)?;
    Ok(tree)
}

fn build_node(
    tree: &mut DocTree,
    group: &CommandGroup,
    parent: Option<NodeId>,
    precomputed: Option<Info>,
    depth: usize,
) -> Result<NodeId, DocsError> {
    if depth > MAX_DEPTH {
        return Err(DocsError::DepthExceeded);
    }

    // Info extracted at the parent's registration site wins over the group's
    // own declaration.
    let info = precomputed.unwrap_or_else(|| extract_info(&group.decl));
    let id = tree.nodes.len();
    tree.nodes.push(DocNode {
        parent,
        info,
        commands: Vec::new(),
        children: Vec::new(),
    });

    for command in &group.commands {
        if !command.hidden {
            tree.nodes[id].commands.push(extract_info(command));
        }
    }

    for sub in &group.subgroups {
        if sub.decl.hidden {
            continue;
        }
        // The registration site is only visible at this level, so the
        // child's info is extracted here and handed down.
        let sub_info = extract_subgroup_info(sub);
        let child = build_node(tree, &sub.group, Some(id), Some(sub_info), depth + 1)?;
        tree.nodes[id].children.push(child);
    }

    Ok(id)
}
