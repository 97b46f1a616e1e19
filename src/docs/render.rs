//! Help document rendering.
//!
//! Turns a [`DocTree`] into an ordered sequence of [`RenderBlock`]s: one
//! block per group node and per leaf command, in pre-order, with indentation
//! proportional to tree depth. Blocks carry an abstract emphasis class;
//! mapping that to actual terminal styling happens in [`crate::theme`].

use crate::docs::tree::{DocTree, NodeId};

/// Column the help text starts at; names are padded to this width.
pub const NAME_WIDTH: usize = 20;

/// Spaces of indentation added per nesting level.
const INDENT: usize = 2;

/// Visual class of one rendered block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// The root node's own line.
    App,
    /// A nested group's line.
    Group,
    /// A leaf command line.
    Command,
}

/// One line of the help document, with its indentation and visual class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderBlock {
    pub name: String,
    /// Help text, already sanitized.
    pub help: String,
    pub indent: usize,
    pub emphasis: Emphasis,
}

impl RenderBlock {
    /// Name padded to [`NAME_WIDTH`] columns, followed by the help text.
    /// Names longer than the column width are kept whole.
    #[must_use]
    pub fn text(&self) -> String {
        format!("{:<width$}{}", self.name, self.help, width = NAME_WIDTH)
    }
}

/// Collapse documentation-markup double backticks to single backticks.
#[must_use]
pub fn clean_text(text: &str) -> String {
    text.replace("``", "`")
}

/// Render the tree into an ordered block sequence.
///
/// Pre-order: each node's own block, then its direct command blocks in
/// registration order, then each child's full sequence.
#[must_use]
pub fn render(tree: &DocTree) -> Vec<RenderBlock> {
    let mut blocks = Vec::new();
    if !tree.nodes.is_empty() {
        render_node(tree, 0, 0, &mut blocks);
    }
    blocks
}

fn render_node(tree: &DocTree, id: NodeId, level: usize, blocks: &mut Vec<RenderBlock>) {
    let node = tree.get(id);
    blocks.push(RenderBlock {
        name: node.info.name.clone(),
        help: clean_text(&node.info.help),
        indent: INDENT * level,
        emphasis: if level == 0 {
            Emphasis::App
        } else {
            Emphasis::Group
        },
    });

    for command in &node.commands {
        blocks.push(RenderBlock {
            name: command.name.clone(),
            help: clean_text(&command.help),
            indent: INDENT * (level + 1),
            emphasis: Emphasis::Command,
        });
    }

    for &child in &node.children {
        render_node(tree, child, level + 1, blocks);
    }
}
