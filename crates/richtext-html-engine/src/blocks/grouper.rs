use crate::model::Block;
use crate::options::Options;

use super::types::{BlockNode, ListContainer};

/// What the grouper needs to know about list types.
pub trait ListRules {
    fn is_list_item(&self, block_type: &str) -> bool;

    /// Deeper list items are treated as sitting at this depth.
    fn max_depth(&self) -> usize;
}

impl<T: ListRules + ?Sized> ListRules for &T {
    fn is_list_item(&self, block_type: &str) -> bool {
        (**self).is_list_item(block_type)
    }

    fn max_depth(&self) -> usize {
        (**self).max_depth()
    }
}

impl ListRules for Options {
    fn is_list_item(&self, block_type: &str) -> bool {
        self.list_wrapper(block_type).is_some()
    }

    fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Builds the block tree from blocks pushed in document order.
///
/// `open` is the stack of list containers currently being filled, shallowest
/// first. Closing a container moves it into its parent, or into the output
/// when it was the outermost one.
pub struct BlockGrouper<'a, R> {
    rules: R,
    open: Vec<ListContainer<'a>>,
    out: Vec<BlockNode<'a>>,
}

impl<'a, R: ListRules> BlockGrouper<'a, R> {
    pub fn new(rules: R) -> Self {
        Self {
            rules,
            open: vec![],
            out: vec![],
        }
    }

    pub fn push(&mut self, block: &'a Block) {
        if !self.rules.is_list_item(&block.block_type) {
            self.close_to(0);
            self.out.push(BlockNode::Leaf(block));
            return;
        }

        let depth = block.depth.min(self.rules.max_depth());
        let list_type = block.block_type.as_str();

        // Close deeper lists, and a list of another type at this depth.
        while let Some(top) = self.open.last() {
            if top.depth > depth || (top.depth == depth && top.list_type != list_type) {
                self.close_top();
            } else {
                break;
            }
        }

        // Open lists down to this depth; skipped levels take this item's type.
        loop {
            let next_depth = match self.open.last() {
                Some(top) if top.depth >= depth => break,
                Some(top) => top.depth + 1,
                None => 0,
            };
            self.open.push(ListContainer::new(list_type, next_depth));
        }

        if let Some(top) = self.open.last_mut() {
            top.children.push(BlockNode::Leaf(block));
        }
    }

    pub fn finish(mut self) -> Vec<BlockNode<'a>> {
        self.close_to(0);
        self.out
    }

    fn close_to(&mut self, len: usize) {
        while self.open.len() > len {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(container) = self.open.pop() else {
            return;
        };
        log::trace!(
            "closing {} container at depth {} with {} children",
            container.list_type,
            container.depth,
            container.children.len()
        );
        match self.open.last_mut() {
            Some(parent) => parent.children.push(BlockNode::List(container)),
            None => self.out.push(BlockNode::List(container)),
        }
    }
}

/// Groups `blocks` into a tree in one pass.
pub fn group_blocks<'a, R: ListRules>(blocks: &'a [Block], rules: R) -> Vec<BlockNode<'a>> {
    let mut grouper = BlockGrouper::new(rules);
    for block in blocks {
        grouper.push(block);
    }
    grouper.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compact rendering of a tree: leaves by text, lists as `type@depth[..]`.
    fn shape(nodes: &[BlockNode<'_>]) -> String {
        nodes
            .iter()
            .map(|node| match node {
                BlockNode::Leaf(block) => block.text.clone(),
                BlockNode::List(list) => {
                    let kind = if list.list_type == "ordered-list-item" {
                        "ol"
                    } else {
                        "ul"
                    };
                    format!("{kind}@{}[{}]", list.depth, shape(&list.children))
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn item(list_type: &str, text: &str, depth: usize) -> Block {
        Block::new(list_type, text).with_depth(depth)
    }

    fn ul(text: &str, depth: usize) -> Block {
        item("unordered-list-item", text, depth)
    }

    fn ol(text: &str, depth: usize) -> Block {
        item("ordered-list-item", text, depth)
    }

    #[test]
    fn non_list_blocks_stay_flat() {
        let blocks = vec![Block::new("unstyled", "a"), Block::new("header-one", "b")];
        assert_eq!(shape(&group_blocks(&blocks, &Options::default())), "a b");
    }

    #[test]
    fn nested_depths_build_nested_container() {
        let blocks = vec![ul("a", 0), ul("b", 0), ul("c", 1), ul("d", 1), ul("e", 0)];

        let tree = group_blocks(&blocks, &Options::default());

        assert_eq!(tree.len(), 1);
        assert_eq!(shape(&tree), "ul@0[a b ul@1[c d] e]");
    }

    #[test]
    fn paragraph_closes_open_lists() {
        let blocks = vec![
            Block::new("unstyled", "An ordered list:"),
            ol("One", 0),
            ol("Two", 1),
            Block::new("unstyled", "after"),
            ol("Three", 0),
        ];

        assert_eq!(
            shape(&group_blocks(&blocks, &Options::default())),
            "An ordered list: ol@0[One ol@1[Two]] after ol@0[Three]"
        );
    }

    #[test]
    fn type_change_at_same_depth_starts_new_container() {
        let blocks = vec![ul("a", 0), ol("b", 0), ul("c", 0)];
        assert_eq!(
            shape(&group_blocks(&blocks, &Options::default())),
            "ul@0[a] ol@0[b] ul@0[c]"
        );
    }

    #[test]
    fn type_change_in_nested_list_keeps_parent() {
        let blocks = vec![ul("a", 0), ol("b", 1), ul("c", 1), ul("d", 0)];
        assert_eq!(
            shape(&group_blocks(&blocks, &Options::default())),
            "ul@0[a ol@1[b] ul@1[c] d]"
        );
    }

    #[test]
    fn depth_jump_opens_intermediate_containers() {
        let blocks = vec![ul("deep", 2)];
        assert_eq!(
            shape(&group_blocks(&blocks, &Options::default())),
            "ul@0[ul@1[ul@2[deep]]]"
        );
    }

    #[test]
    fn depth_beyond_maximum_is_clamped() {
        let options = Options {
            max_depth: 1,
            ..Options::default()
        };
        let blocks = vec![ul("a", 0), ul("b", 1), ul("c", 5), ul("d", 3)];
        assert_eq!(
            shape(&group_blocks(&blocks, &options)),
            "ul@0[a ul@1[b c d]]"
        );
    }

    #[test]
    fn empty_input_gives_empty_tree() {
        assert!(group_blocks(&[], &Options::default()).is_empty());
    }

    struct EverythingIsAList;

    impl ListRules for EverythingIsAList {
        fn is_list_item(&self, _block_type: &str) -> bool {
            true
        }

        fn max_depth(&self) -> usize {
            0
        }
    }

    #[test]
    fn rules_decide_what_is_a_list() {
        let blocks = vec![Block::new("x", "a"), Block::new("x", "b").with_depth(3)];
        let tree = group_blocks(&blocks, EverythingIsAList);

        let BlockNode::List(list) = &tree[0] else {
            panic!("expected a list, got {tree:?}");
        };
        assert_eq!(list.list_type, "x");
        assert_eq!(list.children.len(), 2);
    }
}
