use crate::model::Block;

/// A node of the block tree built for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockNode<'a> {
    /// A block rendered on its own.
    Leaf(&'a Block),
    /// A list holding items and any lists nested under them.
    List(ListContainer<'a>),
}

/// A list container. Its leaf children are items of `list_type` at `depth`;
/// its container children are deeper lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ListContainer<'a> {
    /// The list-item block type, e.g. `ordered-list-item`.
    pub list_type: &'a str,
    pub depth: usize,
    pub children: Vec<BlockNode<'a>>,
}

impl<'a> ListContainer<'a> {
    pub fn new(list_type: &'a str, depth: usize) -> Self {
        Self {
            list_type,
            depth,
            children: Vec::new(),
        }
    }
}
