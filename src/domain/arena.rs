use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

/// Tree node in the arena-based category hierarchy.
#[derive(Debug, Clone)]
pub struct CategoryNode {
    /// Category name, unique across the tree
    pub name: String,
    /// Edge count from the root, root has depth 0
    pub depth: usize,
    /// Index of parent node in the arena, None for the root and detached nodes
    pub parent: Option<Index>,
    /// Indices of child nodes, kept in ascending name order
    pub children: Vec<Index>,
}

impl fmt::Display for CategoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Arena-based category tree.
///
/// Uses a generational arena for memory-safe node references. Nodes are only
/// ever added; the first node inserted without a parent becomes the single root.
#[derive(Debug, Default)]
pub struct CategoryTree {
    /// Arena storage for all nodes, attached or not
    arena: Arena<CategoryNode>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
}

impl CategoryTree {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Allocates a new childless node with depth 0 and no parent.
    ///
    /// The node is not reachable from the root until passed to [`insert`](Self::insert).
    #[instrument(level = "trace", skip(self))]
    pub fn create(&mut self, name: &str) -> Index {
        self.arena.insert(CategoryNode {
            name: name.to_string(),
            depth: 0,
            parent: None,
            children: Vec::new(),
        })
    }

    /// Attaches `child` under `parent`.
    ///
    /// Without a parent the child becomes the root of an empty tree, or a child of
    /// the existing root otherwise. Siblings stay sorted by name; a duplicate name
    /// lands after every sibling comparing equal or less.
    #[instrument(level = "trace", skip(self))]
    pub fn insert(&mut self, parent: Option<Index>, child: Index) -> DomainResult<()> {
        let child_node = self.arena.get(child).ok_or(DomainError::UnknownNode)?;
        if child_node.parent.is_some() || self.root == Some(child) {
            return Err(DomainError::AlreadyAttached(child_node.name.clone()));
        }

        let parent_idx = match parent.or(self.root) {
            Some(idx) => idx,
            None => {
                trace!("root: {}", child_node.name);
                self.root = Some(child);
                return Ok(());
            }
        };

        let parent_node = self.arena.get(parent_idx).ok_or(DomainError::UnknownNode)?;
        let name = child_node.name.as_str();
        let position = parent_node
            .children
            .iter()
            .position(|&sibling| self.arena[sibling].name.as_str() > name)
            .unwrap_or(parent_node.children.len());
        let depth = parent_node.depth + 1;

        self.arena[parent_idx].children.insert(position, child);
        let child_node = &mut self.arena[child];
        child_node.parent = Some(parent_idx);
        child_node.depth = depth;
        Ok(())
    }

    /// Depth-first search for `name` in the subtree rooted at `start`, inclusive.
    ///
    /// Each child is compared before its own subtree is searched, so the first
    /// match in sibling order wins.
    pub fn find(&self, start: Index, name: &str) -> Option<Index> {
        let node = self.arena.get(start)?;
        if node.name == name {
            return Some(start);
        }
        for &child in &node.children {
            if self.arena[child].name == name {
                return Some(child);
            }
            if let Some(found) = self.find(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Looks `name` up from the root.
    pub fn find_from_root(&self, name: &str) -> Option<Index> {
        self.root.and_then(|root| self.find(root, name))
    }

    pub fn get_node(&self, idx: Index) -> Option<&CategoryNode> {
        self.arena.get(idx)
    }

    pub fn parent_of(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|node| node.parent)
    }

    pub fn children_of(&self, idx: Index) -> &[Index] {
        self.arena
            .get(idx)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn name(&self, idx: Index) -> Option<&str> {
        self.arena.get(idx).map(|node| node.name.as_str())
    }

    pub fn depth(&self, idx: Index) -> Option<usize> {
        self.arena.get(idx).map(|node| node.depth)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    /// Number of allocated nodes.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order walk of the whole tree.
    pub fn iter(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, self.root)
    }

    /// Pre-order walk of the subtree at `start`, yielding `start` first.
    pub fn iter_from(&self, start: Index) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self, Some(start))
    }

    /// Walk from the parent of `idx` up to the root.
    pub fn ancestors(&self, idx: Index) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent_of(idx),
        }
    }
}

pub struct PreOrderIterator<'a> {
    tree: &'a CategoryTree,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a CategoryTree, start: Option<Index>) -> Self {
        Self {
            tree,
            stack: start.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a CategoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct Ancestors<'a> {
    tree: &'a CategoryTree,
    next: Option<Index>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (Index, &'a CategoryNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.tree.get_node(idx)?;
        self.next = node.parent;
        Some((idx, node))
    }
}
