//! Query engine: ancestry and descendant questions over a loaded tree
//!
//! Every operation resolves its operand names from the root first and fails
//! with [`DomainError::CategoryNotFound`] before doing any other work.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::CategoryTree;
use crate::domain::entities::{Answer, Operation, Query};
use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy)]
pub struct QueryEngine<'a> {
    tree: &'a CategoryTree,
}

impl<'a> QueryEngine<'a> {
    pub fn new(tree: &'a CategoryTree) -> Self {
        Self { tree }
    }

    fn resolve(&self, name: &str) -> DomainResult<Index> {
        self.tree
            .find_from_root(name)
            .ok_or_else(|| DomainError::CategoryNotFound(name.to_string()))
    }

    fn name_of(&self, idx: Index) -> String {
        self.tree.name(idx).unwrap_or_default().to_string()
    }

    /// Name of the direct parent, None for the root.
    #[instrument(level = "debug", skip(self))]
    pub fn direct_supercategory(&self, category: &str) -> DomainResult<Option<String>> {
        let idx = self.resolve(category)?;
        Ok(self.tree.parent_of(idx).map(|parent| self.name_of(parent)))
    }

    /// Ancestor names from the direct parent up to the root.
    #[instrument(level = "debug", skip(self))]
    pub fn all_supercategories(&self, category: &str) -> DomainResult<Vec<String>> {
        let idx = self.resolve(category)?;
        Ok(self
            .tree
            .ancestors(idx)
            .map(|(_, node)| node.name.clone())
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn number_of_all_supercategories(&self, category: &str) -> DomainResult<usize> {
        let idx = self.resolve(category)?;
        Ok(self.tree.ancestors(idx).count())
    }

    /// Whether `supercategory` lies on the path from `category` to the root.
    ///
    /// The walk starts at `category` itself, so every category is its own supercategory.
    #[instrument(level = "debug", skip(self))]
    pub fn is_supercategory(&self, category: &str, supercategory: &str) -> DomainResult<bool> {
        let idx = self.resolve(category)?;
        self.resolve(supercategory)?;
        let start = self.tree.get_node(idx).map(|node| (idx, node));
        Ok(start
            .into_iter()
            .chain(self.tree.ancestors(idx))
            .any(|(_, node)| node.name == supercategory))
    }

    /// Whether `category` is reachable from `supercategory` through children only.
    ///
    /// The search includes `supercategory` itself, so the relation is reflexive.
    #[instrument(level = "debug", skip(self))]
    pub fn is_subcategory(&self, category: &str, supercategory: &str) -> DomainResult<bool> {
        self.resolve(category)?;
        let start = self.resolve(supercategory)?;
        Ok(self.tree.find(start, category).is_some())
    }

    /// Lowest common ancestor of two categories.
    #[instrument(level = "debug", skip(self))]
    pub fn closest_common_supercategory(&self, first: &str, second: &str) -> DomainResult<String> {
        let disjoint = || DomainError::DisjointHierarchy {
            first: first.to_string(),
            second: second.to_string(),
        };
        let depth = |idx: Index| self.tree.depth(idx).ok_or_else(disjoint);

        let mut a = self.resolve(first)?;
        let mut b = self.resolve(second)?;

        while depth(a)? > depth(b)? {
            a = self.tree.parent_of(a).ok_or_else(disjoint)?;
        }
        while depth(b)? > depth(a)? {
            b = self.tree.parent_of(b).ok_or_else(disjoint)?;
        }
        while a != b {
            a = self.tree.parent_of(a).ok_or_else(disjoint)?;
            b = self.tree.parent_of(b).ok_or_else(disjoint)?;
        }
        Ok(self.name_of(a))
    }

    /// Names of the direct children in stored order.
    #[instrument(level = "debug", skip(self))]
    pub fn direct_subcategories(&self, category: &str) -> DomainResult<Vec<String>> {
        let idx = self.resolve(category)?;
        Ok(self
            .tree
            .children_of(idx)
            .iter()
            .map(|&child| self.name_of(child))
            .collect())
    }

    /// Pre-order listing of the whole subtree, excluding the category itself.
    #[instrument(level = "debug", skip(self))]
    pub fn all_subcategories(&self, category: &str) -> DomainResult<Vec<String>> {
        let idx = self.resolve(category)?;
        Ok(self
            .tree
            .iter_from(idx)
            .skip(1)
            .map(|(_, node)| node.name.clone())
            .collect())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn number_of_all_subcategories(&self, category: &str) -> DomainResult<usize> {
        let idx = self.resolve(category)?;
        Ok(self.count_descendants(idx))
    }

    fn count_descendants(&self, idx: Index) -> usize {
        self.tree
            .children_of(idx)
            .iter()
            .map(|&child| 1 + self.count_descendants(child))
            .sum()
    }

    /// Dispatches a query to its operation.
    pub fn answer(&self, query: &Query) -> DomainResult<Answer> {
        let (a, b) = (query.first(), query.second());
        let answer = match query.operation {
            Operation::DirectSupercategory => Answer::Parent(self.direct_supercategory(a)?),
            Operation::AllSupercategories => Answer::Names(self.all_supercategories(a)?),
            Operation::NumberOfAllSupercategories => {
                Answer::Count(self.number_of_all_supercategories(a)?)
            }
            Operation::IsSupercategory => Answer::Verdict(self.is_supercategory(a, b)?),
            Operation::IsSubcategory => Answer::Verdict(self.is_subcategory(a, b)?),
            Operation::ClosestCommonSupercategory => {
                Answer::Name(self.closest_common_supercategory(a, b)?)
            }
            Operation::DirectSubcategories => Answer::Names(self.direct_subcategories(a)?),
            Operation::AllSubcategories => Answer::Names(self.all_subcategories(a)?),
            Operation::NumberOfAllSubcategories => {
                Answer::Count(self.number_of_all_subcategories(a)?)
            }
        };
        Ok(answer)
    }
}
