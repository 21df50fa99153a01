// src/domain/category/hierarchy.rs
//! Assembles a tenant's flat category list into a forest.
//!
//! Every category is first classified by walking its parent chain at most
//! `categories.len()` hops. Only categories whose chain ends at a root within
//! [`MAX_NESTING_DEPTH`] levels are linked; the rest are reported as
//! [`IntegrityWarning`]s and left out. Linking uses an explicit stack, so the
//! builder's own stack use does not grow with the input.

use std::collections::{HashMap, HashSet};

use crate::domain::category::entity::Category;
use crate::domain::category::value_objects::CategoryId;

/// Deepest level a category may sit at; roots are level 1.
pub const MAX_NESTING_DEPTH: usize = 32;

#[derive(Debug, Clone)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

/// Non-fatal inconsistency found while building a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// The category points at a parent that is not in the tenant's catalog.
    DanglingParent {
        category_id: CategoryId,
        parent_id: CategoryId,
    },
    /// The category is part of a parent chain that loops back on itself.
    Cycle { category_id: CategoryId },
    /// The category sits below [`MAX_NESTING_DEPTH`]; it and its subtree are
    /// left out.
    TooDeep {
        category_id: CategoryId,
        depth: usize,
    },
}

impl IntegrityWarning {
    pub fn category_id(&self) -> CategoryId {
        match self {
            Self::DanglingParent { category_id, .. }
            | Self::Cycle { category_id }
            | Self::TooDeep { category_id, .. } => *category_id,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    pub roots: Vec<CategoryNode>,
    pub warnings: Vec<IntegrityWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reach {
    /// Chain ends at a root; the value is the category's level.
    Rooted(usize),
    Detached,
}

pub fn build_hierarchy(categories: Vec<Category>) -> Hierarchy {
    let parents: HashMap<CategoryId, Option<CategoryId>> = categories
        .iter()
        .map(|category| (category.id, category.parent_id))
        .collect();

    let (reach, mut warnings) = classify(&categories, &parents);

    let mut root_ids = Vec::new();
    let mut children_of: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
    let mut by_id: HashMap<CategoryId, Category> = HashMap::with_capacity(categories.len());

    for category in categories {
        let depth = match reach.get(&category.id) {
            Some(Reach::Rooted(depth)) => *depth,
            _ => continue,
        };
        if depth > MAX_NESTING_DEPTH {
            if depth == MAX_NESTING_DEPTH + 1 {
                warnings.push(IntegrityWarning::TooDeep {
                    category_id: category.id,
                    depth,
                });
            }
            continue;
        }
        if by_id.contains_key(&category.id) {
            continue;
        }
        match category.parent_id {
            None => root_ids.push(category.id),
            Some(parent) => children_of.entry(parent).or_default().push(category.id),
        }
        by_id.insert(category.id, category);
    }

    let roots = root_ids
        .into_iter()
        .filter_map(|id| assemble(id, &mut by_id, &children_of))
        .collect();

    Hierarchy { roots, warnings }
}

/// Walks each unresolved parent chain once, memoising the outcome for every
/// category visited on the way.
fn classify(
    categories: &[Category],
    parents: &HashMap<CategoryId, Option<CategoryId>>,
) -> (HashMap<CategoryId, Reach>, Vec<IntegrityWarning>) {
    let max_hops = categories.len();
    let mut resolved: HashMap<CategoryId, Reach> = HashMap::with_capacity(max_hops);
    let mut warnings = Vec::new();

    for category in categories {
        if resolved.contains_key(&category.id) {
            continue;
        }

        let mut path: Vec<CategoryId> = Vec::new();
        let mut on_path: HashSet<CategoryId> = HashSet::new();
        let mut cursor = category.id;

        // `Some(level)` is the level of whatever sits just above the last
        // element of `path` (0 when that element is itself a root).
        let anchor: Option<usize> = loop {
            if let Some(known) = resolved.get(&cursor) {
                break match known {
                    Reach::Rooted(level) => Some(*level),
                    Reach::Detached => None,
                };
            }
            if !on_path.insert(cursor) || path.len() > max_hops {
                let start = path.iter().position(|id| *id == cursor).unwrap_or(0);
                warnings.extend(
                    path[start..]
                        .iter()
                        .map(|id| IntegrityWarning::Cycle { category_id: *id }),
                );
                break None;
            }
            path.push(cursor);

            match parents.get(&cursor).copied().flatten() {
                None => break Some(0),
                Some(parent) if parents.contains_key(&parent) => cursor = parent,
                Some(parent) => {
                    warnings.push(IntegrityWarning::DanglingParent {
                        category_id: cursor,
                        parent_id: parent,
                    });
                    break None;
                }
            }
        };

        match anchor {
            Some(base) => {
                for (offset, id) in path.into_iter().rev().enumerate() {
                    resolved.insert(id, Reach::Rooted(base + offset + 1));
                }
            }
            None => {
                for id in path {
                    resolved.insert(id, Reach::Detached);
                }
            }
        }
    }

    (resolved, warnings)
}

struct Frame<'a> {
    category: Category,
    pending: std::slice::Iter<'a, CategoryId>,
    children: Vec<CategoryNode>,
}

/// Builds the subtree under `root` depth-first, attaching each node to its
/// parent once all of its own children are done.
fn assemble(
    root: CategoryId,
    by_id: &mut HashMap<CategoryId, Category>,
    children_of: &HashMap<CategoryId, Vec<CategoryId>>,
) -> Option<CategoryNode> {
    let open = move |category: Category| Frame {
        pending: children_of
            .get(&category.id)
            .map(|ids| ids.iter())
            .unwrap_or_default(),
        category,
        children: Vec::new(),
    };

    let mut stack = vec![open(by_id.remove(&root)?)];

    while let Some(top) = stack.last_mut() {
        if let Some(child) = top.pending.next() {
            if let Some(category) = by_id.remove(child) {
                stack.push(open(category));
            }
            continue;
        }

        let Frame {
            category, children, ..
        } = stack.pop()?;
        let node = CategoryNode { category, children };
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => return Some(node),
        }
    }

    None
}
