// src/application/commands/categories/parent.rs
use std::collections::{HashMap, HashSet};

use super::CategoryCommandService;
use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::{
        category::{CategoryId, MAX_NESTING_DEPTH},
        tenant::TenantId,
    },
};

type ParentLinks = HashMap<CategoryId, Option<CategoryId>>;

impl CategoryCommandService {
    /// Checks that a new category may be created under `parent_id`: the
    /// parent must exist in the tenant and the child must stay within
    /// [`MAX_NESTING_DEPTH`].
    pub(super) async fn ensure_parent_exists(
        &self,
        tenant: &TenantId,
        parent_id: CategoryId,
    ) -> ApplicationResult<()> {
        let parents = self.parent_links(tenant).await?;
        if !parents.contains_key(&parent_id) {
            return Err(ApplicationError::validation("parent category not found"));
        }
        ensure_within_depth(level_of(&parents, parent_id) + 1)
    }

    /// Checks that `parent_id` can become the parent of `category_id`: it must
    /// exist in the same tenant, must not be the category or one of its
    /// descendants, and the moved subtree must stay within
    /// [`MAX_NESTING_DEPTH`].
    pub(super) async fn ensure_parent_assignable(
        &self,
        tenant: &TenantId,
        category_id: CategoryId,
        parent_id: CategoryId,
    ) -> ApplicationResult<()> {
        if parent_id == category_id {
            return Err(ApplicationError::validation(
                "category cannot be its own parent",
            ));
        }

        let parents = self.parent_links(tenant).await?;

        if !parents.contains_key(&parent_id) {
            return Err(ApplicationError::validation("parent category not found"));
        }

        let mut cursor = Some(parent_id);
        for _ in 0..parents.len() {
            match cursor {
                Some(id) if id == category_id => {
                    return Err(ApplicationError::validation(
                        "parent would create a cycle",
                    ));
                }
                Some(id) => cursor = parents.get(&id).copied().flatten(),
                None => break,
            }
        }

        ensure_within_depth(level_of(&parents, parent_id) + subtree_height(&parents, category_id))
    }

    async fn parent_links(&self, tenant: &TenantId) -> ApplicationResult<ParentLinks> {
        Ok(self
            .read_repo
            .list(tenant)
            .await?
            .into_iter()
            .map(|category| (category.id, category.parent_id))
            .collect())
    }
}

fn ensure_within_depth(level: usize) -> ApplicationResult<()> {
    if level > MAX_NESTING_DEPTH {
        return Err(ApplicationError::validation(format!(
            "categories cannot be nested more than {MAX_NESTING_DEPTH} levels deep"
        )));
    }
    Ok(())
}

/// Level of `id` counted from its topmost reachable ancestor (roots are 1).
/// Stops at a missing parent or a repeated id.
fn level_of(parents: &ParentLinks, id: CategoryId) -> usize {
    let mut seen = HashSet::new();
    let mut cursor = Some(id);
    let mut level = 0;
    while let Some(current) = cursor {
        if !seen.insert(current) || !parents.contains_key(&current) {
            break;
        }
        level += 1;
        cursor = parents.get(&current).copied().flatten();
    }
    level
}

/// Number of levels in the subtree rooted at `id`, counting `id` itself.
fn subtree_height(parents: &ParentLinks, id: CategoryId) -> usize {
    let mut children_of: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
    for (child, parent) in parents {
        if let Some(parent) = parent {
            children_of.entry(*parent).or_default().push(*child);
        }
    }

    let mut seen = HashSet::from([id]);
    let mut frontier = vec![id];
    let mut height = 0;
    while !frontier.is_empty() {
        height += 1;
        frontier = frontier
            .iter()
            .filter_map(|node| children_of.get(node))
            .flatten()
            .copied()
            .filter(|child| seen.insert(*child))
            .collect();
    }
    height
}
