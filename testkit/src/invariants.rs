//! Forest consistency checks

use std::collections::HashSet;

use orgtree_store::NodeStore;

/// Check every structural and derived-field invariant of `store`.
///
/// Returns a description of the first violation found.
pub fn check_invariants(store: &NodeStore, separator: &str) -> Result<(), String> {
    let mut seen = HashSet::new();
    let mut stack: Vec<_> = store.roots().iter().rev().copied().collect();
    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            return Err(format!("{id} is reachable twice"));
        }
        let node = store.get(id).ok_or_else(|| format!("{id} is listed but missing"))?;

        let (level, path) = match node.parent_id {
            None => {
                if !store.roots().contains(&id) {
                    return Err(format!("{id} has no parent but is not a root"));
                }
                (0, node.name.clone())
            }
            Some(parent_id) => {
                let parent = store
                    .get(parent_id)
                    .ok_or_else(|| format!("{id} has missing parent {parent_id}"))?;
                let links = parent.children.iter().filter(|c| **c == id).count();
                if links != 1 {
                    return Err(format!("{id} appears {links} times under {parent_id}"));
                }
                (parent.level + 1, format!("{}{}{}", parent.path, separator, node.name))
            }
        };
        if node.level != level {
            return Err(format!("{id} has level {} instead of {level}", node.level));
        }
        if node.path != path {
            return Err(format!("{id} has path {:?} instead of {path:?}", node.path));
        }

        let mut total = node.users.len();
        for child_id in &node.children {
            let child = store
                .get(*child_id)
                .ok_or_else(|| format!("{id} lists missing child {child_id}"))?;
            if child.parent_id != Some(id) {
                return Err(format!("{child_id} is listed under {id} but points elsewhere"));
            }
            total += child.total_users;
        }
        if node.total_users != total {
            return Err(format!("{id} has totalUsers {} instead of {total}", node.total_users));
        }

        for user in &node.users {
            if store.user_location(user.id) != Some(id) {
                return Err(format!("{} on {id} is indexed elsewhere", user.id));
            }
        }
        stack.extend(node.children.iter().rev().copied());
    }

    if seen.len() != store.len() {
        return Err(format!(
            "{} nodes stored but {} reachable from the roots",
            store.len(),
            seen.len()
        ));
    }
    let placed: usize = store.iter().map(|n| n.users.len()).sum();
    if placed != store.user_count() {
        return Err(format!(
            "{placed} users placed but {} indexed",
            store.user_count()
        ));
    }
    Ok(())
}
