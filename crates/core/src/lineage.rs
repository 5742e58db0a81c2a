//! Hero parent/child lineage rules.
//!
//! `hero_children` is a directed graph. Saves keep it acyclic: a hero may
//! not list itself or any of its ancestors as a child.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::types::DbId;

/// Placeholder shown in the list column when a hero has no children.
pub const EMPTY_CHILDREN_DISPLAY: &str = "-";

/// Sort and de-duplicate a submitted child id list.
pub fn normalize_children(children: &[DbId]) -> Vec<DbId> {
    let mut ids = children.to_vec();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Reject child ids that do not exist. `existing` is the subset of
/// `children` found in the database.
pub fn check_known_children(children: &[DbId], existing: &[DbId]) -> Result<(), CoreError> {
    let missing: Vec<String> = children
        .iter()
        .filter(|id| !existing.contains(id))
        .map(ToString::to_string)
        .collect();
    if missing.is_empty() {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Unknown child hero ids: {}",
        missing.join(", ")
    )))
}

/// Check that giving `hero_id` the children `children` keeps the graph
/// acyclic.
///
/// `ancestors` is every hero that reaches `hero_id` through
/// `hero_children`. A child that is the hero itself or one of those
/// ancestors would close a loop.
pub fn validate_children(
    hero_id: DbId,
    children: &[DbId],
    ancestors: &[DbId],
) -> Result<(), CoreError> {
    if children.contains(&hero_id) {
        return Err(CoreError::Validation(
            "A hero cannot be its own child".to_string(),
        ));
    }

    let ancestors: HashSet<DbId> = ancestors.iter().copied().collect();
    if let Some(child) = children.iter().find(|id| ancestors.contains(id)) {
        return Err(CoreError::Validation(format!(
            "Hero {child} is an ancestor of hero {hero_id} and cannot become its child"
        )));
    }
    Ok(())
}

/// The `children_display` list column.
pub fn children_display<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return EMPTY_CHILDREN_DISPLAY.to_string();
    }
    names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn hero_without_ancestors_accepts_any_children() {
        assert!(validate_children(9, &[1, 2, 3], &[]).is_ok());
    }

    #[test]
    fn self_child_is_rejected() {
        assert_matches!(
            validate_children(4, &[4], &[]),
            Err(CoreError::Validation(msg)) if msg.contains("own child")
        );
    }

    #[test]
    fn adopting_an_ancestor_is_rejected() {
        // 1 -> 2 -> 3; making 1 a child of 3 closes a loop.
        assert_matches!(
            validate_children(3, &[1], &[2, 1]),
            Err(CoreError::Validation(msg)) if msg.contains("ancestor")
        );
    }

    #[test]
    fn siblings_and_descendants_are_fine() {
        // 1 -> 2, 1 -> 3, 2 -> 4
        assert!(validate_children(2, &[3], &[1]).is_ok());
        assert!(validate_children(1, &[4], &[]).is_ok());
    }

    #[test]
    fn unknown_children_are_listed() {
        assert!(check_known_children(&[1, 2], &[1, 2]).is_ok());
        assert_matches!(
            check_known_children(&[1, 7, 8], &[1]),
            Err(CoreError::Validation(msg)) if msg.ends_with("7, 8")
        );
    }

    #[test]
    fn normalize_sorts_and_dedups() {
        assert_eq!(normalize_children(&[3, 1, 3, 2, 1]), vec![1, 2, 3]);
    }

    #[test]
    fn children_display_joins_or_dashes() {
        let none: [&str; 0] = [];
        assert_eq!(children_display(&none), "-");
        assert_eq!(children_display(&["Robin", "Batgirl"]), "Robin, Batgirl");
    }
}
