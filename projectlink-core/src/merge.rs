//! Union of the configured target project with the projects already attached

use crate::{ProjectId, ProjectIdSet};

/// Merge the target project with the existing ones
///
/// The target comes first, followed by every distinct existing id in the order
/// it was first seen. The update mutation replaces the whole project list, so
/// anything left out here would be detached from the pull request.
pub fn merge_project_ids<I>(target: ProjectId, existing: I) -> ProjectIdSet
where
    I: IntoIterator<Item = ProjectId>,
{
    let mut merged = ProjectIdSet::with_target(target);
    merged.extend(existing);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<ProjectId> {
        raw.iter().map(|s| ProjectId::from(*s)).collect()
    }

    #[test]
    fn test_merge_with_no_existing() {
        let merged = merge_project_ids("PROJ_A".into(), Vec::new());
        assert_eq!(merged.into_vec(), ids(&["PROJ_A"]));
    }

    #[test]
    fn test_merge_keeps_target_first() {
        let merged = merge_project_ids("PROJ_A".into(), ids(&["PROJ_B", "PROJ_C"]));
        assert_eq!(merged.into_vec(), ids(&["PROJ_A", "PROJ_B", "PROJ_C"]));
    }

    #[test]
    fn test_merge_drops_duplicates_of_target() {
        let merged = merge_project_ids("PROJ_A".into(), ids(&["PROJ_B", "PROJ_A"]));
        assert_eq!(merged.len(), 2);
        assert!(merged.contains(&"PROJ_A".into()));
        assert!(merged.contains(&"PROJ_B".into()));
    }

    #[test]
    fn test_merge_drops_duplicates_within_existing() {
        let existing = ids(&["PROJ_B", "PROJ_B", "PROJ_C", "PROJ_B"]);
        let merged = merge_project_ids("PROJ_A".into(), existing);
        assert_eq!(merged.into_vec(), ids(&["PROJ_A", "PROJ_B", "PROJ_C"]));
    }

    #[test]
    fn test_merge_size_bound() {
        let cases = [
            ids(&[]),
            ids(&["PROJ_A"]),
            ids(&["PROJ_B", "PROJ_B"]),
            ids(&["PROJ_C", "PROJ_A", "PROJ_D", "PROJ_C"]),
        ];
        for existing in cases {
            let bound = existing.len() + 1;
            let merged = merge_project_ids("PROJ_A".into(), existing);
            assert!(merged.len() <= bound);
            assert!(!merged.is_empty());
        }
    }

    #[test]
    fn test_merge_is_idempotent() {
        let once = merge_project_ids("PROJ_A".into(), ids(&["PROJ_C", "PROJ_B", "PROJ_C"]));
        let twice = merge_project_ids("PROJ_A".into(), once.clone());
        assert_eq!(once, twice);
        assert_eq!(once.as_slice(), twice.as_slice());
    }
}
