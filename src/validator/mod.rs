//! Pre-flight collision check for season plans.
//!
//! A season is only safe to apply when every planned target name is claimed
//! by exactly one source file. Any shared target vetoes the whole season.

use crate::rename::SeasonPlan;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Populate `plan.collisions` with every target claimed by two or more
/// distinct sources. Entries are left in place for reporting.
pub fn check_collisions(mut plan: SeasonPlan) -> SeasonPlan {
    let mut claims: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for entry in &plan.entries {
        claims
            .entry(entry.target_name.as_str())
            .or_default()
            .insert(entry.source.filename.as_str());
    }

    let collisions: BTreeMap<String, Vec<String>> = claims
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(target, sources)| {
            (
                target.to_string(),
                sources.into_iter().map(str::to_string).collect(),
            )
        })
        .collect();

    if collisions.is_empty() {
        debug!(season = %plan.season.folder_name, entries = plan.entries.len(), "No collisions");
    } else {
        warn!(
            season = %plan.season.folder_name,
            groups = collisions.len(),
            "Colliding targets detected"
        );
    }

    plan.collisions = collisions;
    plan
}

/// Multi-line description of a plan's collisions, for diagnostics.
pub fn format_collision_message(plan: &SeasonPlan) -> String {
    let mut msg = format!(
        "{} target name(s) in {} are claimed by several files:\n",
        plan.collisions.len(),
        plan.season.folder_name
    );

    for (target, sources) in &plan.collisions {
        msg.push_str(&format!("  {}\n", target));
        for source in sources {
            msg.push_str(&format!("    <- {}\n", source));
        }
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenamerConfig;
    use crate::media::MediaFile;
    use crate::parser::EpisodeInfo;
    use crate::rename::{RenamePlanEntry, SeasonUnit};
    use std::path::PathBuf;

    fn entry(filename: &str, target: &str) -> RenamePlanEntry {
        RenamePlanEntry {
            source: MediaFile::from_filename(filename, &RenamerConfig::default()).unwrap(),
            episode: EpisodeInfo::single(1).unwrap(),
            target_name: target.to_string(),
        }
    }

    fn plan_with(entries: Vec<RenamePlanEntry>) -> SeasonPlan {
        let mut plan = SeasonPlan::new(SeasonUnit {
            number: 1,
            folder_name: "Season 01".to_string(),
            path: PathBuf::from("/media/Show/Season 01"),
            files: Vec::new(),
        });
        plan.entries = entries;
        plan
    }

    #[test]
    fn test_unique_targets_are_safe() {
        let plan = check_collisions(plan_with(vec![
            entry("Show - 01.mkv", "Show S01E01.mkv"),
            entry("Show - 02.mkv", "Show S01E02.mkv"),
            entry("Show - 01.en.srt", "Show S01E01.en.srt"),
        ]));

        assert!(plan.is_safe());
        assert!(plan.collisions.is_empty());
    }

    #[test]
    fn test_shared_target_is_collision() {
        let plan = check_collisions(plan_with(vec![
            entry("ep01.mkv", "Show S01E01.mkv"),
            entry("EP01.mkv", "Show S01E01.mkv"),
            entry("ep02.mkv", "Show S01E02.mkv"),
        ]));

        assert!(!plan.is_safe());
        assert_eq!(plan.collisions.len(), 1);
        assert_eq!(
            plan.collisions["Show S01E01.mkv"],
            vec!["EP01.mkv".to_string(), "ep01.mkv".to_string()]
        );
        // Entries stay for reporting
        assert_eq!(plan.entries.len(), 3);
    }

    #[test]
    fn test_already_named_file_counts_as_claim() {
        let plan = check_collisions(plan_with(vec![
            entry("Show - 01.mkv", "Show S01E01.mkv"),
            entry("Show S01E01.mkv", "Show S01E01.mkv"),
        ]));

        assert!(!plan.is_safe());
        assert_eq!(plan.collisions["Show S01E01.mkv"].len(), 2);
    }

    #[test]
    fn test_collision_message_lists_sources() {
        let plan = check_collisions(plan_with(vec![
            entry("ep01.mkv", "Show S01E01.mkv"),
            entry("EP01.mkv", "Show S01E01.mkv"),
        ]));

        let msg = format_collision_message(&plan);
        assert!(msg.contains("Season 01"));
        assert!(msg.contains("Show S01E01.mkv"));
        assert!(msg.contains("<- ep01.mkv"));
        assert!(msg.contains("<- EP01.mkv"));
    }
}
