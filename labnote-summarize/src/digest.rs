//! Choosing the digest for each audience

use labnote_common::{LabDigest, LabType, LatestSummary};

use crate::input::SourceUpdate;

/// Latest update whose summary is not the audience's sentinel
///
/// `updates` and `summaries` are parallel and sorted oldest first.
pub fn pick_latest_relevant<'a>(
    updates: &'a [SourceUpdate],
    summaries: &'a [String],
    sentinel: &str,
) -> Option<(&'a SourceUpdate, &'a str)> {
    updates
        .iter()
        .zip(summaries)
        .rev()
        .map(|(update, summary)| (update, summary.trim()))
        .find(|(_, summary)| *summary != sentinel)
}

/// Digest for `lab`, falling back to the empty digest
pub fn build_digest(lab: LabType, updates: &[SourceUpdate], summaries: &[String]) -> LabDigest {
    match pick_latest_relevant(updates, summaries, lab.sentinel()) {
        Some((update, summary)) => LabDigest {
            latest: LatestSummary {
                date: update.date.clone(),
                summary: summary.to_string(),
                projects: update.project_id.iter().cloned().collect(),
            },
        },
        None => LabDigest::empty(lab),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(date: &str, project: &str) -> SourceUpdate {
        SourceUpdate {
            date: date.to_string(),
            text: "notes".to_string(),
            project_id: Some(project.to_string()),
        }
    }

    #[test]
    fn test_skips_trailing_sentinels() {
        let updates = vec![update("2026-01-10", "P1"), update("2026-01-12", "P2")];
        let summaries = vec![
            "Plates show partial knockout.".to_string(),
            format!("  {}\n", LabType::Wet.sentinel()),
        ];

        let digest = build_digest(LabType::Wet, &updates, &summaries);
        assert_eq!(digest.latest.date, "2026-01-10");
        assert_eq!(digest.latest.summary, "Plates show partial knockout.");
        assert_eq!(digest.latest.projects, vec!["P1".to_string()]);
    }

    #[test]
    fn test_latest_relevant_wins() {
        let updates = vec![update("2026-01-10", "P1"), update("2026-01-12", "P2")];
        let summaries = vec!["old".to_string(), " new ".to_string()];

        let (picked, summary) = pick_latest_relevant(&updates, &summaries, "sentinel").unwrap();
        assert_eq!(picked.project_id.as_deref(), Some("P2"));
        assert_eq!(summary, "new");
    }

    #[test]
    fn test_all_sentinels_gives_empty_digest() {
        let updates = vec![update("2026-01-10", "P1")];
        let summaries = vec![LabType::Dry.sentinel().to_string()];

        assert_eq!(
            build_digest(LabType::Dry, &updates, &summaries),
            LabDigest::empty(LabType::Dry)
        );
    }

    #[test]
    fn test_no_updates_gives_empty_digest() {
        assert_eq!(build_digest(LabType::Wet, &[], &[]), LabDigest::empty(LabType::Wet));
    }

    #[test]
    fn test_other_audience_sentinel_is_relevant() {
        // A wet summary equal to the dry sentinel is still a wet summary
        let updates = vec![update("2026-01-10", "P1")];
        let summaries = vec![LabType::Dry.sentinel().to_string()];

        let digest = build_digest(LabType::Wet, &updates, &summaries);
        assert_eq!(digest.latest.date, "2026-01-10");
    }

    #[test]
    fn test_missing_project_gives_no_projects() {
        let mut u = update("2026-01-10", "P1");
        u.project_id = None;
        let digest = build_digest(LabType::Wet, &[u], &["s".to_string()]);
        assert!(digest.latest.projects.is_empty());
    }
}
