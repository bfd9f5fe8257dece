//! Metric extraction: from analysis scores to ranked focus candidates.

use crate::{
    models::{
        AnalysisResult, FocusCandidate,
        analysis::{MetricReading, normalize_key},
    },
    policy::ProgressionPolicy,
};

/// Note used when the analysis provides no text for a metric.
pub const NO_NOTES_FALLBACK: &str = "No additional notes.";

/// Category assigned to metrics missing from [`KNOWN_METRICS`].
pub const GENERAL_CATEGORY: &str = "General";

/// Static description of a metric the engine has tailored content for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricDefinition {
    pub key: &'static str,
    pub title: &'static str,
    pub category: &'static str,
}

/// Known metrics, in the order they are scanned.
pub const KNOWN_METRICS: [MetricDefinition; 7] = [
    MetricDefinition {
        key: "skin_texture",
        title: "Skin Texture",
        category: "Skin",
    },
    MetricDefinition {
        key: "brow_density",
        title: "Brow Density",
        category: "Brows",
    },
    MetricDefinition {
        key: "facial_harmony",
        title: "Facial Harmony",
        category: "Structure",
    },
    MetricDefinition {
        key: "lighting_quality",
        title: "Lighting Quality",
        category: "Photo",
    },
    MetricDefinition {
        key: "makeup_suitability",
        title: "Makeup Suitability",
        category: "Makeup",
    },
    MetricDefinition {
        key: "pose_naturalness",
        title: "Pose Naturalness",
        category: "Pose",
    },
    MetricDefinition {
        key: "color_harmony",
        title: "Color Harmony",
        category: "Color",
    },
];

/// Finds the catalog entry for a key in any spelling.
pub fn definition(key: &str) -> Option<&'static MetricDefinition> {
    let normalized = normalize_key(key);
    KNOWN_METRICS.iter().find(|d| d.key == normalized)
}

/// Derives a display title for a metric outside the catalog:
/// `jaw_definition` becomes "Jaw Definition".
pub fn title_from_key(key: &str) -> String {
    normalize_key(key)
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Ranks the weakest metrics of an analysis.
///
/// Metrics without a positive, finite score are skipped. When some metrics
/// score at or below the help threshold only those compete; otherwise all
/// do. The result is sorted worst first (ties keep scan order) and cut to
/// the policy's focus limit. An empty result means the analysis had nothing
/// usable and the caller should fall back to the maintenance week.
pub fn extract_focus_candidates(
    analysis: &AnalysisResult,
    policy: &ProgressionPolicy,
) -> Vec<FocusCandidate> {
    let candidates = scan_candidates(analysis);

    let (needing_help, rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| c.score <= policy.help_threshold);

    let mut pool = if needing_help.is_empty() {
        rest
    } else {
        needing_help
    };

    pool.sort_by(|a, b| a.score.total_cmp(&b.score));
    pool.truncate(policy.focus_limit);
    pool
}

/// Builds one candidate per scored metric: catalog metrics first, then
/// unknown keys in input order. Duplicate keys keep their first reading.
fn scan_candidates(analysis: &AnalysisResult) -> Vec<FocusCandidate> {
    let mut candidates = Vec::new();

    for def in &KNOWN_METRICS {
        if let Some(reading) = analysis.metric(def.key)
            && let Some(candidate) = candidate_from(reading, def.key, def.title, def.category)
        {
            candidates.push(candidate);
        }
    }

    let mut seen: Vec<String> = Vec::new();
    for reading in &analysis.metrics {
        let key = normalize_key(&reading.key);
        if key.is_empty() || definition(&key).is_some() || seen.contains(&key) {
            continue;
        }
        let title = title_from_key(&key);
        if let Some(candidate) = candidate_from(reading, &key, &title, GENERAL_CATEGORY) {
            candidates.push(candidate);
        }
        seen.push(key);
    }

    candidates
}

fn candidate_from(
    reading: &MetricReading,
    key: &str,
    title: &str,
    category: &str,
) -> Option<FocusCandidate> {
    let score = reading.score.filter(|s| s.is_finite() && *s > 0.0)?;
    let notes = reading
        .notes
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(NO_NOTES_FALLBACK);

    Some(FocusCandidate {
        metric_key: key.to_string(),
        display_title: title.to_string(),
        category: category.to_string(),
        score: score.min(10.0),
        notes: notes.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(scores: &[(&str, f64)]) -> AnalysisResult {
        scores
            .iter()
            .fold(AnalysisResult::default(), |acc, (key, score)| {
                acc.with_metric(key, *score, &format!("{key} notes"))
            })
    }

    fn keys(candidates: &[FocusCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.metric_key.as_str()).collect()
    }

    #[test]
    fn test_catalog_lookup_ignores_spelling() {
        let def = definition("Lighting-Quality").unwrap();
        assert_eq!(def.key, "lighting_quality");
        assert_eq!(def.category, "Photo");
        assert!(definition("jaw_definition").is_none());
    }

    #[test]
    fn test_worst_three_needing_help_are_selected() {
        let analysis = analysis(&[
            ("skin_texture", 5.0),
            ("brow_density", 3.0),
            ("facial_harmony", 8.5),
            ("lighting_quality", 6.0),
            ("makeup_suitability", 4.0),
            ("pose_naturalness", 9.0),
            ("color_harmony", 7.5),
        ]);
        let candidates = extract_focus_candidates(&analysis, &ProgressionPolicy::default());
        assert_eq!(
            keys(&candidates),
            vec!["brow_density", "makeup_suitability", "skin_texture"]
        );
        assert_eq!(candidates[0].display_title, "Brow Density");
        assert_eq!(candidates[0].category, "Brows");
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let analysis = analysis(&[("skin_texture", 7.0), ("brow_density", 7.1)]);
        let candidates = extract_focus_candidates(&analysis, &ProgressionPolicy::default());
        assert_eq!(keys(&candidates), vec!["skin_texture"]);
    }

    #[test]
    fn test_all_good_scores_still_yield_candidates() {
        let analysis = analysis(&[
            ("skin_texture", 9.0),
            ("brow_density", 8.0),
            ("lighting_quality", 9.5),
            ("color_harmony", 8.5),
        ]);
        let candidates = extract_focus_candidates(&analysis, &ProgressionPolicy::default());
        assert_eq!(
            keys(&candidates),
            vec!["brow_density", "color_harmony", "skin_texture"]
        );
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let analysis = analysis(&[
            ("color_harmony", 4.0),
            ("skin_texture", 4.0),
            ("pose_naturalness", 4.0),
        ]);
        let candidates = extract_focus_candidates(&analysis, &ProgressionPolicy::default());
        assert_eq!(
            keys(&candidates),
            vec!["skin_texture", "pose_naturalness", "color_harmony"]
        );
    }

    #[test]
    fn test_zero_missing_and_non_finite_scores_are_skipped() {
        let mut input = analysis(&[("skin_texture", 0.0), ("brow_density", f64::NAN)]);
        input.metrics.push(MetricReading {
            key: "lighting_quality".to_string(),
            score: None,
            notes: None,
        });
        assert!(extract_focus_candidates(&input, &ProgressionPolicy::default()).is_empty());
        assert!(
            extract_focus_candidates(&AnalysisResult::default(), &ProgressionPolicy::default())
                .is_empty()
        );
    }

    #[test]
    fn test_empty_notes_get_fallback() {
        let mut input = AnalysisResult::default();
        input.metrics.push(MetricReading {
            key: "Skin Texture".to_string(),
            score: Some(4.0),
            notes: Some("   ".to_string()),
        });
        let candidates = extract_focus_candidates(&input, &ProgressionPolicy::default());
        assert_eq!(candidates[0].notes, NO_NOTES_FALLBACK);
        assert_eq!(candidates[0].metric_key, "skin_texture");
    }

    #[test]
    fn test_unknown_metrics_follow_known_ones() {
        let analysis = analysis(&[
            ("jaw-definition", 5.0),
            ("skin_texture", 5.0),
            ("Smile Symmetry", 2.0),
        ]);
        let candidates = extract_focus_candidates(&analysis, &ProgressionPolicy::default());
        assert_eq!(
            keys(&candidates),
            vec!["smile_symmetry", "skin_texture", "jaw_definition"]
        );
        assert_eq!(candidates[0].display_title, "Smile Symmetry");
        assert_eq!(candidates[0].category, GENERAL_CATEGORY);
    }

    #[test]
    fn test_scores_are_clamped_to_scale() {
        let analysis = analysis(&[("skin_texture", 14.0)]);
        let candidates = extract_focus_candidates(&analysis, &ProgressionPolicy::default());
        assert_eq!(candidates[0].score, 10.0);
    }

    #[test]
    fn test_title_from_key() {
        assert_eq!(title_from_key("jaw_definition"), "Jaw Definition");
        assert_eq!(title_from_key("Hair-Volume"), "Hair Volume");
    }
}
