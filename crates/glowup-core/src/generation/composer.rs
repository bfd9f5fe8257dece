//! Task composition: concrete weekly actions for one focus candidate.
//!
//! Content is a static table keyed by metric. Unknown metrics get a generic
//! three-step template so composition never fails. Analysis fields are
//! interpolated with literal fallbacks, so no placeholder is ever left in the
//! output.

use crate::models::{AnalysisResult, FocusCandidate, TaskDraft};

/// Values pulled from the analysis for text interpolation.
struct Details<'a> {
    analysis: &'a AnalysisResult,
}

impl<'a> Details<'a> {
    fn text(value: Option<&'a str>, fallback: &'a str) -> &'a str {
        value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
    }

    fn face_shape(&self) -> &'a str {
        Self::text(self.analysis.face_shape.as_deref(), "your face shape")
    }

    fn undertone(&self) -> &'a str {
        Self::text(self.analysis.skin_undertone.as_deref(), "your undertone")
    }

    fn hair_color(&self) -> &'a str {
        Self::text(self.analysis.hair_color.as_deref(), "your natural hair color")
    }

    fn makeup_style(&self) -> &'a str {
        Self::text(self.analysis.makeup_style.as_deref(), "a soft, natural look")
    }

    fn best_colors(&self) -> String {
        Self::list(&self.analysis.best_colors, "the shades that flatter you most")
    }

    fn avoid_colors(&self) -> String {
        Self::list(&self.analysis.avoid_colors, "shades that wash you out")
    }

    fn list(values: &[String], fallback: &str) -> String {
        let cleaned: Vec<&str> = values
            .iter()
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .take(3)
            .collect();
        if cleaned.is_empty() {
            fallback.to_string()
        } else {
            cleaned.join(", ")
        }
    }
}

fn draft(
    candidate: &FocusCandidate,
    title: &str,
    timeframe: &str,
    body: String,
    suggestions: &[&str],
) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        category: candidate.category.clone(),
        timeframe: timeframe.to_string(),
        body,
        product_suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
    }
}

/// Produces the tasks for one focus candidate.
pub fn compose_tasks(candidate: &FocusCandidate, analysis: &AnalysisResult) -> Vec<TaskDraft> {
    let details = Details { analysis };
    match candidate.metric_key.as_str() {
        "skin_texture" => skin_texture(candidate),
        "brow_density" => brow_density(candidate, &details),
        "facial_harmony" => facial_harmony(candidate, &details),
        "lighting_quality" => lighting_quality(candidate, &details),
        "makeup_suitability" => makeup_suitability(candidate, &details),
        "pose_naturalness" => pose_naturalness(candidate, &details),
        "color_harmony" => color_harmony(candidate, &details),
        _ => generic(candidate),
    }
}

fn skin_texture(c: &FocusCandidate) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Lock in a two-step evening routine",
            "Daily",
            format!(
                "Cleanse gently and follow with a barrier-repair moisturizer every night. \
                 Your scan noted: {}",
                c.notes
            ),
            &["Low-pH gel cleanser", "Ceramide moisturizer"],
        ),
        draft(
            c,
            "Exfoliate with a mild acid",
            "2x this week",
            "Use a lactic or mandelic acid toner on two non-consecutive evenings. Skip it if \
             your skin stings or looks red."
                .to_string(),
            &["Lactic acid 5% toner", "Mandelic acid serum"],
        ),
        draft(
            c,
            "Wear SPF every morning",
            "Morning",
            "Finish your morning routine with a broad-spectrum SPF 30+, even indoors near \
             windows. Texture evens out faster when daily sun damage stops."
                .to_string(),
            &["Fluid SPF 50", "Tinted mineral sunscreen"],
        ),
    ]
}

fn brow_density(c: &FocusCandidate, d: &Details<'_>) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Map your brow shape",
            "Once this week",
            format!(
                "Using a pencil, mark the start, arch and tail of each brow. For {}, keep \
                 the arch soft and the tail level with the start. {}",
                d.face_shape(),
                c.notes
            ),
            &["Brow mapping string", "Spoolie"],
        ),
        draft(
            c,
            "Fill sparse areas with hair strokes",
            "Daily",
            format!(
                "Use a fine-tip pencil one shade lighter than {} and draw short, upward \
                 strokes only where gaps show.",
                d.hair_color()
            ),
            &["Micro brow pencil", "Tinted brow gel"],
        ),
        draft(
            c,
            "Condition brows overnight",
            "Evening",
            "Brush brows upward and apply a nourishing serum or castor oil before bed. Leave \
             tweezers alone this week to let regrowth fill in."
                .to_string(),
            &["Peptide brow serum", "Castor oil"],
        ),
    ]
}

fn facial_harmony(c: &FocusCandidate, d: &Details<'_>) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Study your proportions",
            "Once this week",
            format!(
                "Take a straight-on photo in even light and compare the thirds of your face. \
                 Note where {} draws the eye. {}",
                d.face_shape(),
                c.notes
            ),
            &[],
        ),
        draft(
            c,
            "Balance with a hairstyle tweak",
            "Weekend",
            format!(
                "Try one part or fringe change that suits {} and take a comparison photo.",
                d.face_shape()
            ),
            &["Texturizing spray", "Wide-tooth comb"],
        ),
        draft(
            c,
            "Practice soft contouring",
            "3x this week",
            "Apply a cool-toned contour just under the cheekbones and along the jawline, \
             then blend until no edge is visible."
                .to_string(),
            &["Cream contour stick", "Dense blending brush"],
        ),
    ]
}

fn lighting_quality(c: &FocusCandidate, d: &Details<'_>) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Find your best window",
            "Once this week",
            format!(
                "Test three spots at home facing natural light and keep the one with the \
                 softest shadows. {}",
                c.notes
            ),
            &[],
        ),
        draft(
            c,
            "Shoot during golden hour",
            "Weekend",
            format!(
                "Take a set of photos in the hour before sunset; warm light flatters {}.",
                d.undertone()
            ),
            &["Phone tripod"],
        ),
        draft(
            c,
            "Add a fill light for evening shots",
            "3x this week",
            "Place a white card or small ring light below face level to lift shadows under \
             the eyes and chin."
                .to_string(),
            &["Foldable reflector", "Compact LED panel"],
        ),
    ]
}

fn makeup_suitability(c: &FocusCandidate, d: &Details<'_>) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Match your base to your undertone",
            "Once this week",
            format!(
                "Swatch three foundation or tint shades on your jaw in daylight and keep the \
                 one that disappears. Look for formulas made for {}. {}",
                d.undertone(),
                c.notes
            ),
            &["Skin tint", "Shade-matching samples"],
        ),
        draft(
            c,
            "Rehearse your everyday look",
            "Daily",
            format!(
                "Recreate {} in under ten minutes each morning, adjusting one step per day.",
                d.makeup_style()
            ),
            &["Cream blush", "Brown mascara"],
        ),
        draft(
            c,
            "Edit your kit",
            "Weekend",
            format!(
                "Set aside products in {} and keep what sits closest to {}.",
                d.avoid_colors(),
                d.best_colors()
            ),
            &[],
        ),
    ]
}

fn pose_naturalness(c: &FocusCandidate, d: &Details<'_>) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Loosen up before the shot",
            "Daily",
            format!(
                "Roll your shoulders, exhale fully and relax your jaw before every photo. {}",
                c.notes
            ),
            &[],
        ),
        draft(
            c,
            "Find your angle",
            "3x this week",
            format!(
                "Take burst shots turning slightly left and right; angled poses usually \
                 flatter {}. Keep the favorite.",
                d.face_shape()
            ),
            &["Phone tripod", "Bluetooth shutter"],
        ),
        draft(
            c,
            "Practice a genuine smile",
            "Evening",
            "Think of something funny just before the shutter fires so the smile reaches \
             your eyes. Review the results together at the end of the week."
                .to_string(),
            &[],
        ),
    ]
}

fn color_harmony(c: &FocusCandidate, d: &Details<'_>) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            "Build a palette card",
            "Once this week",
            format!(
                "Save swatches of {} as a phone wallpaper to consult when shopping. {}",
                d.best_colors(),
                c.notes
            ),
            &[],
        ),
        draft(
            c,
            "Wear your best colors near your face",
            "Daily",
            format!(
                "Choose tops or scarves from your palette and keep {} away from your \
                 neckline.",
                d.avoid_colors()
            ),
            &[],
        ),
        draft(
            c,
            "Test accessories against your undertone",
            "Weekend",
            format!(
                "Compare gold and silver jewelry in daylight and note which suits {} best.",
                d.undertone()
            ),
            &[],
        ),
    ]
}

fn generic(c: &FocusCandidate) -> Vec<TaskDraft> {
    vec![
        draft(
            c,
            &format!("Pinpoint what affects {}", c.display_title),
            "Once this week",
            format!(
                "Re-read the scan feedback and write down one concrete change to try: {}",
                c.notes
            ),
            &[],
        ),
        draft(
            c,
            &format!("Make one daily adjustment for {}", c.display_title),
            "Daily",
            format!(
                "Apply the change you picked every day and snap a quick photo to track how \
                 {} responds.",
                c.display_title.to_lowercase()
            ),
            &[],
        ),
        draft(
            c,
            &format!("Reflect on {} progress", c.display_title),
            "End of week",
            "Compare your first and last photos of the week and decide whether to keep, \
             tweak or drop the change."
                .to_string(),
            &[],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::metrics::KNOWN_METRICS;

    fn candidate(key: &str, title: &str, category: &str) -> FocusCandidate {
        FocusCandidate {
            metric_key: key.to_string(),
            display_title: title.to_string(),
            category: category.to_string(),
            score: 4.0,
            notes: "Needs attention.".to_string(),
        }
    }

    #[test]
    fn test_every_known_metric_has_three_valid_tasks() {
        let analysis = AnalysisResult::default();
        for def in &KNOWN_METRICS {
            let tasks = compose_tasks(&candidate(def.key, def.title, def.category), &analysis);
            assert_eq!(tasks.len(), 3, "{}", def.key);
            for task in &tasks {
                assert!(task.validate().is_ok(), "{}: {}", def.key, task.title);
                assert_eq!(task.category, def.category);
                assert!(!task.body.contains('{'), "unfilled placeholder in {}", task.body);
            }
        }
    }

    #[test]
    fn test_unknown_metric_uses_generic_template() {
        let tasks = compose_tasks(
            &candidate("jaw_definition", "Jaw Definition", "General"),
            &AnalysisResult::default(),
        );
        assert_eq!(tasks.len(), 3);
        assert_eq!(tasks[0].title, "Pinpoint what affects Jaw Definition");
        assert_eq!(tasks[1].timeframe, "Daily");
        assert_eq!(tasks[2].timeframe, "End of week");
        assert!(tasks[0].body.contains("Needs attention."));
    }

    #[test]
    fn test_interpolates_analysis_fields() {
        let analysis = AnalysisResult {
            face_shape: Some("heart".to_string()),
            hair_color: Some("auburn".to_string()),
            ..Default::default()
        };
        let tasks = compose_tasks(&candidate("brow_density", "Brow Density", "Brows"), &analysis);
        assert!(tasks[0].body.contains("For heart,"));
        assert!(tasks[1].body.contains("auburn"));
    }

    #[test]
    fn test_missing_fields_use_fallback_text() {
        let analysis = AnalysisResult {
            face_shape: Some("  ".to_string()),
            ..Default::default()
        };
        let tasks = compose_tasks(&candidate("brow_density", "Brow Density", "Brows"), &analysis);
        assert!(tasks[0].body.contains("your face shape"));

        let tasks = compose_tasks(
            &candidate("makeup_suitability", "Makeup Suitability", "Makeup"),
            &analysis,
        );
        assert!(tasks[2].body.contains("shades that wash you out"));
        assert!(tasks[2].body.contains("the shades that flatter you most"));
    }

    #[test]
    fn test_color_lists_are_joined() {
        let analysis = AnalysisResult {
            best_colors: vec!["teal".to_string(), " ".to_string(), "coral".to_string()],
            ..Default::default()
        };
        let tasks = compose_tasks(&candidate("color_harmony", "Color Harmony", "Color"), &analysis);
        assert!(tasks[0].body.contains("teal, coral"));
    }
}
