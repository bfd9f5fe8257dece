//! Week assembly from ranked focus candidates.

use super::composer::compose_tasks;
use crate::{
    models::{AnalysisResult, FocusCandidate, TaskDraft, WeekDraft},
    policy::ProgressionPolicy,
};

/// Category of the maintenance-week tasks.
pub const MAINTENANCE_CATEGORY: &str = "Lifestyle";

/// Builds the draft for `week_number`.
///
/// Candidates are consumed in rank order and their tasks appended until the
/// policy's cap is hit, possibly part-way through a candidate. Without
/// candidates the fixed maintenance week is returned, so the task list is
/// never empty.
pub fn build_week(
    week_number: u32,
    candidates: &[FocusCandidate],
    analysis: &AnalysisResult,
    policy: &ProgressionPolicy,
) -> WeekDraft {
    let Some(primary) = candidates.first() else {
        return maintenance_week(week_number);
    };

    let tasks: Vec<TaskDraft> = candidates
        .iter()
        .flat_map(|candidate| compose_tasks(candidate, analysis))
        .take(policy.max_tasks_per_week)
        .collect();

    let titles: Vec<&str> = candidates.iter().map(|c| c.display_title.as_str()).collect();

    WeekDraft {
        week_number,
        title: format!("Week {week_number}: {} Sprint", primary.display_title),
        summary: format!(
            "This week focuses on {}. Start with {}, your lowest-scoring area.",
            join_titles(&titles),
            primary.display_title
        ),
        tasks,
    }
}

/// The canned week used when an analysis yields no focus candidates.
pub fn maintenance_week(week_number: u32) -> WeekDraft {
    let task = |title: &str, timeframe: &str, body: &str, suggestions: &[&str]| TaskDraft {
        title: title.to_string(),
        category: MAINTENANCE_CATEGORY.to_string(),
        timeframe: timeframe.to_string(),
        body: body.to_string(),
        product_suggestions: suggestions.iter().map(|s| (*s).to_string()).collect(),
    };

    WeekDraft {
        week_number,
        title: format!("Week {week_number}: Glow Momentum"),
        summary: "No single area stood out in your latest scan, so this week keeps the \
                  foundations strong."
            .to_string(),
        tasks: vec![
            task(
                "Hydrate with intention",
                "Daily",
                "Drink a full glass of water with every meal and keep a bottle within reach.",
                &["Reusable water bottle"],
            ),
            task(
                "Protect your sleep window",
                "Nightly",
                "Aim for seven to nine hours and put screens away thirty minutes before bed.",
                &["Silk pillowcase"],
            ),
            task(
                "Move outdoors",
                "3x this week",
                "Take a brisk twenty-minute walk outside, wearing sunscreen, to boost \
                 circulation and mood.",
                &["SPF 30+ sunscreen"],
            ),
        ],
    }
}

/// Joins titles as prose: "A", "A and B", "A, B, and C".
pub fn join_titles(titles: &[&str]) -> String {
    match titles {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
