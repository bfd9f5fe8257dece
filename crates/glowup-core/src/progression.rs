//! The progression state machine.
//!
//! States are derived from a loaded [`Plan`] and the current time, never
//! stored. [`decide`] maps a state to the write the store must perform; the
//! store runs it inside the same transaction that loaded the plan.
//!
//! ```text
//!   NoPlan ──advance──▶ WeekInProgress ──tasks done──▶ WeekCompleteWaiting
//!                          ▲                                  │ cooldown
//!                          └───────────advance─── WeekCompleteReady
//! ```

use jiff::Timestamp;

use crate::{
    error::Result,
    models::{AdvanceRejection, Plan, ProgressionState},
    policy::ProgressionPolicy,
};

/// The write an `advance` call must perform, or the reason it performs none.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// No plan row exists: create it together with week 1.
    CreatePlan,
    /// A plan row exists without weeks: add week 1 to it.
    SeedFirstWeek { plan_id: u64 },
    /// Append `week_number` and move the plan pointer from `expected_pointer`.
    AppendWeek {
        plan_id: u64,
        week_number: u32,
        expected_pointer: u32,
    },
    /// Nothing to write.
    Reject {
        current_week: u32,
        reason: AdvanceRejection,
    },
}

/// Derives the owner's state at `now`.
pub fn evaluate(
    plan: Option<&Plan>,
    now: Timestamp,
    policy: &ProgressionPolicy,
) -> Result<ProgressionState> {
    let Some(active) = plan.and_then(Plan::active_week) else {
        return Ok(ProgressionState::NoPlan);
    };

    if !active.is_complete() {
        let (completed, total) = active.task_counts();
        return Ok(ProgressionState::WeekInProgress { completed, total });
    }

    let next_unlock_at = active.unlocked_at.checked_add(policy.cooldown)?;
    if now < next_unlock_at {
        Ok(ProgressionState::WeekCompleteWaiting { next_unlock_at })
    } else {
        Ok(ProgressionState::WeekCompleteReady)
    }
}

/// Decides what `advance` does for the given plan at `now`.
pub fn decide(
    plan: Option<&Plan>,
    now: Timestamp,
    policy: &ProgressionPolicy,
) -> Result<Transition> {
    let Some(plan) = plan else {
        return Ok(Transition::CreatePlan);
    };

    let current_week = plan.max_week_number();
    let transition = match evaluate(Some(plan), now, policy)? {
        ProgressionState::NoPlan => Transition::SeedFirstWeek { plan_id: plan.id },
        ProgressionState::WeekInProgress { completed, total } => Transition::Reject {
            current_week,
            reason: AdvanceRejection::incomplete(completed, total),
        },
        ProgressionState::WeekCompleteWaiting { next_unlock_at } => Transition::Reject {
            current_week,
            reason: AdvanceRejection::WaitingPeriod { next_unlock_at },
        },
        ProgressionState::WeekCompleteReady => Transition::AppendWeek {
            plan_id: plan.id,
            week_number: plan.max_week_number() + 1,
            expected_pointer: plan.current_week_number,
        },
    };
    Ok(transition)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use super::*;
    use crate::models::{Task, Week};

    const DAY: SignedDuration = SignedDuration::from_hours(24);

    fn t0() -> Timestamp {
        Timestamp::from_second(1_700_000_000).unwrap()
    }

    fn task(id: u64, done: bool) -> Task {
        Task {
            id,
            week_id: 1,
            title: format!("Task {id}"),
            body: String::new(),
            category: "Skin".to_string(),
            timeframe: "Daily".to_string(),
            priority: id as u32,
            product_suggestions: vec![],
            is_completed: done,
            completed_at: done.then(t0),
        }
    }

    fn week(week_number: u32, unlocked_at: Timestamp, tasks: Vec<Task>) -> Week {
        let mut week = Week {
            id: u64::from(week_number),
            plan_id: 1,
            week_number,
            title: format!("Week {week_number}"),
            summary: String::new(),
            unlocked_at,
            completed_at: None,
            tasks,
        };
        week.derive_completion();
        week
    }

    fn plan(current_week_number: u32, weeks: Vec<Week>) -> Plan {
        Plan {
            id: 1,
            owner: "ana".to_string(),
            current_week_number,
            source_analysis_id: None,
            created_at: t0(),
            updated_at: t0(),
            weeks,
        }
    }

    #[test]
    fn test_no_plan_creates_plan() {
        let policy = ProgressionPolicy::default();
        assert_eq!(decide(None, t0(), &policy).unwrap(), Transition::CreatePlan);
        assert_eq!(
            evaluate(None, t0(), &policy).unwrap(),
            ProgressionState::NoPlan
        );
    }

    #[test]
    fn test_plan_without_weeks_is_seeded() {
        let policy = ProgressionPolicy::default();
        let plan = plan(1, vec![]);
        assert_eq!(
            decide(Some(&plan), t0(), &policy).unwrap(),
            Transition::SeedFirstWeek { plan_id: 1 }
        );
    }

    #[test]
    fn test_incomplete_week_rejects_with_progress() {
        let policy = ProgressionPolicy::default();
        let plan = plan(
            2,
            vec![
                week(1, t0(), vec![task(1, true)]),
                week(
                    2,
                    t0(),
                    vec![task(2, true), task(3, true), task(4, false), task(5, false)],
                ),
            ],
        );
        let later = t0() + DAY * 30;
        assert_eq!(
            decide(Some(&plan), later, &policy).unwrap(),
            Transition::Reject {
                current_week: 2,
                reason: AdvanceRejection::IncompleteWeek {
                    completed: 2,
                    total: 4,
                    progress: 0.5
                },
            }
        );
    }

    #[test]
    fn test_cooldown_boundary() {
        let policy = ProgressionPolicy::default();
        let unlock = t0();
        let plan = plan(1, vec![week(1, unlock, vec![task(1, true)])]);
        let next = unlock + DAY * 7;

        let just_before = next - SignedDuration::from_secs(1);
        assert_eq!(
            decide(Some(&plan), just_before, &policy).unwrap(),
            Transition::Reject {
                current_week: 1,
                reason: AdvanceRejection::WaitingPeriod {
                    next_unlock_at: next
                },
            }
        );

        assert_eq!(
            decide(Some(&plan), next, &policy).unwrap(),
            Transition::AppendWeek {
                plan_id: 1,
                week_number: 2,
                expected_pointer: 1
            }
        );
    }

    #[test]
    fn test_empty_active_week_counts_as_complete() {
        let policy = ProgressionPolicy::default();
        let plan = plan(1, vec![week(1, t0(), vec![])]);
        assert_eq!(
            evaluate(Some(&plan), t0() + DAY, &policy).unwrap(),
            ProgressionState::WeekCompleteWaiting {
                next_unlock_at: t0() + DAY * 7
            }
        );
    }

    #[test]
    fn test_lagging_pointer_is_healed() {
        let policy = ProgressionPolicy::default();
        let plan = plan(
            1,
            vec![
                week(1, t0(), vec![task(1, true)]),
                week(2, t0(), vec![task(2, false)]),
            ],
        );
        match decide(Some(&plan), t0(), &policy).unwrap() {
            Transition::Reject { current_week, .. } => assert_eq!(current_week, 2),
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn test_next_week_number_follows_existing_weeks() {
        let policy = ProgressionPolicy::default();
        let plan = plan(5, vec![week(1, t0(), vec![task(1, true)])]);
        assert_eq!(
            decide(Some(&plan), t0() + DAY * 8, &policy).unwrap(),
            Transition::AppendWeek {
                plan_id: 1,
                week_number: 2,
                expected_pointer: 5
            }
        );
    }

    #[test]
    fn test_pointer_ahead_reports_existing_week() {
        let policy = ProgressionPolicy::default();
        let plan = plan(5, vec![week(1, t0(), vec![task(1, false)])]);
        match decide(Some(&plan), t0(), &policy).unwrap() {
            Transition::Reject { current_week, .. } => assert_eq!(current_week, 1),
            other => panic!("unexpected transition: {other:?}"),
        }
    }

    #[test]
    fn test_zero_cooldown_is_immediately_ready() {
        let policy = ProgressionPolicy::default().with_cooldown_days(0).unwrap();
        let plan = plan(1, vec![week(1, t0(), vec![task(1, true)])]);
        assert!(evaluate(Some(&plan), t0(), &policy).unwrap().can_advance());
    }
}
