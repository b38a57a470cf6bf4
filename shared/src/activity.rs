//! Daily activity aggregation
//!
//! Merges weight entries, workout sessions and nutrition entries into a
//! sparse, newest-first timeline with one [`DailyActivity`] per calendar day
//! that has at least one record.
//!
//! Days are keyed by each record's stored `local_date` (see
//! [`crate::calendar`]). Merge rules per field:
//!
//! - `weight`: the entry with the latest `recorded_at` on that day; equal
//!   timestamps resolve to the one that appears later in the input.
//! - `workouts`: every session of the day, in input order.
//! - `nutrition`: calories and protein summed; goals copied from the
//!   current profile.
//!
//! Aggregation is a pure function of its inputs and never fails. Negative or
//! non-finite numbers count as zero.

use crate::models::{GoalProfile, GoalTarget, NutritionEntry, WeightEntry, WorkoutSession};
use crate::units::WeightUnit;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default look-back for workout frequency
pub const DEFAULT_WORKOUT_WINDOW_DAYS: u32 = 7;

/// A weight value with the unit it was logged in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightReading {
    pub value: f64,
    pub unit: WeightUnit,
}

/// Nutrition totals for one day against the current goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    pub total_calories: f64,
    pub calorie_goal: GoalTarget,
    pub total_protein: f64,
    pub protein_goal: GoalTarget,
}

impl NutritionSummary {
    fn empty(goals: Option<&GoalProfile>) -> Self {
        Self {
            total_calories: 0.0,
            calorie_goal: goals.map(|g| g.daily_calorie_target).unwrap_or_default(),
            total_protein: 0.0,
            protein_goal: goals.map(|g| g.daily_protein_target).unwrap_or_default(),
        }
    }

    pub fn calorie_goal_met(&self) -> Option<bool> {
        self.calorie_goal.is_met(self.total_calories)
    }

    pub fn protein_goal_met(&self) -> Option<bool> {
        self.protein_goal.is_met(self.total_protein)
    }
}

/// Everything recorded on one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub date: NaiveDate,
    pub workouts: Vec<WorkoutSession>,
    pub nutrition: NutritionSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightReading>,
}

struct DayAccumulator {
    workouts: Vec<WorkoutSession>,
    nutrition: NutritionSummary,
    weight: Option<(DateTime<Utc>, WeightReading)>,
}

impl DayAccumulator {
    fn new(goals: Option<&GoalProfile>) -> Self {
        Self {
            workouts: Vec::new(),
            nutrition: NutritionSummary::empty(goals),
            weight: None,
        }
    }

    fn merge_weight(&mut self, entry: &WeightEntry) {
        if !entry.weight_value.is_finite() || entry.weight_value <= 0.0 {
            return;
        }
        let replace = match &self.weight {
            Some((seen_at, _)) => entry.recorded_at >= *seen_at,
            None => true,
        };
        if replace {
            self.weight = Some((
                entry.recorded_at,
                WeightReading {
                    value: entry.weight_value,
                    unit: entry.unit,
                },
            ));
        }
    }

    fn merge_nutrition(&mut self, entry: &NutritionEntry) {
        self.nutrition.total_calories += non_negative(entry.calories);
        self.nutrition.total_protein += non_negative(entry.protein_grams);
    }

    fn finish(self, date: NaiveDate) -> DailyActivity {
        DailyActivity {
            date,
            workouts: self.workouts,
            nutrition: self.nutrition,
            weight: self.weight.map(|(_, reading)| reading),
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Build the per-day timeline, newest day first
pub fn aggregate(
    weights: &[WeightEntry],
    sessions: &[WorkoutSession],
    nutrition: &[NutritionEntry],
    goals: Option<&GoalProfile>,
) -> Vec<DailyActivity> {
    let mut days: BTreeMap<NaiveDate, DayAccumulator> = BTreeMap::new();

    for entry in weights {
        days.entry(entry.local_date)
            .or_insert_with(|| DayAccumulator::new(goals))
            .merge_weight(entry);
    }

    for session in sessions {
        days.entry(session.local_date)
            .or_insert_with(|| DayAccumulator::new(goals))
            .workouts
            .push(session.clone());
    }

    for entry in nutrition {
        days.entry(entry.local_date)
            .or_insert_with(|| DayAccumulator::new(goals))
            .merge_nutrition(entry);
    }

    days.into_iter()
        .rev()
        .map(|(date, acc)| acc.finish(date))
        .collect()
}

// ============================================================================
// Progress summaries
// ============================================================================

/// Change between the first and the most recent weigh-in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProgress {
    pub current: WeightReading,
    pub start: WeightReading,
    /// `current - start`, expressed in the current reading's unit
    pub change: f64,
    pub entries_count: usize,
}

/// Summarise weight history; `None` when there are no valid entries
pub fn weight_progress(weights: &[WeightEntry]) -> Option<WeightProgress> {
    let valid: Vec<&WeightEntry> = weights
        .iter()
        .filter(|w| w.weight_value.is_finite() && w.weight_value > 0.0)
        .collect();

    // `max_by_key` keeps the last maximum and `min_by_key` the first minimum,
    // matching the same-day tie rule used by `aggregate`.
    let latest = valid.iter().max_by_key(|w| w.recorded_at)?;
    let earliest = valid.iter().min_by_key(|w| w.recorded_at)?;

    let current = WeightReading {
        value: latest.weight_value,
        unit: latest.unit,
    };
    let start = WeightReading {
        value: earliest.weight_value,
        unit: earliest.unit,
    };
    let change = current.value - start.unit.convert(start.value, current.unit);

    Some(WeightProgress {
        current,
        start,
        change,
        entries_count: valid.len(),
    })
}

/// Workouts completed in a trailing window against the weekly target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutFrequency {
    pub completed: usize,
    pub target: GoalTarget,
    pub window_days: u32,
}

impl WorkoutFrequency {
    pub fn target_met(&self) -> Option<bool> {
        self.target.is_met(self.completed as f64)
    }
}

/// Count sessions recorded within `window_days` before `now`
pub fn workout_frequency(
    sessions: &[WorkoutSession],
    goals: Option<&GoalProfile>,
    now: DateTime<Utc>,
    window_days: u32,
) -> WorkoutFrequency {
    let since = now - Duration::days(i64::from(window_days));
    let completed = sessions.iter().filter(|s| s.recorded_at >= since).count();

    WorkoutFrequency {
        completed,
        target: goals.map(|g| g.weekly_workout_target).unwrap_or_default(),
        window_days,
    }
}
