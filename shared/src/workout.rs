//! In-progress workout drafts
//!
//! A [`WorkoutDraft`] is the editable working copy of a template while a
//! workout is being performed. Every transition here takes the current draft
//! by reference and returns a new one; the lifecycle driver in
//! [`crate::lifecycle`] decides when to persist.

use crate::errors::DraftError;
use crate::models::{ExerciseRecord, NewWorkoutSession, SetEntry, WorkoutTemplate};
use crate::types::RecordedWhen;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An exercise in the working copy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftExercise {
    pub name: String,
    pub sets: Vec<SetEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_reps: Option<String>,
}

impl DraftExercise {
    fn blank(name: String) -> Self {
        Self {
            name,
            sets: vec![SetEntry::default()],
            recommended_sets: None,
            recommended_reps: None,
        }
    }
}

/// Which field of a set an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetField {
    Weight,
    Reps,
}

/// A single user edit on a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftEdit {
    AddExercise { name: String },
    RemoveExercise { exercise: usize },
    RenameExercise { exercise: usize, name: String },
    AddSet { exercise: usize },
    RemoveSet { exercise: usize, set: usize },
    UpdateSet {
        exercise: usize,
        set: usize,
        field: SetField,
        value: String,
    },
}

/// Working copy of a workout between start and finish/cancel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDraft {
    pub template_id: Uuid,
    pub template_name: String,
    pub exercises: Vec<DraftExercise>,
    pub elapsed_seconds: u64,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub last_persisted_at: Option<DateTime<Utc>>,
}

impl WorkoutDraft {
    /// Snapshot a template into a fresh draft
    ///
    /// Prefilled sets are copied verbatim; exercises without any get a
    /// single empty set.
    pub fn start(template: &WorkoutTemplate, now: DateTime<Utc>) -> Self {
        let exercises = template
            .exercises
            .iter()
            .map(|e| DraftExercise {
                name: e.name.clone(),
                sets: if e.prefilled_sets.is_empty() {
                    vec![SetEntry::default()]
                } else {
                    e.prefilled_sets.clone()
                },
                recommended_sets: e.recommended_sets,
                recommended_reps: e.recommended_reps.clone(),
            })
            .collect();

        Self {
            template_id: template.id,
            template_name: template.name.clone(),
            exercises,
            elapsed_seconds: 0,
            started_at: now,
            last_persisted_at: None,
        }
    }

    /// Apply one edit, returning the edited draft
    ///
    /// On error the original draft is untouched.
    pub fn apply(&self, edit: &DraftEdit) -> Result<Self, DraftError> {
        let mut next = self.clone();
        match edit {
            DraftEdit::AddExercise { name } => {
                let name = exercise_name(name)?;
                next.exercises.push(DraftExercise::blank(name));
            }
            DraftEdit::RemoveExercise { exercise } => {
                next.check_exercise(*exercise)?;
                next.exercises.remove(*exercise);
            }
            DraftEdit::RenameExercise { exercise, name } => {
                let name = exercise_name(name)?;
                next.exercise_mut(*exercise)?.name = name;
            }
            DraftEdit::AddSet { exercise } => {
                next.exercise_mut(*exercise)?.sets.push(SetEntry::default());
            }
            DraftEdit::RemoveSet { exercise, set } => {
                next.check_set(*exercise, *set)?;
                next.exercises[*exercise].sets.remove(*set);
            }
            DraftEdit::UpdateSet {
                exercise,
                set,
                field,
                value,
            } => {
                next.check_set(*exercise, *set)?;
                let entry = &mut next.exercises[*exercise].sets[*set];
                match field {
                    SetField::Weight => entry.weight = value.clone(),
                    SetField::Reps => entry.reps = value.clone(),
                }
            }
        }
        Ok(next)
    }

    /// One second of elapsed workout time
    pub fn tick(&self) -> Self {
        Self {
            elapsed_seconds: self.elapsed_seconds.saturating_add(1),
            ..self.clone()
        }
    }

    /// Mark the draft as written to the draft store at `now`
    pub fn persisted_at(mut self, now: DateTime<Utc>) -> Self {
        self.last_persisted_at = Some(now);
        self
    }

    /// Convert into the record submitted on finish
    ///
    /// `utc_offset_minutes` is the device's offset at `finished_at`; the
    /// record store derives the session's `local_date` from the two.
    pub fn to_new_session(
        &self,
        finished_at: DateTime<Utc>,
        utc_offset_minutes: Option<i32>,
    ) -> NewWorkoutSession {
        NewWorkoutSession {
            template_id: Some(self.template_id),
            template_name: self.template_name.clone(),
            exercises: self
                .exercises
                .iter()
                .map(|e| ExerciseRecord {
                    name: e.name.clone(),
                    sets: e.sets.clone(),
                })
                .collect(),
            elapsed_seconds: self.elapsed_seconds,
            when: RecordedWhen {
                recorded_at: Some(finished_at),
                local_date: None,
                utc_offset_minutes,
            },
        }
    }

    fn check_exercise(&self, index: usize) -> Result<(), DraftError> {
        if index < self.exercises.len() {
            Ok(())
        } else {
            Err(DraftError::ExerciseOutOfRange {
                index,
                len: self.exercises.len(),
            })
        }
    }

    fn check_set(&self, exercise: usize, index: usize) -> Result<(), DraftError> {
        self.check_exercise(exercise)?;
        let len = self.exercises[exercise].sets.len();
        if index < len {
            Ok(())
        } else {
            Err(DraftError::SetOutOfRange {
                exercise,
                index,
                len,
            })
        }
    }

    fn exercise_mut(&mut self, index: usize) -> Result<&mut DraftExercise, DraftError> {
        let len = self.exercises.len();
        self.exercises
            .get_mut(index)
            .ok_or(DraftError::ExerciseOutOfRange { index, len })
    }
}

fn exercise_name(raw: &str) -> Result<String, DraftError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DraftError::EmptyExerciseName);
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TemplateExercise;
    use rstest::rstest;

    fn template(exercises: Vec<TemplateExercise>) -> WorkoutTemplate {
        WorkoutTemplate {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Push Day".to_string(),
            exercises,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn three_exercise_draft() -> WorkoutDraft {
        let t = template(vec![
            TemplateExercise::named("Bench Press"),
            TemplateExercise::named("Overhead Press"),
            TemplateExercise::named("Dips"),
        ]);
        WorkoutDraft::start(&t, Utc::now())
    }

    #[test]
    fn test_start_gives_one_empty_set_per_exercise() {
        let draft = three_exercise_draft();
        assert_eq!(draft.exercises.len(), 3);
        for exercise in &draft.exercises {
            assert_eq!(exercise.sets, vec![SetEntry::new("", "")]);
        }
        assert_eq!(draft.elapsed_seconds, 0);
        assert_eq!(draft.template_name, "Push Day");
    }

    #[test]
    fn test_start_uses_prefilled_sets_verbatim() {
        let mut squat = TemplateExercise::named("Squat");
        squat.prefilled_sets = vec![SetEntry::new("100", "5"), SetEntry::new("105", "3")];
        squat.recommended_sets = Some(2);
        let t = template(vec![squat, TemplateExercise::named("Lunge")]);

        let draft = WorkoutDraft::start(&t, Utc::now());
        assert_eq!(
            draft.exercises[0].sets,
            vec![SetEntry::new("100", "5"), SetEntry::new("105", "3")]
        );
        assert_eq!(draft.exercises[0].recommended_sets, Some(2));
        assert_eq!(draft.exercises[1].sets.len(), 1);
    }

    #[test]
    fn test_edits_return_new_draft() {
        let draft = three_exercise_draft();
        let edited = draft.apply(&DraftEdit::AddSet { exercise: 0 }).unwrap();

        assert_eq!(draft.exercises[0].sets.len(), 1);
        assert_eq!(edited.exercises[0].sets.len(), 2);
    }

    #[test]
    fn test_update_set_and_rename() {
        let draft = three_exercise_draft()
            .apply(&DraftEdit::UpdateSet {
                exercise: 1,
                set: 0,
                field: SetField::Weight,
                value: "40".to_string(),
            })
            .unwrap()
            .apply(&DraftEdit::UpdateSet {
                exercise: 1,
                set: 0,
                field: SetField::Reps,
                value: "10".to_string(),
            })
            .unwrap()
            .apply(&DraftEdit::RenameExercise {
                exercise: 2,
                name: " Weighted Dips ".to_string(),
            })
            .unwrap();

        assert_eq!(draft.exercises[1].sets[0], SetEntry::new("40", "10"));
        assert_eq!(draft.exercises[2].name, "Weighted Dips");
    }

    #[test]
    fn test_add_and_remove_exercise() {
        let draft = three_exercise_draft()
            .apply(&DraftEdit::AddExercise {
                name: "  Cable Fly ".to_string(),
            })
            .unwrap()
            .apply(&DraftEdit::RemoveExercise { exercise: 0 })
            .unwrap();

        let names: Vec<&str> = draft.exercises.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Overhead Press", "Dips", "Cable Fly"]);
    }

    #[rstest]
    #[case(DraftEdit::AddExercise { name: "   ".to_string() }, DraftError::EmptyExerciseName)]
    #[case(DraftEdit::RenameExercise { exercise: 0, name: "   ".to_string() }, DraftError::EmptyExerciseName)]
    #[case(DraftEdit::RenameExercise { exercise: 5, name: "Dips".to_string() }, DraftError::ExerciseOutOfRange { index: 5, len: 3 })]
    #[case(DraftEdit::RemoveExercise { exercise: 3 }, DraftError::ExerciseOutOfRange { index: 3, len: 3 })]
    #[case(DraftEdit::AddSet { exercise: 7 }, DraftError::ExerciseOutOfRange { index: 7, len: 3 })]
    #[case(DraftEdit::RemoveSet { exercise: 0, set: 1 }, DraftError::SetOutOfRange { exercise: 0, index: 1, len: 1 })]
    fn test_invalid_edits_are_rejected(#[case] edit: DraftEdit, #[case] expected: DraftError) {
        let draft = three_exercise_draft();
        assert_eq!(draft.apply(&edit).unwrap_err(), expected);
    }

    #[test]
    fn test_tick_counts_seconds() {
        let draft = three_exercise_draft().tick().tick().tick();
        assert_eq!(draft.elapsed_seconds, 3);
    }

    #[test]
    fn test_to_new_session_snapshots_name_and_sets() {
        let draft = three_exercise_draft().tick();
        let now = Utc::now();
        let session = draft.to_new_session(now, Some(60));

        assert_eq!(session.template_id, Some(draft.template_id));
        assert_eq!(session.template_name, "Push Day");
        assert_eq!(session.exercises.len(), 3);
        assert_eq!(session.elapsed_seconds, 1);
        assert_eq!(session.when.recorded_at, Some(now));
        assert_eq!(session.when.utc_offset_minutes, Some(60));
    }

    #[test]
    fn test_edit_json_shape() {
        let edit: DraftEdit = serde_json::from_str(
            r#"{"op": "update_set", "exercise": 0, "set": 1, "field": "reps", "value": "12"}"#,
        )
        .unwrap();
        assert_eq!(
            edit,
            DraftEdit::UpdateSet {
                exercise: 0,
                set: 1,
                field: SetField::Reps,
                value: "12".to_string()
            }
        );
    }
}
