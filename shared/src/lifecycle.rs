//! Workout session lifecycle
//!
//! Drives one workout attempt through
//! `NotStarted -> InProgress -> (Finished | Cancelled)`.
//!
//! The draft is written to a device-local [`DraftStore`] after every change
//! so that a reload resumes where the user left off. Draft store writes are
//! best-effort: a failed write is logged and the next change writes the
//! whole draft again. Finishing submits the session to a
//! [`SessionRecorder`] first and only discards the local draft once the
//! record has been created.

pub use crate::errors::{DraftStoreError, LifecycleError, RecordStoreError};
use crate::calendar::utc_offset;
use crate::errors::DraftError;
use crate::models::{NewWorkoutSession, SetEntry, WorkoutSession, WorkoutTemplate};
use crate::workout::{DraftEdit, WorkoutDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

/// Key prefix used by [`KeyValueDraftStore`]
pub const DRAFT_KEY_PREFIX: &str = "workout-draft:";

/// Where a workout attempt currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkoutPhase {
    NotStarted,
    InProgress,
    Finished,
    Cancelled,
}

impl WorkoutPhase {
    /// Wire name, matching the serde representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutPhase::NotStarted => "not_started",
            WorkoutPhase::InProgress => "in_progress",
            WorkoutPhase::Finished => "finished",
            WorkoutPhase::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for WorkoutPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WorkoutPhase::NotStarted => "not started",
            WorkoutPhase::InProgress => "in progress",
            WorkoutPhase::Finished => "finished",
            WorkoutPhase::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

// ============================================================================
// Collaborators
// ============================================================================

/// Device-local draft persistence, keyed by template id
pub trait DraftStore {
    fn get(&self, template_id: Uuid) -> Result<Option<WorkoutDraft>, DraftStoreError>;
    fn put(&mut self, template_id: Uuid, draft: &WorkoutDraft) -> Result<(), DraftStoreError>;
    fn remove(&mut self, template_id: Uuid) -> Result<(), DraftStoreError>;
}

impl<S: DraftStore + ?Sized> DraftStore for &mut S {
    fn get(&self, template_id: Uuid) -> Result<Option<WorkoutDraft>, DraftStoreError> {
        (**self).get(template_id)
    }

    fn put(&mut self, template_id: Uuid, draft: &WorkoutDraft) -> Result<(), DraftStoreError> {
        (**self).put(template_id, draft)
    }

    fn remove(&mut self, template_id: Uuid) -> Result<(), DraftStoreError> {
        (**self).remove(template_id)
    }
}

/// Looks up templates by id
pub trait TemplateProvider {
    fn find_by_id(&self, template_id: Uuid) -> Option<WorkoutTemplate>;
}

/// Read access to finished sessions
pub trait SessionHistory {
    /// Most recent finished session for a template
    fn latest_for_template(&self, template_id: Uuid) -> Option<WorkoutSession>;
}

/// Creates finished sessions in the record store
pub trait SessionRecorder {
    fn create(&mut self, session: NewWorkoutSession) -> Result<WorkoutSession, RecordStoreError>;
}

/// Source of the current time
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl TemplateProvider for [WorkoutTemplate] {
    fn find_by_id(&self, template_id: Uuid) -> Option<WorkoutTemplate> {
        self.iter().find(|t| t.id == template_id).cloned()
    }
}

impl SessionHistory for [WorkoutSession] {
    fn latest_for_template(&self, template_id: Uuid) -> Option<WorkoutSession> {
        self.iter()
            .filter(|s| s.template_id == Some(template_id))
            .max_by_key(|s| s.recorded_at)
            .cloned()
    }
}

// ============================================================================
// Draft stores
// ============================================================================

/// In-memory draft store
#[derive(Debug, Default, Clone)]
pub struct MemoryDraftStore {
    drafts: HashMap<Uuid, WorkoutDraft>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, template_id: Uuid) -> Result<Option<WorkoutDraft>, DraftStoreError> {
        Ok(self.drafts.get(&template_id).cloned())
    }

    fn put(&mut self, template_id: Uuid, draft: &WorkoutDraft) -> Result<(), DraftStoreError> {
        self.drafts.insert(template_id, draft.clone());
        Ok(())
    }

    fn remove(&mut self, template_id: Uuid) -> Result<(), DraftStoreError> {
        self.drafts.remove(&template_id);
        Ok(())
    }
}

/// String key/value storage, shaped like browser `localStorage`
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftStoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftStoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), DraftStoreError>;
}

impl KeyValueStorage for HashMap<String, String> {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        Ok(self.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        self.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DraftStoreError> {
        self.remove(key);
        Ok(())
    }
}

/// Draft store that keeps each draft as JSON under `workout-draft:<template id>`
#[derive(Debug, Default, Clone)]
pub struct KeyValueDraftStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> KeyValueDraftStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn key(template_id: Uuid) -> String {
        format!("{}{}", DRAFT_KEY_PREFIX, template_id)
    }
}

impl<S: KeyValueStorage> DraftStore for KeyValueDraftStore<S> {
    fn get(&self, template_id: Uuid) -> Result<Option<WorkoutDraft>, DraftStoreError> {
        let Some(raw) = self.storage.get_item(&Self::key(template_id))? else {
            return Ok(None);
        };
        let draft: WorkoutDraft =
            serde_json::from_str(&raw).map_err(|e| DraftStoreError::Corrupt(e.to_string()))?;
        if draft.template_id != template_id {
            return Err(DraftStoreError::Corrupt(format!(
                "draft under {} belongs to template {}",
                template_id, draft.template_id
            )));
        }
        Ok(Some(draft))
    }

    fn put(&mut self, template_id: Uuid, draft: &WorkoutDraft) -> Result<(), DraftStoreError> {
        let raw = serde_json::to_string(draft)
            .map_err(|e| DraftStoreError::Unavailable(e.to_string()))?;
        self.storage.set_item(&Self::key(template_id), &raw)
    }

    fn remove(&mut self, template_id: Uuid) -> Result<(), DraftStoreError> {
        self.storage.remove_item(&Self::key(template_id))
    }
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Whether the template's latest session was recorded after this draft began
fn is_already_recorded(draft: &WorkoutDraft, last_session: Option<&WorkoutSession>) -> bool {
    last_session.is_some_and(|s| s.recorded_at >= draft.started_at)
}

fn discard<D: DraftStore>(drafts: &mut D, template_id: Uuid) {
    if let Err(e) = drafts.remove(template_id) {
        warn!(%template_id, error = %e, "Failed to remove workout draft");
    }
}

/// Lifecycle tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Write the draft every N timer ticks (edits always write)
    pub persist_every_ticks: u32,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            persist_every_ticks: 1,
        }
    }
}

/// State machine for a single workout attempt on one template
pub struct WorkoutLifecycle<D, C> {
    template: WorkoutTemplate,
    last_session: Option<WorkoutSession>,
    drafts: D,
    clock: C,
    config: LifecycleConfig,
    phase: WorkoutPhase,
    draft: Option<WorkoutDraft>,
    ticks_since_persist: u32,
}

impl<D: DraftStore, C: Clock> WorkoutLifecycle<D, C> {
    /// Open the workout page for a template
    ///
    /// Resumes straight into `InProgress` when a readable draft exists.
    /// Corrupt drafts, and drafts started before the latest recorded session
    /// of the template (already finished), are discarded and the page opens
    /// `NotStarted`. Fails with `NotFound` when the template no longer exists
    /// and with `Persistence` when the draft store cannot be read; the stored
    /// draft is left in place so a later open can resume it.
    pub fn open<T, H>(
        template_id: Uuid,
        templates: &T,
        history: &H,
        mut drafts: D,
        clock: C,
    ) -> Result<Self, LifecycleError>
    where
        T: TemplateProvider + ?Sized,
        H: SessionHistory + ?Sized,
    {
        let template = templates
            .find_by_id(template_id)
            .ok_or_else(|| LifecycleError::NotFound(format!("Workout template {}", template_id)))?;

        let last_session = history.latest_for_template(template_id);

        let draft = match drafts.get(template_id) {
            Ok(Some(draft)) if is_already_recorded(&draft, last_session.as_ref()) => {
                warn!(%template_id, "Discarding workout draft that was already recorded");
                discard(&mut drafts, template_id);
                None
            }
            Ok(draft) => draft,
            Err(DraftStoreError::Corrupt(e)) => {
                warn!(%template_id, error = %e, "Discarding unreadable workout draft");
                discard(&mut drafts, template_id);
                None
            }
            Err(e @ DraftStoreError::Unavailable(_)) => {
                warn!(%template_id, error = %e, "Draft store unavailable");
                return Err(LifecycleError::Persistence(e.to_string()));
            }
        };

        let phase = if draft.is_some() {
            debug!(%template_id, "Resuming workout draft");
            WorkoutPhase::InProgress
        } else {
            WorkoutPhase::NotStarted
        };

        Ok(Self {
            template,
            last_session,
            drafts,
            clock,
            config: LifecycleConfig::default(),
            phase,
            draft,
            ticks_since_persist: 0,
        })
    }

    pub fn with_config(mut self, config: LifecycleConfig) -> Self {
        self.config = config;
        self
    }

    pub fn phase(&self) -> WorkoutPhase {
        self.phase
    }

    pub fn template(&self) -> &WorkoutTemplate {
        &self.template
    }

    pub fn draft(&self) -> Option<&WorkoutDraft> {
        self.draft.as_ref()
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.draft.as_ref().map_or(0, |d| d.elapsed_seconds)
    }

    pub fn drafts(&self) -> &D {
        &self.drafts
    }

    pub fn last_session(&self) -> Option<&WorkoutSession> {
        self.last_session.as_ref()
    }

    /// Sets from the previous session of this template, for reference only
    pub fn previous_sets(&self, exercise_name: &str) -> Option<&[SetEntry]> {
        self.last_session.as_ref()?.sets_for(exercise_name)
    }

    /// `NotStarted -> InProgress`
    pub fn start(&mut self) -> Result<&WorkoutDraft, LifecycleError> {
        self.require(WorkoutPhase::NotStarted, "start")?;

        self.draft = Some(WorkoutDraft::start(&self.template, self.clock.now()));
        self.phase = WorkoutPhase::InProgress;
        self.ticks_since_persist = 0;
        self.persist();

        self.current_draft()
    }

    /// Apply a user edit and write the whole draft
    pub fn edit(&mut self, edit: DraftEdit) -> Result<&WorkoutDraft, LifecycleError> {
        self.require(WorkoutPhase::InProgress, "edit")?;

        let next = self.current_draft()?.apply(&edit)?;
        self.draft = Some(next);
        self.persist();

        self.current_draft()
    }

    /// Advance the elapsed-time counter by one second
    pub fn tick(&mut self) -> Result<u64, LifecycleError> {
        self.require(WorkoutPhase::InProgress, "tick")?;

        let next = self.current_draft()?.tick();
        let elapsed = next.elapsed_seconds;
        self.draft = Some(next);

        self.ticks_since_persist += 1;
        if self.ticks_since_persist >= self.config.persist_every_ticks.max(1) {
            self.persist();
        }

        Ok(elapsed)
    }

    /// Build the session that finishing would submit, without changing state
    ///
    /// `utc_offset_minutes` is the device's current offset; the record store
    /// uses it to put the session on the writer's calendar day.
    pub fn prepare_finish(
        &self,
        utc_offset_minutes: Option<i32>,
    ) -> Result<NewWorkoutSession, LifecycleError> {
        self.require(WorkoutPhase::InProgress, "finish")?;
        if let Some(minutes) = utc_offset_minutes {
            utc_offset(minutes).ok_or(DraftError::UtcOffsetOutOfRange { minutes })?;
        }
        Ok(self
            .current_draft()?
            .to_new_session(self.clock.now(), utc_offset_minutes))
    }

    /// Record that the session was stored; discards the local draft
    ///
    /// If the draft cannot be removed it stays in the store, but its
    /// `started_at` precedes the stored session, so the next `open`
    /// discards it instead of resuming.
    pub fn complete_finish(&mut self, stored: WorkoutSession) -> Result<(), LifecycleError> {
        self.require(WorkoutPhase::InProgress, "finish")?;

        let template_id = self.template.id;
        if let Err(e) = self.drafts.remove(template_id) {
            warn!(%template_id, error = %e, "Failed to remove finished workout draft");
        }

        self.draft = None;
        self.phase = WorkoutPhase::Finished;
        self.last_session = Some(stored);
        Ok(())
    }

    /// `InProgress -> Finished`
    ///
    /// The session is created before the draft is removed. When creation
    /// fails the draft and phase are left as they were.
    pub fn finish<R>(
        &mut self,
        recorder: &mut R,
        utc_offset_minutes: Option<i32>,
    ) -> Result<WorkoutSession, LifecycleError>
    where
        R: SessionRecorder + ?Sized,
    {
        let new_session = self.prepare_finish(utc_offset_minutes)?;

        let stored = recorder
            .create(new_session)
            .map_err(|e| LifecycleError::Persistence(e.to_string()))?;

        self.complete_finish(stored.clone())?;
        Ok(stored)
    }

    /// `InProgress -> Cancelled`; discards the draft without recording anything
    pub fn cancel(&mut self) -> Result<(), LifecycleError> {
        self.require(WorkoutPhase::InProgress, "cancel")?;

        let template_id = self.template.id;
        if let Err(e) = self.drafts.remove(template_id) {
            warn!(%template_id, error = %e, "Failed to remove cancelled workout draft");
        }

        self.draft = None;
        self.phase = WorkoutPhase::Cancelled;
        self.ticks_since_persist = 0;
        Ok(())
    }

    fn require(&self, expected: WorkoutPhase, action: &'static str) -> Result<(), LifecycleError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(LifecycleError::InvalidTransition {
                phase: self.phase,
                action,
            })
        }
    }

    fn current_draft(&self) -> Result<&WorkoutDraft, LifecycleError> {
        self.draft
            .as_ref()
            .ok_or(LifecycleError::InvalidTransition {
                phase: self.phase,
                action: "edit",
            })
    }

    fn persist(&mut self) {
        let Some(draft) = self.draft.as_ref() else {
            return;
        };
        let candidate = draft.clone().persisted_at(self.clock.now());
        let template_id = self.template.id;

        match self.drafts.put(template_id, &candidate) {
            Ok(()) => {
                self.draft = Some(candidate);
                self.ticks_since_persist = 0;
            }
            Err(e) => warn!(%template_id, error = %e, "Failed to persist workout draft"),
        }
    }
}
