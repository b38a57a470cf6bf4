//! Fitness Tracker WASM Module
//!
//! Runs the activity aggregator and the workout session lifecycle in the
//! browser. Values cross the boundary as JSON strings; drafts are kept in
//! whatever `Storage` object the page hands over (normally `localStorage`).

use chrono::Utc;
use fitness_tracker_shared::{
    aggregate, weight_progress, DraftEdit, DraftStoreError, GoalProfile, KeyValueDraftStore,
    KeyValueStorage, NutritionEntry, SystemClock, WeightEntry, WorkoutDraft, WorkoutLifecycle,
    WorkoutSession, WorkoutTemplate,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Web Storage object (`window.localStorage` or compatible)
    pub type Storage;

    #[wasm_bindgen(method, catch, js_name = getItem)]
    fn get_item(this: &Storage, key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(method, catch, js_name = setItem)]
    fn set_item(this: &Storage, key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = removeItem)]
    fn remove_item(this: &Storage, key: &str) -> Result<(), JsValue>;
}

struct BrowserStorage(Storage);

fn storage_error(e: JsValue) -> DraftStoreError {
    DraftStoreError::Unavailable(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, DraftStoreError> {
        self.0.get_item(key).map_err(storage_error)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), DraftStoreError> {
        self.0.set_item(key, value).map_err(storage_error)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), DraftStoreError> {
        self.0.remove_item(key).map_err(storage_error)
    }
}

fn parse<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {}: {}", what, e))
}

fn render<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

// ============================================================================
// Activity
// ============================================================================

fn aggregate_json(
    weights: &str,
    sessions: &str,
    nutrition: &str,
    goals: Option<String>,
) -> Result<String, String> {
    let weights: Vec<WeightEntry> = parse(weights, "weights")?;
    let sessions: Vec<WorkoutSession> = parse(sessions, "sessions")?;
    let nutrition: Vec<NutritionEntry> = parse(nutrition, "nutrition")?;
    let goals: Option<GoalProfile> = match goals.as_deref() {
        Some(json) if !json.trim().is_empty() => parse(json, "goals")?,
        _ => None,
    };

    render(&aggregate(&weights, &sessions, &nutrition, goals.as_ref()))
}

/// Merge the three activity streams into a per-day timeline, newest first
#[wasm_bindgen(js_name = aggregateActivity)]
pub fn aggregate_activity(
    weights: &str,
    sessions: &str,
    nutrition: &str,
    goals: Option<String>,
) -> Result<String, JsValue> {
    aggregate_json(weights, sessions, nutrition, goals).map_err(js_error)
}

fn weight_progress_json(weights: &str) -> Result<String, String> {
    let weights: Vec<WeightEntry> = parse(weights, "weights")?;
    render(&weight_progress(&weights))
}

/// First-to-latest weight change; `null` without valid entries
#[wasm_bindgen(js_name = weightProgress)]
pub fn weight_progress_js(weights: &str) -> Result<String, JsValue> {
    weight_progress_json(weights).map_err(js_error)
}

// ============================================================================
// Drafts
// ============================================================================

fn apply_edit_json(draft: &str, edit: &str) -> Result<String, String> {
    let draft: WorkoutDraft = parse(draft, "draft")?;
    let edit: DraftEdit = parse(edit, "edit")?;
    let next = draft.apply(&edit).map_err(|e| e.to_string())?;
    render(&next)
}

/// Apply one edit to a draft without touching storage
#[wasm_bindgen(js_name = applyDraftEdit)]
pub fn apply_draft_edit(draft: &str, edit: &str) -> Result<String, JsValue> {
    apply_edit_json(draft, edit).map_err(js_error)
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Workout page controller for one template
#[wasm_bindgen]
pub struct WorkoutController {
    inner: WorkoutLifecycle<KeyValueDraftStore<BrowserStorage>, SystemClock>,
}

#[wasm_bindgen]
impl WorkoutController {
    /// Open the page; resumes a saved draft when one exists
    ///
    /// `templates` and `sessions` are JSON arrays as returned by the API.
    #[wasm_bindgen(constructor)]
    pub fn open(
        template_id: &str,
        templates: &str,
        sessions: &str,
        storage: Storage,
    ) -> Result<WorkoutController, JsValue> {
        let template_id = Uuid::parse_str(template_id)
            .map_err(|e| js_error(format!("Invalid template id: {}", e)))?;
        let templates: Vec<WorkoutTemplate> = parse(templates, "templates").map_err(js_error)?;
        let sessions: Vec<WorkoutSession> = parse(sessions, "sessions").map_err(js_error)?;

        let inner = WorkoutLifecycle::open(
            template_id,
            templates.as_slice(),
            sessions.as_slice(),
            KeyValueDraftStore::new(BrowserStorage(storage)),
            SystemClock,
        )
        .map_err(|e| js_error(e.to_string()))?;

        Ok(WorkoutController { inner })
    }

    /// `not_started`, `in_progress`, `finished` or `cancelled`
    pub fn phase(&self) -> String {
        self.inner.phase().as_str().to_string()
    }

    /// Current draft as JSON, if a workout is in progress
    pub fn draft(&self) -> Result<Option<String>, JsValue> {
        self.inner
            .draft()
            .map(render)
            .transpose()
            .map_err(js_error)
    }

    #[wasm_bindgen(js_name = elapsedSeconds)]
    pub fn elapsed_seconds(&self) -> u64 {
        self.inner.elapsed_seconds()
    }

    /// Sets from the previous session of this template for an exercise
    #[wasm_bindgen(js_name = previousSets)]
    pub fn previous_sets(&self, exercise_name: &str) -> Result<Option<String>, JsValue> {
        self.inner
            .previous_sets(exercise_name)
            .map(render)
            .transpose()
            .map_err(js_error)
    }

    pub fn start(&mut self) -> Result<String, JsValue> {
        let draft = self.inner.start().map_err(|e| js_error(e.to_string()))?;
        render(draft).map_err(js_error)
    }

    pub fn edit(&mut self, edit: &str) -> Result<String, JsValue> {
        let edit: DraftEdit = parse(edit, "edit").map_err(js_error)?;
        let draft = self.inner.edit(edit).map_err(|e| js_error(e.to_string()))?;
        render(draft).map_err(js_error)
    }

    /// One-second timer tick; returns the new elapsed seconds
    pub fn tick(&mut self) -> Result<u64, JsValue> {
        self.inner.tick().map_err(|e| js_error(e.to_string()))
    }

    /// Session JSON to POST to `/api/v1/sessions`
    ///
    /// Pass `-new Date().getTimezoneOffset()` so the session lands on the
    /// device's calendar day. State is unchanged until `completeFinish` is
    /// called with the stored session, so a failed request leaves the draft
    /// in place.
    #[wasm_bindgen(js_name = prepareFinish)]
    pub fn prepare_finish(&self, utc_offset_minutes: Option<i32>) -> Result<String, JsValue> {
        let session = self
            .inner
            .prepare_finish(utc_offset_minutes)
            .map_err(|e| js_error(e.to_string()))?;
        render(&session).map_err(js_error)
    }

    #[wasm_bindgen(js_name = completeFinish)]
    pub fn complete_finish(&mut self, stored: &str) -> Result<(), JsValue> {
        let stored: WorkoutSession = parse(stored, "session").map_err(js_error)?;
        self.inner
            .complete_finish(stored)
            .map_err(|e| js_error(e.to_string()))
    }

    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.inner.cancel().map_err(|e| js_error(e.to_string()))
    }
}

/// Current time as RFC 3339, for callers stamping `recorded_at`
#[wasm_bindgen(js_name = nowRfc3339)]
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339()
}


#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn now_is_rfc3339() {
        assert!(chrono::DateTime::parse_from_rfc3339(&now_rfc3339()).is_ok());
    }

    #[wasm_bindgen_test]
    fn aggregate_rejects_bad_json_as_js_error() {
        let err = aggregate_activity("nope", "[]", "[]", None).unwrap_err();
        assert!(err.as_string().unwrap().starts_with("Invalid weights"));
    }
}
