use tokio::task::JoinHandle;

use crate::error::{EstimateError, ADVISORY};
use crate::estimate::{self, Estimate};
use crate::form::{
    field_relevant, AdditionalFeature, Field, FieldUpdate, FormState, ProjectScope, TileArea,
};
use crate::gemini::GeminiClient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// One interactive row of the form. The row list is derived from the
/// relevance predicate, so irrelevant sections never exist to land on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Field(Field),
    TileArea(TileArea),
    Scope(ProjectScope),
    Feature(AdditionalFeature),
    Submit,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub screen: Screen,
    pub input_mode: InputMode,

    // The single form record; all mutation goes through apply_update
    pub form: FormState,
    pub cursor: usize,

    // Estimate state. At most one request is ever in flight; submission is
    // refused while the task handle is live.
    pub estimate: Option<Estimate>,
    pub estimate_task: Option<JoinHandle<Result<Estimate, EstimateError>>>,
    pub advisory: Option<&'static str>,

    // Animation state
    pub animation_frame: u8,

    // Render geometry (updated during render, used for scroll clamping)
    pub form_scroll: u16,
    pub result_scroll: u16,
    pub result_height: u16,
    pub total_result_lines: u16,

    client: GeminiClient,
}

impl App {
    pub fn new(client: GeminiClient) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Form,
            input_mode: InputMode::Normal,

            form: FormState::default(),
            cursor: 0,

            estimate: None,
            estimate_task: None,
            advisory: None,

            animation_frame: 0,

            form_scroll: 0,
            result_scroll: 0,
            result_height: 0,
            total_result_lines: 0,

            client,
        }
    }

    pub fn model_name(&self) -> &str {
        self.client.model()
    }

    /// The interactive rows for the current form, in display order.
    pub fn visible_rows(&self) -> Vec<FormRow> {
        let project = self.form.project_type;
        let mut rows = vec![
            FormRow::Field(Field::ProjectType),
            FormRow::Field(Field::Sqft),
            FormRow::Field(Field::Location),
        ];

        if field_relevant(project, Field::BathroomType) {
            rows.push(FormRow::Field(Field::BathroomType));
            rows.push(FormRow::Field(Field::HomeAge));
            rows.push(FormRow::Field(Field::VanityLine));
            rows.push(FormRow::Field(Field::NumCabinets));
            rows.push(FormRow::Field(Field::HardwareFinish));
            for scope in ProjectScope::ALL {
                rows.push(FormRow::Scope(scope));
            }
        }

        if field_relevant(project, Field::CabinetLine) {
            rows.push(FormRow::Field(Field::CabinetLine));
            rows.push(FormRow::Field(Field::NumCabinets));
            rows.push(FormRow::Field(Field::HardwareFinish));
        }

        if field_relevant(project, Field::CountertopMaterial) {
            rows.push(FormRow::Field(Field::CountertopMaterial));
        }

        if field_relevant(project, Field::SinkType) {
            rows.push(FormRow::Field(Field::SinkType));
            rows.push(FormRow::Feature(AdditionalFeature::NewFaucet));
            if field_relevant(project, Field::ToiletType) {
                rows.push(FormRow::Field(Field::ToiletType));
                rows.push(FormRow::Field(Field::ShowerType));
            }
        }

        if field_relevant(project, Field::TileAreas) {
            for area in TileArea::ALL {
                rows.push(FormRow::TileArea(area));
            }
            if self.form.has_tile_work() {
                rows.push(FormRow::Field(Field::TileMaterial));
            }
        }

        // The faucet checkbox already lives in the plumbing section.
        for feature in AdditionalFeature::ALL {
            if feature != AdditionalFeature::NewFaucet {
                rows.push(FormRow::Feature(feature));
            }
        }

        rows.push(FormRow::Submit);
        rows
    }

    pub fn current_row(&self) -> Option<FormRow> {
        self.visible_rows().get(self.cursor).copied()
    }

    pub fn cursor_down(&mut self) {
        let len = self.visible_rows().len();
        if len > 0 {
            self.cursor = (self.cursor + 1).min(len - 1);
        }
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_first(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_last(&mut self) {
        self.cursor = self.visible_rows().len().saturating_sub(1);
    }

    /// Route a field update through the reducer and keep the cursor inside
    /// the (possibly shorter) new row list.
    pub fn apply_update(&mut self, update: FieldUpdate) {
        self.form = self.form.apply(update);
        let len = self.visible_rows().len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.estimate_task.is_some()
    }

    /// Start an estimate request. A no-op if the form isn't submittable or a
    /// request is already in flight.
    pub fn submit(&mut self) {
        if !self.form.can_submit() || self.estimate_task.is_some() {
            return;
        }

        self.advisory = None;
        let client = self.client.clone();
        let form = self.form.clone();
        self.estimate_task = Some(tokio::spawn(async move {
            estimate::request_estimate(&client, &form).await
        }));
    }

    /// Collect a finished estimate task, if any. On success the result
    /// screen takes over; on failure the form stays editable, the previous
    /// estimate (if one exists) is kept, and only the advisory is shown.
    pub async fn poll_estimate(&mut self) {
        let finished = self
            .estimate_task
            .as_ref()
            .is_some_and(|task| task.is_finished());
        if !finished {
            return;
        }

        if let Some(task) = self.estimate_task.take() {
            match task.await {
                Ok(Ok(estimate)) => {
                    self.estimate = Some(estimate);
                    self.screen = Screen::Result;
                    self.result_scroll = 0;
                }
                Ok(Err(err)) => {
                    tracing::error!(error = %err, "estimate request failed");
                    self.advisory = Some(ADVISORY);
                }
                Err(err) => {
                    tracing::error!(error = %err, "estimate task aborted");
                    self.advisory = Some(ADVISORY);
                }
            }
        }
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.is_loading() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Back to the form with all inputs and the estimate intact.
    pub fn edit_details(&mut self) {
        self.screen = Screen::Form;
        self.advisory = None;
    }

    /// Discard the estimate and start over; the location survives.
    pub fn start_new_estimate(&mut self) {
        self.form = self.form.reset_for_new_estimate();
        self.estimate = None;
        self.advisory = None;
        self.cursor = 0;
        self.form_scroll = 0;
        self.screen = Screen::Form;
    }

    // Result screen scrolling
    pub fn result_scroll_down(&mut self) {
        if self.result_scroll < self.total_result_lines.saturating_sub(self.result_height) {
            self.result_scroll = self.result_scroll.saturating_add(1);
        }
    }

    pub fn result_scroll_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimate::TotalRange;
    use crate::form::ProjectType;

    fn test_app() -> App {
        App::new(GeminiClient::new("test-key", "gemini-2.5-flash"))
    }

    #[test]
    fn kitchen_rows_have_cabinetry_but_no_bathroom_fields() {
        let app = test_app();
        let rows = app.visible_rows();
        assert!(rows.contains(&FormRow::Field(Field::CabinetLine)));
        assert!(rows.contains(&FormRow::Field(Field::CountertopMaterial)));
        assert!(!rows.contains(&FormRow::Field(Field::BathroomType)));
        assert!(!rows.contains(&FormRow::Field(Field::ToiletType)));
        assert_eq!(rows.last(), Some(&FormRow::Submit));
    }

    #[test]
    fn bathroom_rows_swap_cabinetry_for_vanity_fields() {
        let mut app = test_app();
        app.apply_update(FieldUpdate::ProjectType(ProjectType::Bathroom));
        let rows = app.visible_rows();
        assert!(rows.contains(&FormRow::Field(Field::VanityLine)));
        assert!(rows.contains(&FormRow::Field(Field::ToiletType)));
        assert!(rows.contains(&FormRow::Scope(ProjectScope::CompleteGut)));
        assert!(!rows.contains(&FormRow::Field(Field::CabinetLine)));
    }

    #[test]
    fn closet_rows_drop_detail_sections() {
        let mut app = test_app();
        app.apply_update(FieldUpdate::ProjectType(ProjectType::Closet));
        let rows = app.visible_rows();
        assert!(rows.contains(&FormRow::Field(Field::CabinetLine)));
        assert!(!rows.contains(&FormRow::Field(Field::CountertopMaterial)));
        assert!(!rows.contains(&FormRow::Field(Field::SinkType)));
        assert!(!rows.contains(&FormRow::TileArea(TileArea::NoTileWork)));
    }

    #[test]
    fn tile_material_row_appears_only_with_tile_work() {
        let mut app = test_app();
        assert!(!app
            .visible_rows()
            .contains(&FormRow::Field(Field::TileMaterial)));

        app.apply_update(FieldUpdate::ToggleTileArea(TileArea::KitchenBacksplash));
        assert!(app
            .visible_rows()
            .contains(&FormRow::Field(Field::TileMaterial)));
    }

    #[test]
    fn cursor_is_clamped_when_rows_shrink() {
        let mut app = test_app();
        app.cursor_last();
        let kitchen_rows = app.visible_rows().len();
        app.apply_update(FieldUpdate::ProjectType(ProjectType::Closet));
        let closet_rows = app.visible_rows().len();
        assert!(closet_rows < kitchen_rows);
        assert!(app.cursor < closet_rows);
    }

    #[tokio::test]
    async fn submit_refused_until_form_is_complete() {
        let mut app = test_app();
        app.submit();
        assert!(app.estimate_task.is_none());

        app.apply_update(FieldUpdate::Location("Fairfax".to_string()));
        app.submit();
        assert!(app.estimate_task.is_some());
    }

    #[tokio::test]
    async fn submit_refused_while_request_in_flight() {
        let mut app = test_app();
        app.apply_update(FieldUpdate::Location("Fairfax".to_string()));
        app.estimate_task = Some(tokio::spawn(async {
            // Simulate a request that never finishes within the test.
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            Err(EstimateError::OracleInvocation("unreachable".to_string()))
        }));

        // A refused submit leaves all state untouched; a real submit would
        // clear the advisory.
        app.advisory = Some(ADVISORY);
        app.submit();
        assert_eq!(app.advisory, Some(ADVISORY));
    }

    #[tokio::test]
    async fn failed_request_keeps_previous_estimate_and_sets_advisory() {
        let mut app = test_app();
        let previous = Estimate {
            total_range: TotalRange {
                low: 1000.0,
                high: 2000.0,
            },
            breakdown: Vec::new(),
            summary: "previous".to_string(),
        };
        app.estimate = Some(previous.clone());

        app.estimate_task = Some(tokio::spawn(async {
            Err(EstimateError::ResponseParse("bad json".to_string()))
        }));
        // Give the spawned task a moment to finish.
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        app.poll_estimate().await;

        assert!(app.estimate_task.is_none());
        assert_eq!(app.advisory, Some(ADVISORY));
        assert_eq!(app.estimate, Some(previous));
        assert_eq!(app.screen, Screen::Form);
    }

    #[tokio::test]
    async fn successful_request_replaces_estimate_and_shows_result() {
        let mut app = test_app();
        let fresh = Estimate {
            total_range: TotalRange {
                low: 18000.0,
                high: 24000.0,
            },
            breakdown: Vec::new(),
            summary: "fresh".to_string(),
        };
        let task_result = fresh.clone();
        app.estimate_task = Some(tokio::spawn(async move { Ok(task_result) }));
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        app.poll_estimate().await;

        assert_eq!(app.estimate, Some(fresh));
        assert_eq!(app.screen, Screen::Result);
        assert!(app.advisory.is_none());
    }

    #[test]
    fn new_estimate_resets_form_but_keeps_location() {
        let mut app = test_app();
        app.apply_update(FieldUpdate::ProjectType(ProjectType::Bathroom));
        app.apply_update(FieldUpdate::Location("22030".to_string()));
        app.screen = Screen::Result;
        app.estimate = Some(Estimate {
            total_range: TotalRange {
                low: 1.0,
                high: 2.0,
            },
            breakdown: Vec::new(),
            summary: String::new(),
        });

        app.start_new_estimate();
        assert_eq!(app.screen, Screen::Form);
        assert!(app.estimate.is_none());
        assert_eq!(app.form.location, "22030");
        assert_eq!(app.form.project_type, ProjectType::Kitchen);
    }
}
