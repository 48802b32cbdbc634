use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, FormRow, InputMode, Screen};
use crate::form::{
    BathroomType, CabinetLine, CountertopMaterial, Field, FieldUpdate, FormState, HardwareFinish,
    ProjectType, ShowerType, SinkType, TileMaterial, ToiletType, VanityLine,
};
use crate::tui::AppEvent;

pub async fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
            app.poll_estimate().await;
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // While a request is in flight the form is locked: the estimate runs to
    // completion, only quitting is allowed.
    if app.is_loading() {
        if key.code == KeyCode::Char('q') {
            app.should_quit = true;
        }
        return;
    }

    match app.screen {
        Screen::Form => match app.input_mode {
            InputMode::Normal => handle_form_normal(app, key),
            InputMode::Editing => handle_form_editing(app, key),
        },
        Screen::Result => handle_result(app, key),
    }
}

fn handle_form_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        // Quit
        KeyCode::Char('q') => app.should_quit = true,

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
        KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
        KeyCode::Char('g') => app.cursor_first(),
        KeyCode::Char('G') => app.cursor_last(),

        // Cycle select options
        KeyCode::Char('h') | KeyCode::Left => cycle_current(app, false),
        KeyCode::Char('l') | KeyCode::Right => cycle_current(app, true),

        // Toggle checkboxes
        KeyCode::Char(' ') => toggle_current(app),

        // Edit text fields
        KeyCode::Char('i') => begin_editing(app),

        // Submit shortcut
        KeyCode::Char('s') => app.submit(),

        // Enter acts on whatever the cursor points at
        KeyCode::Enter => match app.current_row() {
            Some(FormRow::Submit) => app.submit(),
            Some(FormRow::TileArea(_)) | Some(FormRow::Scope(_)) | Some(FormRow::Feature(_)) => {
                toggle_current(app)
            }
            Some(FormRow::Field(field)) if is_text_field(field) => begin_editing(app),
            Some(FormRow::Field(_)) => cycle_current(app, true),
            None => {}
        },

        _ => {}
    }
}

fn handle_form_editing(app: &mut App, key: KeyEvent) {
    let Some(FormRow::Field(field)) = app.current_row() else {
        app.input_mode = InputMode::Normal;
        return;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Backspace => {
            if let Some(current) = text_value(&app.form, field) {
                let mut value = current.to_string();
                value.pop();
                if let Some(update) = text_update(field, value) {
                    app.apply_update(update);
                }
            }
        }
        KeyCode::Char(c) => {
            if char_allowed(field, c) {
                if let Some(current) = text_value(&app.form, field) {
                    let mut value = current.to_string();
                    value.push(c);
                    if let Some(update) = text_update(field, value) {
                        app.apply_update(update);
                    }
                }
            }
        }
        _ => {}
    }
}

fn handle_result(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('e') => app.edit_details(),
        KeyCode::Char('n') => app.start_new_estimate(),
        KeyCode::Char('j') | KeyCode::Down => app.result_scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.result_scroll_up(),
        _ => {}
    }
}

fn begin_editing(app: &mut App) {
    if let Some(FormRow::Field(field)) = app.current_row() {
        if is_text_field(field) {
            app.input_mode = InputMode::Editing;
        }
    }
}

fn toggle_current(app: &mut App) {
    let update = match app.current_row() {
        Some(FormRow::TileArea(area)) => Some(FieldUpdate::ToggleTileArea(area)),
        Some(FormRow::Scope(scope)) => Some(FieldUpdate::ToggleScope(scope)),
        Some(FormRow::Feature(feature)) => Some(FieldUpdate::ToggleFeature(feature)),
        _ => None,
    };
    if let Some(update) = update {
        app.apply_update(update);
    }
}

fn cycle_current(app: &mut App, forward: bool) {
    if let Some(FormRow::Field(field)) = app.current_row() {
        if let Some(update) = cycle_update(&app.form, field, forward) {
            app.apply_update(update);
        }
    }
}

pub fn is_text_field(field: Field) -> bool {
    matches!(
        field,
        Field::Sqft | Field::Location | Field::NumCabinets | Field::HomeAge
    )
}

/// Numeric text fields accept digits only; location is free text.
fn char_allowed(field: Field, c: char) -> bool {
    match field {
        Field::Location => !c.is_control(),
        Field::Sqft | Field::NumCabinets | Field::HomeAge => c.is_ascii_digit(),
        _ => false,
    }
}

fn text_value(form: &FormState, field: Field) -> Option<&str> {
    match field {
        Field::Sqft => Some(&form.sqft),
        Field::Location => Some(&form.location),
        Field::NumCabinets => Some(&form.num_cabinets),
        Field::HomeAge => Some(&form.home_age),
        _ => None,
    }
}

fn text_update(field: Field, value: String) -> Option<FieldUpdate> {
    match field {
        Field::Sqft => Some(FieldUpdate::Sqft(value)),
        Field::Location => Some(FieldUpdate::Location(value)),
        Field::NumCabinets => Some(FieldUpdate::NumCabinets(value)),
        Field::HomeAge => Some(FieldUpdate::HomeAge(value)),
        _ => None,
    }
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T, forward: bool) -> T {
    if options.is_empty() {
        return current;
    }
    let idx = options.iter().position(|o| *o == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % options.len()
    } else {
        (idx + options.len() - 1) % options.len()
    };
    options[next]
}

fn cycle_update(form: &FormState, field: Field, forward: bool) -> Option<FieldUpdate> {
    match field {
        Field::ProjectType => Some(FieldUpdate::ProjectType(cycle(
            &ProjectType::ALL,
            form.project_type,
            forward,
        ))),
        Field::CabinetLine => Some(FieldUpdate::CabinetLine(cycle(
            &CabinetLine::ALL,
            form.cabinet_line,
            forward,
        ))),
        Field::HardwareFinish => Some(FieldUpdate::HardwareFinish(cycle(
            &HardwareFinish::ALL,
            form.hardware_finish,
            forward,
        ))),
        Field::CountertopMaterial => Some(FieldUpdate::CountertopMaterial(cycle(
            &CountertopMaterial::ALL,
            form.countertop_material,
            forward,
        ))),
        Field::BathroomType => Some(FieldUpdate::BathroomType(cycle(
            &BathroomType::ALL,
            form.bathroom_type,
            forward,
        ))),
        Field::VanityLine => Some(FieldUpdate::VanityLine(cycle(
            &VanityLine::ALL,
            form.vanity_line,
            forward,
        ))),
        Field::TileMaterial => Some(FieldUpdate::TileMaterial(cycle(
            &TileMaterial::ALL,
            form.tile_material,
            forward,
        ))),
        Field::SinkType => {
            let options = SinkType::options_for(form.project_type);
            Some(FieldUpdate::SinkType(cycle(&options, form.sink_type, forward)))
        }
        Field::ToiletType => Some(FieldUpdate::ToiletType(cycle(
            &ToiletType::ALL,
            form.toilet_type,
            forward,
        ))),
        Field::ShowerType => Some(FieldUpdate::ShowerType(cycle(
            &ShowerType::ALL,
            form.shower_type,
            forward,
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_wraps_both_directions() {
        let first = ProjectType::ALL[0];
        let last = ProjectType::ALL[ProjectType::ALL.len() - 1];
        assert_eq!(cycle(&ProjectType::ALL, last, true), first);
        assert_eq!(cycle(&ProjectType::ALL, first, false), last);
        assert_eq!(cycle(&ProjectType::ALL, first, true), ProjectType::ALL[1]);
    }

    #[test]
    fn numeric_fields_reject_non_digits() {
        assert!(char_allowed(Field::Sqft, '7'));
        assert!(!char_allowed(Field::Sqft, 'x'));
        assert!(!char_allowed(Field::HomeAge, '-'));
        assert!(char_allowed(Field::Location, 'F'));
        assert!(char_allowed(Field::Location, '2'));
    }

    #[test]
    fn sink_cycling_respects_project_narrowing() {
        let mut form = FormState::default(); // Kitchen
        // Cycle through every option; bathroom sinks must never appear.
        for _ in 0..8 {
            if let Some(update) = cycle_update(&form, Field::SinkType, true) {
                form = form.apply(update);
            }
            assert!(
                !matches!(
                    form.sink_type,
                    SinkType::BathroomUndermount | SinkType::BathroomVessel
                ),
                "kitchen projects must not offer bathroom sinks"
            );
        }
    }

    #[test]
    fn non_select_fields_do_not_cycle() {
        let form = FormState::default();
        assert!(cycle_update(&form, Field::Location, true).is_none());
        assert!(cycle_update(&form, Field::Sqft, true).is_none());
    }
}
