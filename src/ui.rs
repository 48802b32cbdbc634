use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, FormRow, InputMode, Screen};
use crate::form::{AdditionalFeature, Field, FormState, ProjectType};

/// Showroom contact link shown with every estimate.
pub const CONTACT_URL: &str = "https://www.usacabinetstore.com/contact-us/";

const DISCLAIMER: &str = "Disclaimer: This calculator provides a general cost estimate for \
planning purposes only and is not a formal quote. Actual costs can vary significantly based on \
your specific project scope, material choices, site conditions, and current market pricing. For \
a detailed, site-specific quote and to finalize costs, please schedule a consultation at one of \
our showrooms with a design expert. Do not rely solely on this estimate for budgeting.";

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    if app.is_loading() {
        render_loading(app, frame, body_area);
    } else {
        match app.screen {
            Screen::Form => render_form(app, frame, body_area),
            Screen::Result => render_result(app, frame, body_area),
        }
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " Remodeling Cost Calculator ",
            Style::default().fg(Color::Cyan).bold(),
        ),
        Span::styled(
            format!("v{} ", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("[{}]", app.model_name()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let dots = ".".repeat((app.animation_frame as usize) + 1);
    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            format!("Calculating your custom estimate{}", dots),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            "This may take a few moments.",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines).centered();
    frame.render_widget(paragraph, inner);
}

fn render_form(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Get Your Instant Remodeling Estimate ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = app.visible_rows();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line: u16 = 0;
    let mut last_section = "";

    for (idx, row) in rows.iter().enumerate() {
        let section = section_title(app.form.project_type, *row);
        if !section.is_empty() && section != last_section {
            if !lines.is_empty() {
                lines.push(Line::default());
            }
            lines.push(Line::from(Span::styled(
                section,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            last_section = section;
        }

        let selected = idx == app.cursor;
        if selected {
            cursor_line = lines.len() as u16;
        }
        lines.push(render_row(app, *row, selected));
    }

    // Keep the cursor row inside the viewport.
    if cursor_line < app.form_scroll {
        app.form_scroll = cursor_line;
    } else if cursor_line >= app.form_scroll + inner.height {
        app.form_scroll = cursor_line.saturating_sub(inner.height.saturating_sub(1));
    }

    let paragraph = Paragraph::new(lines).scroll((app.form_scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn render_row(app: &App, row: FormRow, selected: bool) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let marker_style = Style::default().fg(Color::Cyan).bold();

    match row {
        FormRow::Field(field) => {
            let label = field_label(app.form.project_type, field);
            let editing = selected && app.input_mode == InputMode::Editing;
            let value = field_display_value(&app.form, field, editing);
            let value_style = if is_placeholder(&app.form, field) && !editing {
                Style::default().fg(Color::DarkGray).italic()
            } else if selected {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(marker, marker_style),
                Span::raw(format!("{}: ", label)),
                Span::styled(value, value_style),
            ])
        }
        FormRow::TileArea(area) => {
            checkbox_line(marker, area.label(), app.form.tile_areas.contains(&area), selected)
        }
        FormRow::Scope(scope) => checkbox_line(
            marker,
            scope.label(),
            app.form.project_scope.contains(&scope),
            selected,
        ),
        FormRow::Feature(feature) => {
            let label = match feature {
                AdditionalFeature::NewFaucet => "Install New Faucet",
                other => other.label(),
            };
            checkbox_line(
                marker,
                label,
                app.form.additional_features.contains(&feature),
                selected,
            )
        }
        FormRow::Submit => {
            let style = if !app.form.can_submit() {
                Style::default().fg(Color::DarkGray)
            } else if selected {
                Style::default().fg(Color::Black).bg(Color::Green).bold()
            } else {
                Style::default().fg(Color::Green).bold()
            };
            Line::from(vec![
                Span::styled(marker, marker_style),
                Span::styled("[ Calculate My Estimate ]", style),
            ])
        }
    }
}

fn checkbox_line(marker: &str, label: &str, checked: bool, selected: bool) -> Line<'static> {
    let glyph = if checked { "[x] " } else { "[ ] " };
    let style = if selected {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan).bold()),
        Span::styled(format!("{}{}", glyph, label), style),
    ])
}

fn render_result(app: &mut App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Your Estimated Project Cost ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(estimate) = app.estimate.clone() else {
        return;
    };

    let mut lines: Vec<Line> = Vec::new();

    if !estimate.summary.is_empty() {
        lines.push(Line::from(estimate.summary.clone()));
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        "Estimated Cost Range",
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(Span::styled(
        format!(
            "{} - {}",
            format_usd(estimate.total_range.low),
            format_usd(estimate.total_range.high)
        ),
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        "Cost Breakdown",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    for item in &estimate.breakdown {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}  ", item.category),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format_usd(item.cost),
                Style::default().fg(Color::Green),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            format!("  {}", item.description),
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        DISCLAIMER,
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::raw("Request a professional quote: "),
        Span::styled(CONTACT_URL, Style::default().fg(Color::Blue).underlined()),
    ]));

    app.result_height = inner.height;
    app.total_result_lines = lines.len() as u16;

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((app.result_scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // A failed request shows the advisory in place of the key hints until
    // the next submission.
    if let Some(advisory) = app.advisory {
        let line = Line::from(Span::styled(
            format!(" {}", advisory),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints = if app.is_loading() {
        " estimate in progress | q quit"
    } else {
        match (app.screen, app.input_mode) {
            (Screen::Form, InputMode::Normal) => {
                " j/k move | h/l change | space toggle | i edit | s submit | q quit"
            }
            (Screen::Form, InputMode::Editing) => " type to edit | Enter/Esc done",
            (Screen::Result, _) => " j/k scroll | e edit details | n new estimate | q quit",
        }
    };
    let line = Line::from(Span::styled(hints, Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(line), area);
}

fn section_title(project: ProjectType, row: FormRow) -> &'static str {
    match row {
        FormRow::Field(Field::ProjectType | Field::Sqft | Field::Location) => "Project Basics",
        FormRow::Field(Field::BathroomType | Field::HomeAge | Field::VanityLine)
        | FormRow::Scope(_) => "Bathroom Details",
        FormRow::Field(Field::NumCabinets | Field::HardwareFinish) => {
            if project == ProjectType::Bathroom {
                "Bathroom Details"
            } else {
                "Cabinetry & Custom Built-ins"
            }
        }
        FormRow::Field(Field::CabinetLine) => "Cabinetry & Custom Built-ins",
        FormRow::Field(Field::CountertopMaterial) => "Countertops",
        FormRow::Field(Field::SinkType | Field::ToiletType | Field::ShowerType) => {
            "Plumbing Fixtures"
        }
        FormRow::Feature(AdditionalFeature::NewFaucet) => "Plumbing Fixtures",
        FormRow::TileArea(_) | FormRow::Field(Field::TileMaterial) => "Tile Work",
        FormRow::Feature(_) => "Additional Features",
        FormRow::Submit => "",
        FormRow::Field(_) => "",
    }
}

fn field_label(project: ProjectType, field: Field) -> &'static str {
    match field {
        Field::ProjectType => "Project Type",
        Field::Sqft => "Room Size (sq ft)",
        Field::Location => "Zip Code or City",
        Field::CabinetLine => "Cabinet Line",
        Field::NumCabinets => {
            if project == ProjectType::Bathroom {
                "Number of Vanities (Optional)"
            } else {
                "Number of Cabinets / Units (Optional)"
            }
        }
        Field::HardwareFinish => {
            if project == ProjectType::Bathroom {
                "Vanity Hardware Finish"
            } else {
                "Cabinet Hardware Finish"
            }
        }
        Field::CountertopMaterial => "Countertop Material",
        Field::BathroomType => "Bathroom Type",
        Field::VanityLine => "Vanity Line",
        Field::HomeAge => "Home Age (years)",
        Field::TileMaterial => "Primary Tile Material",
        Field::SinkType => "Sink Selection",
        Field::ToiletType => "Toilet Selection",
        Field::ShowerType => "Bathtub / Shower",
        Field::ProjectScope | Field::TileAreas | Field::AdditionalFeatures => "",
    }
}

fn is_placeholder(form: &FormState, field: Field) -> bool {
    match field {
        Field::Sqft => form.sqft.is_empty(),
        Field::Location => form.location.is_empty(),
        Field::NumCabinets => form.num_cabinets.is_empty(),
        Field::HomeAge => form.home_age.is_empty(),
        _ => false,
    }
}

fn field_display_value(form: &FormState, field: Field, editing: bool) -> String {
    let text = match field {
        Field::ProjectType => form.project_type.label().to_string(),
        Field::Sqft => placeholder_or(&form.sqft, "e.g., 150"),
        Field::Location => placeholder_or(&form.location, "e.g., 22030 or Fairfax"),
        Field::CabinetLine => form.cabinet_line.label().to_string(),
        Field::NumCabinets => {
            if form.project_type == ProjectType::Bathroom {
                placeholder_or(&form.num_cabinets, "e.g., 1 or 2")
            } else {
                placeholder_or(&form.num_cabinets, "Leave blank to estimate")
            }
        }
        Field::HardwareFinish => form.hardware_finish.label().to_string(),
        Field::CountertopMaterial => form.countertop_material.label().to_string(),
        Field::BathroomType => form.bathroom_type.label().to_string(),
        Field::VanityLine => form.vanity_line.label().to_string(),
        Field::HomeAge => placeholder_or(&form.home_age, "e.g., 25"),
        Field::TileMaterial => form.tile_material.label().to_string(),
        Field::SinkType => form.sink_type.label().to_string(),
        Field::ToiletType => form.toilet_type.label().to_string(),
        Field::ShowerType => form.shower_type.label().to_string(),
        Field::ProjectScope | Field::TileAreas | Field::AdditionalFeatures => String::new(),
    };

    if editing {
        // Raw text with a visible cursor while editing, placeholder dropped.
        let raw = match field {
            Field::Sqft => &form.sqft,
            Field::Location => &form.location,
            Field::NumCabinets => &form.num_cabinets,
            Field::HomeAge => &form.home_age,
            _ => return text,
        };
        format!("{}_", raw)
    } else {
        text
    }
}

fn placeholder_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Whole-dollar formatting with thousands separators, e.g. `$18,000`.
fn format_usd(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::new();
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if rounded < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usd_formatting_groups_thousands() {
        assert_eq!(format_usd(950.0), "$950");
        assert_eq!(format_usd(18000.0), "$18,000");
        assert_eq!(format_usd(1234567.0), "$1,234,567");
        assert_eq!(format_usd(0.0), "$0");
        assert_eq!(format_usd(-50.0), "-$50");
    }

    #[test]
    fn num_cabinets_label_tracks_project_type() {
        assert_eq!(
            field_label(ProjectType::Bathroom, Field::NumCabinets),
            "Number of Vanities (Optional)"
        );
        assert_eq!(
            field_label(ProjectType::Kitchen, Field::NumCabinets),
            "Number of Cabinets / Units (Optional)"
        );
    }

    #[test]
    fn empty_text_fields_render_placeholders() {
        let form = FormState::default();
        assert!(form.location.is_empty());
        assert_eq!(
            field_display_value(&form, Field::Location, false),
            "e.g., 22030 or Fairfax"
        );
        assert_eq!(field_display_value(&form, Field::Sqft, false), "150");
    }
}
