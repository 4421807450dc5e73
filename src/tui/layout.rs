//! TUI layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph};

use super::runtime::{App, ROWS, Row};
use super::style;
use crate::estimator::orientation::SLIDER_ORDER;
use crate::view::Donut;

/// Width of a slider track in cells.
const TRACK_WIDTH: usize = 24;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Length(8),  // inputs + KPIs
            Constraint::Min(9),     // donuts
            Constraint::Length(6),  // cost bars
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(60), Constraint::Length(34)])
        .split(chunks[1]);
    render_inputs(frame, app, top[0]);
    render_kpis(frame, app, top[1]);

    let donuts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    let dashboard = app.controller.dashboard();
    render_donut(frame, &dashboard.production, "self-consumption", donuts[0]);
    render_donut(frame, &dashboard.consumption, "autarky", donuts[1]);

    render_costs(frame, app, chunks[3]);
    render_footer(frame, app, chunks[4]);
}

/// Header bar: preset name and active policy.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let policy = app
        .controller
        .heuristics()
        .policy()
        .map_or_else(|| "custom".to_string(), |p| p.to_string());
    let header = Line::from(vec![
        Span::styled(
            " PV-ESTIMATOR ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ policy: {policy} ")),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Input form: one slider plus number box per row.
fn render_inputs(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = ROWS
        .iter()
        .enumerate()
        .map(|(i, &row)| {
            let focused = i == app.selected;
            let (label, position, unit) = match row {
                Row::Field(id) => {
                    let spec = app.controller.spec(id);
                    (id.to_string(), spec.position(app.controller.value(id)), id.unit())
                }
                Row::Orientation => {
                    let last = (SLIDER_ORDER.len() - 1) as f64;
                    let position = app.controller.orientation_slider() as f64 / last;
                    ("Orientation".to_string(), position, "")
                }
            };
            let marker = if focused { "▶ " } else { "  " };
            let label_style = if focused {
                Style::default()
                    .fg(style::SELECTED_FG)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let number_style = if focused && app.editing.is_some() {
                Style::default().fg(style::EDITING_FG)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{label:<20}"), label_style),
                Span::raw(style::slider_track(position, TRACK_WIDTH)),
                Span::raw("  ["),
                Span::styled(format!("{:>10}", app.number_text(row)), number_style),
                Span::raw(format!("] {unit}")),
            ])
        })
        .collect();

    let block = Block::default().title(" Inputs ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// The five rounded cost figures.
fn render_kpis(frame: &mut Frame, app: &App, area: Rect) {
    let k = &app.controller.dashboard().kpis;
    let rows = [
        ("Cost without PV", k.cost_without_pv),
        ("Savings", k.savings),
        ("Remaining grid cost", k.remaining_grid_cost),
        ("Export revenue", k.revenue_from_export),
        ("Cost with PV", k.cost_with_pv),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::raw(format!("  {label:<20}")),
                Span::styled(
                    format!("{value:>8}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    let block = Block::default().title(" Yearly ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// A donut as a share gauge (centre label) above its three segments.
fn render_donut(frame: &mut Frame, donut: &Donut, center: &str, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", donut.title))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(inner);

    let gauge = Gauge::default()
        .block(Block::default().title(format!(" {center} ")).borders(Borders::ALL))
        .gauge_style(Style::default().fg(style::share_color(donut.share)))
        .ratio(donut.share.clamp(0.0, 1.0))
        .label(donut.center_label.clone());
    frame.render_widget(gauge, parts[0]);

    let lines: Vec<Line> = donut
        .slices
        .iter()
        .zip(donut.fractions())
        .zip(style::SLICE_COLORS)
        .map(|((slice, frac), color)| {
            Line::from(vec![
                Span::styled(" ■ ", Style::default().fg(color)),
                Span::raw(format!(
                    "{:<18}{:>8.0} kWh {:>6.1}%",
                    slice.label,
                    slice.kwh,
                    frac * 100.0
                )),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), parts[1]);
}

/// Horizontal bar pair: yearly cost with and without PV.
fn render_costs(frame: &mut Frame, app: &App, area: Rect) {
    let costs = &app.controller.dashboard().costs;
    let height = |v: f64| v.max(0.0).round() as u64;
    let bars = [
        Bar::default()
            .label(Line::from("without PV"))
            .value(height(costs.without_pv))
            .text_value(format!("{:.0}", costs.without_pv))
            .style(Style::default().fg(style::COST_WITHOUT_COLOR)),
        Bar::default()
            .label(Line::from("with PV"))
            .value(height(costs.with_pv))
            .text_value(format!("{:.0}", costs.with_pv))
            .style(Style::default().fg(style::COST_WITH_COLOR)),
    ];
    let chart = BarChart::default()
        .block(
            Block::default()
                .title(" Electricity cost ")
                .borders(Borders::ALL),
        )
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(1)
        .max(height(costs.without_pv).max(height(costs.with_pv)).max(1))
        .data(BarGroup::default().bars(&bars));
    frame.render_widget(chart, area);
}

/// Footer with keybinding hints, or the latest status message.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.status.is_empty() {
        " q:Quit  ↑/↓:Field  ←/→:Slider  PgUp/PgDn:×10  0-9:Type  o:Orientation  v:Policy  p:Print  F1-F4:Preset  r:Reset".to_string()
    } else {
        format!(" {}", app.status)
    };
    let footer = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, app))
            .expect("draw should succeed");
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn draws_all_panels() {
        let app = App::from_preset("default", PathBuf::from("unused.txt"));
        let screen = rendered(&app);
        for needle in [
            "PV-ESTIMATOR",
            "Inputs",
            "Annual consumption",
            "Orientation",
            "Yearly",
            "2375",
            "PV production",
            "Household consumption",
            "Battery discharge",
            "Electricity cost",
            "q:Quit",
        ] {
            assert!(screen.contains(needle), "missing {needle:?} in\n{screen}");
        }
    }

    #[test]
    fn status_replaces_footer_hints() {
        let mut app = App::from_preset("default", PathBuf::from("unused.txt"));
        app.status = "policy: capped".to_string();
        let screen = rendered(&app);
        assert!(screen.contains("policy: capped"));
        assert!(!screen.contains("q:Quit"));
    }

    #[test]
    fn negative_cost_with_pv_still_draws() {
        let mut app = App::from_preset("small_home", PathBuf::from("unused.txt"));
        app.controller
            .apply(crate::controller::FieldUpdate::Slider(crate::controller::FieldId::FeedIn, 0.5));
        assert!(app.controller.dashboard().costs.with_pv < 0.0);
        let screen = rendered(&app);
        assert!(screen.contains("Electricity cost"));
    }
}
