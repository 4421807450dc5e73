//! Terminal dashboard application state.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::ScenarioConfig;
use crate::controller::{Controller, FieldId, FieldUpdate};
use crate::estimator::{Orientation, Policy};
use crate::report::Report;

/// Fine and coarse slider increments, in steps.
const FINE_STEPS: i32 = 1;
const COARSE_STEPS: i32 = 10;

/// One input row of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Slider plus number box.
    Field(FieldId),
    /// Orientation selector plus orientation slider.
    Orientation,
}

/// Rows in display order.
pub const ROWS: [Row; 6] = [
    Row::Field(FieldId::Consumption),
    Row::Field(FieldId::PvPower),
    Row::Orientation,
    Row::Field(FieldId::Battery),
    Row::Field(FieldId::Price),
    Row::Field(FieldId::FeedIn),
];

/// TUI application state.
pub struct App {
    /// Estimator state; everything drawn is projected from it.
    pub controller: Controller,
    /// Index into [`ROWS`] of the focused row.
    pub selected: usize,
    /// Number-box text being typed, if any.
    pub editing: Option<String>,
    /// Name of the active preset.
    pub preset_name: String,
    /// Where the print action writes the report.
    pub print_path: PathBuf,
    /// One-line feedback shown in the footer.
    pub status: String,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates an app around an existing controller.
    pub fn new(controller: Controller, preset_name: &str, print_path: PathBuf) -> Self {
        Self {
            controller,
            selected: 0,
            editing: None,
            preset_name: preset_name.to_string(),
            print_path,
            status: String::new(),
            quit: false,
        }
    }

    /// Creates an app from a preset name, falling back to the reference scenario.
    pub fn from_preset(preset: &str, print_path: PathBuf) -> Self {
        let scenario =
            ScenarioConfig::from_preset(preset).unwrap_or_else(|_| ScenarioConfig::reference());
        let controller = Controller::new(scenario.input(), scenario.heuristics.build());
        Self::new(controller, preset, print_path)
    }

    /// The focused row.
    pub fn row(&self) -> Row {
        ROWS[self.selected.min(ROWS.len() - 1)]
    }

    /// Moves focus down, wrapping.
    pub fn select_next(&mut self) {
        self.commit_edit();
        self.selected = (self.selected + 1) % ROWS.len();
    }

    /// Moves focus up, wrapping.
    pub fn select_prev(&mut self) {
        self.commit_edit();
        self.selected = (self.selected + ROWS.len() - 1) % ROWS.len();
    }

    /// Moves the focused slider by `delta` fine steps.
    pub fn nudge(&mut self, delta: i32) {
        self.editing = None;
        match self.row() {
            Row::Field(id) => {
                self.controller.nudge(id, delta * FINE_STEPS);
            }
            Row::Orientation => {
                let index = self.controller.orientation_slider() as i64 + i64::from(delta);
                let index = index.max(0) as usize;
                self.controller.apply(FieldUpdate::OrientationSlider(index));
            }
        }
    }

    /// Moves the focused slider by `delta` coarse steps.
    pub fn nudge_coarse(&mut self, delta: i32) {
        match self.row() {
            Row::Field(_) => self.nudge(delta * COARSE_STEPS),
            Row::Orientation => self.nudge(delta),
        }
    }

    /// Steps the orientation selector to the next entry.
    pub fn cycle_orientation(&mut self) {
        self.commit_edit();
        let next = self.controller.input().orientation.cycle();
        self.controller.apply(FieldUpdate::Orientation(next));
    }

    /// Appends a character to the number box of the focused field.
    pub fn type_char(&mut self, ch: char) {
        if let Row::Field(_) = self.row() {
            self.editing.get_or_insert_with(String::new).push(ch);
        }
    }

    /// Removes the last typed character.
    pub fn backspace(&mut self) {
        if let Some(buf) = self.editing.as_mut() {
            buf.pop();
        }
    }

    /// Sends typed text through the number-box path (parse, clamp, snap).
    pub fn commit_edit(&mut self) {
        let Some(text) = self.editing.take() else {
            return;
        };
        if let Row::Field(id) = self.row() {
            self.controller.apply(FieldUpdate::Number(id, text));
        }
    }

    /// Drops typed text without applying it.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Switches between the uncapped and capped heuristics.
    pub fn toggle_policy(&mut self) {
        let next = match self.controller.heuristics().policy() {
            Some(Policy::Uncapped) => Policy::Capped,
            _ => Policy::Uncapped,
        };
        self.controller.apply(FieldUpdate::Policy(next));
        self.status = format!("policy: {next}");
    }

    /// Switches to a different preset, replacing all inputs.
    pub fn switch_preset(&mut self, name: &str) {
        let Ok(scenario) = ScenarioConfig::from_preset(name) else {
            return;
        };
        self.controller = Controller::new(scenario.input(), scenario.heuristics.build());
        self.editing = None;
        self.preset_name = name.to_string();
        self.status = format!("preset: {name}");
    }

    /// Restores the current preset's inputs.
    pub fn reset(&mut self) {
        let name = self.preset_name.clone();
        self.switch_preset(&name);
    }

    /// Writes the printable report to [`App::print_path`].
    pub fn print(&mut self) {
        self.commit_edit();
        let report = Report::from_controller(&self.controller);
        match report.write_to_path(&self.print_path) {
            Ok(()) => {
                info!(path = %self.print_path.display(), "printed");
                self.status = format!("printed to {}", self.print_path.display());
            }
            Err(e) => {
                warn!(error = %e, "print failed");
                self.status = format!("print failed: {e}");
            }
        }
    }

    /// Text shown in the focused number box.
    pub fn number_text(&self, row: Row) -> String {
        match row {
            Row::Field(id) => match (&self.editing, self.row() == row) {
                (Some(buf), true) => format!("{buf}_"),
                _ => self.controller.display_value(id),
            },
            Row::Orientation => self.controller.input().orientation.to_string(),
        }
    }

    /// Orientation currently selected.
    pub fn orientation(&self) -> Orientation {
        self.controller.input().orientation
    }
}
