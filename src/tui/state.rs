//! TUI state definitions
//!
//! A page's forms and console live in [`PageState`]. The shell in
//! `App` replaces it wholesale on navigation, so nothing typed on one visit
//! survives to the next.

use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

use btcguide::guide::{FieldSpec, GuideAction, Route};
use btcguide::NetworkSelection;

use crate::tui::components::{TextArea, TextInput};

/// Which pane receives key presses
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Focus {
    #[default]
    Sidebar,
    Page,
    /// Network selection popup
    NetworkSelect,
}

// ============================================================================
// Form Fields
// ============================================================================

/// Input widget for one [`FieldSpec`]
#[derive(Clone)]
pub enum FieldInput {
    Line(TextInput),
    Area(TextArea),
}

impl FieldInput {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        if spec.multiline {
            let mut area = TextArea::new(spec.label).with_placeholder(spec.placeholder);
            area.set_content(spec.default);
            Self::Area(area)
        } else {
            let input = TextInput::new(spec.label)
                .with_placeholder(spec.placeholder)
                .with_value(spec.default);
            Self::Line(if spec.numeric { input.numeric() } else { input })
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::Line(input) => input.value().to_string(),
            Self::Area(area) => area.content(),
        }
    }

    pub fn set_value(&mut self, value: &str) {
        match self {
            Self::Line(input) => input.set_value(value),
            Self::Area(area) => area.set_content(value),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self {
            Self::Line(input) => input.handle_key(key),
            Self::Area(area) => area.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self {
            Self::Line(input) => input.handle_paste(text),
            Self::Area(area) => area.handle_paste(text),
        }
    }

    /// Rows needed, borders included
    pub fn height(&self) -> u16 {
        match self {
            Self::Line(_) => 3,
            Self::Area(_) => 5,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        match self {
            Self::Line(input) => input.render(frame, area, focused),
            Self::Area(text_area) => text_area.render(frame, area, focused),
        }
    }
}

// ============================================================================
// Page State
// ============================================================================

/// One action section and its inputs
#[derive(Clone)]
pub struct SectionState {
    pub action: GuideAction,
    pub fields: Vec<FieldInput>,
}

impl SectionState {
    pub fn new(action: GuideAction) -> Self {
        Self {
            action,
            fields: action.fields().iter().map(FieldInput::from_spec).collect(),
        }
    }

    pub fn values(&self) -> Vec<String> {
        self.fields.iter().map(FieldInput::value).collect()
    }
}

/// Forms and console of the page being shown
#[derive(Clone)]
pub struct PageState {
    pub route: Route,
    pub sections: Vec<SectionState>,
    /// Focused section
    pub section: usize,
    /// Focused field within the section
    pub field: usize,
    /// Latest result; one per page
    pub console: String,
    pub console_scroll: u16,
}

impl PageState {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            sections: route.actions().iter().copied().map(SectionState::new).collect(),
            section: 0,
            field: 0,
            console: String::new(),
            console_scroll: 0,
        }
    }

    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    pub fn current_section(&self) -> Option<&SectionState> {
        self.sections.get(self.section)
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FieldInput> {
        let field = self.field;
        self.sections
            .get_mut(self.section)
            .and_then(|s| s.fields.get_mut(field))
    }

    /// Move to the next field, continuing into the next section
    pub fn next_field(&mut self) {
        let Some(section) = self.current_section() else {
            return;
        };
        if self.field + 1 < section.fields.len() {
            self.field += 1;
        } else {
            self.section = (self.section + 1) % self.sections.len();
            self.field = 0;
        }
    }

    /// Move to the previous field, continuing into the previous section
    pub fn prev_field(&mut self) {
        if !self.has_sections() {
            return;
        }
        if self.field > 0 {
            self.field -= 1;
        } else {
            self.section = if self.section == 0 {
                self.sections.len() - 1
            } else {
                self.section - 1
            };
            self.field = self.sections[self.section].fields.len().saturating_sub(1);
        }
    }

    /// Run the focused section's action and show its result.
    ///
    /// A PSBT produced by one section is copied into every later section
    /// that takes a PSBT as its first field.
    pub fn run_action(&mut self, network: NetworkSelection) {
        let Some(section) = self.current_section() else {
            return;
        };
        let action = section.action;
        let output = action.run(&section.values(), network);

        if action.produces_psbt() && !output.starts_with("Error:") {
            for target in self
                .sections
                .iter_mut()
                .filter(|s| matches!(s.action, GuideAction::AddPartialSig | GuideAction::InspectPsbt))
            {
                if let Some(field) = target.fields.first_mut() {
                    field.set_value(&output);
                }
            }
        }

        self.console = output;
        self.console_scroll = 0;
    }

    pub fn scroll_console_down(&mut self) {
        let max = self.console.lines().count().saturating_sub(1) as u16;
        self.console_scroll = (self.console_scroll + 5).min(max);
    }

    pub fn scroll_console_up(&mut self) {
        self.console_scroll = self.console_scroll.saturating_sub(5);
    }
}
