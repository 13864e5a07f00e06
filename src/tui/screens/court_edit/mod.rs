//! Court editor screen: the add/edit dialog as a tabbed full screen.
//!
//! The screen owns a [`CourtEditor`] draft plus per-tab cursor state. Keys
//! are routed to the active tab; Ctrl+S composes the payload and hands it to
//! the app, Esc drops the draft.

mod add_ons;
mod details;
mod price_input;
mod pricing;
mod recurring;
mod schedule;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use crate::model::{CourtEditor, EditorError, Field, FieldError, Photo, ValidationError};
use crate::tui::action::Action;

use add_ons::AddOnsTab;
use details::DetailsTab;
use pricing::PricingTab;
use recurring::RecurringTab;
use schedule::ScheduleTab;

/// Tabs of the court editor, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditTab {
    Fotos,
    Horarios,
    Mensalistas,
    Valores,
    Adicionais,
}

static ALL_TABS: &[EditTab] = &[
    EditTab::Fotos,
    EditTab::Horarios,
    EditTab::Mensalistas,
    EditTab::Valores,
    EditTab::Adicionais,
];

impl EditTab {
    pub fn label(self) -> &'static str {
        match self {
            EditTab::Fotos => "Fotos",
            EditTab::Horarios => "Horários",
            EditTab::Mensalistas => "Mensalistas",
            EditTab::Valores => "Valores",
            EditTab::Adicionais => "Adicionais",
        }
    }

    pub fn all() -> &'static [EditTab] {
        ALL_TABS
    }

    fn index(self) -> usize {
        ALL_TABS.iter().position(|&t| t == self).unwrap_or(0)
    }

    /// The tab where a top-level field is edited.
    fn of_field(field: Field) -> Self {
        match field {
            Field::Name | Field::Sport | Field::Photos => EditTab::Fotos,
            Field::BasePrice => EditTab::Valores,
        }
    }
}

/// State for the court editor screen.
#[derive(Debug, Clone)]
pub struct CourtEditState {
    editor: CourtEditor,
    tab: EditTab,
    details: DetailsTab,
    schedule: ScheduleTab,
    recurring: RecurringTab,
    pricing: PricingTab,
    add_ons: AddOnsTab,
    /// Failures from the last submit that are still unresolved.
    field_errors: Vec<FieldError>,
    error: Option<String>,
}

impl CourtEditState {
    /// Opens the screen on a draft, starting at the Fotos tab.
    pub fn new(editor: CourtEditor) -> Self {
        Self {
            details: DetailsTab::new(&editor),
            schedule: ScheduleTab::new(),
            recurring: RecurringTab::new(),
            pricing: PricingTab::new(&editor),
            add_ons: AddOnsTab::new(),
            editor,
            tab: EditTab::Fotos,
            field_errors: Vec::new(),
            error: None,
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit();
        }
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc) => return Action::CancelEdit,
            (_, KeyCode::F(2)) | (KeyModifiers::ALT, KeyCode::Left) => {
                self.switch_tab(false);
                return Action::None;
            }
            (_, KeyCode::F(3)) | (KeyModifiers::ALT, KeyCode::Right) => {
                self.switch_tab(true);
                return Action::None;
            }
            _ => {}
        }

        let action = match self.tab {
            EditTab::Fotos => self.details.handle_key(&mut self.editor, key),
            EditTab::Horarios => {
                self.schedule.handle_key(&mut self.editor, key);
                Action::None
            }
            EditTab::Mensalistas => {
                self.recurring.handle_key(&mut self.editor, key);
                Action::None
            }
            EditTab::Valores => {
                self.pricing.handle_key(&mut self.editor, key);
                Action::None
            }
            EditTab::Adicionais => {
                self.add_ons.handle_key(&mut self.editor, key);
                Action::None
            }
        };
        self.refresh_field_errors();
        action
    }

    /// Appends photos read from disk. Returns how many were added.
    ///
    /// Fails without changing the draft if the batch would exceed the cap.
    pub fn add_photos(&mut self, photos: Vec<Photo>) -> Result<usize, EditorError> {
        let count = photos.len();
        self.editor.add_photos(photos)?;
        self.details.photos_added();
        self.refresh_field_errors();
        Ok(count)
    }

    /// Returns the draft being edited.
    pub fn editor(&self) -> &CourtEditor {
        &self.editor
    }

    /// Returns the active tab.
    pub fn tab(&self) -> EditTab {
        self.tab
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets an error message to display.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    /// Returns the unresolved submit failure for `field`, if any.
    pub fn field_error(&self, field: Field) -> Option<&ValidationError> {
        self.field_errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.error)
    }

    fn switch_tab(&mut self, forward: bool) {
        self.tab = cycle(EditTab::all(), self.tab, forward);
    }

    /// Validates the draft and emits a save action when it is complete.
    fn submit(&mut self) -> Action {
        self.error = None;

        if let Some(tab) = self.tab_with_malformed_input() {
            tracing::info!(tab = tab.label(), "submission blocked by malformed price");
            self.error = Some("Corrija os valores inválidos antes de salvar".into());
            self.tab = tab;
            return Action::None;
        }

        match self.editor.submit() {
            Ok(payload) => {
                self.field_errors.clear();
                Action::SaveCourt(self.editor.court_id(), payload)
            }
            Err(EditorError::Invalid(errors)) => {
                tracing::info!(count = errors.len(), "court submission rejected");
                self.error = Some(rejection_message(&errors).into());
                if let Some(first) = errors.first() {
                    self.tab = EditTab::of_field(first.field);
                }
                self.field_errors = errors;
                Action::None
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Action::None
            }
        }
    }

    fn tab_with_malformed_input(&self) -> Option<EditTab> {
        if !self.pricing.inputs_valid() {
            Some(EditTab::Valores)
        } else if !self.add_ons.inputs_valid(&self.editor) {
            Some(EditTab::Adicionais)
        } else {
            None
        }
    }

    /// Drops reported field errors that the user has since fixed.
    fn refresh_field_errors(&mut self) {
        if self.field_errors.is_empty() {
            return;
        }
        let current = self.editor.validate();
        self.field_errors.retain(|e| current.contains(e));
        if self.field_errors.is_empty() {
            self.error = None;
        }
    }
}

fn rejection_message(errors: &[FieldError]) -> &'static str {
    if errors.iter().any(|e| e.error == ValidationError::NoPhotos) {
        "Adicione ao menos 1 foto"
    } else {
        "Verifique os campos destacados"
    }
}

/// Returns `true` for keys that should type into a text cell.
fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Cycles through a slice to find the next or previous element.
fn cycle<T: PartialEq + Copy>(items: &[T], current: T, forward: bool) -> T {
    let pos = items.iter().position(|&x| x == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % items.len()
    } else {
        (pos + items.len() - 1) % items.len()
    };
    items[next]
}

/// Moves a row cursor by one within `0..len`, without wrapping.
fn step(selected: usize, len: usize, forward: bool) -> usize {
    if forward {
        (selected + 1).min(len.saturating_sub(1))
    } else {
        selected.saturating_sub(1)
    }
}

/// Renders the court editor screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_court_edit(state: &CourtEditState, frame: &mut Frame, area: Rect) {
    let title = if state.editor.is_editing() {
        " Editar Quadra "
    } else {
        " Adicionar Nova Quadra "
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, body_area, error_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let titles: Vec<&str> = EditTab::all().iter().map(|t| t.label()).collect();
    let tabs = Tabs::new(titles)
        .select(state.tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    frame.render_widget(tabs, tabs_area);

    match state.tab {
        EditTab::Fotos => details::draw(state, frame, body_area),
        EditTab::Horarios => schedule::draw(state, frame, body_area),
        EditTab::Mensalistas => recurring::draw(state, frame, body_area),
        EditTab::Valores => pricing::draw(state, frame, body_area),
        EditTab::Adicionais => add_ons::draw(state, frame, body_area),
    }

    if let Some(err) = state.error() {
        let err_line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(err_line, error_area);
    }

    let footer = Paragraph::new("Ctrl+S: salvar  Esc: cancelar  F2/F3: aba  F1: ajuda")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::{Court, SportType};

    pub(super) fn press(code: KeyCode) -> KeyEvent {
        with_modifiers(code, KeyModifiers::NONE)
    }

    pub(super) fn ctrl(code: KeyCode) -> KeyEvent {
        with_modifiers(code, KeyModifiers::CONTROL)
    }

    pub(super) fn alt(code: KeyCode) -> KeyEvent {
        with_modifiers(code, KeyModifiers::ALT)
    }

    pub(super) fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    pub(super) fn type_string(state: &mut CourtEditState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn photo() -> Photo {
        Photo::new("https://example.com/quadra.jpg")
    }

    fn filled_state() -> CourtEditState {
        let mut state = CourtEditState::new(CourtEditor::new());
        type_string(&mut state, "Quadra Teste");
        state.handle_key(alt(KeyCode::Char('e')));
        state.add_photos(vec![photo()]).unwrap();
        state
    }

    mod construction {
        use super::*;

        #[test]
        fn starts_on_fotos_tab() {
            let state = CourtEditState::new(CourtEditor::new());
            assert_eq!(state.tab(), EditTab::Fotos);
            assert_eq!(state.error(), None);
            assert!(!state.editor().is_editing());
        }

        #[test]
        fn tab_labels() {
            let labels: Vec<&str> = EditTab::all().iter().map(|t| t.label()).collect();
            assert_eq!(
                labels,
                vec!["Fotos", "Horários", "Mensalistas", "Valores", "Adicionais"]
            );
        }
    }

    mod tabs {
        use super::*;

        #[test]
        fn f3_moves_forward() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.handle_key(press(KeyCode::F(3)));
            assert_eq!(state.tab(), EditTab::Horarios);
        }

        #[test]
        fn f2_wraps_backward() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.handle_key(press(KeyCode::F(2)));
            assert_eq!(state.tab(), EditTab::Adicionais);
        }

        #[test]
        fn alt_arrows_switch_tabs() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.handle_key(alt(KeyCode::Right));
            state.handle_key(alt(KeyCode::Right));
            assert_eq!(state.tab(), EditTab::Mensalistas);
            state.handle_key(alt(KeyCode::Left));
            assert_eq!(state.tab(), EditTab::Horarios);
        }

        #[test]
        fn switching_tabs_keeps_draft() {
            let mut state = CourtEditState::new(CourtEditor::new());
            type_string(&mut state, "Arena");
            state.handle_key(press(KeyCode::F(3)));
            state.handle_key(press(KeyCode::F(2)));
            assert_eq!(state.editor().name(), "Arena");
        }
    }

    mod cancel {
        use super::*;

        #[test]
        fn esc_cancels_from_any_tab() {
            for _ in EditTab::all() {
                let mut state = CourtEditState::new(CourtEditor::new());
                assert_eq!(state.handle_key(press(KeyCode::Esc)), Action::CancelEdit);
            }
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn complete_draft_emits_save() {
            let mut state = filled_state();
            match state.handle_key(ctrl(KeyCode::Char('s'))) {
                Action::SaveCourt(None, payload) => {
                    assert_eq!(payload.name, "Quadra Teste");
                    assert_eq!(payload.sport_type, SportType::FutebolSociety);
                    assert_eq!(payload.base_price_per_hour, Decimal::from(100));
                    assert_eq!(payload.photos, vec![photo()]);
                }
                other => panic!("expected SaveCourt, got {other:?}"),
            }
            assert_eq!(state.error(), None);
        }

        #[test]
        fn editing_existing_court_keeps_id() {
            let payload = filled_state().editor().submit().unwrap();
            let court = Court::new(4, payload);
            let mut state = CourtEditState::new(CourtEditor::from_court(&court));
            match state.handle_key(ctrl(KeyCode::Char('s'))) {
                Action::SaveCourt(Some(4), _) => {}
                other => panic!("expected SaveCourt(Some(4)), got {other:?}"),
            }
        }

        #[test]
        fn photo_less_draft_is_rejected() {
            let mut state = CourtEditState::new(CourtEditor::new());
            type_string(&mut state, "Quadra Teste");
            state.handle_key(alt(KeyCode::Char('e')));
            state.handle_key(press(KeyCode::F(3)));

            assert_eq!(state.handle_key(ctrl(KeyCode::Char('s'))), Action::None);
            assert_eq!(state.error(), Some("Adicione ao menos 1 foto"));
            assert_eq!(state.tab(), EditTab::Fotos);
            assert_eq!(
                state.field_error(Field::Photos),
                Some(&ValidationError::NoPhotos)
            );
        }

        #[test]
        fn empty_draft_flags_every_field() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.handle_key(ctrl(KeyCode::Char('s')));
            assert!(state.field_error(Field::Name).is_some());
            assert!(state.field_error(Field::Sport).is_some());
            assert!(state.field_error(Field::Photos).is_some());
            assert_eq!(state.field_error(Field::BasePrice), None);
        }

        #[test]
        fn fixed_field_error_clears_on_edit() {
            let mut state = filled_state();
            for _ in 0.."Quadra Teste".len() {
                state.handle_key(press(KeyCode::Backspace));
            }
            type_string(&mut state, "Ab");
            state.handle_key(ctrl(KeyCode::Char('s')));
            assert_eq!(
                state.field_error(Field::Name),
                Some(&ValidationError::NameTooShort)
            );

            type_string(&mut state, "c");
            assert_eq!(state.field_error(Field::Name), None);
            assert_eq!(state.error(), None);
        }

        #[test]
        fn malformed_base_price_blocks_submit() {
            let mut state = filled_state();
            for _ in 0..3 {
                state.handle_key(press(KeyCode::F(3)));
            }
            assert_eq!(state.tab(), EditTab::Valores);
            for _ in 0..3 {
                state.handle_key(press(KeyCode::Backspace));
            }
            state.handle_key(press(KeyCode::F(3)));

            assert_eq!(state.handle_key(ctrl(KeyCode::Char('s'))), Action::None);
            assert_eq!(state.tab(), EditTab::Valores);
            assert!(state.error().is_some());
        }

        #[test]
        fn zero_base_price_is_flagged_on_valores() {
            let mut state = filled_state();
            for _ in 0..3 {
                state.handle_key(press(KeyCode::F(3)));
            }
            for _ in 0..3 {
                state.handle_key(press(KeyCode::Backspace));
            }
            type_string(&mut state, "0");
            state.handle_key(press(KeyCode::F(2)));

            state.handle_key(ctrl(KeyCode::Char('s')));
            assert_eq!(state.tab(), EditTab::Valores);
            assert_eq!(
                state.field_error(Field::BasePrice),
                Some(&ValidationError::NonPositivePrice)
            );
        }

        #[test]
        fn failed_submit_keeps_draft() {
            let mut state = CourtEditState::new(CourtEditor::new());
            type_string(&mut state, "Quadra");
            let before = state.editor().clone();
            state.handle_key(ctrl(KeyCode::Char('s')));
            assert_eq!(state.editor(), &before);
        }
    }

    mod photos {
        use super::*;

        #[test]
        fn add_photos_reports_count() {
            let mut state = CourtEditState::new(CourtEditor::new());
            assert_eq!(state.add_photos(vec![photo(), photo()]), Ok(2));
            assert_eq!(state.editor().photos().len(), 2);
        }

        #[test]
        fn add_photos_over_cap_changes_nothing() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.add_photos(vec![photo(); 4]).unwrap();
            assert!(state.add_photos(vec![photo(); 2]).is_err());
            assert_eq!(state.editor().photos().len(), 4);
        }

        #[test]
        fn adding_photo_clears_missing_photo_error() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.handle_key(ctrl(KeyCode::Char('s')));
            assert!(state.field_error(Field::Photos).is_some());
            state.add_photos(vec![photo()]).unwrap();
            assert_eq!(state.field_error(Field::Photos), None);
        }
    }

    mod helpers {
        use super::*;

        #[test]
        fn cycle_wraps_both_ways() {
            let items = [1, 2, 3];
            assert_eq!(cycle(&items, 3, true), 1);
            assert_eq!(cycle(&items, 1, false), 3);
        }

        #[test]
        fn step_clamps() {
            assert_eq!(step(0, 3, false), 0);
            assert_eq!(step(2, 3, true), 2);
            assert_eq!(step(1, 3, true), 2);
            assert_eq!(step(0, 0, true), 0);
        }
    }

    pub(super) mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        pub(crate) fn render(state: &CourtEditState) -> String {
            let backend = TestBackend::new(110, 32);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal
                .draw(|frame| draw_court_edit(state, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn new_court_title() {
            let output = render(&CourtEditState::new(CourtEditor::new()));
            assert!(output.contains("Adicionar Nova Quadra"));
            assert!(output.contains("Mensalistas"));
            assert!(output.contains("Ctrl+S: salvar"));
        }

        #[test]
        fn edit_court_title() {
            let payload = filled_state().editor().submit().unwrap();
            let state = CourtEditState::new(CourtEditor::from_court(&Court::new(1, payload)));
            assert!(render(&state).contains("Editar Quadra"));
        }

        #[test]
        fn renders_submit_error() {
            let mut state = CourtEditState::new(CourtEditor::new());
            state.handle_key(ctrl(KeyCode::Char('s')));
            assert!(render(&state).contains("Adicione ao menos 1 foto"));
        }

        #[test]
        fn every_tab_renders() {
            let mut state = filled_state();
            for tab in EditTab::all() {
                assert_eq!(state.tab(), *tab);
                render(&state);
                state.handle_key(press(KeyCode::F(3)));
            }
        }
    }
}
