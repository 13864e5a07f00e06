//! Adicionais tab: optional extras, racket rental and custom add-ons.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::price_input::PriceInput;
use super::{CourtEditState, is_plain, step};
use crate::model::{
    AddOn, CourtEditor, EditorError, RACKET_ADD_ON, RACKET_DEFAULT_PRICE, ValidationError,
    format_price, parse_price,
};
use crate::tui::widgets::{Form, FormField, draw_form};

const CUSTOM_NAME: usize = 0;
const CUSTOM_PRICE: usize = 1;

/// One selectable line of the tab.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    General(String),
    Racket,
    Custom,
}

/// General add-ons in draft order, the racket row for racket sports, then the custom form.
fn entries(editor: &CourtEditor) -> Vec<Entry> {
    let mut entries: Vec<Entry> = editor
        .general_add_ons()
        .map(|a| Entry::General(a.name.clone()))
        .collect();
    if editor.show_racket_add_on() {
        entries.push(Entry::Racket);
    }
    entries.push(Entry::Custom);
    entries
}

#[derive(Debug, Clone)]
pub(super) struct AddOnsTab {
    selected: usize,
    /// Price text per add-on name, created on first edit.
    prices: BTreeMap<String, PriceInput>,
    custom: Form,
    error: Option<String>,
}

impl AddOnsTab {
    pub(super) fn new() -> Self {
        Self {
            selected: 0,
            prices: BTreeMap::new(),
            custom: Form::new(vec![
                FormField::new("Nome", true).with_hint("Ex: Toalha"),
                FormField::new("Valor", true).with_hint("Ex: 5,00"),
            ]),
            error: None,
        }
    }

    pub(super) fn handle_key(&mut self, editor: &mut CourtEditor, key: KeyEvent) {
        let entries = entries(editor);
        self.selected = self.selected.min(entries.len() - 1);
        match key.code {
            KeyCode::Up => self.selected = step(self.selected, entries.len(), false),
            KeyCode::Down => self.selected = step(self.selected, entries.len(), true),
            _ => match &entries[self.selected] {
                Entry::General(name) => self.handle_add_on_key(editor, name, false, key),
                Entry::Racket => self.handle_add_on_key(editor, RACKET_ADD_ON, true, key),
                Entry::Custom => self.handle_custom_key(editor, key),
            },
        }
    }

    /// `false` while an enabled, visible add-on holds a price that does not parse.
    pub(super) fn inputs_valid(&self, editor: &CourtEditor) -> bool {
        self.prices.iter().all(|(name, input)| {
            let counted = editor.add_on(name).is_some_and(|a| a.enabled)
                && (name != RACKET_ADD_ON || editor.show_racket_add_on());
            input.is_valid() || !counted
        })
    }

    fn handle_add_on_key(
        &mut self,
        editor: &mut CourtEditor,
        name: &str,
        racket: bool,
        key: KeyEvent,
    ) {
        self.error = None;
        let current = editor.add_on(name).cloned();
        let enabled = current.as_ref().is_some_and(|a| a.enabled);

        let result = match key.code {
            KeyCode::Char(' ') if racket => editor.set_racket_add_on(!enabled),
            KeyCode::Char(' ') => editor.set_add_on_enabled(name, !enabled),
            KeyCode::Char(_) | KeyCode::Backspace if !is_plain(&key) => Ok(()),
            KeyCode::Char(_) | KeyCode::Backspace => match current {
                Some(add_on) if add_on.enabled => self.edit_price(editor, &add_on, key.code),
                _ => Err(EditorError::AddOnDisabled(name.to_string())),
            },
            _ => Ok(()),
        };
        match result {
            Ok(()) => {
                if key.code == KeyCode::Char(' ') {
                    tracing::debug!(name, enabled = !enabled, "add-on toggled");
                }
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn edit_price(
        &mut self,
        editor: &mut CourtEditor,
        add_on: &AddOn,
        code: KeyCode,
    ) -> Result<(), EditorError> {
        let input = self
            .prices
            .entry(add_on.name.clone())
            .or_insert_with(|| PriceInput::new(add_on.price));
        match input.edit(code).then(|| input.parse()).flatten() {
            Some(price) => editor.set_add_on_price(&add_on.name, price),
            None => Ok(()),
        }
    }

    fn handle_custom_key(&mut self, editor: &mut CourtEditor, key: KeyEvent) {
        match key.code {
            KeyCode::Tab => self.custom.focus_next(),
            KeyCode::BackTab => self.custom.focus_prev(),
            KeyCode::Enter => self.add_custom(editor),
            KeyCode::Char(ch) if is_plain(&key) => {
                self.custom.insert_char(ch);
                self.custom.clear_error(self.custom.focus());
            }
            KeyCode::Backspace => {
                self.custom.delete_char();
                self.custom.clear_error(self.custom.focus());
            }
            _ => {}
        }
    }

    fn add_custom(&mut self, editor: &mut CourtEditor) {
        self.custom.clear_errors();
        let name = self.custom.value(CUSTOM_NAME).to_string();
        let price = self.custom.value(CUSTOM_PRICE).to_string();

        // Flag every bad field before touching the draft.
        if name.trim().is_empty() {
            self.custom
                .set_error(CUSTOM_NAME, ValidationError::EmptyAddOnName.to_string());
        }
        if let Err(e) = parse_price(&price) {
            self.custom.set_error(CUSTOM_PRICE, e.to_string());
        }
        if self.custom.has_errors() {
            return;
        }

        match editor.add_custom_add_on(&name, &price) {
            Ok(()) => {
                tracing::info!(name = name.trim(), "custom add-on added");
                self.custom.clear_value(CUSTOM_NAME);
                self.custom.clear_value(CUSTOM_PRICE);
                self.custom.set_focus(CUSTOM_NAME);
                self.selected = entries(editor).len() - 1;
            }
            Err(EditorError::Validation(
                e @ (ValidationError::EmptyAddOnName | ValidationError::ReservedAddOnName(_)),
            )) => {
                self.custom.set_error(CUSTOM_NAME, e.to_string());
            }
            Err(EditorError::Validation(e @ ValidationError::InvalidPrice(_))) => {
                self.custom.set_error(CUSTOM_PRICE, e.to_string());
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    fn price_text(&self, add_on: &AddOn) -> String {
        match self.prices.get(&add_on.name) {
            Some(input) => format!("R$ {}", input.text()),
            None => format_price(add_on.price),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(super) fn draw(state: &CourtEditState, frame: &mut Frame, area: Rect) {
    let tab = &state.add_ons;
    let editor = &state.editor;
    let entries = entries(editor);
    let selected = tab.selected.min(entries.len() - 1);

    let [list_area, form_area, error_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(7),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let mut lines = vec![Line::from(Span::styled(
        "Adicionais disponíveis",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    for (i, entry) in entries.iter().enumerate() {
        let style = if i == selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default()
        };
        let line = match entry {
            Entry::General(name) => match editor.add_on(name) {
                Some(add_on) => add_on_line(tab, add_on, None, style),
                None => continue,
            },
            Entry::Racket => {
                let sport = editor.sport().map(|s| s.name()).unwrap_or_default();
                let note = format!("Disponível para {sport}");
                match editor.add_on(RACKET_ADD_ON) {
                    Some(add_on) => add_on_line(tab, add_on, Some(note), style),
                    None => {
                        let off = AddOn::new(
                            RACKET_ADD_ON,
                            rust_decimal::Decimal::from(RACKET_DEFAULT_PRICE),
                            false,
                        );
                        add_on_line(tab, &off, Some(note), style)
                    }
                }
            }
            Entry::Custom => Line::from(Span::styled("+ Adicionar item personalizado", style)),
        };
        lines.push(line);
    }
    frame.render_widget(Paragraph::new(lines), list_area);

    let custom_active = entries.get(selected) == Some(&Entry::Custom);
    draw_form(&tab.custom, custom_active, frame, form_area);

    if let Some(err) = tab.error.as_deref() {
        let line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(line, error_area);
    }

    let hint = Paragraph::new("↑/↓: item  Espaço: ativar  0-9 , .: valor  Enter: incluir item")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hint_area);
}

fn add_on_line(
    tab: &AddOnsTab,
    add_on: &AddOn,
    note: Option<String>,
    style: Style,
) -> Line<'static> {
    let check = if add_on.enabled { "[x]" } else { "[ ]" };
    let mut spans = vec![
        Span::styled(format!("{check} {}", add_on.name), style),
        Span::raw("  "),
        Span::raw(tab.price_text(add_on)),
    ];
    if let Some(err) = tab.prices.get(&add_on.name).and_then(PriceInput::error) {
        spans.push(Span::styled(
            format!("  {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    if let Some(note) = note {
        spans.push(Span::styled(
            format!("  {note}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::model::SportType;
    use crate::tui::screens::court_edit::tests::rendering::render;
    use crate::tui::screens::court_edit::tests::{ctrl, press, type_string};

    fn on_add_ons_tab(editor: CourtEditor) -> CourtEditState {
        let mut state = CourtEditState::new(editor);
        for _ in 0..4 {
            state.handle_key(press(KeyCode::F(3)));
        }
        state
    }

    fn with_sport(sport: SportType) -> CourtEditor {
        let mut editor = CourtEditor::new();
        editor.set_sport(Some(sport));
        editor
    }

    mod entries {
        use super::*;

        #[test]
        fn no_racket_row_without_racket_sport() {
            let editor = with_sport(SportType::FutebolSociety);
            assert_eq!(
                entries(&editor),
                vec![
                    Entry::General("Bola".into()),
                    Entry::General("Coletes".into()),
                    Entry::Custom,
                ]
            );
        }

        #[test]
        fn racket_row_before_custom() {
            let editor = with_sport(SportType::BeachTennis);
            let entries = entries(&editor);
            assert_eq!(entries.len(), 4);
            assert_eq!(entries[2], Entry::Racket);
        }
    }

    mod toggling {
        use super::*;

        #[test]
        fn space_enables_general_add_on() {
            let mut state = on_add_ons_tab(CourtEditor::new());
            state.handle_key(press(KeyCode::Char(' ')));
            assert!(state.editor().add_on("Bola").unwrap().enabled);
            state.handle_key(press(KeyCode::Char(' ')));
            assert!(!state.editor().add_on("Bola").unwrap().enabled);
        }

        #[test]
        fn space_enables_racket_rental_at_default_price() {
            let mut state = on_add_ons_tab(with_sport(SportType::Padel));
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Char(' ')));
            assert!(state.editor().racket_add_on_enabled());
            assert_eq!(
                state.editor().add_on(RACKET_ADD_ON).unwrap().price,
                Decimal::from(RACKET_DEFAULT_PRICE)
            );
        }

        #[test]
        fn selection_clamped_when_racket_row_disappears() {
            let mut state = on_add_ons_tab(with_sport(SportType::Tenis));
            for _ in 0..3 {
                state.handle_key(press(KeyCode::Down));
            }
            state.editor.set_sport(Some(SportType::Volei));
            state.handle_key(press(KeyCode::Char('x')));
            assert_eq!(state.add_ons.custom.value(CUSTOM_NAME), "x");
        }
    }

    mod prices {
        use super::*;

        #[test]
        fn disabled_add_on_price_is_locked() {
            let mut state = on_add_ons_tab(CourtEditor::new());
            type_string(&mut state, "5");
            assert_eq!(state.editor().add_on("Bola").unwrap().price, Decimal::from(10));
            assert_eq!(
                state.add_ons.error.as_deref(),
                Some("add-on Bola must be enabled before its price can change")
            );
        }

        #[test]
        fn enabled_add_on_price_updates() {
            let mut state = on_add_ons_tab(CourtEditor::new());
            state.handle_key(press(KeyCode::Char(' ')));
            state.handle_key(press(KeyCode::Backspace));
            state.handle_key(press(KeyCode::Backspace));
            type_string(&mut state, "12,50");
            assert_eq!(
                state.editor().add_on("Bola").unwrap().price,
                Decimal::new(1250, 2)
            );
            assert!(state.add_ons.inputs_valid(state.editor()));
        }

        #[test]
        fn malformed_price_counts_only_while_enabled() {
            let mut state = on_add_ons_tab(CourtEditor::new());
            state.handle_key(press(KeyCode::Char(' ')));
            type_string(&mut state, "..");
            assert!(!state.add_ons.inputs_valid(state.editor()));

            state.handle_key(press(KeyCode::Char(' ')));
            assert!(state.add_ons.inputs_valid(state.editor()));
        }

        #[test]
        fn control_keys_are_ignored() {
            let mut state = on_add_ons_tab(CourtEditor::new());
            state.handle_key(press(KeyCode::Char(' ')));
            state.handle_key(ctrl(KeyCode::Char('1')));
            assert_eq!(state.editor().add_on("Bola").unwrap().price, Decimal::from(10));
        }
    }

    mod custom {
        use super::*;

        fn on_custom_row() -> CourtEditState {
            let mut state = on_add_ons_tab(CourtEditor::new());
            state.handle_key(press(KeyCode::Down));
            state.handle_key(press(KeyCode::Down));
            state
        }

        #[test]
        fn enter_adds_enabled_add_on() {
            let mut state = on_custom_row();
            type_string(&mut state, " Toalha ");
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "5,00");
            state.handle_key(press(KeyCode::Enter));

            let added = state.editor().add_on("Toalha").unwrap();
            assert_eq!(added.price, Decimal::from(5));
            assert!(added.enabled);
            assert_eq!(state.add_ons.custom.value(CUSTOM_NAME), "");
            assert_eq!(state.add_ons.custom.value(CUSTOM_PRICE), "");
            assert_eq!(state.add_ons.selected, 3);
        }

        #[test]
        fn empty_name_flags_name_field() {
            let mut state = on_custom_row();
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "5");
            state.handle_key(press(KeyCode::Enter));
            assert_eq!(state.editor().add_ons().len(), 2);
            assert!(state.add_ons.custom.fields()[CUSTOM_NAME].error.is_some());
            assert!(state.add_ons.custom.fields()[CUSTOM_PRICE].error.is_none());
        }

        #[test]
        fn bad_price_flags_price_field_and_keeps_text() {
            let mut state = on_custom_row();
            type_string(&mut state, "Toalha");
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "abc");
            state.handle_key(press(KeyCode::Enter));
            assert!(state.editor().add_on("Toalha").is_none());
            assert!(state.add_ons.custom.fields()[CUSTOM_PRICE].error.is_some());
            assert_eq!(state.add_ons.custom.value(CUSTOM_NAME), "Toalha");
        }

        #[test]
        fn empty_form_flags_both_fields() {
            let mut state = on_custom_row();
            state.handle_key(press(KeyCode::Enter));
            let fields = state.add_ons.custom.fields();
            assert!(fields[CUSTOM_NAME].error.is_some());
            assert!(fields[CUSTOM_PRICE].error.is_some());
            assert_eq!(state.editor().add_ons().len(), 2);
        }

        #[test]
        fn racket_name_is_reserved() {
            let mut state = on_custom_row();
            type_string(&mut state, "Raquetes");
            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "5");
            state.handle_key(press(KeyCode::Enter));
            assert_eq!(
                state.add_ons.custom.fields()[CUSTOM_NAME].error.as_deref(),
                Some("add-on name Raquetes is reserved")
            );
            assert!(state.editor().add_on(RACKET_ADD_ON).is_none());
        }

        #[test]
        fn typing_clears_field_error() {
            let mut state = on_custom_row();
            state.handle_key(press(KeyCode::Enter));
            type_string(&mut state, "T");
            let fields = state.add_ons.custom.fields();
            assert!(fields[CUSTOM_NAME].error.is_none());
            assert!(fields[CUSTOM_PRICE].error.is_some());

            state.handle_key(press(KeyCode::Tab));
            type_string(&mut state, "5");
            assert!(!state.add_ons.custom.has_errors());
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn renders_starter_add_ons() {
            let output = render(&on_add_ons_tab(CourtEditor::new()));
            assert!(output.contains("[ ] Bola  R$ 10"));
            assert!(output.contains("[ ] Coletes  R$ 15"));
            assert!(output.contains("Adicionar item personalizado"));
        }

        #[test]
        fn renders_racket_row_for_racket_sport() {
            let output = render(&on_add_ons_tab(with_sport(SportType::Padel)));
            assert!(output.contains("[ ] Raquetes  R$ 20"));
            assert!(output.contains("Disponível para Padel"));
        }
    }
}
