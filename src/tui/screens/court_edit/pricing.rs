//! Valores tab: base hourly price and special prices per weekday+slot.

use std::collections::BTreeMap;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use super::price_input::PriceInput;
use super::recurring::{cycle_slot, slot_label};
use super::{CourtEditState, cycle, is_plain, step};
use crate::model::{CourtEditor, EditorError, Field, SpecialPrice, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Weekday,
    Slot,
    Price,
}

static COLUMNS: &[Column] = &[Column::Weekday, Column::Slot, Column::Price];

/// Row 0 is the base price; rows from 1 are special prices in draft order.
#[derive(Debug, Clone)]
pub(super) struct PricingTab {
    selected: usize,
    column: Column,
    base: PriceInput,
    specials: BTreeMap<u32, PriceInput>,
    error: Option<String>,
}

impl PricingTab {
    pub(super) fn new(editor: &CourtEditor) -> Self {
        let specials = editor
            .special_prices()
            .iter()
            .map(|p| (p.id, PriceInput::new(p.price)))
            .collect();
        Self {
            selected: 0,
            column: Column::Weekday,
            base: PriceInput::new(editor.base_price()),
            specials,
            error: None,
        }
    }

    pub(super) fn handle_key(&mut self, editor: &mut CourtEditor, key: KeyEvent) {
        self.error = None;
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    let id = editor.add_special_price();
                    if let Some(added) = editor.special_prices().iter().find(|p| p.id == id) {
                        self.specials.insert(id, PriceInput::new(added.price));
                    }
                    tracing::debug!(id, "special price added");
                    self.selected = editor.special_prices().len();
                    self.column = Column::Weekday;
                }
                KeyCode::Char('d') => self.remove_selected(editor),
                _ => {}
            }
            return;
        }

        let rows = editor.special_prices().len() + 1;
        match key.code {
            KeyCode::Up => self.selected = step(self.selected, rows, false),
            KeyCode::Down => self.selected = step(self.selected, rows, true),
            KeyCode::Tab => self.column = cycle(COLUMNS, self.column, true),
            KeyCode::BackTab => self.column = cycle(COLUMNS, self.column, false),
            _ if !is_plain(&key) => {}
            code if self.selected == 0 => {
                if let Some(price) = self.base.edit(code).then(|| self.base.parse()).flatten() {
                    editor.set_base_price(price);
                }
            }
            code => {
                let Some(special) = editor.special_prices().get(self.selected - 1).cloned() else {
                    return;
                };
                if let Err(e) = self.edit_special(editor, &special, code) {
                    self.error = Some(e.to_string());
                }
            }
        }
    }

    /// `false` while any price cell holds text that does not parse.
    pub(super) fn inputs_valid(&self) -> bool {
        self.base.is_valid() && self.specials.values().all(PriceInput::is_valid)
    }

    fn edit_special(
        &mut self,
        editor: &mut CourtEditor,
        special: &SpecialPrice,
        code: KeyCode,
    ) -> Result<(), EditorError> {
        let forward = code != KeyCode::Left;
        let cycles = matches!(
            code,
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter
        );
        match self.column {
            Column::Weekday if cycles => editor.set_special_weekday(
                special.id,
                cycle(Weekday::all(), special.weekday, forward),
            ),
            Column::Slot if cycles => {
                editor.set_special_slot(special.id, cycle_slot(special.slot, forward))
            }
            Column::Price => {
                let input = self
                    .specials
                    .entry(special.id)
                    .or_insert_with(|| PriceInput::new(special.price));
                match input.edit(code).then(|| input.parse()).flatten() {
                    Some(price) => editor.set_special_price(special.id, price),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        }
    }

    fn remove_selected(&mut self, editor: &mut CourtEditor) {
        let Some(id) = self
            .selected
            .checked_sub(1)
            .and_then(|i| editor.special_prices().get(i))
            .map(|p| p.id)
        else {
            return;
        };
        match editor.remove_special_price(id) {
            Ok(_) => {
                tracing::debug!(id, "special price removed");
                self.specials.remove(&id);
                self.selected = self.selected.min(editor.special_prices().len());
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(super) fn draw(state: &CourtEditState, frame: &mut Frame, area: Rect) {
    let tab = &state.pricing;
    let editor = &state.editor;

    let [base_area, table_area, warning_area, error_area, hint_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let selected_style = Style::default().fg(Color::Black).bg(Color::Yellow);
    let base_style = if tab.selected == 0 {
        selected_style
    } else {
        Style::default()
    };
    let mut base_lines = vec![Line::from(vec![
        Span::styled(
            "Valor padrão por hora * ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("R$ {}", tab.base.text()), base_style),
    ])];
    let base_error = tab.base.error().map(str::to_string).or_else(|| {
        state
            .field_error(Field::BasePrice)
            .map(|e| e.to_string())
    });
    if let Some(err) = base_error {
        base_lines.push(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(base_lines), base_area);

    if editor.special_prices().is_empty() {
        let empty = Paragraph::new("Nenhum preço especial. Ctrl+N para adicionar.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, table_area);
    } else {
        let header = Row::new(vec!["Dia", "Horário", "Valor", ""])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let rows: Vec<Row> = editor
            .special_prices()
            .iter()
            .enumerate()
            .map(|(i, special)| {
                let row_selected = tab.selected == i + 1;
                let cell_style = |column: Column| {
                    if row_selected && column == tab.column {
                        selected_style
                    } else if row_selected {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    }
                };
                let input = tab.specials.get(&special.id);
                let text = input.map_or_else(
                    || PriceInput::new(special.price).text().to_string(),
                    |p| p.text().to_string(),
                );
                let error = input.and_then(PriceInput::error).unwrap_or("");
                Row::new(vec![
                    Cell::from(special.weekday.name()).style(cell_style(Column::Weekday)),
                    Cell::from(slot_label(special.slot)).style(cell_style(Column::Slot)),
                    Cell::from(format!("R$ {text}")).style(cell_style(Column::Price)),
                    Cell::from(error).style(Style::default().fg(Color::Red)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Length(10),
            Constraint::Length(14),
            Constraint::Length(12),
            Constraint::Min(10),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    let warnings: Vec<Line> = editor
        .duplicate_special_prices()
        .into_iter()
        .map(|(day, slot)| {
            Line::from(Span::styled(
                format!("⚠ Mais de um preço especial para {day} {slot}"),
                Style::default().fg(Color::Yellow),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(warnings), warning_area);

    if let Some(err) = tab.error.as_deref() {
        let line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(line, error_area);
    }

    let hint = Paragraph::new(
        "Ctrl+N: adicionar  Ctrl+D: remover  Tab: coluna  ←/→/Espaço: alterar  0-9 , .: valor",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hint_area);
}
