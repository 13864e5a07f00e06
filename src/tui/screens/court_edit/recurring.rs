//! Mensalistas tab: fixed weekly bookings that hold a slot.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use super::{CourtEditState, cycle, is_plain, step};
use crate::model::{CourtEditor, EditorError, RecurringBooking, TimeSlot, Weekday};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Weekday,
    Slot,
}

static COLUMNS: &[Column] = &[Column::Name, Column::Weekday, Column::Slot];

#[derive(Debug, Clone)]
pub(super) struct RecurringTab {
    selected: usize,
    column: Column,
    error: Option<String>,
}

impl RecurringTab {
    pub(super) fn new() -> Self {
        Self {
            selected: 0,
            column: Column::Name,
            error: None,
        }
    }

    pub(super) fn handle_key(&mut self, editor: &mut CourtEditor, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('n') => {
                    let id = editor.add_recurring_booking();
                    tracing::debug!(id, "recurring booking added");
                    self.selected = editor.recurring_bookings().len() - 1;
                    self.column = Column::Name;
                }
                KeyCode::Char('d') => self.remove_selected(editor),
                _ => {}
            }
            return;
        }

        let count = editor.recurring_bookings().len();
        match key.code {
            KeyCode::Up => self.selected = step(self.selected, count, false),
            KeyCode::Down => self.selected = step(self.selected, count, true),
            KeyCode::Tab => self.column = cycle(COLUMNS, self.column, true),
            KeyCode::BackTab => self.column = cycle(COLUMNS, self.column, false),
            _ => {
                if let Some(booking) = editor.recurring_bookings().get(self.selected).cloned() {
                    let result = self.edit_cell(editor, &booking, key);
                    if let Err(e) = result {
                        self.error = Some(e.to_string());
                    }
                }
            }
        }
    }

    fn edit_cell(
        &mut self,
        editor: &mut CourtEditor,
        booking: &RecurringBooking,
        key: KeyEvent,
    ) -> Result<(), EditorError> {
        let forward = key.code != KeyCode::Left;
        let cycles = matches!(
            key.code,
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') | KeyCode::Enter
        );

        match self.column {
            Column::Name => match key.code {
                KeyCode::Char(ch) if is_plain(&key) => {
                    let mut name = booking.name.clone();
                    name.push(ch);
                    editor.set_recurring_name(booking.id, name)
                }
                KeyCode::Backspace => {
                    let mut name = booking.name.clone();
                    name.pop();
                    editor.set_recurring_name(booking.id, name)
                }
                _ => Ok(()),
            },
            Column::Weekday if cycles => editor.set_recurring_weekday(
                booking.id,
                cycle(Weekday::all(), booking.weekday, forward),
            ),
            Column::Slot if cycles => {
                editor.set_recurring_slot(booking.id, cycle_slot(booking.slot, forward))
            }
            _ => Ok(()),
        }
    }

    fn remove_selected(&mut self, editor: &mut CourtEditor) {
        let Some(id) = editor.recurring_bookings().get(self.selected).map(|b| b.id) else {
            return;
        };
        match editor.remove_recurring_booking(id) {
            Ok(_) => {
                tracing::debug!(id, "recurring booking removed");
                self.selected = self
                    .selected
                    .min(editor.recurring_bookings().len().saturating_sub(1));
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Steps through "no slot" followed by every catalog slot, wrapping.
pub(super) fn cycle_slot(current: Option<TimeSlot>, forward: bool) -> Option<TimeSlot> {
    let options: Vec<Option<TimeSlot>> = std::iter::once(None)
        .chain(TimeSlot::all().into_iter().map(Some))
        .collect();
    cycle(&options, current, forward)
}

pub(super) fn slot_label(slot: Option<TimeSlot>) -> String {
    slot.map_or_else(|| "Selecione".to_string(), |s| s.label())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(super) fn draw(state: &CourtEditState, frame: &mut Frame, area: Rect) {
    let tab = &state.recurring;
    let bookings = state.editor.recurring_bookings();

    let [table_area, error_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    if bookings.is_empty() {
        let empty = Paragraph::new("Nenhum mensalista cadastrado. Ctrl+N para adicionar.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, table_area);
    } else {
        let header = Row::new(vec!["Nome", "Dia", "Horário"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(1);
        let rows: Vec<Row> = bookings
            .iter()
            .enumerate()
            .map(|(i, booking)| {
                let cell_style = |column: Column| {
                    if i == tab.selected && column == tab.column {
                        Style::default().fg(Color::Black).bg(Color::Yellow)
                    } else if i == tab.selected {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    }
                };
                let name = if booking.name.is_empty() {
                    "Nome do mensalista".to_string()
                } else {
                    booking.name.clone()
                };
                Row::new(vec![
                    Cell::from(name).style(cell_style(Column::Name)),
                    Cell::from(booking.weekday.name()).style(cell_style(Column::Weekday)),
                    Cell::from(slot_label(booking.slot)).style(cell_style(Column::Slot)),
                ])
            })
            .collect();
        let widths = [
            Constraint::Min(24),
            Constraint::Length(10),
            Constraint::Length(14),
        ];
        frame.render_widget(Table::new(rows, widths).header(header), table_area);
    }

    if let Some(err) = tab.error.as_deref() {
        let line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(line, error_area);
    }

    let hint = Paragraph::new(
        "Ctrl+N: adicionar  Ctrl+D: remover  Tab: coluna  ←/→/Espaço: alterar dia/horário",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hint, hint_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::screens::court_edit::tests::rendering::render;
    use crate::tui::screens::court_edit::tests::{ctrl, press, type_string};

    fn on_recurring_tab() -> CourtEditState {
        let mut state = CourtEditState::new(CourtEditor::new());
        state.handle_key(press(KeyCode::F(3)));
        state.handle_key(press(KeyCode::F(3)));
        state
    }

    fn slot(hour: u8) -> TimeSlot {
        TimeSlot::new(hour).unwrap()
    }

    fn ids(state: &CourtEditState) -> Vec<u32> {
        state
            .editor()
            .recurring_bookings()
            .iter()
            .map(|b| b.id)
            .collect()
    }

    mod rows {
        use super::*;

        #[test]
        fn ctrl_n_adds_placeholder_and_selects_it() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(ctrl(KeyCode::Char('n')));
            assert_eq!(ids(&state), vec![1, 2]);
            assert_eq!(state.recurring.selected, 1);
            assert_eq!(
                state.editor().recurring_bookings()[1],
                RecurringBooking::placeholder(2)
            );
        }

        #[test]
        fn ctrl_d_removes_only_selected_row() {
            let mut state = on_recurring_tab();
            for _ in 0..3 {
                state.handle_key(ctrl(KeyCode::Char('n')));
            }
            state.handle_key(press(KeyCode::Up));
            state.handle_key(ctrl(KeyCode::Char('d')));
            assert_eq!(ids(&state), vec![1, 3]);
        }

        #[test]
        fn removing_last_row_moves_selection_up() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(ctrl(KeyCode::Char('d')));
            assert_eq!(ids(&state), vec![1]);
            assert_eq!(state.recurring.selected, 0);
        }

        #[test]
        fn ctrl_d_on_empty_list_is_noop() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('d')));
            assert!(ids(&state).is_empty());
            assert_eq!(state.recurring.error, None);
        }

        #[test]
        fn ctrl_n_does_not_type() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(ctrl(KeyCode::Char('n')));
            assert_eq!(state.editor().recurring_bookings()[0].name, "");
        }
    }

    mod cells {
        use super::*;

        #[test]
        fn typing_edits_name() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            type_string(&mut state, "João Silva");
            state.handle_key(press(KeyCode::Backspace));
            assert_eq!(state.editor().recurring_bookings()[0].name, "João Silv");
        }

        #[test]
        fn weekday_column_cycles() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(press(KeyCode::Tab));
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.editor().recurring_bookings()[0].weekday, Weekday::Terca);
            state.handle_key(press(KeyCode::Left));
            state.handle_key(press(KeyCode::Left));
            assert_eq!(
                state.editor().recurring_bookings()[0].weekday,
                Weekday::Domingo
            );
        }

        #[test]
        fn slot_column_cycles_through_none() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(press(KeyCode::BackTab));
            state.handle_key(press(KeyCode::Char(' ')));
            assert_eq!(state.editor().recurring_bookings()[0].slot, Some(slot(6)));
            state.handle_key(press(KeyCode::Left));
            assert_eq!(state.editor().recurring_bookings()[0].slot, None);
            state.handle_key(press(KeyCode::Left));
            assert_eq!(state.editor().recurring_bookings()[0].slot, Some(slot(20)));
        }

        #[test]
        fn space_in_name_column_types_space() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            type_string(&mut state, "A B");
            assert_eq!(state.editor().recurring_bookings()[0].name, "A B");
            assert_eq!(state.editor().recurring_bookings()[0].slot, None);
        }

        #[test]
        fn held_slot_blocks_public_booking() {
            let mut state = on_recurring_tab();
            state.handle_key(ctrl(KeyCode::Char('n')));
            state.handle_key(press(KeyCode::BackTab));
            state.handle_key(press(KeyCode::Right));
            assert!(
                state
                    .editor()
                    .is_held_by_recurring(Weekday::Segunda, slot(6))
            );
        }
    }

    #[test]
    fn cycle_slot_wraps() {
        assert_eq!(cycle_slot(None, true), Some(slot(6)));
        assert_eq!(cycle_slot(Some(slot(20)), true), None);
        assert_eq!(cycle_slot(None, false), Some(slot(20)));
    }

    #[test]
    fn renders_rows_and_empty_state() {
        let mut state = on_recurring_tab();
        assert!(render(&state).contains("Nenhum mensalista cadastrado"));

        state.handle_key(ctrl(KeyCode::Char('n')));
        type_string(&mut state, "Maria");
        let output = render(&state);
        assert!(output.contains("Maria"));
        assert!(output.contains("Segunda"));
        assert!(output.contains("Selecione"));
    }
}
