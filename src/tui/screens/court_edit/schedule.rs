//! Horários tab: the weekday × slot availability grid.

use chrono::{Datelike, Local, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table};

use super::{CourtEditState, step};
use crate::model::{CourtEditor, SLOT_COUNT, TimeSlot, Weekday};

#[derive(Debug, Clone, Default)]
pub(super) struct ScheduleTab {
    day: usize,
    slot: usize,
}

impl ScheduleTab {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn handle_key(&mut self, editor: &mut CourtEditor, key: KeyEvent) {
        let days = Weekday::all().len();
        match key.code {
            KeyCode::Left => self.day = step(self.day, days, false),
            KeyCode::Right => self.day = step(self.day, days, true),
            KeyCode::Up => self.slot = step(self.slot, SLOT_COUNT, false),
            KeyCode::Down => self.slot = step(self.slot, SLOT_COUNT, true),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some((day, slot)) = self.cursor() {
                    let open = editor.toggle_slot(day, slot);
                    tracing::debug!(day = %day, slot = %slot.label(), open, "slot toggled");
                }
            }
            _ => {}
        }
    }

    fn cursor(&self) -> Option<(Weekday, TimeSlot)> {
        let day = Weekday::all().get(self.day).copied()?;
        let slot = TimeSlot::at(self.slot)?;
        Some((day, slot))
    }
}

/// The weekday of `now` and the slot it falls in, if within opening hours.
fn now_marker(now: NaiveDateTime) -> (Weekday, Option<TimeSlot>) {
    (Weekday::from(now.weekday()), TimeSlot::containing(now.time()))
}

/// Three-letter column heading, e.g. `Seg`, `Sáb`.
fn short_name(day: Weekday) -> String {
    day.name().chars().take(3).collect()
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(super) fn draw(state: &CourtEditState, frame: &mut Frame, area: Rect) {
    let editor = &state.editor;
    let cursor = state.schedule.cursor();
    let (today, current_slot) = now_marker(Local::now().naive_local());

    let [summary_area, grid_area, legend_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let summary = Line::from(vec![
        Span::styled(
            "Disponibilidade semanal  ",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "{} horário(s) aberto(s)",
            editor.availability().total_slots()
        )),
    ]);
    frame.render_widget(Paragraph::new(summary), summary_area);

    let mut header = vec![Cell::from("Horário")];
    header.extend(Weekday::all().iter().map(|&d| {
        let cell = Cell::from(short_name(d));
        if d == today {
            cell.style(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED))
        } else {
            cell
        }
    }));
    let header = Row::new(header).style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = TimeSlot::all()
        .iter()
        .map(|&slot| {
            let label = if current_slot == Some(slot) {
                Cell::from(format!("▸{}", slot.label())).style(Style::default().fg(Color::Cyan))
            } else {
                Cell::from(format!(" {}", slot.label()))
            };
            let mut cells = vec![label];
            cells.extend(Weekday::all().iter().map(|&day| {
                let open = editor.availability().contains(day, slot);
                let held = editor.is_held_by_recurring(day, slot);
                let (symbol, color) = match (open, held) {
                    (_, true) => ("M", Color::Magenta),
                    (true, false) => ("●", Color::Green),
                    (false, false) => ("·", Color::DarkGray),
                };
                let mut style = Style::default().fg(color);
                if cursor == Some((day, slot)) {
                    style = style.bg(Color::Yellow).fg(Color::Black);
                }
                Cell::from(symbol).style(style)
            }));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(14)];
    widths.extend(Weekday::all().iter().map(|_| Constraint::Length(5)));
    let table = Table::new(rows, widths).header(header);
    frame.render_widget(table, grid_area);

    let legend = Paragraph::new("● aberto  · fechado  M mensalista  ←↑↓→: mover  Espaço: alternar")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(legend, legend_area);
}
