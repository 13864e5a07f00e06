//! Court list screen: table of courts with create, edit and block actions.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::model::{Court, CourtId, CourtList, CourtStatus, format_price};
use crate::tui::action::Action;

/// State for the court list screen.
#[derive(Debug, Clone, Default)]
pub struct CourtListState {
    /// Index of the highlighted court, or `None` if the list is empty.
    selected: Option<usize>,
}

impl CourtListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clamps the selection after the list has grown or shrunk.
    pub fn sync(&mut self, courts: &CourtList) {
        self.selected = match (self.selected, courts.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
    }

    /// Highlights the court with `id`, if present.
    pub fn select_id(&mut self, courts: &CourtList, id: CourtId) {
        if let Some(pos) = courts.courts().iter().position(|c| c.id == id) {
            self.selected = Some(pos);
        }
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, courts: &CourtList, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.select_next(courts.len());
                Action::None
            }
            KeyCode::Char('n') => Action::NewCourt,
            KeyCode::Enter => self
                .selected_court(courts)
                .map_or(Action::None, |c| Action::EditCourt(c.id)),
            KeyCode::Char('b') => self
                .selected_court(courts)
                .map_or(Action::None, |c| Action::ToggleCourtStatus(c.id)),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }

    /// Returns the selected index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn selected_court<'a>(&self, courts: &'a CourtList) -> Option<&'a Court> {
        self.selected.and_then(|i| courts.courts().get(i))
    }

    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    fn select_next(&mut self, len: usize) {
        self.selected = match self.selected {
            Some(i) if i + 1 < len => Some(i + 1),
            other => other,
        };
    }
}

/// Renders the court list screen.
#[mutants::skip]
pub fn draw_court_list(state: &CourtListState, courts: &CourtList, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Quadras ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if courts.is_empty() {
        let lines = vec![
            Line::from(""),
            Line::from("Nenhuma quadra cadastrada."),
            Line::from("Pressione 'n' para adicionar uma quadra."),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(vec!["Nome", "Esporte", "Valor/h", "Status", "Fotos"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = courts
        .courts()
        .iter()
        .enumerate()
        .map(|(i, court)| {
            let style = if state.selected() == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            let status_color = match court.status() {
                CourtStatus::Disponivel => Color::Green,
                CourtStatus::Bloqueada => Color::Red,
            };
            Row::new(vec![
                Cell::from(court.name().to_string()),
                Cell::from(court.details.sport_type.name()),
                Cell::from(format_price(court.details.base_price_per_hour)),
                Cell::from(court.status().label()).style(Style::default().fg(status_color)),
                Cell::from(court.details.photos.len().to_string()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(12),
        Constraint::Length(11),
        Constraint::Length(6),
    ];

    let table = Table::new(rows, widths).header(header);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    frame.render_widget(table, table_area);

    let block_label = match state
        .selected()
        .and_then(|i| courts.courts().get(i))
        .map(Court::status)
    {
        Some(CourtStatus::Bloqueada) => "Desbloquear",
        _ => "Bloquear",
    };
    let footer = Paragraph::new(format!(
        "n: adicionar  Enter: editar  b: {block_label}  F1: ajuda  q: sair"
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
