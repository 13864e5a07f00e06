//! Help screen: scrollable keybinding reference for the screen that opened it.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::Action;
use crate::tui::app::Screen;

static COURT_LIST_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "navegar"),
    ("n", "adicionar quadra"),
    ("Enter", "editar quadra"),
    ("b", "bloquear / desbloquear"),
    ("q / Esc", "sair"),
    ("F1", "ajuda"),
];

static COURT_EDIT_KEYS: &[(&str, &str)] = &[
    ("Ctrl+S", "salvar"),
    ("Esc", "cancelar e voltar"),
    ("F2 / Alt+←", "aba anterior"),
    ("F3 / Alt+→", "próxima aba"),
    ("F1", "ajuda"),
];

static PHOTOS_TAB_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "nome / fotos / galeria"),
    ("Alt+e", "próximo esporte"),
    ("Shift+Alt+E", "esporte anterior"),
    ("Alt+a", "ativar / bloquear quadra"),
    ("Enter", "carregar fotos informadas"),
    ("Del", "remover foto selecionada"),
];

static SCHEDULE_TAB_KEYS: &[(&str, &str)] = &[
    ("←↑↓→", "mover cursor"),
    ("Espaço / Enter", "abrir / fechar horário"),
];

static RECURRING_TAB_KEYS: &[(&str, &str)] = &[
    ("Ctrl+N", "adicionar mensalista"),
    ("Ctrl+D", "remover mensalista"),
    ("Tab / Shift-Tab", "próxima / anterior coluna"),
    ("←/→ / Espaço", "alterar dia ou horário"),
];

static PRICING_TAB_KEYS: &[(&str, &str)] = &[
    ("Ctrl+N", "adicionar preço especial"),
    ("Ctrl+D", "remover preço especial"),
    ("Tab / Shift-Tab", "próxima / anterior coluna"),
    ("←/→ / Espaço", "alterar dia ou horário"),
    ("0-9 , .", "digitar valor"),
];

static ADD_ONS_TAB_KEYS: &[(&str, &str)] = &[
    ("Espaço", "ativar / desativar adicional"),
    ("0-9 , .", "digitar valor"),
    ("Enter", "incluir item personalizado"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "rolar"), ("q / Esc", "voltar")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a new [`HelpState`] scrolled to the top, returning to [`Screen::CourtList`].
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::CourtList,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen that opened help.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Sets the screen to return to when help is dismissed.
    pub fn set_origin(&mut self, screen: Screen) {
        self.origin = screen;
    }

    pub fn reset(&mut self) {
        self.scroll = 0;
    }

    /// Handles a key event, returning an [`Action`] for the app to apply.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::CourtList => "Quadras",
        Screen::CourtEdit => "Editor de Quadra",
        Screen::Help => "Ajuda",
    }
}

fn build_section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);
    let dim_style = Style::default().fg(Color::DarkGray);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(title, header_style)),
    ];
    for (key, desc) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<20}"), key_style),
            Span::styled(*desc, dim_style),
        ]));
    }
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    match origin {
        Screen::CourtList => build_section("Quadras", COURT_LIST_KEYS),
        Screen::CourtEdit => [
            ("Editor de Quadra", COURT_EDIT_KEYS),
            ("Aba Fotos", PHOTOS_TAB_KEYS),
            ("Aba Horários", SCHEDULE_TAB_KEYS),
            ("Aba Mensalistas", RECURRING_TAB_KEYS),
            ("Aba Valores", PRICING_TAB_KEYS),
            ("Aba Adicionais", ADD_ONS_TAB_KEYS),
        ]
        .into_iter()
        .flat_map(|(title, keys)| build_section(title, keys))
        .collect(),
        Screen::Help => build_section("Ajuda", HELP_KEYS),
    }
}

/// Renders the help screen.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let title = format!(" Ajuda – {} ", screen_name(state.origin()));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let content_lines = help_content(state.origin());
    let total = content_lines.len() as u16;
    let height = content_area.height;
    let capped_scroll = state.scroll().min(total.saturating_sub(height));

    let paragraph = Paragraph::new(content_lines).scroll((capped_scroll, 0));
    frame.render_widget(paragraph, content_area);

    let footer =
        Paragraph::new("↑/↓: rolar  q/Esc: voltar").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
