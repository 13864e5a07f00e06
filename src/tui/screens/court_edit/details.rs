//! Fotos tab: court name, sport, status switch and the photo gallery.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::{CourtEditState, cycle, is_plain, step};
use crate::model::{CourtEditor, CourtStatus, Field, MAX_PHOTOS, SportType};
use crate::storage::parse_path_list;
use crate::tui::action::Action;
use crate::tui::widgets::{Form, FormField, draw_form};

const NAME: usize = 0;
const PATHS: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Name,
    Paths,
    Gallery,
}

#[derive(Debug, Clone)]
pub(super) struct DetailsTab {
    form: Form,
    focus: Focus,
    selected_photo: usize,
    error: Option<String>,
}

impl DetailsTab {
    pub(super) fn new(editor: &CourtEditor) -> Self {
        let mut form = Form::new(vec![
            FormField::new("Nome da Quadra", true).with_hint("Ex: Quadra Society 1"),
            FormField::new("Adicionar fotos (caminhos separados por ;)", false)
                .with_hint("~/fotos/quadra.jpg; ~/fotos/vestiario.png"),
        ]);
        form.set_value(NAME, editor.name());
        Self {
            form,
            focus: Focus::Name,
            selected_photo: 0,
            error: None,
        }
    }

    pub(super) fn handle_key(&mut self, editor: &mut CourtEditor, key: KeyEvent) -> Action {
        // Alt+E cycles the sport, Shift+Alt+E backward; Alt+A flips the status switch
        if key.modifiers == KeyModifiers::ALT {
            match key.code {
                KeyCode::Char('e') => {
                    cycle_sport(editor, true);
                    return Action::None;
                }
                KeyCode::Char('a') => {
                    editor.toggle_status();
                    return Action::None;
                }
                _ => {}
            }
        }
        const ALT_SHIFT: KeyModifiers = KeyModifiers::ALT.union(KeyModifiers::SHIFT);
        if key.modifiers == ALT_SHIFT && key.code == KeyCode::Char('E') {
            cycle_sport(editor, false);
            return Action::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.set_focus(match self.focus {
                    Focus::Name => Focus::Paths,
                    Focus::Paths => Focus::Gallery,
                    Focus::Gallery => Focus::Name,
                });
                Action::None
            }
            KeyCode::BackTab => {
                self.set_focus(match self.focus {
                    Focus::Name => Focus::Gallery,
                    Focus::Paths => Focus::Name,
                    Focus::Gallery => Focus::Paths,
                });
                Action::None
            }
            _ => match self.focus {
                Focus::Name => {
                    if self.edit_text(key) {
                        editor.set_name(self.form.value(NAME));
                    }
                    Action::None
                }
                Focus::Paths if key.code == KeyCode::Enter => self.request_photos(editor),
                Focus::Paths => {
                    self.edit_text(key);
                    Action::None
                }
                Focus::Gallery => {
                    self.handle_gallery_key(editor, key.code);
                    Action::None
                }
            },
        }
    }

    /// Clears the path field once the app has appended the photos.
    pub(super) fn photos_added(&mut self) {
        self.form.clear_value(PATHS);
        self.error = None;
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Name => self.form.set_focus(NAME),
            Focus::Paths => self.form.set_focus(PATHS),
            Focus::Gallery => {}
        }
    }

    /// Types into the focused text field. Returns `true` if the text changed.
    fn edit_text(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(ch) if is_plain(&key) => {
                self.form.insert_char(ch);
                true
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                true
            }
            _ => false,
        }
    }

    /// Checks the selection against the photo cap before any file is read.
    fn request_photos(&mut self, editor: &CourtEditor) -> Action {
        self.error = None;
        let paths = parse_path_list(self.form.value(PATHS));
        if paths.is_empty() {
            self.error = Some("Informe o caminho de ao menos uma imagem".into());
            return Action::None;
        }
        if editor.check_photo_capacity(paths.len()).is_err() {
            tracing::info!(
                requested = paths.len(),
                present = editor.photos().len(),
                "photo selection over the limit"
            );
            self.error = Some(format!("Máximo de {MAX_PHOTOS} fotos permitido"));
            return Action::None;
        }
        Action::LoadPhotos(paths)
    }

    fn handle_gallery_key(&mut self, editor: &mut CourtEditor, code: KeyCode) {
        let count = editor.photos().len();
        match code {
            KeyCode::Up => self.selected_photo = step(self.selected_photo, count, false),
            KeyCode::Down => self.selected_photo = step(self.selected_photo, count, true),
            KeyCode::Delete | KeyCode::Backspace => match editor.remove_photo(self.selected_photo) {
                Ok(_) => {
                    self.selected_photo = self
                        .selected_photo
                        .min(editor.photos().len().saturating_sub(1));
                }
                Err(e) => self.error = Some(e.to_string()),
            },
            _ => {}
        }
    }
}

fn cycle_sport(editor: &mut CourtEditor, forward: bool) {
    let sports = SportType::all();
    let next = match editor.sport() {
        Some(current) => Some(cycle(sports, current, forward)),
        None if forward => sports.first().copied(),
        None => sports.last().copied(),
    };
    editor.set_sport(next);
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub(super) fn draw(state: &CourtEditState, frame: &mut Frame, area: Rect) {
    let tab = &state.details;
    let editor = &state.editor;

    let [left, right] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);
    let [form_area, sport_area, status_area, message_area] = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(left);

    let mut form = tab.form.clone();
    if let Some(err) = state.field_error(Field::Name) {
        form.set_error(NAME, err.to_string());
    }
    draw_form(&form, tab.focus != Focus::Gallery, frame, form_area);

    let label_style = Style::default().add_modifier(Modifier::BOLD);
    let sport = match editor.sport() {
        Some(sport) => Span::styled(
            format!("◀ {sport} ▶"),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled("Selecione o esporte", Style::default().fg(Color::DarkGray)),
    };
    let mut sport_lines = vec![Line::from(vec![
        Span::styled("Esporte * ", label_style),
        sport,
        Span::styled("  (Alt+e)", Style::default().fg(Color::DarkGray)),
    ])];
    if let Some(err) = state.field_error(Field::Sport) {
        sport_lines.push(Line::from(Span::styled(
            err.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    frame.render_widget(Paragraph::new(sport_lines), sport_area);

    let status_color = match editor.status() {
        CourtStatus::Disponivel => Color::Green,
        CourtStatus::Bloqueada => Color::Red,
    };
    let status = Line::from(vec![
        Span::styled("Status ", label_style),
        Span::styled(
            editor.status().switch_label(),
            Style::default().fg(status_color),
        ),
        Span::styled("  (Alt+a)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(status), status_area);

    if let Some(err) = tab.error.as_deref() {
        let line = Paragraph::new(Span::styled(err, Style::default().fg(Color::Red)));
        frame.render_widget(line, message_area);
    }

    let border_color = if state.field_error(Field::Photos).is_some() {
        Color::Red
    } else if tab.focus == Focus::Gallery {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let gallery = Block::default()
        .title(format!(
            " Fotos ({}/{MAX_PHOTOS}) * ",
            editor.photos().len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let lines: Vec<Line> = if editor.photos().is_empty() {
        vec![Line::from(Span::styled(
            "Nenhuma foto adicionada",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        editor
            .photos()
            .iter()
            .enumerate()
            .map(|(i, photo)| {
                let style = if tab.focus == Focus::Gallery && i == tab.selected_photo {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                let badge = if i == 0 { "Principal " } else { "" };
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), style),
                    Span::styled(badge, style.fg(Color::Cyan)),
                    Span::styled(photo.summary(), style),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).block(gallery), right);
}
