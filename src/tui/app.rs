use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};

use crate::model::{CourtEditor, CourtId, CourtList, CourtPayload};
use crate::storage::PhotoLoader;

use super::action::Action;
use super::error::AppError;
use super::screens::{
    CourtEditState, CourtListState, HelpState, draw_court_edit, draw_court_list, draw_help,
};
use super::widgets::{Notice, draw_notice_bar};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Table of registered courts.
    CourtList,
    /// Create or edit one court.
    CourtEdit,
    /// Show keybinding help.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    courts: CourtList,
    list: CourtListState,
    /// The open editor, present only while creating or editing a court.
    edit: Option<CourtEditState>,
    help: HelpState,
    notice: Option<Notice>,
    loader: PhotoLoader,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` starting on the [`Screen::CourtList`] screen.
    pub fn new(courts: CourtList) -> Result<Self, AppError> {
        let mut list = CourtListState::new();
        list.sync(&courts);
        Ok(Self {
            screen: Screen::CourtList,
            courts,
            list,
            edit: None,
            help: HelpState::new(),
            notice: None,
            loader: PhotoLoader::new()?,
            should_quit: false,
        })
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        tracing::info!(courts = self.courts.len(), "session started");
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        tracing::info!("session ended");
        Ok(())
    }

    /// Renders the current screen above the notice bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, notice_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match (self.screen, &self.edit) {
            (Screen::CourtEdit, Some(edit)) => draw_court_edit(edit, frame, main_area),
            (Screen::Help, _) => draw_help(&self.help, frame, main_area),
            _ => draw_court_list(&self.list, &self.courts, frame, main_area),
        }
        draw_notice_bar(self.notice.as_ref(), frame, notice_area);
    }

    /// Handles a key event: global keys first, then screen-specific.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.notice = None;

        if key.code == KeyCode::F(1) {
            if self.screen != Screen::Help {
                self.help.set_origin(self.screen);
                self.help.reset();
                self.screen = Screen::Help;
            }
            return;
        }

        let action = match self.screen {
            Screen::CourtList => self.list.handle_key(&self.courts, key),
            Screen::CourtEdit => match self.edit.as_mut() {
                Some(edit) => edit.handle_key(key),
                None => Action::Navigate(Screen::CourtList),
            },
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.screen = screen,
            Action::NewCourt => self.open_editor(CourtEditor::new()),
            Action::EditCourt(id) => match self.courts.get(id).map(CourtEditor::from_court) {
                Some(editor) => self.open_editor(editor),
                None => self.notice = Some(Notice::error(format!("Quadra {id} não encontrada"))),
            },
            Action::ToggleCourtStatus(id) => match self.courts.toggle_status(id) {
                Ok(status) => {
                    tracing::info!(id, status = %status, "court status toggled");
                    self.notice = Some(Notice::success(format!(
                        "Quadra agora está {}",
                        status.label()
                    )));
                }
                Err(e) => self.notice = Some(Notice::error(e.to_string())),
            },
            Action::LoadPhotos(paths) => self.load_photos(&paths),
            Action::SaveCourt(id, payload) => self.save_court(id, payload),
            Action::CancelEdit => {
                self.edit = None;
                self.screen = Screen::CourtList;
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn open_editor(&mut self, editor: CourtEditor) {
        tracing::debug!(court_id = ?editor.court_id(), "editor opened");
        self.edit = Some(CourtEditState::new(editor));
        self.screen = Screen::CourtEdit;
    }

    /// Reads the files and appends them to the open draft.
    ///
    /// A failed read adds nothing; the draft keeps its existing photos.
    fn load_photos(&mut self, paths: &[PathBuf]) {
        let loaded = self.loader.load(paths);
        let Some(edit) = self.edit.as_mut() else {
            return;
        };
        let result = loaded
            .map_err(|e| e.to_string())
            .and_then(|photos| edit.add_photos(photos).map_err(|e| e.to_string()));
        self.notice = Some(match result {
            Ok(count) => Notice::success(format!("{count} foto(s) adicionada(s)")),
            Err(e) => {
                tracing::warn!(error = %e, "photo load failed");
                Notice::error(format!("Não foi possível carregar as fotos: {e}"))
            }
        });
    }

    fn save_court(&mut self, id: Option<CourtId>, payload: CourtPayload) {
        match self.courts.save(id, payload) {
            Ok(saved) => {
                tracing::info!(id = saved, created = id.is_none(), "court saved");
                self.edit = None;
                self.screen = Screen::CourtList;
                self.list.sync(&self.courts);
                self.list.select_id(&self.courts, saved);
                self.notice = Some(Notice::success("Quadra salva com sucesso!"));
            }
            Err(e) => {
                tracing::error!(error = %e, "court save failed");
                if let Some(edit) = self.edit.as_mut() {
                    edit.set_error(e.to_string());
                }
            }
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn courts(&self) -> &CourtList {
        &self.courts
    }

    /// Returns the open editor, if any.
    pub fn edit(&self) -> Option<&CourtEditState> {
        self.edit.as_ref()
    }

    /// Returns the message shown until the next key press.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
