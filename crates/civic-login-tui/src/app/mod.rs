//! Application state and event handling

mod state;

pub use state::{AppState, Field, ThemeMode};

use std::io;
use std::time::Duration;

use anyhow::Result;
use civic_login::{FlowEvent, FlowEvents, LoginConfig, LoginFailure, LoginFlow, Step};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::prelude::*;

use crate::ui;

/// Redraw interval while idle, keeps the header clock moving
const REDRAW_INTERVAL: Duration = Duration::from_millis(250);

/// Whatever woke the main loop
enum Wake {
    Terminal(Option<io::Result<Event>>),
    Flow(Option<FlowEvent>),
    Redraw,
}

/// Main application struct
pub struct App {
    /// The login flow being driven
    pub flow: LoginFlow,

    /// Completions and countdown ticks from the flow's background tasks
    pub(crate) events: FlowEvents,

    /// Presentation state
    pub state: AppState,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    /// Create a new application instance; must run inside a tokio runtime
    pub fn new(config: LoginConfig) -> Self {
        let (flow, events) = LoginFlow::new(config);
        Self {
            flow,
            events,
            state: AppState::new(),
            should_quit: false,
        }
    }

    /// Run the application main loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut terminal_events = EventStream::new();
        let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            let wake = tokio::select! {
                event = terminal_events.next() => Wake::Terminal(event),
                event = self.events.recv() => Wake::Flow(event),
                _ = redraw.tick() => Wake::Redraw,
            };

            match wake {
                Wake::Terminal(Some(Ok(event))) => self.handle_terminal_event(event).await,
                Wake::Terminal(Some(Err(e))) => return Err(e.into()),
                Wake::Terminal(None) => self.should_quit = true,
                Wake::Flow(Some(event)) => self.flow.handle_event(event),
                Wake::Flow(None) | Wake::Redraw => {}
            }
        }

        Ok(())
    }

    /// Handle one terminal event
    pub async fn handle_terminal_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key).await,
            Event::Paste(text) => self.handle_paste(&text),
            _ => {}
        }
    }

    /// Handle key press events
    pub async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Global shortcuts
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('t') => self.state.toggle_theme(),
                KeyCode::Char('r') => self.state.toggle_show_password(),
                KeyCode::Char('d') => self.flow.notifications().dismiss_oldest(),
                KeyCode::Char('l') => {
                    self.flow.logout().await;
                    self.state.focus = Field::Username;
                }
                _ => {}
            }
            return;
        }

        // Inputs stay frozen until the flow resets
        if self.flow.state().login_succeeded {
            return;
        }

        match self.flow.step() {
            Step::Credentials => self.handle_credentials_key(key.code),
            Step::Token => self.handle_token_key(key.code),
        }
    }

    fn handle_credentials_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.state.focus = self.state.focus.next();
            }
            KeyCode::Enter => self.submit_credentials(),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Char(c) => self.edit_focused(|value| value.push(c)),
            _ => {}
        }
    }

    fn handle_token_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.flow.back_to_login(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.flow.resend(),
            KeyCode::Char(c) => self.flow.token_input(c),
            KeyCode::Backspace => self.flow.token_backspace(),
            KeyCode::Left => self.flow.token_left(),
            KeyCode::Right => self.flow.token_right(),
            KeyCode::Enter => self.flow.submit_entered_token(),
            _ => {}
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.flow.state().login_succeeded {
            return;
        }
        match self.flow.step() {
            Step::Credentials => {
                let line: String = text.chars().filter(|c| !c.is_control()).collect();
                self.edit_focused(|value| value.push_str(&line));
            }
            Step::Token => self.flow.paste_token(text),
        }
    }

    /// Apply `edit` to the focused credential field
    fn edit_focused(&mut self, edit: impl FnOnce(&mut String)) {
        match self.state.focus {
            Field::Username => {
                let mut value = self.flow.state().username.clone();
                edit(&mut value);
                self.flow.set_username(value);
            }
            Field::Password => {
                let mut value = self.flow.state().password.as_str().to_owned();
                edit(&mut value);
                self.flow.set_password(value);
            }
        }
    }

    fn submit_credentials(&mut self) {
        if let Err(LoginFailure::Validation(errors)) = self.flow.submit_credentials() {
            // Jump to the first field that needs fixing
            self.state.focus = if errors.username.is_some() {
                Field::Username
            } else {
                Field::Password
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::timeout;

    fn app() -> App {
        App::new(LoginConfig {
            notification_duration_ms: 0,
            ..LoginConfig::default()
        })
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
    }

    async fn pump_until(app: &mut App, done: impl Fn(&App) -> bool) {
        timeout(Duration::from_secs(600), async {
            while !done(app) {
                let event = app.events.recv().await.unwrap();
                app.flow.handle_event(event);
            }
        })
        .await
        .unwrap();
    }

    async fn at_token_step() -> App {
        let mut app = app();
        type_text(&mut app, "admin").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_text(&mut app, "12345").await;
        app.handle_key(key(KeyCode::Enter)).await;
        pump_until(&mut app, |a| a.flow.step() == Step::Token).await;
        app
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_fills_focused_field() {
        let mut app = app();
        type_text(&mut app, "admn").await;
        app.handle_key(key(KeyCode::Backspace)).await;
        type_text(&mut app, "n").await;
        assert_eq!(app.flow.state().username, "admn");

        app.handle_key(key(KeyCode::Tab)).await;
        assert_eq!(app.state.focus, Field::Password);
        type_text(&mut app, "secret").await;
        assert_eq!(app.flow.state().password.as_str(), "secret");
        assert_eq!(app.flow.state().username, "admn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_submit_focuses_first_bad_field() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab)).await;
        type_text(&mut app, "1234").await;
        app.handle_key(key(KeyCode::Enter)).await;

        assert_eq!(app.state.focus, Field::Username);
        let errors = &app.flow.state().field_errors;
        assert_eq!(errors.username.as_deref(), Some("Username is required"));
        assert!(!app.flow.state().is_submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_login_with_keys() {
        let mut app = at_token_step().await;

        // Letters are ignored on the token step, 'r' is refused during cooldown
        type_text(&mut app, "x1r2").await;
        assert!(!app.flow.state().is_resending);
        app.handle_key(key(KeyCode::Backspace)).await;
        app.handle_key(key(KeyCode::Backspace)).await;
        assert!(app.flow.state().token.is_empty());

        type_text(&mut app, "123456").await;
        assert!(app.flow.state().is_submitting);
        pump_until(&mut app, |a| a.flow.state().login_succeeded).await;

        // Frozen until the flow resets
        app.handle_key(key(KeyCode::Esc)).await;
        assert_eq!(app.flow.step(), Step::Token);
        pump_until(&mut app, |a| a.flow.step() == Step::Credentials).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_paste_token() {
        let mut app = at_token_step().await;
        app.handle_terminal_event(Event::Paste("12 34 56".into())).await;
        assert!(app.flow.state().is_submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_escape_goes_back_from_token_step() {
        let mut app = at_token_step().await;
        app.handle_key(key(KeyCode::Esc)).await;
        assert_eq!(app.flow.step(), Step::Credentials);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Esc)).await;
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_global_shortcuts() {
        let mut app = app();

        app.handle_key(ctrl('r')).await;
        assert!(app.state.show_password);
        app.handle_key(ctrl('t')).await;
        assert_eq!(app.state.theme_mode, ThemeMode::Light);
        // Control chords never reach the fields
        assert!(app.flow.state().username.is_empty());

        app.handle_key(ctrl('q')).await;
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_returns_to_empty_form() {
        let mut app = at_token_step().await;
        assert_eq!(app.flow.notifications().len(), 1);
        app.handle_key(ctrl('d')).await;
        assert!(app.flow.notifications().is_empty());

        app.handle_key(ctrl('l')).await;
        assert_eq!(app.flow.step(), Step::Credentials);
        assert!(app.flow.state().username.is_empty());
        assert_eq!(app.state.focus, Field::Username);
    }
}
