use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::state::{reducer, AppState, Notice};

/// Trait for handling command execution (production = real loader + tasks, test = mock)
///
/// This trait abstracts the side effects of command execution, allowing tests
/// to inject a mock implementation that doesn't spawn background tasks or make API calls.
pub trait DataEventHandler {
    /// Execute a command with access to mutable state
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// Testable application core without terminal dependencies
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self {
            ui_state: AppState::new(),
            handler,
        }
    }

    /// Handle one line of user input and execute the resulting command
    pub fn handle_input_line(&mut self, line: &str) {
        if let Some(command) = handlers::handle_input_line(line, &self.ui_state) {
            self.handle_command(command);
        }
    }

    /// Execute a command directly (startup restore, one-shot CLI runs)
    pub fn handle_command(&mut self, command: AppCommand) {
        self.handler
            .execute_with_context(command, &mut self.ui_state);
    }

    /// Handle a data event (for test injection or async results)
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    /// Take the pending notice so it is printed once
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.ui_state.take_notice()
    }

    /// True once per `help` request
    pub fn take_help(&mut self) -> bool {
        std::mem::take(&mut self.ui_state.help_visible)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
