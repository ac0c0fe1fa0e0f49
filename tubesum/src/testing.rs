use crate::app_core::{AppCore, DataEventHandler};
use crate::commands::executor;
use crate::events::{AppCommand, DataEvent};
use crate::state::{AppState, AuthState, Notice};

/// Mock data event handler for tests (no real async tasks)
///
/// Commands run through execute_command_sync, so state changes happen but no
/// request is ever made. Every command is recorded for assertions.
#[derive(Default)]
pub struct MockDataHandler {
    pub executed: Vec<AppCommand>,
}

impl MockDataHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataEventHandler for MockDataHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState) {
        self.executed.push(command.clone());
        executor::execute_command_sync(command, state);
    }
}

pub struct TestApp {
    core: AppCore<MockDataHandler>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            core: AppCore::new(MockDataHandler::new()),
        }
    }

    /// Type a line into the shell
    pub fn send_line(&mut self, line: &str) {
        self.core.handle_input_line(line);
    }

    /// Type several lines in sequence
    pub fn send_lines(&mut self, lines: &[&str]) {
        for line in lines {
            self.send_line(line);
        }
    }

    pub fn send_command(&mut self, command: AppCommand) {
        self.core.handle_command(command);
    }

    /// Inject a data event (simulate an API response)
    pub fn send_data_event(&mut self, event: DataEvent) {
        self.core.handle_data_event(event);
    }

    pub fn state(&self) -> &AppState {
        self.core.state()
    }

    /// Commands that reached the handler, in order
    pub fn executed(&self) -> &[AppCommand] {
        &self.core.handler().executed
    }

    pub fn assert_logged_in(&self) {
        assert!(
            matches!(self.state().auth, AuthState::LoggedIn(_)),
            "Expected logged in, got {:?}",
            self.state().auth
        );
    }

    pub fn assert_logged_out(&self) {
        assert_eq!(self.state().auth, AuthState::LoggedOut);
    }

    /// Assert the current notice is an error containing `text`
    pub fn assert_error_notice(&self, text: &str) {
        match &self.state().notice {
            Some(Notice::Error(message)) => assert!(
                message.contains(text),
                "Error notice {:?} does not contain {:?}",
                message,
                text
            ),
            other => panic!("Expected error notice, got {:?}", other),
        }
    }

    pub fn assert_should_quit(&self) {
        assert!(
            self.core.should_quit(),
            "App should be marked for quit but is not"
        );
    }

    pub fn assert_not_quit(&self) {
        assert!(
            !self.core.should_quit(),
            "App should NOT be marked for quit but is"
        );
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
