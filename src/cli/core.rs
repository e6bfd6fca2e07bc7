//! Shell context, command dispatch, and CLI error types.

use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use thiserror::Error;

use crate::config::{Config, ConfigManager};
use crate::core::clock::SystemClock;
use crate::core::services::ServiceError;
use crate::core::station::Station;
use crate::domain::DispositionStatus;
use crate::errors::StationError;
use crate::storage::JsonStorage;

use super::commands;
use super::io as cli_io;
use super::registry::{CommandEntry, CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Station(#[from] StationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Station(#[from] StationError),
}

/// State shared by every command handler: the station core, persistence,
/// configuration, and the armed disposition selection.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) station: Arc<Station>,
    pub(crate) storage: JsonStorage,
    pub(crate) config: Config,
    pub(crate) theme: ColorfulTheme,
    /// At most one of {Collected, Failed} is armed; accepted scans receive
    /// it automatically. Passed explicitly into every scan call so the
    /// engine itself stays free of ambient state.
    pub(crate) armed: Option<DispositionStatus>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = ConfigManager::new()?.load()?;
        let storage = JsonStorage::new_default()?;
        let station = Station::load_from(&storage, config.carriers.clone(), Box::new(SystemClock))?;

        Ok(Self {
            mode,
            registry,
            station: Arc::new(station),
            storage,
            config,
            theme: ColorfulTheme::default(),
            armed: None,
            running: true,
        })
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        match self.armed {
            Some(status) => format!("station[{}]> ", status.label()),
            None => "station> ".to_string(),
        }
    }

    /// Persists the station snapshot, downgrading failures to a warning so
    /// a disk hiccup never loses the in-memory session.
    pub(crate) fn persist_station(&self) {
        if let Err(err) = self.station.save_to(&self.storage) {
            cli_io::print_warning(format!("Failed to persist station state: {err}"));
        }
    }

    /// Asks before a destructive action. Script mode and the
    /// `confirm_destructive = false` setting skip the prompt.
    pub(crate) fn confirm_destructive_action(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode != CliMode::Interactive || !self.config.confirm_destructive {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, prompt, false)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let mut suggestions: Vec<_> = self
            .registry
            .names()
            .map(|key| (levenshtein(key, input), key))
            .collect();
        suggestions.sort_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = suggestions.first() {
            if *distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_info("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}
