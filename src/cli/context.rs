use std::io;

use chrono::NaiveDate;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    errors::EngineError,
    ledger::BudgetState,
    storage::{JsonStorage, StateStore},
};

use super::{
    commands,
    output,
    system_clock::{self, Clock},
};

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

/// Failure of a single command; the shell reports it and keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("No user selected. Use `user <id>` first.")]
    NoUser,
    #[error(transparent)]
    Core(#[from] EngineError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

/// Failure that stops the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] EngineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub struct ShellContext {
    pub mode: CliMode,
    pub state: BudgetState,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub storage: Box<dyn StateStore>,
    pub clock: Box<dyn Clock>,
    pub user: Option<String>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::new()?;
        let storage = JsonStorage::new_default()?;
        Self::with_parts(mode, config_manager, Box::new(storage))
    }

    pub fn with_parts(
        mode: CliMode,
        config_manager: ConfigManager,
        storage: Box<dyn StateStore>,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let mut context = Self {
            mode,
            state: BudgetState::new(),
            config,
            config_manager,
            storage,
            clock: system_clock::from_env(),
            user: None,
            last_command: None,
            running: true,
        };

        if let Some(user) = context.config.last_user.clone() {
            if let Some(state) = context.storage.load(&user)? {
                context.state = state;
            }
            tracing::info!(user = %user, "restored last user");
            context.user = Some(user);
        }
        Ok(context)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Replaces the state with the result of `transition` and syncs it to the
    /// store when a user is selected.
    pub fn apply(
        &mut self,
        transition: impl FnOnce(BudgetState) -> BudgetState,
    ) -> CommandResult {
        let current = std::mem::take(&mut self.state);
        self.state = transition(current);
        if let Some(user) = &self.user {
            self.storage.save(user, &self.state)?;
        }
        Ok(())
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        commands::names().collect()
    }

    pub fn prompt(&self) -> String {
        match &self.user {
            Some(user) => format!("budget [{user}]> "),
            None => "budget> ".to_string(),
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(command) = commands::find(command) {
            match (command.run)(self, args) {
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
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = commands::names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        tracing::debug!(command = ?self.last_command, error = %err, "command failed");
        match (self.mode, &self.last_command) {
            (CliMode::Script, Some(line)) => output::error(format!("{line}: {err}")),
            _ => output::error(&err),
        }
        Ok(())
    }
}
