//! Shell context, dispatch and error reporting for the GPA shell.

use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use uuid::Uuid;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    domain::{format_gpa, Course, Identifiable, Semester, Transcript},
    errors::GpaError,
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
use super::render;

/// Setting this variable switches the shell to line-by-line stdin scripting.
pub const SCRIPT_ENV: &str = "MOADALY_CLI_SCRIPT";

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

/// State shared by every command: the transcript being edited and the
/// active configuration.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) registry: CommandRegistry,
    pub(crate) transcript: Transcript,
    pub(crate) config: Config,
    config_manager: ConfigManager,
    theme: ColorfulTheme,
    pub(crate) last_command: Option<String>,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        if mode == CliMode::Script {
            colored::control::set_override(false);
        }

        let config = config_manager.load()?;
        apply_output_preferences(&config);
        let transcript = Transcript::with_scale(config.grade_scale());

        Ok(Self {
            mode,
            registry,
            transcript,
            config,
            config_manager,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        })
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn theme(&self) -> &ColorfulTheme {
        &self.theme
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        let gpa = format_gpa(self.transcript.recompute().overall_gpa);
        format!("moadaly (GPA {gpa})> ")
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
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let needle = input.to_ascii_lowercase();
        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &needle), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        tracing::debug!(command = ?self.last_command, error = %err, "command failed");
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            other => output::error(other),
        }
    }

    /// Resolves a 1-based semester number to its identifier.
    pub(crate) fn semester_id(&self, arg: &str) -> Result<Uuid, CommandError> {
        let index = parse_position(arg, "semester")?;
        self.transcript
            .semester_at(index)
            .map(|semester| semester.id())
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "{} does not exist",
                    Transcript::semester_title(index)
                ))
            })
    }

    /// Resolves 1-based semester and course numbers to identifiers.
    pub(crate) fn course_ids(
        &self,
        semester_arg: &str,
        course_arg: &str,
    ) -> Result<(Uuid, Uuid), CommandError> {
        let semester_id = self.semester_id(semester_arg)?;
        let index = parse_position(course_arg, "course")?;
        let course_id = self
            .transcript
            .semester(semester_id)
            .and_then(|semester| semester.course_at(index))
            .map(|course| course.id())
            .ok_or_else(|| {
                CommandError::InvalidArguments(format!(
                    "semester {} has no {}",
                    semester_arg.trim(),
                    Semester::course_title(index)
                ))
            })?;
        Ok((semester_id, course_id))
    }

    pub(crate) fn course_mut(
        &mut self,
        semester_id: Uuid,
        course_id: Uuid,
    ) -> Result<&mut Course, CommandError> {
        let semester = self
            .transcript
            .semester_mut(semester_id)
            .ok_or_else(|| GpaError::semester_not_found(semester_id))?;
        semester
            .course_mut(course_id)
            .ok_or_else(|| GpaError::course_not_found(course_id).into())
    }

    /// Applies one configuration change, persists it and rescales the transcript.
    pub(crate) fn update_config(&mut self, key: &str, value: &str) -> CommandResult {
        let mut updated = self.config.clone();
        updated.set_value(key, value)?;
        self.config_manager.save(&updated)?;
        self.transcript.set_scale(updated.grade_scale());
        apply_output_preferences(&updated);
        self.config = updated;
        Ok(())
    }

    pub(crate) fn print_result(&self) {
        output::section("Result");
        for line in render::result_lines(&self.transcript.recompute()) {
            output::plain(line);
        }
    }

    pub(crate) fn print_prior(&self) {
        output::section("Previous GPA");
        for line in render::prior_lines(self.transcript.prior()) {
            output::plain(line);
        }
    }

    pub(crate) fn print_system(&self) {
        output::section("Calculation System");
        for line in render::system_lines(&self.config) {
            output::plain(line);
        }
    }

    pub(crate) fn print_transcript(&self) {
        let sections = render::transcript_sections(&self.transcript);
        if sections.is_empty() {
            output::info("No semesters yet. Use `semester add` to create one.");
        }
        for (title, lines) in sections {
            output::section(title);
            for line in lines {
                output::plain(line);
            }
        }
    }
}

fn apply_output_preferences(config: &Config) {
    output::set_preferences(OutputPreferences {
        quiet_mode: config.quiet,
    });
}

/// Parses a 1-based display number into a 0-based index.
fn parse_position(arg: &str, what: &str) -> Result<usize, CommandError> {
    match arg.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "{what} number must be a positive integer, got `{arg}`"
        ))),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] GpaError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    manager: ConfigManager,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut context = ShellContext::with_config_manager(CliMode::Script, manager)?;
    for line in lines {
        match super::shell::handle_line(&mut context, line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(context)
}
