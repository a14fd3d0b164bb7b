use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext, SCRIPT_ENV};
use crate::cli::output;

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    tracing::debug!(?mode, "shell started");

    match mode {
        CliMode::Interactive => {
            let mut source = EditorLines::new(context.command_names())?;
            output::info("Type `help` to list commands.");
            context.print_result();
            drive(&mut context, &mut source)
        }
        CliMode::Script => drive(&mut context, &mut StdinLines(io::stdin().lock().lines())),
    }
}

/// Where the shell reads its next command from.
trait LineSource {
    /// `Ok(None)` ends the session.
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError>;
}

struct StdinLines<I>(I);

impl<I> LineSource for StdinLines<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    fn next_line(&mut self, _context: &ShellContext) -> Result<Option<String>, CliError> {
        Ok(self.0.next().transpose()?)
    }
}

struct EditorLines {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl EditorLines {
    fn new(commands: Vec<&'static str>) -> Result<Self, CliError> {
        let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(CommandHelper::new(commands)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self { editor })
    }
}

impl LineSource for EditorLines {
    fn next_line(&mut self, context: &ShellContext) -> Result<Option<String>, CliError> {
        loop {
            match self.editor.readline(&context.prompt()) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        self.editor.add_history_entry(trimmed).ok();
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    if context.confirm_exit()? {
                        return Ok(None);
                    }
                }
                Err(ReadlineError::Eof) => {
                    output::info("Exiting shell.");
                    return Ok(None);
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

/// Feeds lines to the dispatcher until the source runs dry or `exit` is issued.
fn drive(context: &mut ShellContext, source: &mut impl LineSource) -> Result<(), CliError> {
    while context.running {
        let Some(line) = source.next_line(context)? else {
            break;
        };
        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err),
        }
    }
    Ok(())
}

pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let tokens = match parse_command_line(trimmed) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(err);
            return Ok(LoopControl::Continue);
        }
    };

    let Some(raw) = tokens.first() else {
        return Ok(LoopControl::Continue);
    };
    let command = raw.to_lowercase();
    let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

    context.last_command = Some(trimmed.to_string());

    match context.dispatch(&command, raw, &args) {
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(LoopControl::Exit)
        }
        other => other,
    }
}

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, needle: &str) -> Vec<Pair> {
        self.commands
            .iter()
            .filter(|name| name.starts_with(needle))
            .map(|name| Pair {
                display: name.clone(),
                replacement: name.clone(),
            })
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);

        // Only the command word completes; arguments are positional numbers.
        if prefix[..start].trim().is_empty() {
            let needle = prefix[start..].to_ascii_lowercase();
            Ok((start, self.candidates(&needle)))
        } else {
            Ok((start, Vec::new()))
        }
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not parse command line: {}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigManager;

    #[test]
    fn quoted_names_stay_together() {
        let tokens = parse_command_line("course add 1 \"Data Structures\"").unwrap();
        assert_eq!(tokens, vec!["course", "add", "1", "Data Structures"]);
    }

    #[test]
    fn unbalanced_quotes_are_reported() {
        let err = parse_command_line("course add 1 \"open").unwrap_err();
        assert!(err.to_string().starts_with("Could not parse command line"));
    }

    #[test]
    fn session_stops_at_exit() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let mut context = ShellContext::with_config_manager(CliMode::Script, manager).unwrap();
        let lines = ["semester add", "", "# comment", "exit", "semester add"]
            .into_iter()
            .map(|line| io::Result::Ok(line.to_string()));

        drive(&mut context, &mut StdinLines(lines)).unwrap();
        assert_eq!(context.transcript().semesters().len(), 1);
        assert!(!context.running);
    }

    #[test]
    fn completion_covers_command_word_only() {
        let helper = CommandHelper::new(vec!["semester", "show", "system", "course"]);
        let names: Vec<String> = helper
            .candidates("s")
            .into_iter()
            .map(|pair| pair.replacement)
            .collect();
        assert_eq!(names, vec!["semester", "show", "system"]);
        assert!(helper.candidates("x").is_empty());
    }
}
