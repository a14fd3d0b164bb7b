use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "prior",
        "Record the GPA earned before the listed semesters",
        "prior\nprior <hours> <gpa>\nprior clear",
        cmd_prior,
    )]
}

fn cmd_prior(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            context.print_prior();
            Ok(())
        }
        [keyword] if keyword.eq_ignore_ascii_case("clear") => {
            context.transcript.set_prior(None, None)?;
            output::success("Previous GPA cleared.");
            context.print_result();
            Ok(())
        }
        [hours, gpa] => {
            let hours = parse_hours(hours)?;
            let gpa = parse_gpa(gpa)?;
            context.transcript.set_prior(Some(hours), Some(gpa))?;
            output::success("Previous GPA recorded.");
            context.print_result();
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: prior <hours> <gpa> | prior clear".into(),
        )),
    }
}

fn parse_hours(value: &str) -> Result<i64, CommandError> {
    value.trim().parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("hours must be a whole number, got `{value}`"))
    })
}

fn parse_gpa(value: &str) -> Result<f64, CommandError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|gpa| gpa.is_finite())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("GPA must be a number, got `{value}`"))
        })
}
