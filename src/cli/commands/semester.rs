use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::Transcript;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "semester",
        "Add or remove semesters",
        "semester add\nsemester remove <semester>",
        cmd_semester,
    )]
}

fn cmd_semester(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.first().map(|arg| arg.to_lowercase()).as_deref() {
        Some("add") => add_semester(context),
        Some("remove") | Some("rm") => match args.get(1) {
            Some(number) => remove_semester(context, number),
            None => Err(CommandError::InvalidArguments(
                "usage: semester remove <semester>".into(),
            )),
        },
        _ => Err(CommandError::InvalidArguments(
            "usage: semester <add|remove <semester>>".into(),
        )),
    }
}

fn add_semester(context: &mut ShellContext) -> CommandResult {
    context.transcript.add_semester();
    let title = Transcript::semester_title(context.transcript.semesters().len() - 1);
    output::success(format!("{title} added."));
    context.print_result();
    Ok(())
}

fn remove_semester(context: &mut ShellContext, number: &str) -> CommandResult {
    let id = context.semester_id(number)?;
    let course_count = context
        .transcript
        .semester(id)
        .map(|semester| semester.len())
        .unwrap_or_default();

    if context.mode() == CliMode::Interactive && course_count > 0 {
        let prompt = format!("Remove semester {number} and its {course_count} course(s)?");
        if !io::confirm_action(context.theme(), &prompt, false)? {
            output::info("Operation cancelled.");
            return Ok(());
        }
    }

    context.transcript.remove_semester(id)?;
    output::success(format!(
        "Semester {number} removed. Remaining semesters were renumbered."
    ));
    context.print_result();
    Ok(())
}
