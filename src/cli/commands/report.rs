use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "show",
            "List every semester with its courses and totals",
            "show",
            cmd_show,
        ),
        CommandEntry::new(
            "result",
            "Show the overall GPA, hours, points and grade",
            "result",
            cmd_result,
        ),
        CommandEntry::new(
            "system",
            "Show the active calculation system",
            "system",
            cmd_system,
        ),
    ]
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.print_transcript();
    context.print_prior();
    context.print_result();
    Ok(())
}

fn cmd_result(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.print_result();
    Ok(())
}

fn cmd_system(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.print_system();
    Ok(())
}
