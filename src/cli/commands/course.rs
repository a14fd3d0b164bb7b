use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::{format_points, Semester};
use crate::grades::GradeLevel;

const USAGE: &str = "course add <semester> [name]
course remove <semester> <course>
course name <semester> <course> <name>
course score <semester> <course> <score|->
course grade <semester> <course> <letter|->
course hours <semester> <course> <hours>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "course",
        "Add, edit or remove courses within a semester",
        USAGE,
        cmd_course,
    )]
}

fn cmd_course(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((action, rest)) = args.split_first() else {
        return Err(usage());
    };
    match action.to_lowercase().as_str() {
        "add" => add_course(context, rest),
        "remove" | "rm" => remove_course(context, rest),
        "name" => rename_course(context, rest),
        "score" => set_score(context, rest),
        "grade" => set_grade(context, rest),
        "hours" => set_hours(context, rest),
        _ => Err(usage()),
    }
}

fn usage() -> CommandError {
    CommandError::InvalidArguments(format!("usage:\n{USAGE}"))
}

fn missing_semester(number: &str) -> CommandError {
    CommandError::InvalidArguments(format!("semester {number} does not exist"))
}

/// Splits `<semester> <course> <value...>` and joins the trailing words.
fn addressed<'a>(args: &[&'a str]) -> Result<(&'a str, &'a str, String), CommandError> {
    match args {
        [semester, course, value @ ..] if !value.is_empty() => {
            Ok((*semester, *course, value.join(" ")))
        }
        _ => Err(usage()),
    }
}

fn add_course(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((semester_arg, name_words)) = args.split_first() else {
        return Err(usage());
    };
    let semester_id = context.semester_id(semester_arg)?;

    let name = if name_words.is_empty() && context.mode() == CliMode::Interactive {
        io::prompt_text(context.theme(), "Course name (optional)")?
    } else {
        name_words.join(" ")
    };

    let semester = context
        .transcript
        .semester_mut(semester_id)
        .ok_or_else(|| missing_semester(semester_arg))?;
    semester.add_course().set_name(name);
    let title = Semester::course_title(semester.len() - 1);
    output::success(format!("{title} added to semester {semester_arg}."));
    context.print_result();
    Ok(())
}

fn remove_course(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [semester_arg, course_arg] = args else {
        return Err(usage());
    };
    let (semester_id, course_id) = context.course_ids(semester_arg, course_arg)?;
    let semester = context
        .transcript
        .semester_mut(semester_id)
        .ok_or_else(|| missing_semester(semester_arg))?;
    semester.remove_course(course_id)?;
    output::success(format!(
        "Course {course_arg} removed from semester {semester_arg}."
    ));
    context.print_result();
    Ok(())
}

fn rename_course(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (semester_arg, course_arg, name) = addressed(args)?;
    let (semester_id, course_id) = context.course_ids(semester_arg, course_arg)?;
    context.course_mut(semester_id, course_id)?.set_name(name);
    output::success("Course renamed.");
    Ok(())
}

fn set_score(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (semester_arg, course_arg, value) = addressed(args)?;
    let (semester_id, course_id) = context.course_ids(semester_arg, course_arg)?;
    let course = context.course_mut(semester_id, course_id)?;
    if value.trim() == "-" {
        course.set_score(None)?;
    } else {
        course.set_score_input(&value)?;
    }
    output::success(format!(
        "Course {course_arg}: grade {}, {} points.",
        course.grade(),
        format_points(course.points())
    ));
    context.print_result();
    Ok(())
}

fn set_grade(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (semester_arg, course_arg, value) = addressed(args)?;
    let level = value.parse::<GradeLevel>()?;
    let (semester_id, course_id) = context.course_ids(semester_arg, course_arg)?;
    let course = context.course_mut(semester_id, course_id)?;
    course.set_grade(level);
    let score = course
        .score()
        .map(|score| format!("{score:.2}"))
        .unwrap_or_else(|| "-".to_string());
    output::success(format!(
        "Course {course_arg}: grade {}, score {score}.",
        course.grade()
    ));
    context.print_result();
    Ok(())
}

fn set_hours(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (semester_arg, course_arg, value) = addressed(args)?;
    let hours = value.trim().parse::<i64>().map_err(|_| {
        CommandError::InvalidArguments(format!("hours must be a whole number, got `{value}`"))
    })?;
    let (semester_id, course_id) = context.course_ids(semester_arg, course_arg)?;
    context
        .course_mut(semester_id, course_id)?
        .set_credit_hours(hours)?;
    output::success(format!("Course {course_arg}: {hours} credit hours."));
    context.print_result();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_words_form_the_value() {
        let (semester, course, name) = addressed(&["1", "2", "Organic", "Chemistry"]).unwrap();
        assert_eq!((semester, course), ("1", "2"));
        assert_eq!(name, "Organic Chemistry");
        assert!(addressed(&["1", "2"]).is_err());
    }
}
