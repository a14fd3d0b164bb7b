use crate::cli::output;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output::section("Available commands");
    for entry in registry.list() {
        output::plain(format!("  {:<10} {}", entry.name, entry.description));
    }
    output::hint("Use `help <command>` for usage details.");
}

pub fn print_command(entry: &CommandEntry) {
    output::section(format!("Help: {}", entry.name));
    output::plain(format!("  Description: {}", entry.description));
    for (index, usage) in entry.usage.lines().enumerate() {
        let label = if index == 0 { "Usage:" } else { "      " };
        output::plain(format!("  {label} {}", usage.trim()));
    }
}
