pub mod config;
pub mod course;
pub mod prior;
pub mod report;
pub mod semester;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(semester::definitions());
    commands.extend(course::definitions());
    commands.extend(prior::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands
}

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
