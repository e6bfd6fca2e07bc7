use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;

/// Renders either the full command list or the usage of one command.
pub(crate) fn render(context: &ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first() {
        match context.command(&name.to_lowercase()) {
            Some(entry) => {
                io::print_info(format!("{}: {}", entry.name, entry.description));
                io::print_info(format!("usage: {}", entry.usage));
            }
            None => {
                io::print_warning(format!("Unknown command `{}`.", name));
            }
        }
        return Ok(());
    }

    output_section("Commands");
    for entry in context.registry().list() {
        io::print_info(format!("  {:<16} {}", entry.name, entry.description));
    }
    Ok(())
}
