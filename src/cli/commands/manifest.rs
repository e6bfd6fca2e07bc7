//! Manifest import, removal, and the full system reset.

use std::fs;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "import",
            "Import expected tracking codes",
            "import [--clear] <code>...",
            cmd_import,
        ),
        CommandEntry::new(
            "import-file",
            "Import expected codes from a file, one per line",
            "import-file [--clear] <path>",
            cmd_import_file,
        ),
        CommandEntry::new(
            "remove-code",
            "Remove one expected code from the manifest",
            "remove-code <code>",
            cmd_remove_code,
        ),
        CommandEntry::new(
            "reset",
            "Clear manifest and scans, keeping today's dashboard summary",
            "reset",
            cmd_reset,
        ),
    ]
}

fn split_clear_flag<'a>(args: &[&'a str]) -> (bool, Vec<&'a str>) {
    let mut clear = false;
    let mut rest = Vec::new();
    for arg in args {
        if *arg == "--clear" {
            clear = true;
        } else {
            rest.push(*arg);
        }
    }
    (clear, rest)
}

fn import_codes(context: &mut ShellContext, codes: &[&str], clear: bool) -> CommandResult {
    if clear
        && !context
            .confirm_destructive_action("Replace the manifest and clear all scan records?")?
    {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let report = context.station.import_codes(codes.iter().copied(), clear);
    io::print_success(format!(
        "Import finished: {} new codes, {} duplicates skipped.",
        report.imported, report.duplicates_skipped
    ));
    context.persist_station();
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (clear, codes) = split_clear_flag(args);
    if codes.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: import [--clear] <code>...".into(),
        ));
    }
    import_codes(context, &codes, clear)
}

fn cmd_import_file(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (clear, rest) = split_clear_flag(args);
    if rest.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: import-file [--clear] <path>".into(),
        ));
    }
    let contents = fs::read_to_string(rest[0])?;
    let codes: Vec<&str> = contents.split_whitespace().collect();
    if codes.is_empty() {
        io::print_warning("File contains no codes.");
        return Ok(());
    }
    import_codes(context, &codes, clear)
}

fn cmd_remove_code(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: remove-code <code>".into(),
        ));
    }
    if context.station.remove_manifest_code(args[0])? {
        io::print_success(format!("Code {} removed from the manifest.", args[0]));
        context.persist_station();
    } else {
        io::print_warning(format!("Code {} is not on the manifest.", args[0]));
    }
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: reset".into()));
    }
    if !context.confirm_destructive_action(
        "Reset the station? This clears the manifest and every scan record.",
    )? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    let report = context.station.reset();
    io::print_success(format!(
        "Station reset: {} expected codes and {} scan records removed. Today's dashboard summary was preserved.",
        report.manifest_removed, report.scans_removed
    ));
    context.persist_station();
    Ok(())
}
