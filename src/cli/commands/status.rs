//! Disposition arming/assignment and the derived list queries.

use crate::cli::commands::print_records;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::DispositionStatus;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "arm",
            "Toggle the status applied automatically to accepted scans",
            "arm <collected|failed>",
            cmd_arm,
        ),
        CommandEntry::new(
            "set-status",
            "Assign a disposition to a scanned code",
            "set-status <code> <collected|failed>",
            cmd_set_status,
        ),
        CommandEntry::new(
            "scanned",
            "List scans, most recent first, optionally by disposition",
            "scanned [collected|failed|none]",
            cmd_scanned,
        ),
        CommandEntry::new(
            "missing",
            "List expected codes that have not been scanned",
            "missing",
            cmd_missing,
        ),
        CommandEntry::new(
            "stats",
            "Show manifest coverage totals",
            "stats",
            cmd_stats,
        ),
    ]
}

fn parse_status(raw: &str) -> Result<DispositionStatus, CommandError> {
    DispositionStatus::parse(raw).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "unknown status `{}`; expected `collected` or `failed`",
            raw
        ))
    })
}

fn cmd_arm(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: arm <collected|failed>".into(),
        ));
    }
    let status = parse_status(args[0])?;
    if context.armed == Some(status) {
        context.armed = None;
        io::print_info("Selected status cleared.");
    } else {
        context.armed = Some(status);
        io::print_success(format!(
            "Selected status armed: every accepted scan now receives `{}`.",
            status.label()
        ));
    }
    Ok(())
}

fn cmd_set_status(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: set-status <code> <collected|failed>".into(),
        ));
    }
    let status = parse_status(args[1])?;
    context.station.set_status(args[0], status)?;
    io::print_success(format!(
        "Status `{}` applied to {}.",
        status.label(),
        args[0].trim().to_uppercase()
    ));
    context.persist_station();
    Ok(())
}

fn cmd_scanned(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let records = match args {
        [] => context.station.list_scanned(),
        [filter] if filter.eq_ignore_ascii_case("none") => context.station.list_by_status(None),
        [filter] => {
            let status = parse_status(filter)?;
            context.station.list_by_status(Some(status))
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: scanned [collected|failed|none]".into(),
            ))
        }
    };
    output_section("Scanned items");
    print_records(&records);
    Ok(())
}

fn cmd_missing(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: missing".into()));
    }
    let missing = context.station.list_missing();
    if missing.is_empty() {
        io::print_success("No missing items; every expected code has been scanned.");
        return Ok(());
    }
    output_section("Missing items");
    for code in &missing {
        io::print_info(format!("  {}", code));
    }
    io::print_info(format!("Total: {}", missing.len()));
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: stats".into()));
    }
    let stats = context.station.stats();
    output_section("Manifest coverage");
    io::print_info(format!("  Expected codes   : {}", stats.expected));
    io::print_info(format!("  Scanned (on list): {}", stats.scanned_in_manifest));
    io::print_info(format!("  Missing          : {}", stats.missing));
    io::print_info(format!("  Scans recorded   : {}", stats.scanned_total));
    io::print_info(format!("  Coverage         : {:.2}%", stats.percent_scanned));
    Ok(())
}
