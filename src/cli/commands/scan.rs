//! Scan submission and scan-record deletion.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::ScanOutcome;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "scan",
            "Submit one scanned tracking code",
            "scan <code>",
            cmd_scan,
        ),
        CommandEntry::new(
            "delete",
            "Delete scan records, freeing the codes for re-scan",
            "delete <code>...",
            cmd_delete,
        ),
    ]
}

fn cmd_scan(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments("usage: scan <code>".into()));
    }
    let outcome = context.station.scan(args[0], context.armed)?;
    match &outcome {
        ScanOutcome::Accepted(record) => {
            io::print_success(outcome.message());
            if let Some(status) = record.status {
                io::print_info(format!(
                    "Disposition `{}` applied automatically.",
                    status.label()
                ));
            }
            context.persist_station();
        }
        ScanOutcome::AlreadyScanned(_) | ScanOutcome::NotExpected { .. } => {
            io::print_warning(outcome.message());
        }
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: delete <code>...".into(),
        ));
    }
    if !context.confirm_destructive_action(&format!("Delete {} scan record(s)?", args.len()))? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }

    if args.len() == 1 {
        let record = context.station.delete_scan(args[0])?;
        io::print_success(format!(
            "Scan {} deleted; the code may be scanned again.",
            record.code
        ));
    } else {
        let codes: Vec<String> = args.iter().map(|code| code.to_string()).collect();
        let report = context.station.delete_scans(&codes);
        io::print_success(format!(
            "Deleted {} scan record(s); {} code(s) had no record.",
            report.deleted.len(),
            report.not_found.len()
        ));
    }
    context.persist_station();
    Ok(())
}
