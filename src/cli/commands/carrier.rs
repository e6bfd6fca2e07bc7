//! Carrier assignment and the CSV export glue.

use std::fs;
use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "carrier",
            "Assign a carrier to one scanned code",
            "carrier <code> <name>",
            cmd_carrier,
        ),
        CommandEntry::new(
            "carrier-all",
            "Assign a carrier to every scan missing one",
            "carrier-all <name>",
            cmd_carrier_all,
        ),
        CommandEntry::new(
            "export",
            "Batch-assign a carrier, then export on-manifest scans as CSV",
            "export <name> [path]",
            cmd_export,
        ),
    ]
}

fn cmd_carrier(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 2 {
        return Err(CommandError::InvalidArguments(
            "usage: carrier <code> <name>".into(),
        ));
    }
    context.station.assign_carrier(args[0], args[1])?;
    io::print_success(format!(
        "Carrier `{}` assigned to {}.",
        args[1].trim(),
        args[0].trim().to_uppercase()
    ));
    context.persist_station();
    Ok(())
}

fn cmd_carrier_all(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.len() != 1 {
        return Err(CommandError::InvalidArguments(
            "usage: carrier-all <name>".into(),
        ));
    }
    let report = context.station.assign_carrier_to_all_unset(args[0])?;
    if report.updated == 0 {
        io::print_info("Every scan already has a carrier assigned.");
    } else {
        io::print_success(format!(
            "Carrier `{}` assigned to {} scan(s).",
            args[0].trim(),
            report.updated
        ));
        context.persist_station();
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args.len() > 2 {
        return Err(CommandError::InvalidArguments(
            "usage: export <name> [path]".into(),
        ));
    }
    let report = context.station.assign_carrier_to_all_unset(args[0])?;

    let records: Vec<_> = context
        .station
        .list_scanned()
        .into_iter()
        .filter(|record| record.present_in_manifest)
        .collect();
    if records.is_empty() {
        io::print_warning("No on-manifest scans to export.");
        return Ok(());
    }

    let path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("scans_{}.csv", records[0].scan_date)));

    let mut csv = String::from("code,scan_date,time,carrier,status\n");
    for record in &records {
        csv.push_str(&format!(
            "{},{},{},{},{}\n",
            record.code,
            record.scan_date,
            record.timestamp.format("%H:%M:%S"),
            record.carrier.as_deref().unwrap_or(""),
            record.status.map(|status| status.label()).unwrap_or("none"),
        ));
    }
    fs::write(&path, csv)?;

    io::print_success(format!(
        "Exported {} scan(s) to {} ({} newly assigned to `{}`).",
        records.len(),
        path.display(),
        report.updated,
        args[0].trim()
    ));
    context.persist_station();
    Ok(())
}
