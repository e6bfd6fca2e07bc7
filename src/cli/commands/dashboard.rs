//! Dashboard views and the daily-summary reset.

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::domain::{DashboardSnapshot, SnapshotSource};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "dashboard",
            "Show today's counters and carrier totals",
            "dashboard",
            cmd_dashboard,
        ),
        CommandEntry::new(
            "refresh",
            "Force dashboard recomputation, bypassing the cache",
            "refresh",
            cmd_refresh,
        ),
        CommandEntry::new(
            "reset-dashboard",
            "Zero today's collected/failed/total counters",
            "reset-dashboard",
            cmd_reset_dashboard,
        ),
    ]
}

fn render_snapshot(snapshot: &DashboardSnapshot) {
    output_section("Dashboard");
    io::print_info(format!("  Scanned today   : {}", snapshot.total_today));
    io::print_info(format!("  Collected today : {}", snapshot.collected_today));
    io::print_info(format!("  Failed today    : {}", snapshot.failed_today));
    output_section("Carrier totals");
    for (name, count) in &snapshot.carriers {
        io::print_info(format!("  {:<16} {}", name, count));
    }
    let source = match snapshot.source {
        SnapshotSource::Cache => "cache",
        SnapshotSource::Computed => "computed",
    };
    io::print_info(format!(
        "Source: {} (updated {})",
        source,
        snapshot.last_updated.format("%H:%M:%S")
    ));
}

fn cmd_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: dashboard".into()));
    }
    render_snapshot(&context.station.dashboard());
    Ok(())
}

fn cmd_refresh(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments("usage: refresh".into()));
    }
    render_snapshot(&context.station.refresh_dashboard());
    Ok(())
}

fn cmd_reset_dashboard(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: reset-dashboard".into(),
        ));
    }
    if !context.confirm_destructive_action("Zero today's dashboard counters?")? {
        io::print_info("Operation cancelled.");
        return Ok(());
    }
    context.station.reset_daily_summary();
    io::print_success("Daily dashboard summary reset. Carrier totals are unchanged.");
    context.persist_station();
    Ok(())
}
