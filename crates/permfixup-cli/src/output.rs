use anyhow::Result;
use colored::Colorize;
use permfixup_core::UserId;
use permfixup_reconcile::FixupOutcome;
use serde::Serialize;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::cli::OutputFormat;

/// One line of `run` output.
#[derive(Debug, Serialize)]
pub struct UserResult {
    pub user_id: UserId,
    pub result: FixupOutcome,
}

pub fn print_results(results: &[UserResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(results)?);
        }
        OutputFormat::Table => print_tables(results),
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    eprintln!("{} {}", "✓".green(), msg);
}

pub fn print_warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

fn status_label(outcome: &FixupOutcome) -> String {
    match outcome {
        FixupOutcome::ProviderUnavailable => "no provider".to_string(),
        FixupOutcome::NoLegacyState => "no legacy state".to_string(),
        FixupOutcome::Completed(report) if report.dry_run => "preview".to_string(),
        FixupOutcome::Completed(_) => "completed".to_string(),
    }
}

fn print_tables(results: &[UserResult]) {
    if results.is_empty() {
        println!("No users processed.");
        return;
    }

    let mut users = Builder::default();
    users.push_record(["User", "Status", "Scanned", "Missing", "Revoked"]);
    for entry in results {
        let (scanned, missing) = entry
            .result
            .report()
            .map(|r| (r.app_ids_scanned.to_string(), r.app_ids_missing.to_string()))
            .unwrap_or_else(|| ("-".to_string(), "-".to_string()));
        users.push_record([
            entry.user_id.to_string(),
            status_label(&entry.result),
            scanned,
            missing,
            entry.result.revoked().len().to_string(),
        ]);
    }
    println!("{}", users.build().with(Style::rounded()));

    let revoked: Vec<_> = results
        .iter()
        .flat_map(|entry| entry.result.revoked().iter().map(move |r| (entry.user_id, r)))
        .collect();
    if revoked.is_empty() {
        return;
    }

    let mut rows = Builder::default();
    rows.push_record(["User", "AppId", "Permission", "Before", "After"]);
    for (user_id, r) in revoked {
        rows.push_record([
            user_id.to_string(),
            r.app_id.to_string(),
            r.permission.clone(),
            r.previous_flags.to_string(),
            r.new_flags.to_string(),
        ]);
    }
    println!("{}", rows.build().with(Style::rounded()));
}
