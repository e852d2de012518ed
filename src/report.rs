//! Result reporting: a JSON object for automation, or colored lines for people.

use anyhow::Result;
use maskit::{AppSpec, DesiredState, Outcome};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::ui;

/// Result object of a successful run.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Report<'a> {
    pub changed: bool,
    pub signin: Option<&'a str>,
    pub id: &'a str,
    pub state: Option<DesiredState>,
}

impl<'a> Report<'a> {
    pub fn new(spec: &'a AppSpec, outcome: &'a Outcome) -> Self {
        Self {
            changed: outcome.changed(),
            signin: outcome.signin.as_deref(),
            id: &spec.id,
            state: outcome.state,
        }
    }
}

/// Result object of a failed run.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Failure<'a> {
    pub failed: bool,
    pub msg: &'a str,
}

pub fn success(format: OutputFormat, report: &Report, check_mode: bool) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(report)?),
        OutputFormat::Text => print_text(report, check_mode),
    }
    Ok(())
}

pub fn failure(format: OutputFormat, msg: &str) -> Result<()> {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(&Failure { failed: true, msg })?
        ),
        OutputFormat::Text => ui::error(msg.trim_end()),
    }
    Ok(())
}

fn print_text(report: &Report, check_mode: bool) {
    let verb = |done: &str, planned: &str| {
        if check_mode {
            format!("would {planned}")
        } else {
            done.to_string()
        }
    };

    if let Some(account) = report.signin {
        ui::success(&format!("{} as {account}", verb("signed in", "sign in")));
    }

    match report.state {
        Some(DesiredState::Present) => {
            ui::success(&format!("{} {}", verb("installed", "install"), report.id));
        }
        Some(DesiredState::Latest) => {
            ui::success(&format!("{} {}", verb("updated", "update"), report.id));
        }
        None => ui::info(&format!("{} already in desired state", report.id)),
    }

    if check_mode {
        ui::warn("check mode: nothing was changed");
    }
    ui::kv("changed", &report.changed.to_string());
}
