//! `masctl apply`: converge one app and report the result.

use anyhow::Result;
use maskit::{Client, Outcome};
use std::process::ExitCode;

use crate::Context;
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::params::{self, ArgsFile, Params};
use crate::report::{self, Report};

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<ExitCode> {
    match prepare(ctx, &args).and_then(|(client, params)| execute(&client, &params, &args)) {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            log::debug!("apply failed: {e:?}");
            report::failure(args.format, &format!("{e:#}"))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Load config and parameters, and pick the mas executable.
fn prepare(ctx: &Context, args: &ApplyArgs) -> Result<(Client, Params)> {
    let config = Config::load(ctx.config.as_deref())?;
    let file = match &args.args_file {
        Some(path) => ArgsFile::load(path)?,
        None => ArgsFile::default(),
    };
    let params = params::resolve(args, file, &config)?;

    let client = match config.mas_path() {
        Some(path) => {
            log::debug!("using configured mas at {path}");
            Client::with_mas_path(path)
        }
        None => Client::new()?,
    };
    Ok((client, params))
}

fn execute(client: &Client, params: &Params, args: &ApplyArgs) -> Result<Outcome> {
    log::info!(
        "ensuring {} is {}{}",
        params.spec.id,
        params.spec.state,
        if params.check_mode { " (check mode)" } else { "" }
    );
    let outcome = client.converge(&params.spec, params.check_mode)?;
    report::success(
        args.format,
        &Report::new(&params.spec, &outcome),
        params.check_mode,
    )?;
    Ok(outcome)
}
