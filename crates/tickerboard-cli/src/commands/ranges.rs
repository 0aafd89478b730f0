use std::io::Write;
use std::process::ExitCode;

use crate::error::CliError;
use crate::output;

use super::Context;

pub fn run(context: &Context) -> Result<ExitCode, CliError> {
    let rendered = output::render_ranges(context.config.default_range, context.render)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    Ok(ExitCode::SUCCESS)
}
