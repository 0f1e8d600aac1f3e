//! Top-level command pattern
//!
//! A command body runs inside a `cli_command` boundary. Each record is parsed
//! through a nested boundary that logs and skips bad records: blank ones as
//! warnings, malformed ones as errors. The command still completes, but
//! because errors were counted beneath it, it ends with exit status 2.
//!
//! ```text
//! cargo run --example cli_command -- 4 8 "" 15        # exits 0
//! cargo run --example cli_command -- 4 eight 15       # exits 2
//! ```

use std::process::ExitCode;

use fault_boundary::prelude::*;

fn parse_record(raw: &str) -> Result<u64, Fault> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Fault::new(FaultKind::named_warning("blank"), "skipping blank record"));
    }
    trimmed
        .parse::<u64>()
        .or_fault_with(FaultKind::named_error("parse"), || format!("record `{trimmed}` is not a number"))
}

fn sum_records(records: &[String]) -> Result<u64, Fault> {
    let mut parse = FaultBoundary::builder()
        .show_type(true)
        .build()
        .map_err(|e| Fault::from_error(FaultKind::named_error("config"), e))?
        .wrap(|raw: &str| parse_record(raw));

    let mut total = 0;
    for raw in records {
        if let Some(value) = parse.call(raw.as_str())? {
            total += value;
        }
    }

    let (errors, warnings) = parse.context().counts();
    tracing::debug!(errors, warnings, "records parsed");
    Ok(total)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let records: Vec<String> = std::env::args().skip(1).collect();

    let mut command = match FaultBoundary::builder()
        .config(BoundaryConfig::cli_command())
        .on_errors_raise(Escalation::cli_exit().with_code(2))
        .enter_message("summing records")
        .exit_message("sum finished")
        .build()
    {
        Ok(boundary) => boundary,
        Err(e) => {
            eprintln!("invalid boundary configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match command.run(|| sum_records(&records)) {
        Ok(Some(total)) => {
            println!("{total}");
            ExitCode::SUCCESS
        },
        Ok(None) => ExitCode::SUCCESS,
        Err(fault) => {
            eprintln!("{fault}");
            fault.process_exit_code()
        },
    }
}
