use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use loglyzer::{load_input, Analyzer, EngineError};

mod cli;
mod colors;
mod formatters;
mod logging;
mod platform;

use cli::Cli;
use platform::ExitCode;

const NO_MATCHES: &str = "No entries match the given filters.";

fn main() {
    // clap reports its own usage errors with exit code 2
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let code = match run(&cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("loglyzer: Error: {}", e);
            exit_code_for(&e)
        }
    };
    code.exit();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<EngineError>() {
        Some(engine_error) if engine_error.is_usage_error() => ExitCode::InvalidUsage,
        _ => ExitCode::GeneralError,
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Reject bad options before touching the input
    let analyzer = Analyzer::new(cli.analysis_config())?;

    let start = Instant::now();
    let input = load_input(&cli.input)?;
    let load_time = start.elapsed();

    let analysis = analyzer.analyze(&input)?;
    let analysis_time = start.elapsed() - load_time;

    if cli.show_failures {
        for failure in &analysis.failures {
            eprintln!("loglyzer: unparsed {}", failure);
        }
    }

    let rendered = if analysis.report.is_empty() {
        format!("{}\n", NO_MATCHES)
    } else {
        let use_colors = colors::should_use_colors(cli.color, cli.output.is_some());
        formatters::create_formatter(cli.format, use_colors).format(&analysis)?
    };

    match &cli.output {
        Some(path) => {
            platform::write_file(path, &rendered)?;
            platform::write_stdout(&format!("Results written to {}\n", path.display()))?;
        }
        None => platform::write_stdout(&rendered)?,
    }

    if cli.verbose > 0 {
        eprintln!(
            "Performance: load={:?}, analyze={:?}, total={:?} ({} bytes, {} mode, {} chunk{})",
            load_time,
            analysis_time,
            start.elapsed(),
            input.len(),
            analysis.mode,
            analysis.chunks,
            if analysis.chunks == 1 { "" } else { "s" }
        );
    }

    Ok(())
}
