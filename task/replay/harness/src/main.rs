#![forbid(unsafe_code)]

mod driver;
mod endpoint;

use std::{ffi::OsString, io, path::PathBuf, process, time::Duration};

use anyhow::Context;
use clap::{
    error::{ContextKind, ErrorKind},
    CommandFactory, Parser,
};
use driver::Driver;
use endpoint::HttpEndpoint;
use log::*;
use replay_proto::{ReplayWindow, Transcript};

const USAGE_EXIT_CODE: i32 = 1;

/// Replays the turns leading up to TURN of a recorded game against a running
/// snake server and prints the move it picks for each of them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Arguments {
    /// Recorded game, one JSON snapshot per line
    transcript: PathBuf,

    /// Turn to replay up to
    #[arg(allow_negative_numbers = true)]
    turn: i64,

    #[arg(short, long, default_value_t = String::from("localhost"))]
    address: String,

    #[arg(short, long, default_value_t = 9000)]
    port: u16,

    /// Pause after each move request, 0 to disable
    #[arg(short, long, default_value_t = 100)]
    delay_ms: u64,

    #[arg(short, long, default_value_t = 2)]
    log_level: usize,
}

fn parse_arguments<I, T>(args: I) -> Result<Arguments, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Arguments::try_parse_from(args)
}

fn main() -> anyhow::Result<()> {
    let args = match parse_arguments(std::env::args_os()) {
        Ok(args) => args,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => usage_error(err),
    };

    stderrlog::new()
        .verbosity(args.log_level)
        .module(module_path!())
        .init()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create runtime")?;

    runtime.block_on(replay(args))
}

fn usage_error(err: clap::Error) -> ! {
    let _ = err.print();
    if err.get(ContextKind::Usage).is_none() {
        eprintln!("\n{}", Arguments::command().render_usage());
    }
    process::exit(USAGE_EXIT_CODE);
}

async fn replay(args: Arguments) -> anyhow::Result<()> {
    let transcript = Transcript::load(&args.transcript)
        .with_context(|| format!("failed to read transcript {}", args.transcript.display()))?;
    info!(
        "Loaded {} records from {}",
        transcript.len(),
        args.transcript.display()
    );

    let endpoint = HttpEndpoint::new(&args.address, args.port)?;
    let delay = Duration::from_millis(args.delay_ms);
    let mut driver = Driver::new(endpoint, io::stdout(), delay);
    driver.run(&transcript, ReplayWindow::new(args.turn)).await;

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
