extern crate calin as lib;

use chrono::Month;
use flexi_logger::{FileSpec, Logger};
use lib::{Calendar, CalendarPage, Error, ErrorKind, LogDiagnostics};
use num_traits::FromPrimitive;
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "calin",
    about = "Renders a calendar description file as an HTML month grid."
)]
pub struct Args {
    #[structopt(help = "calendar description file (*.calin)")]
    pub input: Option<String>,

    #[structopt(
        name = "CONFIG",
        short = "c",
        long = "config",
        help = "path to config file",
        parse(from_os_str)
    )]
    pub configfile: Option<PathBuf>,

    #[structopt(short = "m", long = "month", help = "month to start from (1-12)")]
    pub month: Option<u32>,

    #[structopt(
        short = "y",
        long = "year",
        allow_hyphen_values = true,
        help = "year to start from"
    )]
    pub year: Option<i32>,

    #[structopt(
        short = "o",
        long = "output",
        help = "write the calendar to this file instead of stdout",
        parse(from_os_str)
    )]
    pub output: Option<PathBuf>,

    #[structopt(long = "log-file", help = "path to log file", parse(from_os_str))]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::from_args();

    const DEFAULT_LOG_LEVEL: &'static str = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let mut logger = Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?;

    if let Some(log_file) = args.log_file {
        logger = logger
            .log_to_file(FileSpec::try_from(log_file)?)
            .print_message();
    }

    let _logger = logger.start()?;

    std::panic::set_hook(Box::new(|info| {
        eprintln!("calin ran into a fatal error!");
        eprintln!(
            "Consider filing an issue with the input file and the backtrace below at {}",
            env!("CARGO_PKG_REPOSITORY")
        );

        eprintln!("{}", info);
        eprintln!("{:?}", backtrace::Backtrace::new());
    }));

    let config = lib::config::load_suitable_config(args.configfile.as_deref())?;

    let mut page = CalendarPage::for_today();
    if let Some(year) = args.year {
        page.set_year(year);
    }
    if let Some(month) = args.month {
        let month = Month::from_u32(month).ok_or_else(|| {
            Error::new(
                ErrorKind::ArgumentParse,
                &format!("month must be within 1-12, got {}", month),
            )
        })?;
        page.set_month(month);
    }

    let html = Calendar::from_config(&config, page)
        .render_file(args.input.as_deref().unwrap_or(""), &mut LogDiagnostics);

    match args.output {
        Some(path) => fs::write(path, html)?,
        None => print!("{}", html),
    }

    Ok(())
}
