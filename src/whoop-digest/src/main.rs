#[macro_use]
extern crate log;

use std::{
    io::{self, Write},
    path::PathBuf,
};

use chrono::NaiveDate;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use whoop_digest::{
    DEFAULT_TIMEZONE, DigestReport, load_streams, load_summaries, parse_timezone, resolve_window,
    summarize, to_json,
};
use whoop_digest_algos::{DateWindow, DuplicatePolicy, analyze};

#[derive(Parser)]
#[command(name = "whoop-digest", version)]
pub struct WhoopDigestCli {
    /// IANA timezone used to assign records to calendar dates
    #[arg(env = "WHOOP_TIMEZONE", long, global = true, default_value = DEFAULT_TIMEZONE)]
    pub timezone: String,
    /// Pretty print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,
    #[clap(subcommand)]
    pub subcommand: WhoopDigestCommand,
}

#[derive(Args)]
pub struct WindowArgs {
    /// First date of the window, pulled back if the window would pass today
    #[arg(long, env = "WHOOP_START_DATE")]
    pub start_date: Option<NaiveDate>,
    #[arg(long, env = "WHOOP_DAYS", default_value_t = DateWindow::DEFAULT_DAYS)]
    pub days: u32,
    /// Overrides the current date
    #[arg(long)]
    pub today: Option<NaiveDate>,
    #[arg(long, env = "WHOOP_DUPLICATE_POLICY", default_value_t = DuplicatePolicy::LastWins)]
    pub duplicate_policy: DuplicatePolicy,
}

#[derive(Subcommand)]
pub enum WhoopDigestCommand {
    ///
    /// Aggregate raw records into one summary per day, newest first
    ///
    Summary {
        /// JSON file with raw records, `-` for stdin
        input: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
    },
    ///
    /// Compute trends and patterns over daily summaries
    ///
    Analyze {
        /// JSON file with daily summaries, `-` for stdin
        input: PathBuf,
    },
    ///
    /// Aggregate raw records and analyze them in one pass
    ///
    Report {
        input: PathBuf,
        #[command(flatten)]
        window: WindowArgs,
    },
    ///
    /// Print shell completions
    ///
    Completions { shell: Shell },
}

fn main() -> anyhow::Result<()> {
    let env_file = dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // stdout carries the JSON output
    if let Err(error) = env_file {
        debug!(".env not loaded: {}", error);
    }

    let cli = WhoopDigestCli::parse();
    run(cli, &mut io::stdout().lock())
}

fn run(cli: WhoopDigestCli, out: &mut impl Write) -> anyhow::Result<()> {
    match cli.subcommand {
        WhoopDigestCommand::Summary { input, window } => {
            let tz = parse_timezone(&cli.timezone)?;
            let streams = load_streams(&input)?;
            let date_window = resolve_window(window.start_date, window.days, window.today);

            let days = summarize(&streams, &date_window, tz, window.duplicate_policy);
            writeln!(out, "{}", to_json(&days, cli.pretty)?)?;
            Ok(())
        }
        WhoopDigestCommand::Analyze { input } => {
            let days = load_summaries(&input)?;
            if days.is_empty() {
                warn!("no daily summaries in {}", input.display());
            }

            writeln!(out, "{}", to_json(&analyze(&days), cli.pretty)?)?;
            Ok(())
        }
        WhoopDigestCommand::Report { input, window } => {
            let tz = parse_timezone(&cli.timezone)?;
            let streams = load_streams(&input)?;
            let date_window = resolve_window(window.start_date, window.days, window.today);

            let days = summarize(&streams, &date_window, tz, window.duplicate_policy);
            let report = DigestReport::new(&date_window, tz.name(), days);
            writeln!(out, "{}", to_json(&report, cli.pretty)?)?;
            Ok(())
        }
        WhoopDigestCommand::Completions { shell } => {
            let mut command = WhoopDigestCli::command();
            let name = command.get_name().to_string();
            clap_complete::generate(shell, &mut command, name, out);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::NamedTempFile;

    use super::*;

    fn raw_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"cycle": [{{"start": "2024-03-03T12:00:00Z", "score": {{"strain": 11.5}}}}]}}"#
        )
        .unwrap();
        file
    }

    fn run_args(args: &[&str]) -> String {
        let cli = WhoopDigestCli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn summary_stdout_is_only_json() {
        let input = raw_file();
        let path = input.path().to_str().unwrap();

        let out = run_args(&[
            "whoop-digest",
            "--timezone",
            "UTC",
            "summary",
            path,
            "--today",
            "2024-03-03",
            "--days",
            "2",
        ]);

        let days: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(days[0]["date"], "2024-03-03");
        assert_eq!(days[0]["strain"]["day_strain"], 11.5);
        assert_eq!(days[1]["date"], "2024-03-02");
    }

    #[test]
    fn report_stdout_is_only_json() {
        let input = raw_file();
        let path = input.path().to_str().unwrap();

        let out = run_args(&[
            "whoop-digest",
            "--timezone",
            "America/New_York",
            "report",
            path,
            "--today",
            "2024-03-04",
            "--pretty",
        ]);

        let report: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(report["window"]["timezone"], "America/New_York");
        assert_eq!(report["daily_summaries"].as_array().unwrap().len(), 7);
        assert_eq!(report["analytics"]["strain"]["peak_strain"], 11.5);
    }
}
