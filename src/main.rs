use ais_fixture_gen::decoder::{DEFAULT_DECODER_HEADER, DecoderContract};
use ais_fixture_gen::emit::ReleasePolicy;
use ais_fixture_gen::fixture::load_fixtures;
use ais_fixture_gen::i18n;
use ais_fixture_gen::pipeline::{DEFAULT_INPUT, DEFAULT_OUTPUT, GenerateOptions, check, generate};
use ais_fixture_gen::report::{print_summary, render_check, render_records};
use ais_fixture_gen::types::CheckOutcome;
use ais_fixture_gen::{t, t_args};
use anyhow::Result;
use clap::Parser;
use colored::control::set_override as set_color_override;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser, Debug, Clone)]
#[command(version, about = t!("cli-about"))]
struct Cli {
    #[arg(long, value_name = "FILE", default_value = DEFAULT_INPUT, help = t!("cli-input"))]
    input: PathBuf,

    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT, help = t!("cli-output"))]
    output: PathBuf,

    #[arg(
        long = "decoder-header",
        value_name = "PATH",
        default_value = DEFAULT_DECODER_HEADER,
        help = t!("cli-decoder-header")
    )]
    decoder_header: String,

    #[arg(long = "guarded-release", help = t!("cli-guarded-release"))]
    guarded_release: bool,

    #[arg(long, conflicts_with = "list", help = t!("cli-check"))]
    check: bool,

    #[arg(long, help = t!("cli-list"))]
    list: bool,

    #[arg(short = 'v', long = "verbose", help = t!("cli-verbose"))]
    verbose: bool,

    #[arg(short = 'q', long = "silent", conflicts_with = "verbose", help = t!("cli-silent"))]
    silent: bool,

    #[arg(long = "no-color", help = t!("cli-no-color"))]
    no_color: bool,
}

fn main() -> Result<()> {
    // Localization first: the clap help strings go through it.
    i18n::init();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ais_fixture_gen=info".to_string())
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "ais_fixture_gen=warn".to_string())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.no_color {
        set_color_override(false);
    }

    if cli.verbose {
        info!(
            "{}",
            t_args!("info-version",
                "name" => env!("CARGO_PKG_NAME"),
                "version" => env!("CARGO_PKG_VERSION")
            )
        );
    }

    let mut options = GenerateOptions::new(cli.input.clone(), cli.output.clone());
    options.suite.contract = DecoderContract::with_header(cli.decoder_header.trim());
    if cli.guarded_release {
        options.suite.release = ReleasePolicy::Guarded;
        info!("{}", t!("info-release-guarded"));
    }

    match run(&cli, &options) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(err) => {
            error!("{}", t_args!("error-generation-failed", "error" => err));
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when `--check` finds the output missing or stale.
fn run(cli: &Cli, options: &GenerateOptions) -> Result<bool> {
    if cli.list {
        let fixtures = load_fixtures(&options.input)?;
        if !cli.silent {
            print!("{}", render_records(&fixtures));
        }
        return Ok(true);
    }

    if cli.check {
        let outcome = check(options)?;
        if !cli.silent {
            println!("{}", render_check(outcome, &options.output));
        }
        return Ok(outcome == CheckOutcome::UpToDate);
    }

    let summary = generate(options)?;
    if !cli.silent {
        print_summary(&summary, &options.output, cli.verbose);
    }
    Ok(true)
}
