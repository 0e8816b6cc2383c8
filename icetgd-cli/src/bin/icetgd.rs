//! icetgd Command Line Interface

#![deny(missing_docs)]

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{crate_version, ArgAction, Parser, Subcommand};
use icetgd::batch::{is_sd_channel, DEFAULT_INPUT, DEFAULT_OUT_DIR, SD_CHANNELS};
use icetgd::{ChannelDirectory, Element};
use itertools::Itertools;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, about, long_about = None,
    disable_help_flag = true,
    disable_version_flag = true,
    next_help_heading="Global Options",
    version=crate_version!())]
struct IcetgdArgs {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, short, global = true, action=ArgAction::Count,
        help = "More logging, repeat for even more")]
    verbose: u8,

    #[arg(long, short, global = true, action=ArgAction::Help,
        help = "Print help")]
    help: (),

    #[arg(long, short='V', action=ArgAction::Version,
        help = "Print version")]
    version: (),
}

#[derive(Subcommand, Debug)]
enum Commands {
    Convert(ConvertConfig),
    Channels(ChannelsConfig),
}

/// Append guide programmes to per-day TGD files (default command)
#[derive(Parser, Debug)]
#[command(long_about = None)]
struct ConvertConfig {
    /// IceTV XML guide to read
    #[arg(long, short, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// directory to append YYYYMMDD.tgd files to, created if missing
    #[arg(long, short, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        ConvertConfig {
            input: DEFAULT_INPUT.into(),
            out_dir: DEFAULT_OUT_DIR.into(),
        }
    }
}

/// List the channels of a guide and whether they are converted
#[derive(Parser, Debug)]
#[command(long_about = None)]
struct ChannelsConfig {
    /// IceTV XML guide to read
    #[arg(long, short, default_value = DEFAULT_INPUT)]
    input: PathBuf,
}

fn convert(config: &ConvertConfig) -> Result<()> {
    info!(
        "converting {} into {}",
        config.input.display(),
        config.out_dir.display()
    );
    let summary = icetgd::batch::convert_file(&config.input, &config.out_dir)
        .with_context(|| format!("converting {}", config.input.display()))?;
    info!(
        "{} lines written to {} files, {} programmes skipped (channels {})",
        summary.written,
        summary.files_opened,
        summary.skipped,
        SD_CHANNELS.iter().join(", ")
    );
    Ok(())
}

fn channels(config: &ChannelsConfig) -> Result<()> {
    let file = File::open(&config.input)
        .with_context(|| format!("opening {}", config.input.display()))?;
    let root = Element::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing {}", config.input.display()))?;
    let directory = ChannelDirectory::from_element(&root);

    println!("{:>10} {:>5} {:>3} display name", "id", "lcn", "sd");
    for channel in directory.iter() {
        println!(
            "{:>10} {:>5} {:>3} {}",
            channel.id,
            channel.lcn,
            if is_sd_channel(&channel.lcn) { "*" } else { "" },
            channel.display_name
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = IcetgdArgs::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    match &args.command {
        None => convert(&ConvertConfig::default()),
        Some(Commands::Convert(config)) => convert(config),
        Some(Commands::Channels(config)) => channels(config),
    }
}

#[test]
fn verify_args() {
    use clap::CommandFactory;
    IcetgdArgs::command().debug_assert();
}

#[test]
fn no_arguments_converts_defaults() {
    let args = IcetgdArgs::try_parse_from(["icetgd"]).expect("parsing empty args");
    assert!(args.command.is_none());
    let config = ConvertConfig::default();
    assert_eq!(PathBuf::from("iceguide.xml"), config.input);
    assert_eq!(PathBuf::from("out"), config.out_dir);
}

#[test]
fn convert_args() {
    let args = IcetgdArgs::try_parse_from(["icetgd", "-v", "convert", "-i", "guide.xml", "-o", "tgd"])
        .expect("parsing convert args");
    assert_eq!(1, args.verbose);
    match args.command {
        Some(Commands::Convert(config)) => {
            assert_eq!(PathBuf::from("guide.xml"), config.input);
            assert_eq!(PathBuf::from("tgd"), config.out_dir);
        }
        other => panic!("expected convert, got {other:?}"),
    }
}
