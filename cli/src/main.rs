use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use voiceware::{DecodeConfig, run};

#[derive(Parser)]
#[command(name = "voiceware")]
#[command(about = "Decode Nortel Millennium VoiceWare ROM images", long_about = None)]
struct Cli {
    /// Input ROM image
    rom: PathBuf,

    /// Mapping file with output names and comments
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Decode only the message with this absolute index
    #[arg(short = 'i', long = "index")]
    index: Option<u32>,

    /// List messages in mapping-file format instead of decoding
    #[arg(short, long)]
    list: bool,

    /// Suppress informational output (overrides --verbose)
    #[arg(short, long)]
    quiet: bool,

    /// Emit a per-opcode decode trace to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        LevelFilter::Error
    } else if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let config = DecodeConfig {
        rom_path: cli.rom,
        mapping_path: cli.mapping,
        target: cli.index,
        list: cli.list,
        out_dir: PathBuf::from("."),
    };
    run(&config)?;
    Ok(())
}
