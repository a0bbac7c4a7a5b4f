//! Command-line interface for the pipeline.

use std::error::Error;

use crate::config::Config;
use crate::pipeline::{run_correlation, run_message_analysis, run_music_analysis};

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  psymuse [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  analyze-messages   Score and aggregate the message population");
    println!("  analyze-music      Score and aggregate the music population");
    println!("  correlate          Join feature tables and compute correlation tables");
    println!("  all                Run all three stages in order");
    println!("  help               Show this help\n");
    println!("Options:");
    println!("  --config PATH      Configuration file (default: config.toml)\n");
    println!("Examples:");
    println!("  psymuse analyze-messages");
    println!("  psymuse correlate --config research.toml");
}

/// Main CLI entry point.
pub fn run(args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let command = if args.len() > 1 { args[1].as_str() } else { "help" };

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
        .unwrap_or("config.toml");

    let config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        Config::default()
    };

    match command {
        "analyze-messages" => run_message_analysis(&config)?,
        "analyze-music" => run_music_analysis(&config)?,
        "correlate" => run_correlation(&config)?,
        "all" => {
            run_message_analysis(&config)?;
            run_music_analysis(&config)?;
            run_correlation(&config)?;
        }
        "help" | "--help" | "-h" => print_usage(),
        unknown => {
            println!("Unknown command: {unknown}\n");
            print_usage();
        }
    }
    Ok(())
}
