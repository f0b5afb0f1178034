use crate::config::load_config;
use crate::convert::convert_directory;
use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "xmind2drawio",
    version,
    about = "Convert XMind mind maps (.xmind) into draw.io diagrams (.drawio)"
)]
pub struct Args {
    /// Directory scanned (non-recursively) for .xmind files
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Directory the .drawio files are written to
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Config file (JSON or JSON5) with inputDir/outputDir/dumpLayout
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Also write a <name>.layout.json dump of the computed positions
    #[arg(long = "dump-layout")]
    pub dump_layout: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

pub fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(input) = &args.input {
        config.input_dir = input.clone();
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }
    config.dump_layout |= args.dump_layout;

    println!("XMind to Draw.io Converter");
    println!("{}", "=".repeat(40));

    let report = convert_directory(&config).with_context(|| {
        format!(
            "cannot process input directory {}",
            config.input_dir.display()
        )
    })?;

    if report.found() == 0 {
        println!("No XMind files found in '{}'", config.input_dir.display());
        println!("Please add XMind files to the input folder and run again.");
        return Ok(());
    }

    println!("Found {} XMind file(s)", report.found());
    for outcome in &report.outcomes {
        let name = outcome
            .input
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();
        println!("\nConverting: {name}");
        match &outcome.result {
            Ok(output) => println!("  ✓ Saved to: {}", output.display()),
            Err(err) => eprintln!("  Failed to convert {name}: {err}"),
        }
    }

    let converted = report.converted().count();
    let failed = report.failed().count();
    info!(converted = converted, failed = failed; "Batch finished");
    println!("\nConversion complete! {converted} converted, {failed} failed.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn parses_directories_and_flags() {
        let args = Args::parse_from([
            "xmind2drawio",
            "-i",
            "maps",
            "--output",
            "out",
            "--dump-layout",
            "--log-level",
            "debug",
        ]);
        assert_eq!(args.input.as_deref(), Some(std::path::Path::new("maps")));
        assert_eq!(args.output.as_deref(), Some(std::path::Path::new("out")));
        assert!(args.dump_layout);
        assert_eq!(args.log_level, "debug");
        assert!(args.config.is_none());
    }

    #[test]
    fn empty_input_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        let args = Args::parse_from([
            OsStr::new("xmind2drawio"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
        ]);
        run(&args).unwrap();
        assert!(input.is_dir());
        assert_eq!(std::fs::read_dir(&output).unwrap().count(), 0);
    }
}
