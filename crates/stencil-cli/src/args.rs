//! Command-line argument definitions for the Stencil CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output
//! encoding, configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Stencil converter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input draw.io file
    #[arg(help = "Path to the input file, or `-` to read from stdin")]
    pub input: String,

    /// Path to the output VSDX file
    #[arg(short, long, default_value = "out.vsdx")]
    pub output: String,

    /// Print the package base64-encoded to stdout instead of writing a file
    #[arg(long)]
    pub base64: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["stencil", "diagram.drawio"]);

        assert_eq!(args.input, "diagram.drawio");
        assert_eq!(args.output, "out.vsdx");
        assert!(!args.base64);
        assert!(args.config.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_all_flags() {
        let args = Args::parse_from([
            "stencil",
            "-",
            "-o",
            "flow.vsdx",
            "--base64",
            "-c",
            "stencil.toml",
            "--log-level",
            "debug",
        ]);

        assert_eq!(args.input, "-");
        assert_eq!(args.output, "flow.vsdx");
        assert!(args.base64);
        assert_eq!(args.config.as_deref(), Some("stencil.toml"));
        assert_eq!(args.log_level, "debug");
    }
}
