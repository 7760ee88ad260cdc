//! Command-line argument definitions for the Wattflow CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the canvas size,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Wattflow flow diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (TOML)
    #[arg(help = "Path to the input graph file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 350.0)]
    pub width: f32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 400.0)]
    pub height: f32,

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
        let args = Args::try_parse_from(["wattflow", "energy.toml"]).unwrap();
        assert_eq!(args.input, "energy.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.width, 350.0);
        assert_eq!(args.height, 400.0);
        assert_eq!(args.config, None);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "wattflow",
            "energy.toml",
            "-o",
            "energy.svg",
            "--width",
            "600",
            "--height",
            "380",
            "-c",
            "style.toml",
        ])
        .unwrap();
        assert_eq!(args.output, "energy.svg");
        assert_eq!(args.width, 600.0);
        assert_eq!(args.height, 380.0);
        assert_eq!(args.config.as_deref(), Some("style.toml"));
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["wattflow"]).is_err());
    }
}
