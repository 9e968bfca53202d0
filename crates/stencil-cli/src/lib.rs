//! CLI logic for the Stencil converter.
//!
//! This module contains the core CLI logic: reading the draw.io input,
//! converting it, and writing the VSDX package to a file or, base64-encoded,
//! to stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Read, Write},
};

use base64::{Engine, engine::general_purpose::STANDARD};
use log::info;

use stencil::{DiagramBuilder, StencilError};

/// Input path that reads the diagram from stdin.
const STDIN_PATH: &str = "-";

/// Run the Stencil CLI application
///
/// This function converts the input through the Stencil pipeline and writes
/// the resulting package to the output file, or to stdout with `--base64`.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `StencilError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), StencilError> {
    run_with_io(args, io::stdin().lock(), io::stdout().lock())
}

/// Run the Stencil CLI application with explicit standard streams.
///
/// `stdin` is only read when the input path is `-`, and `stdout` is only
/// written when `--base64` is set.
///
/// # Errors
///
/// Returns the same errors as [`run`].
pub fn run_with_io(
    args: &Args,
    mut stdin: impl Read,
    mut stdout: impl Write,
) -> Result<(), StencilError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        base64 = args.base64;
        "Processing diagram"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input
    let source = if args.input == STDIN_PATH {
        let mut source = String::new();
        stdin.read_to_string(&mut source)?;
        source
    } else {
        fs::read_to_string(&args.input)?
    };

    // Process diagram using DiagramBuilder API
    let builder = DiagramBuilder::new(app_config);
    let diagram = builder.parse(&source)?;
    let mapping = builder.map(&diagram)?;
    let vsdx = builder.render_vsdx(&mapping)?;

    if args.base64 {
        writeln!(stdout, "{}", STANDARD.encode(&vsdx))?;
        stdout.flush()?;
        info!(bytes = vsdx.len(); "VSDX written to stdout");
    } else {
        fs::write(&args.output, &vsdx)?;
        info!(output_file = args.output; "VSDX exported successfully");
    }

    Ok(())
}
