use std::{
    fs,
    io::{Cursor, Read},
    path::PathBuf,
};

use base64::{Engine, engine::general_purpose::STANDARD};
use tempfile::tempdir;
use zip::ZipArchive;

use stencil_cli::{Args, run, run_with_io};

/// Collects all .drawio files from a directory
fn collect_drawio_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("drawio")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

/// Samples are at workspace root, relative to workspace not the crate
fn samples_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

fn cli_args(input: &str, output: &str, base64: bool) -> Args {
    Args {
        input: input.to_string(),
        output: output.to_string(),
        base64,
        config: None,
        log_level: "off".to_string(),
    }
}

fn page_xml(vsdx: Vec<u8>) -> String {
    let mut archive = ZipArchive::new(Cursor::new(vsdx)).unwrap();
    let mut page = String::new();
    archive
        .by_name("visio/pages/page1.xml")
        .unwrap()
        .read_to_string(&mut page)
        .unwrap();
    page
}

#[test]
fn e2e_smoke_test_valid_samples() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let valid_samples = collect_drawio_files(samples_path());

    assert!(
        !valid_samples.is_empty(),
        "No valid samples found in samples/"
    );

    let mut failed_samples = Vec::new();

    for sample_path in &valid_samples {
        let output_filename = format!(
            "{}.vsdx",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = cli_args(
            &sample_path.to_string_lossy(),
            &output_path.to_string_lossy(),
            false,
        );

        match run(&args) {
            Ok(()) => {
                let bytes = fs::read(&output_path).unwrap();
                assert!(
                    ZipArchive::new(Cursor::new(bytes)).is_ok(),
                    "{} did not produce a readable package",
                    sample_path.display()
                );
            }
            Err(e) => failed_samples.push((sample_path.clone(), e)),
        }
    }

    if !failed_samples.is_empty() {
        eprintln!("\nValid samples that failed:");
        for (path, err) in &failed_samples {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!(
            "{} valid sample(s) failed unexpectedly",
            failed_samples.len()
        );
    }

    println!("✅ All {} valid samples passed", valid_samples.len());
}

#[test]
fn e2e_smoke_test_error_samples() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let error_samples = collect_drawio_files(samples_path().join("errors"));

    assert!(
        !error_samples.is_empty(),
        "No error samples found in samples/errors/"
    );

    let mut unexpectedly_succeeded = Vec::new();

    for sample_path in &error_samples {
        let output_filename = format!(
            "error_{}.vsdx",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = cli_args(
            &sample_path.to_string_lossy(),
            &output_path.to_string_lossy(),
            false,
        );

        if run(&args).is_ok() {
            unexpectedly_succeeded.push(sample_path.clone());
        }
        assert!(
            !output_path.exists(),
            "{} wrote output despite failing",
            sample_path.display()
        );
    }

    if !unexpectedly_succeeded.is_empty() {
        eprintln!("\nError samples that unexpectedly succeeded:");
        for path in &unexpectedly_succeeded {
            eprintln!("  - {}", path.display());
        }
        panic!(
            "{} error sample(s) succeeded unexpectedly",
            unexpectedly_succeeded.len()
        );
    }

    println!(
        "✅ All {} error samples failed as expected",
        error_samples.len()
    );
}

#[test]
fn e2e_stdin_to_base64_stdout() {
    let source = fs::read_to_string(samples_path().join("basic_flow.drawio")).unwrap();
    let args = cli_args("-", "unused.vsdx", true);

    let mut stdout = Vec::new();
    run_with_io(&args, source.as_bytes(), &mut stdout).unwrap();

    let encoded = String::from_utf8(stdout).unwrap();
    assert!(encoded.ends_with('\n'));
    let vsdx = STANDARD.decode(encoded.trim_end()).unwrap();

    let page = page_xml(vsdx);
    assert_eq!(page.matches("<Shape ").count(), 7);
    assert_eq!(page.matches("<Connect ").count(), 6);
    assert!(page.contains("Ship &amp; invoice"));
    assert!(!PathBuf::from("unused.vsdx").exists());
}

#[test]
fn e2e_base64_matches_file_output() {
    let temp_dir = tempdir().unwrap();
    let input = samples_path().join("wrapped_objects.drawio");
    let output_path = temp_dir.path().join("wrapped.vsdx");

    let file_args = cli_args(
        &input.to_string_lossy(),
        &output_path.to_string_lossy(),
        false,
    );
    run_with_io(&file_args, std::io::empty(), std::io::sink()).unwrap();

    let base64_args = cli_args(&input.to_string_lossy(), "unused.vsdx", true);
    let mut stdout = Vec::new();
    run_with_io(&base64_args, std::io::empty(), &mut stdout).unwrap();

    let from_file = fs::read(&output_path).unwrap();
    let from_stdout = STANDARD
        .decode(String::from_utf8(stdout).unwrap().trim_end())
        .unwrap();
    assert_eq!(from_file, from_stdout);
}

#[test]
fn e2e_stdin_parse_error() {
    let args = cli_args("-", "unused.vsdx", true);
    let mut stdout = Vec::new();

    let err = run_with_io(&args, "<mxfile><diagram/></mxfile>".as_bytes(), &mut stdout)
        .unwrap_err();

    assert!(matches!(err, stencil::StencilError::Parse { .. }));
    assert!(stdout.is_empty());
}
