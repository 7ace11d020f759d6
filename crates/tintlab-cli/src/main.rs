//! Interactive menu front end for Tintlab.
//!
//! This binary is the orchestrator around `tintlab-core`: it asks for a
//! source pixmap, lets the user pick a filter from a numbered menu, and
//! writes the result under `outputs/`. Every operation decodes its own
//! fresh copy of the source file, so filters never stack between menu
//! choices, and the output directory is created here before each save -
//! the core never touches directories.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use tintlab_core::{load_pixmap, save_pixmap, Operation};

/// Directory the filtered images are written to, relative to the working
/// directory.
const OUTPUT_DIR: &str = "outputs";

/// Menu order of the "apply all" option.
const ALL_OPERATIONS: [Operation; 5] = [
    Operation::Grayscale,
    Operation::Negative,
    Operation::Xray,
    Operation::Rotate90,
    Operation::Aged,
];

fn main() -> Result<()> {
    env_logger::init();

    let mut source = prompt_for_image()?;

    loop {
        print_menu();
        let choice = prompt("> ")?;
        let result = match choice.as_str() {
            "1" => run_operation(&source, Operation::Grayscale),
            "2" => run_operation(&source, Operation::Negative),
            "3" => run_operation(&source, Operation::Xray),
            "4" => run_operation(&source, Operation::Rotate90),
            "5" => run_operation(&source, Operation::Aged),
            "6" => ALL_OPERATIONS
                .into_iter()
                .try_for_each(|op| run_operation(&source, op)),
            "7" => {
                source = prompt_for_image()?;
                Ok(())
            }
            "0" => break,
            other => {
                println!("Invalid option {other:?}. Please try again.");
                Ok(())
            }
        };

        if let Err(err) = result {
            eprintln!("error: {err:#}");
        }
    }

    Ok(())
}

fn print_menu() {
    println!();
    println!("Choose an option:");
    println!("1. Convert to grayscale");
    println!("2. Generate negative image");
    println!("3. Generate X-ray image");
    println!("4. Rotate image 90 degrees");
    println!("5. Generate aged image");
    println!("6. Apply all filters");
    println!("7. Choose another image");
    println!("0. Exit");
}

/// Ask for a source path until one decodes successfully.
fn prompt_for_image() -> Result<PathBuf> {
    loop {
        let answer = prompt("Enter the image path (.ppm format): ")?;
        let path = PathBuf::from(answer);
        match load_pixmap(&path) {
            Ok(image) => {
                println!(
                    "Loaded {} ({}x{} pixels)",
                    path.display(),
                    image.width(),
                    image.height()
                );
                return Ok(path);
            }
            Err(err) => eprintln!("error: cannot use {}: {err}", path.display()),
        }
    }
}

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}

/// Decode a fresh copy of the source, apply one filter, and save it.
fn run_operation(source: &Path, op: Operation) -> Result<()> {
    let image = load_pixmap(source)
        .with_context(|| format!("failed to load {}", source.display()))?;

    let filtered = op
        .apply(image)
        .with_context(|| format!("failed to apply the {} filter", op.label()))?;

    fs::create_dir_all(OUTPUT_DIR)
        .with_context(|| format!("failed to create the {OUTPUT_DIR} directory"))?;

    let dest = Path::new(OUTPUT_DIR).join(format!("{}_image.ppm", op.label()));
    save_pixmap(&dest, &filtered)
        .with_context(|| format!("failed to save {}", dest.display()))?;

    info!("{} filter written to {}", op.label(), dest.display());
    println!("Saved {}", dest.display());
    Ok(())
}
