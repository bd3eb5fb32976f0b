//! CLI logic for the Sigma diagram tool.
//!
//! This module contains the core CLI logic for the Sigma diagram tool.

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use sigma::{
    CanvasEngine, MemoryProjectSource, ProjectManager, SigmaError, model::Project,
};

/// Run the Sigma CLI application
///
/// This function loads a project (from the given TOML file, or the built-in
/// sample set), runs it through the Sigma pipeline, and writes the resulting
/// SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `SigmaError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Project file parsing errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), SigmaError> {
    info!(
        input_path:? = args.input,
        output_path = args.output;
        "Rendering project"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Load the project: an explicit file, or the built-in sample set
    let manager = match &args.input {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let project: Project = toml::from_str(&content).map_err(|err| {
                SigmaError::Config(format!("Failed to parse project file: {err}"))
            })?;
            ProjectManager::new(
                Box::new(MemoryProjectSource::new(vec![project.clone()])),
                project,
            )
        }
        None => ProjectManager::load(
            Box::new(MemoryProjectSource::seeded()),
            &args.project_id,
        )?,
    };

    // Build the scene and export it
    let engine = CanvasEngine::new(app_config, manager)?;
    let svg = engine.render_svg()?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
