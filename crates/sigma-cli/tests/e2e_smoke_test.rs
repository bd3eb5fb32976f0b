use std::{fs, path::PathBuf};

use tempfile::tempdir;

use sigma_cli::{Args, run};

/// Collects all .toml files from a directory
fn collect_project_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("toml")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args_for(input: Option<String>, output: &std::path::Path) -> Args {
    Args {
        input,
        output: output.to_string_lossy().to_string(),
        config: None,
        project_id: "1".to_string(),
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_sample_projects() {
    // Create a temporary directory for test outputs
    let temp_dir = tempdir().expect("Failed to create temp directory");

    // Samples are at the workspace root, relative to workspace not the crate
    let samples_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples");
    let sample_projects = collect_project_files(samples_path);

    assert!(
        !sample_projects.is_empty(),
        "No sample projects found in samples/"
    );

    for sample_path in &sample_projects {
        let output_filename = format!(
            "{}.svg",
            sample_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = args_for(
            Some(sample_path.to_string_lossy().to_string()),
            &output_path,
        );
        let result = run(&args);

        assert!(
            result.is_ok(),
            "Failed to render {}: {:?}",
            sample_path.display(),
            result.err()
        );

        let svg = fs::read_to_string(&output_path).expect("output file exists");
        assert!(svg.contains("<svg"), "Output should contain SVG tag");
        assert!(svg.contains("</svg>"), "Output should be complete SVG");
    }
}

#[test]
fn e2e_smoke_test_built_in_sample() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("seeded.svg");

    let args = args_for(None, &output_path);
    let result = run(&args);
    assert!(result.is_ok(), "Failed to render: {:?}", result.err());

    let svg = fs::read_to_string(&output_path).expect("output file exists");
    assert!(svg.contains("table.Person"));
}

#[test]
fn e2e_smoke_test_unknown_sample_project_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("missing.svg");

    let mut args = args_for(None, &output_path);
    args.project_id = "99".to_string();

    assert!(run(&args).is_err());
    assert!(!output_path.exists());
}
