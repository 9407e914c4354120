use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const DEFINITION: &str = r#"program: backup
version: 3.1.0
author: Example Corp
year: 2024
specifications:
  - kind: option
    short_name: t
    long_name: target
    meta_value: DIR
    help_text: Directory that receives the archive.
    required: true
    default_value: /var/backups
  - kind: option
    short_name: l
    long_name: level
    help_text: Compression level.
  - kind: option
    short_name: c
    long_name: compress
    arity: switch
    help_text: Compress the archive.
  - kind: value
    index: 0
    meta_name: SOURCE
    help_text: Directory to back up.
examples:
  - description: Nightly backup
    sample:
      options:
        - name: compress
          value: true
        - name: target
          value: /mnt/nightly
      values: [/home]
verbs:
  - name: create
    help_text: Create a new backup.
    specifications:
      - kind: option
        short_name: f
        long_name: force
        arity: switch
        help_text: Overwrite an existing archive.
  - name: restore
    help_text: Restore files from a backup.
value_sets:
  level:
    values: [low, high]
"#;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_definition(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write definition");
    path
}

fn help_render(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_help-render"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run help-render")
}

fn render(definition: &Path, extra: &[&str]) -> Output {
    let mut args = vec!["render", "--definition", definition.to_str().unwrap()];
    args.extend_from_slice(extra);
    help_render(&args)
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn render_plain_help_lists_options() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let output = render(&definition, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let text = stdout(&output);

    assert!(text.starts_with("backup 3.1.0\nCopyright (C) 2024 Example Corp\n"));
    assert!(text.contains("Required. (Default: /var/backups) Directory that"));
    assert!(text.contains("--help"));
    assert!(text.contains("SOURCE (pos. 0)"));
    assert!(text.contains("USAGE:"));
    assert!(text.contains("  backup --compress --target /mnt/nightly /home"));
    assert!(!text.contains("ERROR(S):"));
    assert!(text.lines().all(|l| l.chars().count() <= 80));
}

#[test]
fn render_errors_and_narrow_width() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let output = render(
        &definition,
        &[
            "--width",
            "50",
            "--error",
            "missing-required:target",
            "--error",
            "mutually-exclusive:compress:format",
        ],
    );
    assert!(output.status.success());
    let text = stdout(&output);

    let missing = text.find("Required option 't, target' is missing.").unwrap();
    let exclusive = text.find("Option: 'c, compress'").unwrap();
    assert!(missing < exclusive);
    assert!(text.contains("ERROR(S):"));
    assert!(text.lines().all(|l| l.chars().count() <= 50), "{text}");
}

#[test]
fn render_value_sets_from_config() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);
    let config = dir.path().join("help.yaml");
    fs::write(
        &config,
        "add_value_sets_to_help_text: true\nadditional_new_line_after_option: false\n",
    )
    .unwrap();

    let output = render(&definition, &["--config", config.to_str().unwrap()]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Compression level. Valid values: low, high"));
}

#[test]
fn render_version_only() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let output = render(&definition, &["--error", "version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "backup 3.1.0\nCopyright (C) 2024 Example Corp\n");
}

#[test]
fn render_version_only_in_verb_mode() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let output = render(&definition, &["--verbs", "--error", "version"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "backup 3.1.0\nCopyright (C) 2024 Example Corp\n");
}

#[test]
fn render_verb_index_and_verb_help() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let index = stdout(&render(&definition, &["--verbs"]));
    assert!(index.contains("  create     Create a new backup."));
    assert!(index.contains("  restore    Restore files from a backup."));
    assert!(!index.contains("Directory that receives"));

    let verb = stdout(&render(&definition, &["--help-verb", "create"]));
    assert!(verb.contains("-f, --force"));
    assert!(!verb.contains("Restore files"));

    let unknown = stdout(&render(&definition, &["--help-verb", "prune"]));
    assert!(unknown.contains("  restore    Restore files from a backup."));
}

#[test]
fn render_json_definition() {
    let dir = TempDir::new().unwrap();
    let json = serde_json::json!({
        "program": "tiny",
        "specifications": [
            { "kind": "option", "long_name": "quiet", "arity": "switch", "help_text": "No output." }
        ]
    });
    let definition = write_definition(&dir, "tiny.json", &json.to_string());

    let output = render(&definition, &[]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("tiny\n"));
    assert!(text.contains("  --quiet      No output."));
}

#[test]
fn render_rejects_unknown_error_kind() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let output = render(&definition, &["--error", "explode"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: Unknown error kind 'explode'"));
}

#[test]
fn render_missing_definition_fails() {
    let output = help_render(&["render", "--definition", "/nonexistent/def.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[test]
fn validate_accepts_good_definition() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);

    let output = help_render(&["validate", "--definition", definition.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Validated 'backup': 4 specification(s), 2 verb(s)."));
}

#[test]
fn validate_reports_duplicate_names() {
    let dir = TempDir::new().unwrap();
    let definition = write_definition(
        &dir,
        "dup.yaml",
        "program: dup
specifications:
  - kind: option
    long_name: out
  - kind: option
    long_name: out
",
    );

    let output = help_render(&["validate", "--definition", definition.to_str().unwrap()]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("duplicate option name: out"));
}

// ---------------------------------------------------------------------------
// config-template
// ---------------------------------------------------------------------------

#[test]
fn config_template_round_trips() {
    let output = help_render(&["config-template"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("max_display_width: 80"));
    assert!(text.contains("auto_version: true"));

    let dir = TempDir::new().unwrap();
    let config = dir.path().join("help.yaml");
    fs::write(&config, &text).unwrap();
    let definition = write_definition(&dir, "backup.yaml", DEFINITION);
    let output = render(&definition, &["--config", config.to_str().unwrap()]);
    assert!(output.status.success());
}
