use std::io::Write;
use std::path::Path;

use command_signature_core::{Arity, ClassifyError, Invocation, classify, classify_all};
use command_signature_db::{RegistryBuilder, TableError, from_json_file, from_yaml_file};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write_file(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    path
}

const JSON_TABLE: &str = r#"{
  "add_xocc_compile_target": {
    "pargs": 1,
    "flags": ["SAVE_TEMPS"],
    "kwargs": {"TARGET": 1, "OUTPUT": 1, "INPUT": 1}
  },
  "add_xocc_targets": {
    "pargs": 1,
    "kwargs": {"KERNEL": 1, "PLATFORM": 1, "DRAM_MAPPING": "*"}
  }
}"#;

const YAML_TABLE: &str = r#"
add_xocc_link_target:
  pargs: 1
  flags: [SAVE_TEMPS]
  kwargs:
    TARGET: 1
    OPTIMIZE: 1
    INPUT: 1
"#;

// ---------------------------------------------------------------------------
// File loading
// ---------------------------------------------------------------------------

#[test]
fn test_json_table_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "signatures.json", JSON_TABLE);

    let registry = from_json_file(&path).unwrap();
    assert_eq!(registry.len(), 2);

    let sig = registry.lookup("add_xocc_targets").unwrap();
    assert_eq!(sig.keyword_arity("DRAM_MAPPING"), Some(Arity::Variadic));
    assert_eq!(sig.keyword_arity("KERNEL"), Some(Arity::Fixed(1)));

    assert!(registry.lookup("add_custom_command").is_none());
}

#[test]
fn test_yaml_table_loading() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "signatures.yaml", YAML_TABLE);

    let registry = from_yaml_file(&path).unwrap();
    let sig = registry.lookup("add_xocc_link_target").unwrap();
    assert!(sig.is_flag("SAVE_TEMPS"));
    assert_eq!(sig.keyword_arity("OPTIMIZE"), Some(Arity::Fixed(1)));
}

#[test]
fn test_malformed_json_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "broken.json", "{ not json");

    assert!(matches!(from_json_file(&path), Err(TableError::Json(_))));
}

#[test]
fn test_invalid_signature_is_a_schema_error() {
    let dir = tempfile::tempdir().unwrap();
    // INPUT declared as both flag and keyword
    let path = write_file(
        dir.path(),
        "overlap.json",
        r#"{"add_xocc_targets": {"pargs": 1, "flags": ["INPUT"], "kwargs": {"INPUT": 1}}}"#,
    );

    assert!(matches!(from_json_file(&path), Err(TableError::Schema(_))));
}

#[test]
fn test_negative_pargs_rejected_at_deserialization() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "negative.json",
        r#"{"add_xocc_targets": {"pargs": -1}}"#,
    );

    assert!(matches!(from_json_file(&path), Err(TableError::Json(_))));
}

// ---------------------------------------------------------------------------
// Builder fallback
// ---------------------------------------------------------------------------

#[test]
fn test_builder_prefers_first_working_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "signatures.json", JSON_TABLE);

    let registry = RegistryBuilder::new()
        .from_json_file(&path)
        .with_builtin()
        .build()
        .unwrap();

    // The file table, not the 4-command built-in one
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_builder_skips_broken_file() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write_file(dir.path(), "broken.json", "{ not json");

    let registry = RegistryBuilder::new()
        .from_json_file(&broken)
        .with_builtin()
        .build()
        .unwrap();

    assert_eq!(registry.len(), 4);
    assert!(registry.contains("add_xocc_targets_with_alias"));
}

// ---------------------------------------------------------------------------
// End-to-end classification against loaded tables
// ---------------------------------------------------------------------------

#[test]
fn test_classify_against_builtin_table() {
    let registry = command_signature_db::builtin().unwrap();

    let sig = registry.lookup("add_xocc_targets").unwrap();
    let result = classify(
        sig,
        &[
            "vadd",
            "KERNEL",
            "VecAdd",
            "PLATFORM",
            "xilinx_u250_xdma_201830_2",
            "DRAM_MAPPING",
            "a:DDR[0]",
            "b:DDR[1]",
            "c:DDR[2]",
        ],
    )
    .unwrap();

    assert_eq!(result.positionals, vec!["vadd"]);
    assert_eq!(result.keyword_values["KERNEL"], vec!["VecAdd"]);
    assert_eq!(
        result.keyword_values["DRAM_MAPPING"],
        vec!["a:DDR[0]", "b:DDR[1]", "c:DDR[2]"]
    );
}

#[test]
fn test_classify_all_against_loaded_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "signatures.json", JSON_TABLE);
    let registry = from_json_file(&path).unwrap();

    let invocations = vec![
        Invocation::new(
            "add_xocc_compile_target",
            &["mytarget", "TARGET", "out.xo", "SAVE_TEMPS", "INPUT", "a.cpp"],
        ),
        Invocation::new("add_executable", &["host", "main.cpp"]),
        Invocation::new("add_xocc_compile_target", &["mytarget", "TARGET"]),
    ];

    let results = classify_all(&registry, &invocations);
    assert_eq!(results.len(), 3);

    let first = results[0].as_ref().unwrap().as_ref().unwrap();
    assert!(first.flags_present.contains("SAVE_TEMPS"));
    assert_eq!(first.keyword_values["INPUT"], vec!["a.cpp"]);

    // Unknown command falls back to generic handling
    assert!(results[1].is_none());

    // Malformed invocation is isolated, not fatal
    assert_eq!(
        results[2].as_ref().unwrap().as_ref().unwrap_err(),
        &ClassifyError::KeywordArity {
            keyword: "TARGET".to_string(),
            expected: 1,
            found: 0,
        }
    );
}
