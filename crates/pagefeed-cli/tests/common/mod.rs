use std::path::Path;
use std::process::{Command, Output};

/// Seed with three users and five articles.
///
/// Users get ids in document order: jake=1, anna=2, tom=3. Articles get ids
/// 1..=5 and newer articles have higher ids, except 4 and 5 which share a
/// timestamp.
pub const SEED: &str = r#"{
    "users": [
        { "username": "jake", "following": ["anna"] },
        { "username": "anna" },
        { "username": "tom" }
    ],
    "articles": [
        { "slug": "one", "title": "One", "author": "anna", "tags": ["rust"], "createdAt": "2024-01-01T00:00:00Z" },
        { "slug": "two", "title": "Two", "author": "tom", "tags": ["go"], "favoritedBy": ["jake"], "createdAt": "2024-01-02T00:00:00Z" },
        { "slug": "three", "title": "Three", "author": "anna", "tags": ["rust"], "createdAt": "2024-01-03T00:00:00Z" },
        { "slug": "four", "title": "Four", "author": "tom", "createdAt": "2024-01-04T00:00:00Z" },
        { "slug": "five", "title": "Five", "author": "anna", "tags": ["rust"], "createdAt": "2024-01-04T00:00:00Z" }
    ]
}"#;

/// Run the CLI binary against the store at `store`.
pub fn run_cli(store: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pagefeed"));
    cmd.arg("--store").arg(store);
    cmd.args(args);
    cmd.env_remove("PAGEFEED_VIEWER");
    cmd.env_remove("RUST_LOG");
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(store: &Path, args: &[&str]) -> Output {
    let output = run_cli(store, args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    output
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(store: &Path, args: &[&str]) -> String {
    let output = run_cli(store, args);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Write the seed next to the store and import it.
pub fn seeded_store(temp: &Path) -> std::path::PathBuf {
    let store = temp.join("store");
    let seed = temp.join("seed.json");
    std::fs::write(&seed, SEED).expect("Failed to write seed");
    run_cli_success(&store, &["store", "import", seed.to_str().unwrap()]);
    store
}

/// Article ids printed one JSON object per line on stdout.
pub fn listed_ids(output: &Output) -> Vec<u64> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(|line| {
            let article: serde_json::Value =
                serde_json::from_str(line).expect("Invalid JSON line");
            article["id"].as_u64().expect("Missing id")
        })
        .collect()
}

/// Value of a `Label: value` note written to stderr.
pub fn note(output: &Output, label: &str) -> Option<String> {
    let prefix = format!("{}:", label);
    String::from_utf8_lossy(&output.stderr)
        .lines()
        .find_map(|line| line.trim().strip_prefix(&prefix).map(|v| v.trim().to_string()))
}
