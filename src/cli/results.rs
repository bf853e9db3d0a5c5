//! Saved result commands: list, show.

use clap::Subcommand;
use uuid::Uuid;

use crate::model::StoredResult;
use crate::storage::Storage;

use super::format::{format_result, format_result_line, short_id};

#[derive(Debug, Subcommand)]
pub enum ResultsCommand {
    /// List saved results, oldest first.
    List,

    /// Show one saved result in full.
    Show {
        /// Result ID: full UUID or unambiguous prefix (e.g. `a3b`).
        result: String,
    },
}

pub(super) fn cmd_list(storage: &Storage) -> Result<(), String> {
    let results = storage
        .list_results()
        .map_err(|e| format!("failed to list results: {e}"))?;

    if results.is_empty() {
        println!("No results");
        return Ok(());
    }

    for r in &results {
        println!("{}", format_result_line(r));
    }
    Ok(())
}

pub(super) fn cmd_show(storage: &Storage, reference: &str) -> Result<(), String> {
    let result = resolve_result(storage, reference)?;
    println!("{}", format_result(&result));
    Ok(())
}

/// Resolve a result reference (full UUID or unambiguous prefix).
fn resolve_result(storage: &Storage, reference: &str) -> Result<StoredResult, String> {
    if let Ok(id) = reference.parse::<Uuid>() {
        return storage
            .load_result(id)
            .map_err(|e| format!("result not found: {e}"));
    }

    let results = storage
        .list_results()
        .map_err(|e| format!("failed to list results: {e}"))?;

    let mut matches: Vec<StoredResult> = results
        .into_iter()
        .filter(|r| r.id.to_string().starts_with(reference))
        .collect();

    match matches.len() {
        0 => Err(format!("no result matching '{reference}'")),
        1 => Ok(matches.remove(0)),
        n => {
            let ids: Vec<String> = matches.iter().map(|r| short_id(&r.id)).collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {n} results: {}",
                ids.join(", ")
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::Timestamp;
    use tempfile::TempDir;

    use crate::model::ReframeResult;

    fn stored(id: &str) -> StoredResult {
        StoredResult {
            id: id.parse().unwrap(),
            challenge: "I avoid hard conversations".into(),
            created_at: Timestamp::now(),
            result: ReframeResult {
                transcript: vec!["Hi!".into()],
                shift: "I went from tense to calm".into(),
                tag: "Calm".into(),
                reframe: "I can take this slowly.".into(),
            },
        }
    }

    fn storage_with(ids: &[&str]) -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path()).unwrap();
        for id in ids {
            storage.save_result(&stored(id)).unwrap();
        }
        (dir, storage)
    }

    #[test]
    fn resolves_unique_prefix() {
        let (_dir, storage) = storage_with(&[
            "a3b0fc12-0000-4000-8000-000000000001",
            "b7710000-0000-4000-8000-000000000002",
        ]);
        let found = resolve_result(&storage, "a3b").unwrap();
        assert_eq!(found.id.to_string(), "a3b0fc12-0000-4000-8000-000000000001");
    }

    #[test]
    fn ambiguous_prefix_lists_candidates() {
        let (_dir, storage) = storage_with(&[
            "a3b0fc12-0000-4000-8000-000000000001",
            "a3b11111-0000-4000-8000-000000000002",
        ]);
        let err = resolve_result(&storage, "a3b").unwrap_err();
        assert!(err.contains("ambiguous"));
        assert!(err.contains("a3b0fc12"));
        assert!(err.contains("a3b11111"));
    }

    #[test]
    fn unknown_prefix_fails() {
        let (_dir, storage) = storage_with(&[]);
        let err = resolve_result(&storage, "ffff").unwrap_err();
        assert_eq!(err, "no result matching 'ffff'");
    }
}
