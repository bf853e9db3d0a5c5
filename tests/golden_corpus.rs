//! Pins extraction and normalization output for a corpus of real-shaped
//! assistant replies.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use reframe::extract::{display_text, extract_reframe, extract_shift_suggestion};
use reframe::normalize::to_first_person;

#[derive(Debug, Deserialize)]
struct Corpus {
    case: Vec<Case>,
}

#[derive(Debug, Deserialize)]
struct Case {
    name: String,
    kind: Kind,
    reply: String,
    expected: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Kind {
    Reframe,
    Shift,
    Display,
    Normalize,
}

fn load_corpus() -> Corpus {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/corpus/replies.toml");
    let contents = fs::read_to_string(&path).unwrap();
    toml::from_str(&contents).unwrap()
}

fn run(kind: Kind, reply: &str) -> String {
    match kind {
        Kind::Reframe => extract_reframe(reply),
        Kind::Shift => extract_shift_suggestion(reply),
        Kind::Display => display_text(reply),
        Kind::Normalize => to_first_person(reply),
    }
}

#[test]
fn corpus_matches_expected_output() {
    let corpus = load_corpus();
    assert!(!corpus.case.is_empty());

    let failures: Vec<String> = corpus
        .case
        .iter()
        .filter_map(|case| {
            let actual = run(case.kind, &case.reply);
            (actual != case.expected).then(|| {
                format!(
                    "{}: expected {:?}, got {:?}",
                    case.name, case.expected, actual
                )
            })
        })
        .collect();

    assert!(failures.is_empty(), "corpus mismatches:\n{}", failures.join("\n"));
}

#[test]
fn extraction_is_stable_across_runs() {
    for case in load_corpus().case {
        assert_eq!(run(case.kind, &case.reply), run(case.kind, &case.reply));
    }
}

#[test]
fn normalizing_twice_changes_nothing() {
    for case in load_corpus().case {
        let once = to_first_person(&case.reply);
        assert_eq!(to_first_person(&once), once, "{}", case.name);
    }
}
