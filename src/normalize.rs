//! Pronoun normalization: rewrite second-person prose into the user's own voice.
//!
//! The rewrite is an ordered table of rules, each a case-insensitive pattern
//! and a rewrite policy. Order matters: idioms must run before the single-word
//! `you`/`your` rules, and subject-position `you` must be claimed before the
//! residual rule turns everything else into `me`. A final repair pass turns
//! `me` back into `I` where a verb follows and the earlier rules guessed wrong.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Rewrite second-person text into first person.
///
/// Total and deterministic: text no rule recognizes comes back with only its
/// quotes straightened and whitespace collapsed.
pub fn to_first_person(text: &str) -> String {
    let mut out = straighten_quotes(text);
    for rule in RULES.iter() {
        out = rule.apply(&out);
    }
    collapse_whitespace(&out)
}

/// Replace curly and prime quote marks with their ASCII equivalents.
pub fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}' => '"',
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}' => '\'',
            other => other,
        })
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// How a rule rewrites the text it matched.
enum Rewrite {
    /// Emit this text verbatim.
    Literal(&'static str),

    /// Emit this text, capitalized when the match was.
    Fixed(&'static str),

    /// Keep capture group 1 (the context that qualified the match) and
    /// replace the remainder, capitalized when the remainder was.
    KeepLead(&'static str),

    /// Compute the replacement from the captures.
    With(fn(&Captures<'_>) -> String),
}

impl Rewrite {
    fn render(&self, caps: &Captures<'_>) -> String {
        let whole = &caps[0];
        match self {
            Self::Literal(text) => (*text).to_string(),
            Self::Fixed(text) => match_case(whole, text),
            Self::KeepLead(text) => {
                let lead = caps.get(1).map_or("", |m| m.as_str());
                let rest = &whole[lead.len()..];
                format!("{lead}{}", match_case(rest, text))
            }
            Self::With(f) => f(caps),
        }
    }
}

/// A single substitution step.
struct Rule {
    pattern: Regex,
    rewrite: Rewrite,
}

impl Rule {
    fn new(pattern: &str, rewrite: Rewrite) -> Self {
        let pattern = Regex::new(&format!("(?i){pattern}")).expect("valid normalizer regex");
        Self { pattern, rewrite }
    }

    fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures<'_>| self.rewrite.render(caps))
            .into_owned()
    }
}

/// Words that open a clause, so a `you` right after them is a subject.
const CLAUSE_OPENERS: &str = "if|that|when|while|because|although|whether|unless|until|once|before|after|where|so|and|but|or";

/// Verbs that only take a subject pronoun directly in front of them.
const SUBJECT_VERBS: &str = "might|could|would|should|will|can|is|was|am|have|had|did|do|want|need|think|feel|know|went|began|started|realized|see|believe|find|deserve|become|learn|grow|choose|notice|remember";

/// Verbs whose object can be followed by a bare infinitive ("help me feel").
const CAUSATIVE_VERBS: [&str; 14] = [
    "let", "lets", "help", "helps", "make", "makes", "made", "have", "had", "watch", "see",
    "saw", "hear", "heard",
];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    use Rewrite::{Fixed, KeepLead, Literal, With};

    vec![
        // Idioms. Longest first where one contains another.
        Rule::new(r"\bthe way you\b", Fixed("the way I")),
        Rule::new(r"\byou show yourself\b", Fixed("I show myself")),
        Rule::new(r"\bshow yourself\b", Fixed("show myself")),
        // Object idioms only at a clause end: "know you are" is a subject.
        Rule::new(
            r"\b(get\s+to\s+know|know|appreciate|value)(\s+)you([.,!?;:]|\s*$)",
            With(object_idiom),
        ),
        // Possessive and reflexive.
        Rule::new(r"\byourself\b", Fixed("myself")),
        Rule::new(r"\byours\b", Fixed("mine")),
        Rule::new(r"\byour\b", Fixed("my")),
        // Contractions and auxiliaries.
        Rule::new(r"\byou're\b", Fixed("I'm")),
        Rule::new(r"\byou've\b", Fixed("I've")),
        Rule::new(r"\byou'll\b", Fixed("I'll")),
        Rule::new(r"\byou'd\b", Fixed("I'd")),
        Rule::new(r"\byou are\b", Fixed("I am")),
        Rule::new(r"\byou were\b", Fixed("I was")),
        Rule::new(r"\byou have\b", Fixed("I have")),
        // Objects of prepositions.
        Rule::new(
            r"\b((?:to|for|about|with|of|from|at|on|by|like)\s+)you\b",
            KeepLead("me"),
        ),
        // Subject position: start of text or sentence, after a clause opener,
        // a comma, a colon or a semicolon.
        Rule::new(
            &format!(r"(^|[.!?]\s+|\b(?:{CLAUSE_OPENERS})\s+|,\s*|[:;]\s*)you\b"),
            KeepLead("I"),
        ),
        // Whatever is left is an object.
        Rule::new(r"\byou\b", Fixed("me")),
        // Repairs.
        Rule::new(r"\bI as I am\b", Literal("me as I am")),
        Rule::new(
            &format!(r"\b(?:(\w+)(\s+))?me(\s+)({SUBJECT_VERBS})\b"),
            With(repair_subject),
        ),
    ]
});

/// `know you.` and friends: the verb keeps its case, `you` becomes `me`.
fn object_idiom(caps: &Captures<'_>) -> String {
    format!("{}{}me{}", &caps[1], &caps[2], &caps[3])
}

/// Turn `me <verb>` back into `I <verb>` unless `me` is the object of a
/// causative or perception verb.
fn repair_subject(caps: &Captures<'_>) -> String {
    let lead = caps.get(1).map(|m| m.as_str());
    let gap = caps.get(2).map_or("", |m| m.as_str());
    let keep_object = lead.is_some_and(|word| {
        CAUSATIVE_VERBS
            .iter()
            .any(|verb| verb.eq_ignore_ascii_case(word))
    });
    let pronoun = if keep_object { "me" } else { "I" };
    format!(
        "{}{gap}{pronoun}{}{}",
        lead.unwrap_or(""),
        &caps[3],
        &caps[4]
    )
}

/// Capitalize `replacement` when `matched` starts with a capital.
fn match_case(matched: &str, replacement: &str) -> String {
    let capitalized = matched.chars().next().is_some_and(char::is_uppercase);
    if !capitalized {
        return replacement.to_string();
    }
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
