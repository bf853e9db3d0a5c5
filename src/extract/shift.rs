//! Shift extraction: find an "I went from X to Y" statement.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::straighten_quotes;

static SHIFT_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        r"(?i)\bI went from ([^.!?]*) to ([^.!?]*[.!?]?)",
        r"(?i)\bfrom ([^.!?]*) to ([^.!?]*[.!?]?)",
        r"(?i)\byou went from ([^.!?]*) to ([^.!?]*[.!?]?)",
    ]
    .map(|p| Regex::new(p).expect("valid shift regex"))
});

/// Find a shift statement and return it in canonical form.
///
/// Returns `I went from {from} to {to}`, or an empty string when no
/// template matches. Canonical input comes back unchanged.
pub fn extract_shift_suggestion(text: &str) -> String {
    for pattern in SHIFT_PATTERNS.iter() {
        let Some(caps) = pattern.captures(text) else {
            continue;
        };
        let from = clean_shift_part(&caps[1]);
        let to = clean_shift_part(&caps[2]);
        if from.is_empty() || to.is_empty() {
            continue;
        }
        return format!("I went from {from} to {to}");
    }
    String::new()
}

static LEADING_FORMS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)^that\s+I\s+", ""),
        (r"(?i)^I\s+was\s+", ""),
        (r"(?i)^I\s+felt\s+", "feeling "),
        (r"(?i)^(?:I\s+am|I'm)\s+", ""),
        (r"(?i)^I\s+(?:had|have)\s+", "having "),
        (r"(?i)^I\s+", ""),
    ]
    .into_iter()
    .map(|(p, replacement)| (Regex::new(p).expect("valid shift part regex"), replacement))
    .collect()
});

/// Strip one leading pronoun or auxiliary from half of a shift statement.
///
/// "I was stuck" becomes "stuck", "I felt calm" becomes "feeling calm",
/// "I had no plan" becomes "having no plan".
pub fn clean_shift_part(part: &str) -> String {
    let part = straighten_quotes(part);
    let part = part.trim();
    for (pattern, replacement) in LEADING_FORMS.iter() {
        if let Some(m) = pattern.find(part) {
            return format!("{replacement}{}", &part[m.end()..]).trim().to_string();
        }
    }
    part.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_statement_is_returned_verbatim() {
        let text = "I went from feeling paralyzed by the deadline to feeling energized by a clear next step.";
        assert_eq!(extract_shift_suggestion(text), text);
    }

    #[test]
    fn bare_from_to_is_rewritten_in_first_person() {
        let text = "Sounds like you went from dreading Mondays to planning them.";
        assert_eq!(
            extract_shift_suggestion(text),
            "I went from dreading Mondays to planning them."
        );
    }

    #[test]
    fn parts_are_stripped_of_leading_pronouns() {
        assert_eq!(
            extract_shift_suggestion("I went from I was stuck to I felt lighter"),
            "I went from stuck to feeling lighter"
        );
    }

    #[test]
    fn no_template_yields_empty() {
        assert_eq!(extract_shift_suggestion("Tell me more."), "");
        assert_eq!(extract_shift_suggestion("I moved away from the edge."), "");
        assert_eq!(extract_shift_suggestion(""), "");
    }

    #[test]
    fn clean_shift_part_forms() {
        assert_eq!(clean_shift_part("  I was stuck "), "stuck");
        assert_eq!(clean_shift_part("I felt calm"), "feeling calm");
        assert_eq!(clean_shift_part("I\u{2019}m ready"), "ready");
        assert_eq!(clean_shift_part("I am ready"), "ready");
        assert_eq!(clean_shift_part("I had no plan"), "having no plan");
        assert_eq!(clean_shift_part("I have a plan"), "having a plan");
        assert_eq!(clean_shift_part("that I could not start"), "could not start");
        assert_eq!(clean_shift_part("I doubted myself"), "doubted myself");
        assert_eq!(clean_shift_part("Inspired"), "Inspired");
        assert_eq!(clean_shift_part("feeling overwhelmed"), "feeling overwhelmed");
    }
}
