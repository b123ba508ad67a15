use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const REGULAR_VARIANT: &str = r"[a-z0-9][a-z0-9-]+";
const CHILD_VARIANT: &str = r"\*";
// []="'_ for attributes, :>+*~. for selectors: aria-[labelledby='a_b'] has-[>_h1]
const DYNAMIC_VARIANT: &str = r#"[a-z-]+-\[[a-z0-9\[\]="'_:>+*~.-]+\]"#;
// & positions the selector, @ starts a media query: [&:nth-child(3)] [@media(min-width:900px)]
const ARBITRARY_VARIANT: &str = r#"\[[a-z0-9&\[\]="':>+*~.()_@-]+\]"#;

const REGULAR_MODIFIER: &str = r"[a-z0-9]+";
const ARBITRARY_MODIFIER: &str = r"\[[a-z0-9.%()+*/-]+\]";

// At least two characters, % for gradient positions: via-40%
const REGULAR_UTILITY: &str = r"[a-z][a-z0-9.-]*[a-z0-9%]";
// # colors, . opacity, _, gradients, ' content, % sizes, ()+*/- calc
const ARBITRARY_VALUE: &str = r"[a-z0-9#._,'%()+*/-]+";

fn selector_pattern() -> String {
    let variant = format!(
        "(?:{REGULAR_VARIANT}|{CHILD_VARIANT}|{DYNAMIC_VARIANT}|{ARBITRARY_VARIANT}):"
    );
    let modifier = format!("/(?:{REGULAR_MODIFIER}|{ARBITRARY_MODIFIER})");
    let arbitrary_value = format!(r"[a-z][a-z-]*-\[{ARBITRARY_VALUE}\]");
    let rule_based = format!("-?(?:{REGULAR_UTILITY}|{arbitrary_value})(?:{modifier})?");
    let arbitrary_property = format!(r"\[[a-z][a-z-]+:{ARBITRARY_VALUE}\]");
    format!("(?:{variant})*!?(?:{rule_based}|{arbitrary_property})")
}

/// Anchored at the start of a run; the utility must end the run or precede `:` or `$`.
fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(r"^({})(?:[:$]|\z)", selector_pattern());
        Regex::new(&pattern).expect("token pattern is valid")
    })
}

/// Characters a token may start after: quotes, whitespace and `}` closing a
/// template interpolation.
fn is_left_border(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '"' | '\'' | '`' | '}')
}

/// Candidate utility tokens in source order, without duplicates.
pub fn extract_tokens(text: &str) -> Vec<&str> {
    let re = token_re();
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();
    for run in text.split(is_left_border) {
        if run.is_empty() {
            continue;
        }
        let Some(token) = re.captures(run).and_then(|caps| caps.get(1)) else {
            continue;
        };
        let token = token.as_str();
        if seen.insert(token) {
            tokens.push(token);
        }
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::extract_tokens;

    #[test]
    fn extracts_from_class_attribute() {
        let tokens = extract_tokens(r#"<div class="text-sm bg-red-500"></div>"#);
        assert_eq!(tokens, ["text-sm", "bg-red-500"]);
    }

    #[test]
    fn keeps_variants_and_arbitrary_values_intact() {
        let tokens = extract_tokens(
            r#"<p class="md:hover:p-[3vh] [&:nth-child(3)]:underline bg-blue-500/50 [mask-type:alpha] !m-4">"#,
        );
        assert_eq!(
            tokens,
            [
                "md:hover:p-[3vh]",
                "[&:nth-child(3)]:underline",
                "bg-blue-500/50",
                "[mask-type:alpha]",
                "!m-4",
            ]
        );
    }

    #[test]
    fn handles_template_literals_and_object_keys() {
        let tokens = extract_tokens("const cls = `${base}text-lg p-4${suffix}`; const o = { flex: true };");
        assert!(tokens.contains(&"text-lg"));
        assert!(tokens.contains(&"p-4"));
        assert!(tokens.contains(&"flex"));
    }

    #[test]
    fn start_and_end_of_text_are_borders() {
        assert_eq!(extract_tokens("p-4"), ["p-4"]);
        assert_eq!(extract_tokens("p-4 p-4\tm-2"), ["p-4", "m-2"]);
    }

    #[test]
    fn ignores_words_that_cannot_be_utilities() {
        let tokens = extract_tokens("Hello, world. a = b; x.y() 'A-b'");
        assert!(tokens.is_empty(), "{tokens:?}");
    }
}
