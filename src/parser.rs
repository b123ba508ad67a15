use crate::Declaration;
use crate::color::parse_color;
use crate::entries::EntryIndex;
use crate::rules::{Modifier, Rule};
use crate::theme::{ThemeMap, ThemeValue};
use crate::variants::{Variant, VariantTable};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// A rule invocation with its value resolved.
#[derive(Debug, Clone)]
pub struct ResolvedRule {
    pub rule: Arc<Rule>,
    pub direction: String,
    pub order: usize,
    /// `None` for static rules and shortcuts.
    pub value: Option<ThemeValue>,
}

#[derive(Debug, Clone)]
pub enum MatchKind {
    Rule(ResolvedRule),
    /// `[property:value]`
    Property { property: String, value: String },
}

/// A recognized utility token.
#[derive(Debug, Clone)]
pub struct Match {
    pub token: String,
    /// Outer to inner, as written.
    pub variants: Vec<Variant>,
    pub important: bool,
    pub kind: MatchKind,
}

impl Match {
    /// Sort key of the match. Arbitrary properties come after every rule.
    pub fn order(&self) -> usize {
        match &self.kind {
            MatchKind::Rule(resolved) => resolved.order,
            MatchKind::Property { .. } => usize::MAX,
        }
    }

    pub fn rule(&self) -> Option<&Arc<Rule>> {
        match &self.kind {
            MatchKind::Rule(resolved) => Some(&resolved.rule),
            MatchKind::Property { .. } => None,
        }
    }

    /// Name of the shortcut this match invokes.
    pub fn shortcut(&self) -> Option<&str> {
        match self.rule().map(Arc::as_ref) {
            Some(Rule::Shortcut { name, .. }) => Some(name),
            _ => None,
        }
    }

    /// Own declarations with `!important` applied. Shortcuts have none.
    pub fn declarations(&self) -> Vec<Declaration> {
        let declarations = match &self.kind {
            MatchKind::Rule(resolved) => resolved
                .rule
                .declarations(&resolved.direction, resolved.value.as_ref()),
            MatchKind::Property { property, value } => vec![(property.clone(), value.clone())],
        };
        if !self.important {
            return declarations;
        }
        declarations
            .into_iter()
            .map(|(property, value)| (property, format!("{value} !important")))
            .collect()
    }
}

/// Bracket content as a CSS value: `--x` becomes `var(--x)`, underscores become spaces.
pub fn normalize_arbitrary(raw: &str) -> String {
    if raw.starts_with("--") {
        format!("var({raw})")
    } else {
        raw.replace('_', " ")
    }
}

/// Splits `prefix:rest` at the first colon outside brackets.
fn split_variant(text: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some((&text[..idx], &text[idx + 1..])),
            _ => {}
        }
    }
    None
}

fn is_property_name(name: &str) -> bool {
    let body = name.strip_prefix("--").unwrap_or(name);
    let body = body.strip_prefix('-').unwrap_or(body);
    body.starts_with(|c: char| c.is_ascii_alphabetic())
        && body.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// A pure function from a token to its match, for one engine configuration.
#[derive(Debug)]
pub struct TokenParser {
    variants: VariantTable,
    entries: EntryIndex,
    line_heights: Arc<ThemeMap>,
}

impl TokenParser {
    pub fn new(variants: VariantTable, entries: EntryIndex, line_heights: Arc<ThemeMap>) -> Self {
        Self {
            variants,
            entries,
            line_heights,
        }
    }

    pub fn variants(&self) -> &VariantTable {
        &self.variants
    }

    pub fn entries(&self) -> &EntryIndex {
        &self.entries
    }

    pub fn parse(&self, token: &str) -> Option<Match> {
        let mut rest = token;
        let mut variants = Vec::new();
        let mut important = false;
        loop {
            if let Some(stripped) = rest.strip_prefix('!') {
                important = true;
                rest = stripped;
                break;
            }
            let Some((prefix, remainder)) = split_variant(rest) else {
                break;
            };
            variants.push(self.variants.resolve(prefix)?);
            rest = remainder;
        }

        let kind = if rest.starts_with('[') {
            self.parse_property(rest)?
        } else {
            MatchKind::Rule(self.resolve_utility(rest)?)
        };
        Some(Match {
            token: token.to_string(),
            variants,
            important,
            kind,
        })
    }

    fn parse_property(&self, text: &str) -> Option<MatchKind> {
        let content = text.strip_prefix('[')?.strip_suffix(']')?;
        let (property, value) = content.split_once(':')?;
        if !is_property_name(property) || value.is_empty() {
            return None;
        }
        Some(MatchKind::Property {
            property: property.to_string(),
            value: value.replace('_', " "),
        })
    }

    fn resolve_utility(&self, utility: &str) -> Option<ResolvedRule> {
        if let Some(entry) = self.entries.get(utility) {
            return Some(ResolvedRule {
                rule: Arc::clone(&entry.rule),
                direction: entry.direction.clone(),
                order: entry.order,
                value: entry.value(),
            });
        }

        let Some(start) = utility.find("-[") else {
            let (prefix, modifier) = utility.split_once('/')?;
            let entry = self.entries.get(prefix)?;
            let value = self.apply_modifier(&entry.rule, &entry.value()?, modifier)?;
            return Some(ResolvedRule {
                rule: Arc::clone(&entry.rule),
                direction: entry.direction.clone(),
                order: entry.order,
                value: Some(value),
            });
        };

        let prefix = &utility[..start];
        let candidates = self.entries.arbitrary(prefix)?;
        let body = &utility[start + 2..];
        let (raw, modifier) = match body.find("]/") {
            Some(end) => (&body[..end], Some(&body[end + 2..])),
            None => (body.strip_suffix(']')?, None),
        };
        if raw.is_empty() {
            return None;
        }
        let entry = candidates.iter().find(|candidate| candidate.accepts(raw))?;
        let value = ThemeValue::Plain(normalize_arbitrary(raw));
        let value = match modifier {
            Some(modifier) => self.apply_modifier(&entry.rule, &value, modifier)?,
            None => value,
        };
        Some(ResolvedRule {
            rule: Arc::clone(&entry.rule),
            direction: entry.direction.clone(),
            order: entry.order,
            value: Some(value),
        })
    }

    fn apply_modifier(&self, rule: &Rule, base: &ThemeValue, raw: &str) -> Option<ThemeValue> {
        match rule.meta().modifier.as_ref()? {
            Modifier::LineHeight => {
                let line_height = modifier_value(raw, &self.line_heights)?;
                Some(ThemeValue::Pair(base.primary().to_string(), line_height))
            }
            Modifier::Alpha(alphas) => {
                let alpha = modifier_value(raw, alphas)?;
                let color = parse_color(base.primary())?;
                if color.alpha.is_some() {
                    return None;
                }
                Some(ThemeValue::Plain(color.with_alpha(alpha).to_string()))
            }
        }
    }
}

fn modifier_value(raw: &str, values: &ThemeMap) -> Option<String> {
    if let Some(bracketed) = raw.strip_prefix('[') {
        let inner = bracketed.strip_suffix(']')?;
        return (!inner.is_empty()).then(|| normalize_arbitrary(inner));
    }
    values.get(raw).map(|value| value.primary().to_string())
}

/// Parse results and rejections kept for the lifetime of an engine.
#[derive(Debug, Default)]
pub struct ScanCache {
    parsed: HashMap<String, Arc<Match>>,
    rejected: HashSet<String>,
}

impl ScanCache {
    /// Blocklisted tokens start out rejected.
    pub fn new(blocklist: impl IntoIterator<Item = String>) -> Self {
        Self {
            parsed: HashMap::new(),
            rejected: blocklist.into_iter().collect(),
        }
    }

    pub fn parse(&mut self, parser: &TokenParser, token: &str) -> Option<Arc<Match>> {
        if self.rejected.contains(token) {
            return None;
        }
        if let Some(found) = self.parsed.get(token) {
            return Some(Arc::clone(found));
        }
        match parser.parse(token) {
            Some(parsed) => {
                let parsed = Arc::new(parsed);
                self.parsed.insert(token.to_string(), Arc::clone(&parsed));
                Some(parsed)
            }
            None => {
                log::trace!("rejected token {token:?}");
                self.rejected.insert(token.to_string());
                None
            }
        }
    }

    pub fn is_rejected(&self, token: &str) -> bool {
        self.rejected.contains(token)
    }

    pub fn len(&self) -> usize {
        self.parsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchKind, ScanCache, TokenParser, normalize_arbitrary, split_variant};
    use crate::entries::EntryIndex;
    use crate::rules::get_rules;
    use crate::theme::{Theme, ThemeConfig, ThemeValue};
    use crate::variants::{Variant, VariantTable};
    use indexmap::IndexMap;
    use std::collections::BTreeMap;

    fn parser() -> TokenParser {
        let theme = Theme::resolve(&ThemeConfig::default()).expect("theme");
        let rules = get_rules(&theme, &BTreeMap::new(), Vec::new(), &IndexMap::new()).expect("rules");
        TokenParser::new(
            VariantTable::new(&theme),
            EntryIndex::build(&rules).expect("index"),
            theme.category("lineHeight"),
        )
    }

    fn value(parser: &TokenParser, token: &str) -> Option<ThemeValue> {
        match parser.parse(token)?.kind {
            MatchKind::Rule(resolved) => resolved.value,
            MatchKind::Property { .. } => None,
        }
    }

    #[test]
    fn splits_variants_outside_brackets() {
        assert_eq!(split_variant("hover:p-4"), Some(("hover", "p-4")));
        assert_eq!(split_variant("[&:hover]:p-4"), Some(("[&:hover]", "p-4")));
        assert_eq!(split_variant("bg-[url(a:b)]"), None);
        assert_eq!(normalize_arbitrary("--brand"), "var(--brand)");
        assert_eq!(normalize_arbitrary("1fr_2fr"), "1fr 2fr");
    }

    #[test]
    fn variants_and_important() {
        let parser = parser();
        let found = parser.parse("md:hover:!p-4").expect("match");
        assert!(found.important);
        assert_eq!(found.variants.len(), 2);
        assert!(matches!(found.variants[0], Variant::AtRule { .. }));
        assert_eq!(
            found.declarations(),
            vec![("padding".to_string(), "1rem !important".to_string())]
        );
        assert!(parser.parse("!hover:p-4").is_none());
        assert!(parser.parse("nope:p-4").is_none());
        assert!(parser.parse("[unterminated").is_none());
        assert!(parser.parse("hover:").is_none());
    }

    #[test]
    fn modifiers() {
        let parser = parser();
        assert_eq!(
            value(&parser, "bg-blue-500/50"),
            Some(ThemeValue::from("rgb(59 130 246 / 0.5)"))
        );
        assert_eq!(
            value(&parser, "bg-blue-500/[.33]"),
            Some(ThemeValue::from("rgb(59 130 246 / .33)"))
        );
        assert_eq!(
            value(&parser, "text-lg/8"),
            Some(ThemeValue::Pair("1.125rem".to_string(), "2rem".to_string()))
        );
        assert!(parser.parse("p-4/50").is_none());
        assert!(parser.parse("bg-blue-500/51").is_none());
        assert!(parser.parse("bg-current/50").is_none());
    }

    #[test]
    fn arbitrary_values_pick_a_candidate() {
        let parser = parser();
        let color = parser.parse("bg-[#123456]").expect("color");
        assert_eq!(
            color.declarations(),
            vec![
                ("--tw-bg-opacity".to_string(), "1".to_string()),
                ("background-color".to_string(), "rgb(18 52 86 / var(--tw-bg-opacity))".to_string()),
            ]
        );
        let size = parser.parse("bg-[50%]").expect("size");
        assert_eq!(
            size.declarations(),
            vec![("background-size".to_string(), "50%".to_string())]
        );
        assert_eq!(
            value(&parser, "text-[#fff]/50"),
            Some(ThemeValue::from("rgb(255 255 255 / 0.5)"))
        );
        assert_eq!(value(&parser, "p-[3vh]"), Some(ThemeValue::from("3vh")));
        assert_eq!(value(&parser, "w-[--sidebar]"), Some(ThemeValue::from("var(--sidebar)")));
        assert!(parser.parse("p-[]").is_none());
        assert!(parser.parse("p-[3vh").is_none());
        assert!(parser.parse("font-[serif]").is_some());
        assert!(parser.parse("bg-[url(a:b)]").is_some());
    }

    #[test]
    fn arbitrary_properties() {
        let parser = parser();
        let found = parser.parse("hover:[mask-type:luminance]").expect("property");
        assert_eq!(found.order(), usize::MAX);
        assert_eq!(
            found.declarations(),
            vec![("mask-type".to_string(), "luminance".to_string())]
        );
        let spaced = parser.parse("[grid-area:1_/_2]").expect("property");
        assert_eq!(spaced.declarations()[0].1, "1 / 2");
        assert!(parser.parse("[--gap:4px]").is_some());
        assert!(parser.parse("[:red]").is_none());
        assert!(parser.parse("[color:]").is_none());
    }

    #[test]
    fn cache_remembers_both_outcomes() {
        let parser = parser();
        let mut cache = ScanCache::new(vec!["p-2".to_string()]);
        assert!(cache.parse(&parser, "p-2").is_none());
        assert!(cache.parse(&parser, "p-4").is_some());
        assert!(cache.parse(&parser, "p-[oops").is_none());
        assert!(cache.is_rejected("p-[oops"));
        assert!(!cache.is_rejected("p-[3px]"));
        assert!(cache.parse(&parser, "p-[3px]").is_some());
        assert_eq!(cache.len(), 2);
    }
}
