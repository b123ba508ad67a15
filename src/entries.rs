use crate::color::is_color;
use crate::error::{Error, Result};
use crate::rules::{ArbitraryPolicy, Rule, RuleMeta};
use crate::theme::{ThemeMap, ThemeValue};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::Arc;

/// A concrete class name bound to the rule and theme key that produce it.
#[derive(Debug, Clone)]
pub struct RuleEntry {
    pub rule: Arc<Rule>,
    /// Theme key, empty for static rules and shortcuts.
    pub key: String,
    /// Direction tag of direction-keyed rules, `all` for the undirected entry.
    pub direction: String,
    pub negative: bool,
    pub order: usize,
}

impl RuleEntry {
    /// The theme value behind the entry, negated for negative entries.
    pub fn value(&self) -> Option<ThemeValue> {
        let value = self.rule.values()?.get(&self.key)?;
        if self.negative {
            Some(ThemeValue::Plain(format!("-{}", value.primary())))
        } else {
            Some(value.clone())
        }
    }
}

/// A rule family accepting bracket values under one prefix.
#[derive(Debug, Clone)]
pub struct ArbitraryEntry {
    pub rule: Arc<Rule>,
    pub direction: String,
    pub color_only: bool,
    pub order: usize,
}

impl ArbitraryEntry {
    /// Color-only families take colors and custom properties, the others take anything.
    pub fn accepts(&self, raw: &str) -> bool {
        !self.color_only || raw.starts_with("--") || is_color(raw)
    }
}

/// Lookup tables from class names to entries, built once per engine.
#[derive(Debug, Clone, Default)]
pub struct EntryIndex {
    entries: IndexMap<String, RuleEntry>,
    arbitrary: HashMap<String, Vec<ArbitraryEntry>>,
}

fn allows_negative(value: &ThemeValue) -> bool {
    let ThemeValue::Plain(value) = value else {
        return false;
    };
    value.starts_with(|c: char| ('1'..='9').contains(&c)) || value.starts_with("0.")
}

struct Builder {
    index: EntryIndex,
    order: usize,
    collisions: Vec<String>,
}

impl Builder {
    fn next_order(&mut self) -> usize {
        let order = self.order;
        self.order += 1;
        order
    }

    fn insert(&mut self, name: String, entry: RuleEntry) {
        if self.index.entries.insert(name.clone(), entry).is_some() {
            self.collisions.push(name);
        }
    }

    fn add_theme_entry(
        &mut self,
        rule: &Arc<Rule>,
        prefix: &str,
        key: &str,
        direction: &str,
        negative: bool,
    ) {
        let name = if key == "DEFAULT" {
            if rule.meta().filter_default {
                return;
            }
            prefix.to_string()
        } else {
            format!("{prefix}-{key}")
        };
        let entry = RuleEntry {
            rule: Arc::clone(rule),
            key: key.to_string(),
            direction: direction.to_string(),
            negative,
            order: self.next_order(),
        };
        self.insert(name, entry);
    }

    fn add_theme(&mut self, rule: &Arc<Rule>, prefix: &str, values: &ThemeMap, direction: &str) {
        let meta: &RuleMeta = rule.meta();
        if meta.supports_negative_values {
            let negative_prefix = format!("-{prefix}");
            for (key, value) in values {
                if allows_negative(value) {
                    self.add_theme_entry(rule, &negative_prefix, key, direction, true);
                }
            }
        }
        for key in values.keys() {
            self.add_theme_entry(rule, prefix, key, direction, false);
        }

        if meta.arbitrary == ArbitraryPolicy::None {
            return;
        }
        let entry = ArbitraryEntry {
            rule: Arc::clone(rule),
            direction: direction.to_string(),
            color_only: meta.arbitrary == ArbitraryPolicy::ColorOnly,
            order: self.next_order(),
        };
        let candidates = self.index.arbitrary.entry(prefix.to_string()).or_default();
        if entry.color_only {
            candidates.insert(0, entry);
        } else {
            candidates.push(entry);
        }
    }

    fn add_rule(&mut self, rule: &Arc<Rule>) {
        match rule.as_ref() {
            Rule::ThemeKeyed { prefix, values, .. } => {
                self.add_theme(rule, prefix, values, "");
            }
            Rule::DirectionKeyed {
                prefix,
                directions,
                values,
                meta,
                ..
            } => {
                if !meta.mandatory {
                    self.add_theme(rule, prefix, values, "all");
                }
                let hyphen = if meta.omit_hyphen { "" } else { "-" };
                for direction in directions {
                    self.add_theme(rule, &format!("{prefix}{hyphen}{direction}"), values, direction);
                }
            }
            Rule::Static { name, .. } | Rule::Shortcut { name, .. } => {
                let entry = RuleEntry {
                    rule: Arc::clone(rule),
                    key: String::new(),
                    direction: String::new(),
                    negative: false,
                    order: self.next_order(),
                };
                self.insert(name.clone(), entry);
            }
        }
    }
}

impl EntryIndex {
    /// Expands every rule into its entries. Orders follow the rule list.
    pub fn build(rules: &[Arc<Rule>]) -> Result<Self> {
        let mut builder = Builder {
            index: EntryIndex::default(),
            order: 0,
            collisions: Vec::new(),
        };
        for rule in rules {
            builder.add_rule(rule);
        }

        if !builder.collisions.is_empty() {
            log::warn!(
                "Collision happened for {} rule(s): {}",
                builder.collisions.len(),
                builder.collisions.join(", ")
            );
        }

        let mut prefixes: Vec<_> = builder.index.arbitrary.iter().collect();
        prefixes.sort_by(|a, b| a.0.cmp(b.0));
        for (prefix, candidates) in prefixes {
            if candidates.len() > 2 {
                return Err(Error::config(
                    format!(
                        "{} rules are using arbitrary values with the prefix \"{prefix}\"",
                        candidates.len()
                    ),
                    prefix.clone(),
                ));
            }
            if candidates.len() == 2 && !candidates[0].color_only {
                log::warn!(
                    "2 rules are using arbitrary values with the prefix \"{prefix}\" but none is scoped to colors"
                );
            }
        }

        Ok(builder.index)
    }

    pub fn get(&self, name: &str) -> Option<&RuleEntry> {
        self.entries.get(name)
    }

    /// Candidates for `{prefix}-[value]`, color-only first.
    pub fn arbitrary(&self, prefix: &str) -> Option<&[ArbitraryEntry]> {
        self.arbitrary.get(prefix).map(Vec::as_slice)
    }

    /// Entries in the order they were indexed.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::EntryIndex;
    use crate::rules::{Rule, get_rules};
    use crate::theme::{Theme, ThemeConfig, ThemeValue};
    use indexmap::IndexMap;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn index() -> EntryIndex {
        let theme = Theme::resolve(&ThemeConfig::default()).expect("theme");
        let rules = get_rules(&theme, &BTreeMap::new(), Vec::new(), &IndexMap::new()).expect("rules");
        EntryIndex::build(&rules).expect("index")
    }

    fn spacing() -> Arc<IndexMap<String, ThemeValue>> {
        let mut values = IndexMap::new();
        values.insert("4".to_string(), ThemeValue::from("1rem"));
        values.insert("auto".to_string(), ThemeValue::from("auto"));
        values.insert("px".to_string(), ThemeValue::from("1px"));
        values.insert("DEFAULT".to_string(), ThemeValue::from("2px"));
        Arc::new(values)
    }

    #[test]
    fn negative_entries_only_for_positive_numbers() {
        let rules = vec![Arc::new(
            Rule::theme("m", spacing(), |value| {
                vec![("margin".to_string(), value.primary().to_string())]
            })
            .negative(),
        )];
        let index = EntryIndex::build(&rules).expect("index");
        assert_eq!(
            index.get("-m-4").and_then(|entry| entry.value()),
            Some(ThemeValue::from("-1rem"))
        );
        assert!(index.get("-m-auto").is_none());
        assert!(index.get("-m-px").is_some());
        assert_eq!(index.get("m").map(|entry| entry.key.as_str()), Some("DEFAULT"));
        assert!(index.get("-m-4").expect("negative").order < index.get("m-4").expect("m-4").order);
    }

    #[test]
    fn directions_and_hyphens() {
        let index = index();
        assert!(index.get("mx-4").is_some());
        assert!(index.get("m-4").is_some());
        assert!(index.get("m-x-4").is_none());
        assert_eq!(index.get("inset-x-0").map(|e| e.direction.as_str()), Some("x"));
        assert!(index.get("translate-4").is_none());
        assert!(index.get("translate-x-4").is_some());
        assert!(index.get("space-4").is_none());
        assert!(index.get("duration").is_none());
        assert!(index.get("ring").is_some());
        assert!(index.get("sr-only").is_some());
    }

    #[test]
    fn color_only_candidates_come_first() {
        let index = index();
        let candidates = index.arbitrary("bg").expect("bg candidates");
        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].color_only);
        assert!(candidates[0].accepts("#123456"));
        assert!(candidates[0].accepts("--brand"));
        assert!(!candidates[0].accepts("50%"));
        assert!(candidates[1].accepts("50%"));
        assert!(index.arbitrary("font").is_some_and(|c| c.len() == 1));
    }

    #[test]
    fn three_arbitrary_families_are_rejected() {
        let values = spacing();
        let rule = |property: &'static str| {
            Arc::new(Rule::theme("x", Arc::clone(&values), move |value| {
                vec![(property.to_string(), value.primary().to_string())]
            }))
        };
        let rules = vec![rule("width"), rule("height"), rule("margin")];
        let err = EntryIndex::build(&rules).expect_err("ambiguous prefix");
        assert_eq!(err.context(), "x");
    }
}
