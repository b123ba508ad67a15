use crate::theme::Theme;
use std::collections::HashMap;

/// A pure transform applied to a selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SelectorRewrite {
    /// `{selector}{suffix}`
    Suffix(String),
    /// `{ancestor} {selector}`
    Ancestor(String),
    /// `{sibling} ~ {selector}`
    Sibling(String),
    /// The first `&` is replaced by the selector.
    Template(String),
}

impl SelectorRewrite {
    pub fn apply(&self, selector: &str) -> String {
        match self {
            Self::Suffix(suffix) => format!("{selector}{suffix}"),
            Self::Ancestor(ancestor) => format!("{ancestor} {selector}"),
            Self::Sibling(sibling) => format!("{sibling} ~ {selector}"),
            Self::Template(template) => template.replacen('&', selector, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Variant {
    Rewrite(SelectorRewrite),
    AtRule { order: usize, condition: String },
    Supports { order: usize, check: String },
}

impl Variant {
    /// Order and condition of the at-rule wrapping, `None` for selector rewrites.
    pub fn at_rule(&self) -> Option<(usize, String)> {
        match self {
            Self::Rewrite(_) => None,
            Self::AtRule { order, condition } => Some((*order, condition.clone())),
            Self::Supports { order, check } => Some((*order, format!("@supports ({check})"))),
        }
    }

    pub fn rewrite(&self) -> Option<&SelectorRewrite> {
        match self {
            Self::Rewrite(rewrite) => Some(rewrite),
            _ => None,
        }
    }
}

/// Whose state a pseudo-class or attribute applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Own,
    Group,
    Peer,
}

impl Scope {
    const ALL: [Scope; 3] = [Scope::Own, Scope::Group, Scope::Peer];

    fn prefix(self) -> &'static str {
        match self {
            Scope::Own => "",
            Scope::Group => "group-",
            Scope::Peer => "peer-",
        }
    }

    fn rewrite(self, suffix: &str) -> SelectorRewrite {
        match self {
            Scope::Own => SelectorRewrite::Suffix(suffix.to_string()),
            Scope::Group => SelectorRewrite::Ancestor(format!(".group{suffix}")),
            Scope::Peer => SelectorRewrite::Sibling(format!(".peer{suffix}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DynamicVariant {
    MinWidth { order: usize },
    MaxWidth { order: usize },
    Supports { order: usize },
    Attribute { name: &'static str, scope: Scope },
}

impl DynamicVariant {
    fn resolve(self, content: &str) -> Variant {
        match self {
            Self::MinWidth { order } => Variant::AtRule {
                order,
                condition: format!("@media (min-width: {content})"),
            },
            Self::MaxWidth { order } => Variant::AtRule {
                order,
                condition: format!("@media (max-width: {content})"),
            },
            Self::Supports { order } => Variant::Supports {
                order,
                check: if content.contains(':') {
                    content.to_string()
                } else {
                    format!("{content}: var(--tw)")
                },
            },
            Self::Attribute { name, scope } => {
                Variant::Rewrite(scope.rewrite(&format!("[{name}-{content}]")))
            }
        }
    }
}

const PSEUDO_ELEMENTS: &[(&str, &str)] = &[
    ("first-letter", "first-letter"),
    ("first-line", "first-line"),
    ("marker", "marker"),
    ("selection", "selection"),
    ("file", "file-selector-button"),
    ("placeholder", "placeholder"),
    ("backdrop", "backdrop"),
    ("before", "before"),
    ("after", "after"),
];

const PSEUDO_CLASSES: &[(&str, &str)] = &[
    ("first", ":first-child"),
    ("last", ":last-child"),
    ("only", ":only-child"),
    ("odd", ":nth-child(odd)"),
    ("even", ":nth-child(even)"),
    ("first-of-type", ":first-of-type"),
    ("last-of-type", ":last-of-type"),
    ("only-of-type", ":only-of-type"),
    ("visited", ":visited"),
    ("target", ":target"),
    ("open", "[open]"),
    ("default", ":default"),
    ("checked", ":checked"),
    ("indeterminate", ":indeterminate"),
    ("placeholder-shown", ":placeholder-shown"),
    ("autofill", ":autofill"),
    ("required", ":required"),
    ("valid", ":valid"),
    ("invalid", ":invalid"),
    ("in-range", ":in-range"),
    ("out-of-range", ":out-of-range"),
    ("read-only", ":read-only"),
    ("empty", ":empty"),
    ("focus-within", ":focus-within"),
    ("hover", ":hover"),
    ("focus", ":focus"),
    ("focus-visible", ":focus-visible"),
    ("active", ":active"),
    ("enabled", ":enabled"),
    ("disabled", ":disabled"),
];

const MEDIA_FEATURES: &[(&str, &str)] = &[
    ("motion-safe", "(prefers-reduced-motion: no-preference)"),
    ("motion-reduce", "(prefers-reduced-motion: reduce)"),
    ("print", "print"),
    ("portrait", "(orientation: portrait)"),
    ("landscape", "(orientation: landscape)"),
    ("contrast-more", "(prefers-contrast: more)"),
    ("contrast-less", "(prefers-contrast: less)"),
];

/// Recognized variant prefixes, built once from the theme.
#[derive(Debug, Clone, Default)]
pub struct VariantTable {
    statics: HashMap<String, Variant>,
    dynamics: HashMap<String, DynamicVariant>,
}

impl VariantTable {
    pub fn new(theme: &Theme) -> Self {
        let mut table = Self::default();
        let mut order = 0usize;
        let mut next_order = || {
            let current = order;
            order += 1;
            current
        };

        let screens = theme.screens();
        for (name, screen) in screens {
            let condition = match (&screen.min, &screen.max) {
                (Some(min), Some(max)) => {
                    format!("@media (min-width: {min}) and (max-width: {max})")
                }
                (Some(min), None) => format!("@media (min-width: {min})"),
                (None, Some(max)) => format!("@media (max-width: {max})"),
                (None, None) => continue,
            };
            table.statics.insert(
                name.clone(),
                Variant::AtRule {
                    order: next_order(),
                    condition,
                },
            );
        }
        if screens
            .values()
            .all(|screen| screen.min.is_some() && screen.max.is_none())
        {
            for (name, screen) in screens {
                if let Some(min) = &screen.min {
                    table.statics.insert(
                        format!("max-{name}"),
                        Variant::AtRule {
                            order: next_order(),
                            condition: format!("@media not all and (min-width: {min})"),
                        },
                    );
                }
            }
        }

        table.dynamics.insert(
            "min".to_string(),
            DynamicVariant::MinWidth {
                order: next_order(),
            },
        );
        table.dynamics.insert(
            "max".to_string(),
            DynamicVariant::MaxWidth {
                order: next_order(),
            },
        );

        table.insert_rewrite("dark", SelectorRewrite::Ancestor(".dark".to_string()));
        table.insert_rewrite("*", SelectorRewrite::Template("& > *".to_string()));
        for (prefix, element) in PSEUDO_ELEMENTS {
            table.insert_rewrite(prefix, SelectorRewrite::Suffix(format!("::{element}")));
        }
        for (prefix, suffix) in PSEUDO_CLASSES {
            table.insert_scoped(prefix, suffix);
        }

        for (prefix, media) in MEDIA_FEATURES {
            table.statics.insert(
                prefix.to_string(),
                Variant::AtRule {
                    order: next_order(),
                    condition: format!("@media {media}"),
                },
            );
        }

        for (key, value) in theme.category("supports").iter() {
            table.statics.insert(
                format!("supports-{key}"),
                Variant::Supports {
                    order: next_order(),
                    check: value.primary().to_string(),
                },
            );
        }
        table.dynamics.insert(
            "supports".to_string(),
            DynamicVariant::Supports {
                order: next_order(),
            },
        );

        for name in ["aria", "data"] {
            for (key, value) in theme.category(name).iter() {
                table.insert_scoped(
                    &format!("{name}-{key}"),
                    &format!("[{name}-{}]", value.primary()),
                );
            }
            for scope in Scope::ALL {
                table.dynamics.insert(
                    format!("{}{name}", scope.prefix()),
                    DynamicVariant::Attribute { name, scope },
                );
            }
        }

        table
    }

    fn insert_rewrite(&mut self, prefix: &str, rewrite: SelectorRewrite) {
        self.statics
            .insert(prefix.to_string(), Variant::Rewrite(rewrite));
    }

    fn insert_scoped(&mut self, prefix: &str, suffix: &str) {
        for scope in Scope::ALL {
            self.insert_rewrite(&format!("{}{prefix}", scope.prefix()), scope.rewrite(suffix));
        }
    }

    pub fn get(&self, prefix: &str) -> Option<&Variant> {
        self.statics.get(prefix)
    }

    pub fn len(&self) -> usize {
        self.statics.len() + self.dynamics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolves one variant prefix (the text before a `:`), static, dynamic or arbitrary.
    pub fn resolve(&self, prefix: &str) -> Option<Variant> {
        if prefix.starts_with('[') {
            return arbitrary_variant(prefix);
        }
        if let Some(start) = prefix.find("-[") {
            let content = prefix[start + 2..].strip_suffix(']')?;
            if content.is_empty() {
                return None;
            }
            let dynamic = self.dynamics.get(&prefix[..start])?;
            return Some(dynamic.resolve(&content.replace('_', " ")));
        }
        self.statics.get(prefix).cloned()
    }
}

fn arbitrary_variant(prefix: &str) -> Option<Variant> {
    let content = prefix.strip_prefix('[')?.strip_suffix(']')?;
    if content.contains('&') {
        return Some(Variant::Rewrite(SelectorRewrite::Template(
            content.replace('_', " "),
        )));
    }
    if let Some(media) = content.strip_prefix("@media") {
        let media = media.replace('_', " ");
        let media = media.trim();
        if media.is_empty() {
            return None;
        }
        return Some(Variant::AtRule {
            order: usize::MAX,
            condition: format!("@media {media}"),
        });
    }
    if let Some(check) = content.strip_prefix("@supports") {
        let check = check.replace('_', " ");
        let check = check.trim();
        let check = check
            .strip_prefix('(')
            .and_then(|inner| inner.strip_suffix(')'))
            .unwrap_or(check);
        if check.is_empty() {
            return None;
        }
        return Some(Variant::Supports {
            order: usize::MAX,
            check: check.to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{SelectorRewrite, Variant, VariantTable};
    use crate::theme::{Theme, ThemeConfig, ThemeEntry};
    use indexmap::IndexMap;

    fn table() -> VariantTable {
        VariantTable::new(&Theme::resolve(&ThemeConfig::default()).expect("theme"))
    }

    fn apply(variant: &Variant) -> String {
        variant.rewrite().expect("selector rewrite").apply(".x")
    }

    #[test]
    fn screens_come_first_in_order() {
        let table = table();
        assert_eq!(
            table.get("sm").and_then(Variant::at_rule),
            Some((0, "@media (min-width: 640px)".to_string()))
        );
        assert_eq!(
            table.get("2xl").and_then(Variant::at_rule),
            Some((4, "@media (min-width: 1536px)".to_string()))
        );
        assert_eq!(
            table.get("max-md").and_then(Variant::at_rule),
            Some((6, "@media not all and (min-width: 768px)".to_string()))
        );
    }

    #[test]
    fn ranged_screens_skip_negated_variants() {
        let mut config = ThemeConfig::default();
        let mut bounds = IndexMap::new();
        bounds.insert("min".to_string(), "640px".to_string());
        bounds.insert("max".to_string(), "767px".to_string());
        let mut screens = IndexMap::new();
        screens.insert("sm".to_string(), ThemeEntry::Record(bounds));
        config.categories.insert("screens".to_string(), screens);
        let table = VariantTable::new(&Theme::resolve(&config).expect("theme"));

        assert_eq!(
            table.get("sm").and_then(Variant::at_rule).map(|(_, c)| c),
            Some("@media (min-width: 640px) and (max-width: 767px)".to_string())
        );
        assert!(table.get("max-sm").is_none());
    }

    #[test]
    fn pseudo_classes_with_group_and_peer() {
        let table = table();
        assert_eq!(apply(table.get("hover").expect("hover")), ".x:hover");
        assert_eq!(apply(table.get("first").expect("first")), ".x:first-child");
        assert_eq!(apply(table.get("group-hover").expect("group")), ".group:hover .x");
        assert_eq!(apply(table.get("peer-open").expect("peer")), ".peer[open] ~ .x");
        assert_eq!(apply(table.get("file").expect("file")), ".x::file-selector-button");
        assert_eq!(apply(table.get("dark").expect("dark")), ".dark .x");
        assert_eq!(apply(table.get("*").expect("children")), ".x > *");
        assert_eq!(
            apply(table.get("aria-checked").expect("aria")),
            ".x[aria-checked=\"true\"]"
        );
    }

    #[test]
    fn dynamic_variants() {
        let table = table();
        assert_eq!(
            table.resolve("min-[900px]").and_then(|v| v.at_rule()),
            Some((10, "@media (min-width: 900px)".to_string()))
        );
        assert_eq!(
            table.resolve("supports-[display:grid]").and_then(|v| v.at_rule()).map(|(_, c)| c),
            Some("@supports (display:grid)".to_string())
        );
        assert_eq!(
            table.resolve("supports-[backdrop-filter]").and_then(|v| v.at_rule()).map(|(_, c)| c),
            Some("@supports (backdrop-filter: var(--tw))".to_string())
        );
        assert_eq!(
            apply(&table.resolve("group-data-[state=open]").expect("data")),
            ".group[data-state=open] .x"
        );
        assert_eq!(
            apply(&table.resolve("aria-[sort=ascending]").expect("aria")),
            ".x[aria-sort=ascending]"
        );
        assert!(table.resolve("min-[]").is_none());
        assert!(table.resolve("min-[10px").is_none());
        assert!(table.resolve("nope-[10px]").is_none());
    }

    #[test]
    fn arbitrary_variants() {
        let table = table();
        assert_eq!(
            table.resolve("[&:nth-child(3)]"),
            Some(Variant::Rewrite(SelectorRewrite::Template("&:nth-child(3)".to_string())))
        );
        assert_eq!(apply(&table.resolve("[.sidebar_&]").expect("template")), ".sidebar .x");
        assert_eq!(
            table.resolve("[@media(min-width:900px)]"),
            Some(Variant::AtRule {
                order: usize::MAX,
                condition: "@media (min-width:900px)".to_string()
            })
        );
        assert_eq!(
            table.resolve("[@supports(display:grid)]").and_then(|v| v.at_rule()),
            Some((usize::MAX, "@supports (display:grid)".to_string()))
        );
        assert!(table.resolve("[unterminated").is_none());
        assert!(table.resolve("[lang=fr]").is_none());
    }
}
