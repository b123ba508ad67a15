use crate::Declaration;
use crate::core_rules;
use crate::defaults::DefaultGroup;
use crate::error::{Error, Result};
use crate::theme::{Theme, ThemeMap, ThemeValue};
use crate::variants::SelectorRewrite;
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub type DeclareValue = dyn Fn(&ThemeValue) -> Vec<Declaration> + Send + Sync;
pub type DeclareDirection = dyn Fn(&str, &str) -> Vec<Declaration> + Send + Sync;

/// Which bracket values a rule family accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArbitraryPolicy {
    #[default]
    Any,
    ColorOnly,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modifier {
    /// `/50` composes an alpha channel from this map onto an opaque color.
    Alpha(Arc<ThemeMap>),
    /// `/8` pairs a font size with a `lineHeight` key.
    LineHeight,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleMeta {
    pub selector_rewrite: Option<SelectorRewrite>,
    pub inject_first: bool,
    pub add_default: Option<DefaultGroup>,
    pub add_container: bool,
    pub add_keyframes: bool,
    pub supports_negative_values: bool,
    pub filter_default: bool,
    pub arbitrary: ArbitraryPolicy,
    pub modifier: Option<Modifier>,
    pub omit_hyphen: bool,
    pub mandatory: bool,
}

static NO_META: RuleMeta = RuleMeta {
    selector_rewrite: None,
    inject_first: false,
    add_default: None,
    add_container: false,
    add_keyframes: false,
    supports_negative_values: false,
    filter_default: false,
    arbitrary: ArbitraryPolicy::None,
    modifier: None,
    omit_hyphen: false,
    mandatory: false,
};

#[derive(Clone)]
pub enum Rule {
    Static {
        name: String,
        declarations: Vec<Declaration>,
        meta: RuleMeta,
    },
    ThemeKeyed {
        prefix: String,
        values: Arc<ThemeMap>,
        declare: Arc<DeclareValue>,
        meta: RuleMeta,
    },
    DirectionKeyed {
        prefix: String,
        directions: Vec<String>,
        values: Arc<ThemeMap>,
        declare: Arc<DeclareDirection>,
        meta: RuleMeta,
    },
    Shortcut {
        name: String,
        utilities: String,
    },
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static {
                name,
                declarations,
                meta,
            } => f
                .debug_struct("Static")
                .field("name", name)
                .field("declarations", declarations)
                .field("meta", meta)
                .finish(),
            Self::ThemeKeyed {
                prefix,
                values,
                meta,
                ..
            } => f
                .debug_struct("ThemeKeyed")
                .field("prefix", prefix)
                .field("keys", &values.len())
                .field("meta", meta)
                .finish_non_exhaustive(),
            Self::DirectionKeyed {
                prefix,
                directions,
                values,
                meta,
                ..
            } => f
                .debug_struct("DirectionKeyed")
                .field("prefix", prefix)
                .field("directions", directions)
                .field("keys", &values.len())
                .field("meta", meta)
                .finish_non_exhaustive(),
            Self::Shortcut { name, utilities } => f
                .debug_struct("Shortcut")
                .field("name", name)
                .field("utilities", utilities)
                .finish(),
        }
    }
}

impl Rule {
    pub fn fixed<K, V>(name: impl Into<String>, declarations: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Static {
            name: name.into(),
            declarations: declarations
                .into_iter()
                .map(|(property, value)| (property.into(), value.into()))
                .collect(),
            meta: RuleMeta::default(),
        }
    }

    pub fn theme(
        prefix: impl Into<String>,
        values: Arc<ThemeMap>,
        declare: impl Fn(&ThemeValue) -> Vec<Declaration> + Send + Sync + 'static,
    ) -> Self {
        Self::ThemeKeyed {
            prefix: prefix.into(),
            values,
            declare: Arc::new(declare),
            meta: RuleMeta::default(),
        }
    }

    pub fn directional(
        prefix: impl Into<String>,
        directions: &[&str],
        values: Arc<ThemeMap>,
        declare: impl Fn(&str, &str) -> Vec<Declaration> + Send + Sync + 'static,
    ) -> Self {
        Self::DirectionKeyed {
            prefix: prefix.into(),
            directions: directions.iter().map(|d| d.to_string()).collect(),
            values,
            declare: Arc::new(declare),
            meta: RuleMeta::default(),
        }
    }

    pub fn shortcut(name: impl Into<String>, utilities: impl Into<String>) -> Self {
        Self::Shortcut {
            name: name.into(),
            utilities: utilities.into(),
        }
    }

    /// The class name of static rules and shortcuts, the prefix of theme rules.
    pub fn name(&self) -> &str {
        match self {
            Self::Static { name, .. } | Self::Shortcut { name, .. } => name,
            Self::ThemeKeyed { prefix, .. } | Self::DirectionKeyed { prefix, .. } => prefix,
        }
    }

    pub fn meta(&self) -> &RuleMeta {
        match self {
            Self::Static { meta, .. }
            | Self::ThemeKeyed { meta, .. }
            | Self::DirectionKeyed { meta, .. } => meta,
            Self::Shortcut { .. } => &NO_META,
        }
    }

    /// Theme values of keyed rules.
    pub fn values(&self) -> Option<&Arc<ThemeMap>> {
        match self {
            Self::ThemeKeyed { values, .. } | Self::DirectionKeyed { values, .. } => Some(values),
            _ => None,
        }
    }

    /// Declarations for one resolved value. Shortcuts have none of their own.
    pub fn declarations(&self, direction: &str, value: Option<&ThemeValue>) -> Vec<Declaration> {
        match self {
            Self::Static { declarations, .. } => declarations.clone(),
            Self::ThemeKeyed { declare, .. } => value.map(|v| declare(v)).unwrap_or_default(),
            Self::DirectionKeyed { declare, .. } => value
                .map(|v| declare(direction, v.primary()))
                .unwrap_or_default(),
            Self::Shortcut { .. } => Vec::new(),
        }
    }

    fn update(mut self, change: impl FnOnce(&mut RuleMeta)) -> Self {
        match &mut self {
            Self::Static { meta, .. }
            | Self::ThemeKeyed { meta, .. }
            | Self::DirectionKeyed { meta, .. } => change(meta),
            Self::Shortcut { .. } => {}
        }
        self
    }

    pub fn negative(self) -> Self {
        self.update(|meta| meta.supports_negative_values = true)
    }

    pub fn default_group(self, group: DefaultGroup) -> Self {
        self.update(|meta| meta.add_default = Some(group))
    }

    pub fn rewrite(self, rewrite: SelectorRewrite) -> Self {
        self.update(|meta| meta.selector_rewrite = Some(rewrite))
    }

    pub fn arbitrary(self, policy: ArbitraryPolicy) -> Self {
        self.update(|meta| meta.arbitrary = policy)
    }

    pub fn color_only(self) -> Self {
        self.arbitrary(ArbitraryPolicy::ColorOnly)
    }

    pub fn no_arbitrary(self) -> Self {
        self.arbitrary(ArbitraryPolicy::None)
    }

    pub fn alpha(self, values: Arc<ThemeMap>) -> Self {
        self.update(|meta| meta.modifier = Some(Modifier::Alpha(values)))
    }

    /// Alpha modifiers unless the matching opacity family is disabled.
    pub fn alpha_if(self, enabled: bool, values: Arc<ThemeMap>) -> Self {
        if enabled { self.alpha(values) } else { self }
    }

    pub fn line_height(self) -> Self {
        self.update(|meta| meta.modifier = Some(Modifier::LineHeight))
    }

    pub fn filter_default(self) -> Self {
        self.update(|meta| meta.filter_default = true)
    }

    pub fn mandatory(self) -> Self {
        self.update(|meta| meta.mandatory = true)
    }

    pub fn omit_hyphen(self) -> Self {
        self.update(|meta| meta.omit_hyphen = true)
    }

    pub fn keyframes(self) -> Self {
        self.update(|meta| meta.add_keyframes = true)
    }

    pub fn container(self) -> Self {
        self.update(|meta| meta.add_container = true)
    }

    pub fn inject_first(self) -> Self {
        self.update(|meta| meta.inject_first = true)
    }
}

/// Enable flags of the built-in rule families. Missing names are enabled.
#[derive(Debug, Clone, Copy)]
pub struct CoreFlags<'a> {
    flags: &'a BTreeMap<String, bool>,
}

impl<'a> CoreFlags<'a> {
    pub fn new(flags: &'a BTreeMap<String, bool>) -> Self {
        Self { flags }
    }

    pub fn enabled(&self, family: &str) -> bool {
        self.flags.get(family).copied().unwrap_or(true)
    }
}

fn validate_user_rule(rule: &Rule) -> Result<()> {
    let context = format!("{rule:?}");
    if rule.name().is_empty() {
        return Err(Error::config("User rules need a non-empty name", context));
    }
    match rule {
        Rule::Static { declarations, .. } if declarations.is_empty() => Err(Error::config(
            format!("Rule \"{}\" has no declarations", rule.name()),
            context,
        )),
        Rule::DirectionKeyed { directions, .. }
            if directions.is_empty() || directions.iter().any(String::is_empty) =>
        {
            Err(Error::config(
                format!("Rule \"{}\" needs non-empty directions", rule.name()),
                context,
            ))
        }
        Rule::Shortcut { .. } => Err(Error::config(
            "Shortcuts are declared in the shortcuts map, not as rules",
            context,
        )),
        _ => Ok(()),
    }
}

fn validate_shortcut(name: &str, utilities: &str) -> Result<()> {
    let context = format!("\"{name}\": \"{utilities}\"");
    if name.is_empty() || name.contains(char::is_whitespace) {
        return Err(Error::config(
            "Shortcut names must be non-empty and contain no whitespace",
            context,
        ));
    }
    if utilities.trim().is_empty() {
        return Err(Error::config(
            format!("Shortcut \"{name}\" expands to nothing"),
            context,
        ));
    }
    Ok(())
}

/// The ordered rule list: shortcuts, user rules injected first, enabled built-ins,
/// then the remaining user rules.
pub fn get_rules(
    theme: &Theme,
    core_flags: &BTreeMap<String, bool>,
    user_rules: Vec<Rule>,
    shortcuts: &IndexMap<String, String>,
) -> Result<Vec<Arc<Rule>>> {
    let flags = CoreFlags::new(core_flags);
    let catalog = core_rules::catalog(theme, flags);
    for name in core_flags.keys() {
        if !catalog.iter().any(|(family, _)| family == name) {
            return Err(Error::config(
                format!("Unknown core rule \"{name}\""),
                format!("core_rules.{name}"),
            ));
        }
    }

    for rule in &user_rules {
        validate_user_rule(rule)?;
    }
    let (first, last): (Vec<_>, Vec<_>) = user_rules
        .into_iter()
        .partition(|rule| rule.meta().inject_first);

    let mut rules = Vec::new();
    for (name, utilities) in shortcuts {
        validate_shortcut(name, utilities)?;
        rules.push(Arc::new(Rule::shortcut(name.clone(), utilities.clone())));
    }
    rules.extend(first.into_iter().map(Arc::new));
    for (family, family_rules) in catalog {
        if flags.enabled(family) {
            rules.extend(family_rules.into_iter().map(Arc::new));
        }
    }
    rules.extend(last.into_iter().map(Arc::new));
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::{ArbitraryPolicy, Modifier, Rule, get_rules};
    use crate::error::Error;
    use crate::theme::{Theme, ThemeConfig, ThemeValue};
    use indexmap::IndexMap;
    use std::collections::BTreeMap;

    fn theme() -> Theme {
        Theme::resolve(&ThemeConfig::default()).expect("theme")
    }

    #[test]
    fn builders_set_metadata() {
        let theme = theme();
        let rule = Rule::theme("bg", theme.category("colors"), |value| {
            vec![("background-color".to_string(), value.primary().to_string())]
        })
        .color_only()
        .alpha(theme.category("opacity"))
        .negative();
        let meta = rule.meta();
        assert_eq!(meta.arbitrary, ArbitraryPolicy::ColorOnly);
        assert!(matches!(meta.modifier, Some(Modifier::Alpha(_))));
        assert!(meta.supports_negative_values);
        assert_eq!(
            rule.declarations("", Some(&ThemeValue::from("#fff"))),
            vec![("background-color".to_string(), "#fff".to_string())]
        );

        let shortcut = Rule::shortcut("btn", "p-4").negative();
        assert!(!shortcut.meta().supports_negative_values);
        assert_eq!(shortcut.meta().arbitrary, ArbitraryPolicy::None);
    }

    #[test]
    fn order_is_shortcuts_injected_core_then_user() {
        let mut shortcuts = IndexMap::new();
        shortcuts.insert("btn".to_string(), "p-4".to_string());
        let user = vec![
            Rule::fixed("last-rule", [("color", "red")]),
            Rule::fixed("first-rule", [("color", "blue")]).inject_first(),
        ];
        let rules = get_rules(&theme(), &BTreeMap::new(), user, &shortcuts).expect("rules");
        assert_eq!(rules[0].name(), "btn");
        assert_eq!(rules[1].name(), "first-rule");
        assert_eq!(rules[2].name(), "container");
        assert_eq!(rules.last().map(|r| r.name()), Some("last-rule"));
    }

    #[test]
    fn disabled_families_are_skipped() {
        let mut flags = BTreeMap::new();
        flags.insert("container".to_string(), false);
        let rules = get_rules(&theme(), &flags, Vec::new(), &IndexMap::new()).expect("rules");
        assert!(rules.iter().all(|rule| rule.name() != "container"));
    }

    #[test]
    fn invalid_configuration_is_reported() {
        let mut flags = BTreeMap::new();
        flags.insert("blinking".to_string(), false);
        let err = get_rules(&theme(), &flags, Vec::new(), &IndexMap::new())
            .expect_err("unknown family");
        assert_eq!(err.context(), "core_rules.blinking");

        let empty = vec![Rule::fixed("", [("color", "red")])];
        let err = get_rules(&theme(), &BTreeMap::new(), empty, &IndexMap::new())
            .expect_err("empty name");
        assert!(matches!(err, Error::Config { .. }));

        let mut shortcuts = IndexMap::new();
        shortcuts.insert("btn".to_string(), "  ".to_string());
        let err = get_rules(&theme(), &BTreeMap::new(), Vec::new(), &shortcuts)
            .expect_err("empty shortcut");
        assert_eq!(err.context(), "\"btn\": \"  \"");
    }
}
