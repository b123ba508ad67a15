use crate::error::{Error, Result};
use crate::rules::Rule;
use crate::theme::{Theme, ThemeConfig};
use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type RulesFn = dyn Fn(&Theme) -> Vec<Rule> + Send + Sync;
type SafelistFn = dyn Fn(&Theme) -> Vec<String> + Send + Sync;

/// User rules, given directly or computed from the resolved theme.
#[derive(Clone)]
pub enum UserRules {
    List(Vec<Rule>),
    Computed(Arc<RulesFn>),
}

impl UserRules {
    pub fn computed(rules: impl Fn(&Theme) -> Vec<Rule> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(rules))
    }

    pub fn resolve(&self, theme: &Theme) -> Vec<Rule> {
        match self {
            Self::List(rules) => rules.clone(),
            Self::Computed(rules) => rules(theme),
        }
    }
}

impl Default for UserRules {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl fmt::Debug for UserRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(rules) => f.debug_tuple("List").field(rules).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Tokens generated whether or not a scan ever sees them.
#[derive(Clone)]
pub enum Safelist {
    List(Vec<String>),
    Computed(Arc<SafelistFn>),
}

impl Safelist {
    pub fn computed(tokens: impl Fn(&Theme) -> Vec<String> + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(tokens))
    }

    pub fn resolve(&self, theme: &Theme) -> Vec<String> {
        match self {
            Self::List(tokens) => tokens.clone(),
            Self::Computed(tokens) => tokens(theme),
        }
    }
}

impl Default for Safelist {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl fmt::Debug for Safelist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List(tokens) => f.debug_tuple("List").field(tokens).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Everything an engine is built from.
#[derive(Debug, Clone, Default)]
pub struct UserConfig {
    pub theme: ThemeConfig,
    /// Built-in rule families switched on or off by name.
    pub core_rules: BTreeMap<String, bool>,
    pub rules: UserRules,
    pub shortcuts: IndexMap<String, String>,
    pub safelist: Safelist,
    pub blocklist: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    theme: ThemeConfig,
    #[serde(default)]
    core_rules: BTreeMap<String, bool>,
    #[serde(default)]
    rules: IndexMap<String, IndexMap<String, String>>,
    #[serde(default)]
    shortcuts: IndexMap<String, String>,
    #[serde(default)]
    safelist: Vec<String>,
    #[serde(default)]
    blocklist: Vec<String>,
}

impl UserConfig {
    /// Parses the declarative subset of the configuration. Rules read from
    /// TOML are static: `[rules."name"]` maps properties to values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(text)
            .map_err(|err| Error::config(format!("failed to parse config: {}", err.message()), text))?;
        let rules = file
            .rules
            .into_iter()
            .map(|(name, declarations)| Rule::fixed(name, declarations))
            .collect();
        Ok(Self {
            theme: file.theme,
            core_rules: file.core_rules,
            rules: UserRules::List(rules),
            shortcuts: file.shortcuts,
            safelist: Safelist::List(file.safelist),
            blocklist: file.blocklist,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Safelist, UserConfig, UserRules};
    use crate::error::Error;
    use crate::rules::Rule;
    use crate::theme::{Container, ContainerPadding, Theme, ThemeConfig, ThemeEntry};

    #[test]
    fn empty_config_is_default() {
        let config = UserConfig::from_toml_str("").expect("config should parse");
        assert!(config.theme.categories.is_empty());
        assert!(config.core_rules.is_empty());
        assert!(config.shortcuts.is_empty());
        assert!(config.blocklist.is_empty());
        assert!(matches!(config.rules, UserRules::List(ref rules) if rules.is_empty()));
    }

    #[test]
    fn loads_theme_overrides_and_extensions() {
        let config = UserConfig::from_toml_str(
            r##"
[theme.colors]
brand = "#123456"

[theme.colors.gray]
100 = "#f3f4f6"

[theme.extend.fontSize]
huge = ["5rem", "1"]

[theme.container]
center = true
padding = { DEFAULT = "1rem", lg = "2rem" }
"##,
        )
        .expect("config should parse");
        let colors = &config.theme.categories["colors"];
        assert_eq!(colors["brand"], ThemeEntry::from("#123456"));
        assert!(matches!(&colors["gray"], ThemeEntry::Record(shades) if shades["100"] == "#f3f4f6"));
        assert_eq!(
            config.theme.extend["fontSize"]["huge"],
            ThemeEntry::Pair("5rem".to_string(), "1".to_string())
        );
        let container = config.theme.container.expect("container");
        assert!(container.center);
        assert!(matches!(container.padding, Some(ContainerPadding::PerScreen(_))));
    }

    #[test]
    fn loads_rules_shortcuts_and_lists() {
        let config = UserConfig::from_toml_str(
            r#"
safelist = ["p-4", "m-2"]
blocklist = ["container"]

[core_rules]
float = false

[shortcuts]
btn = "px-4 py-2"

[rules."flex-center"]
display = "flex"
align-items = "center"
"#,
        )
        .expect("config should parse");
        assert_eq!(config.core_rules.get("float"), Some(&false));
        assert_eq!(config.shortcuts["btn"], "px-4 py-2");
        assert_eq!(config.blocklist, ["container"]);
        let theme = Theme::resolve(&ThemeConfig::default()).expect("theme");
        assert_eq!(config.safelist.resolve(&theme), ["p-4", "m-2"]);
        let rules = config.rules.resolve(&theme);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].name(), "flex-center");
        assert_eq!(
            rules[0].declarations("", None),
            vec![
                ("display".to_string(), "flex".to_string()),
                ("align-items".to_string(), "center".to_string()),
            ]
        );
    }

    #[test]
    fn parse_errors_are_config_errors() {
        let err = UserConfig::from_toml_str("shortcuts = 3").expect_err("invalid");
        assert!(matches!(err, Error::Config { .. }));
        assert_eq!(err.context(), "shortcuts = 3");
        assert!(UserConfig::from_toml_str("unknown = 1").is_err());
    }

    #[test]
    fn computed_lists_read_the_theme() {
        let theme = Theme::resolve(&ThemeConfig {
            container: Some(Container::default()),
            ..ThemeConfig::default()
        })
        .expect("theme");
        let safelist = Safelist::computed(|theme| {
            theme.screens().keys().map(|screen| format!("{screen}:p-4")).collect()
        });
        assert_eq!(safelist.resolve(&theme).len(), 5);
        let rules = UserRules::computed(|_| vec![Rule::fixed("x", [("color", "red")])]);
        assert_eq!(rules.resolve(&theme).len(), 1);
    }
}
