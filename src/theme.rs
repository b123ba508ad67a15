use crate::base_theme;
use crate::color::parse_color;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;

pub type ThemeMap = IndexMap<String, ThemeValue>;

/// One resolved theme value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeValue {
    Plain(String),
    /// Font size with its line height, or a two-layer drop shadow.
    Pair(String, String),
    List(Vec<String>),
    Shadow {
        value: String,
        default_color: String,
    },
}

impl ThemeValue {
    /// The text used when the value is looked up as a single string.
    pub fn primary(&self) -> &str {
        match self {
            Self::Plain(value) | Self::Pair(value, _) | Self::Shadow { value, .. } => value,
            Self::List(values) => values.first().map(String::as_str).unwrap_or(""),
        }
    }
}

impl From<&str> for ThemeValue {
    fn from(value: &str) -> Self {
        Self::Plain(value.to_string())
    }
}

impl From<String> for ThemeValue {
    fn from(value: String) -> Self {
        Self::Plain(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Screen {
    pub min: Option<String>,
    pub max: Option<String>,
}

impl Screen {
    pub fn min(value: &str) -> Self {
        Self {
            min: Some(value.to_string()),
            max: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Container {
    #[serde(default)]
    pub center: bool,
    #[serde(default)]
    pub padding: Option<ContainerPadding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContainerPadding {
    Uniform(String),
    PerScreen(IndexMap<String, String>),
}

impl Container {
    pub fn default_padding(&self) -> Option<&str> {
        match self.padding.as_ref()? {
            ContainerPadding::Uniform(value) => Some(value),
            ContainerPadding::PerScreen(values) => values.get("DEFAULT").map(String::as_str),
        }
    }

    pub fn screen_padding(&self, screen: &str) -> Option<&str> {
        match self.padding.as_ref()? {
            ContainerPadding::Uniform(_) => None,
            ContainerPadding::PerScreen(values) => values.get(screen).map(String::as_str),
        }
    }
}

/// A raw theme entry as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ThemeEntry {
    Value(String),
    Pair(String, String),
    List(Vec<String>),
    Record(IndexMap<String, String>),
}

impl From<&str> for ThemeEntry {
    fn from(value: &str) -> Self {
        Self::Value(value.to_string())
    }
}

pub type CategoryConfig = IndexMap<String, ThemeEntry>;

type ComputeFn = dyn Fn(&ThemeView<'_>) -> Result<ThemeMap> + Send + Sync;

/// A category derived from the plain categories of the theme.
#[derive(Clone)]
pub struct ComputedCategory(Arc<ComputeFn>);

impl ComputedCategory {
    pub fn new(
        compute: impl Fn(&ThemeView<'_>) -> Result<ThemeMap> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(compute))
    }
}

impl fmt::Debug for ComputedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ComputedCategory(..)")
    }
}

/// User overrides of the base theme.
///
/// Top-level categories replace the base category, `extend` merges key by key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub container: Option<Container>,
    #[serde(default)]
    pub extend: IndexMap<String, CategoryConfig>,
    #[serde(flatten)]
    pub categories: IndexMap<String, CategoryConfig>,
    #[serde(skip)]
    pub computed: IndexMap<String, ComputedCategory>,
}

/// Read-only access to the first resolution phase.
pub struct ThemeView<'a> {
    plain: &'a IndexMap<String, ThemeMap>,
    screens: &'a IndexMap<String, Screen>,
}

impl<'a> ThemeView<'a> {
    pub fn category(&self, name: &str) -> Result<&'a ThemeMap> {
        self.plain.get(name).ok_or_else(|| {
            Error::config(
                format!("Theme category \"{name}\" is not available"),
                format!("theme.{name}"),
            )
        })
    }

    pub fn screens(&self) -> &'a IndexMap<String, Screen> {
        self.screens
    }
}

/// The fully resolved theme. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    categories: IndexMap<String, Arc<ThemeMap>>,
    screens: IndexMap<String, Screen>,
    container: Container,
}

impl Theme {
    pub fn resolve(config: &ThemeConfig) -> Result<Self> {
        let screens = resolve_screens(config)?;

        let computed_names: Vec<&str> = base_theme::computed()
            .iter()
            .map(|(name, _)| *name)
            .chain(config.computed.keys().map(String::as_str))
            .collect();

        let mut plain = base_theme::plain();
        for (name, raw) in &config.categories {
            if name == "screens" || computed_names.contains(&name.as_str()) {
                continue;
            }
            plain.insert(name.clone(), convert_category(name, raw)?);
        }
        for (name, raw) in &config.extend {
            if name == "screens" || computed_names.contains(&name.as_str()) {
                continue;
            }
            let extension = convert_category(name, raw)?;
            plain.entry(name.clone()).or_default().extend(extension);
        }

        let view = ThemeView {
            plain: &plain,
            screens: &screens,
        };
        let mut computed = IndexMap::new();
        let base_computed = base_theme::computed()
            .iter()
            .map(|(name, compute)| (name.to_string(), Phase::Base(*compute)));
        let user_computed = config
            .computed
            .iter()
            .map(|(name, compute)| (name.clone(), Phase::User(compute)));
        for (name, phase) in base_computed.chain(user_computed) {
            let mut values = match config.categories.get(&name) {
                Some(raw) => convert_category(&name, raw)?,
                None => match phase {
                    Phase::Base(compute) => compute(&view)?,
                    Phase::User(compute) => (compute.0)(&view)?,
                },
            };
            if let Some(raw) = config.extend.get(&name) {
                values.extend(convert_category(&name, raw)?);
            }
            computed.insert(name, values);
        }

        let categories = plain
            .into_iter()
            .chain(computed)
            .map(|(name, values)| (name, Arc::new(values)))
            .collect();

        Ok(Self {
            categories,
            screens,
            container: config.container.clone().unwrap_or_default(),
        })
    }

    /// The category map, empty when the theme does not define it.
    pub fn category(&self, name: &str) -> Arc<ThemeMap> {
        self.categories.get(name).cloned().unwrap_or_default()
    }

    pub fn value(&self, category: &str, key: &str) -> Option<&ThemeValue> {
        self.categories.get(category)?.get(key)
    }

    pub fn screens(&self) -> &IndexMap<String, Screen> {
        &self.screens
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Dotted lookup such as `colors.red-500` or `spacing.0.5`.
    pub fn get(&self, path: &str) -> Option<String> {
        let (category, key) = path.split_once('.')?;
        if category == "screens" {
            let screen = self.screens.get(key)?;
            return screen.max.clone().or_else(|| screen.min.clone());
        }
        if category == "container" || category == "dropShadow" {
            return None;
        }
        let value = self.value(category, key)?.primary();
        (!value.is_empty()).then(|| value.to_string())
    }

    /// `theme("path")` or `theme("path / alpha")` as used in hand-written CSS.
    pub fn lookup_with_alpha(&self, path: &str) -> Option<String> {
        match path.split_once(" / ") {
            Some((key, alpha)) => {
                let color = self.get(key)?;
                parse_color(&color).map(|parsed| parsed.with_alpha(alpha).to_string())
            }
            None => self.get(path),
        }
    }
}

enum Phase<'a> {
    Base(base_theme::Compute),
    User(&'a ComputedCategory),
}

fn resolve_screens(config: &ThemeConfig) -> Result<IndexMap<String, Screen>> {
    let mut screens = match config.categories.get("screens") {
        Some(raw) => convert_screens(raw)?,
        None => base_theme::screens(),
    };
    if let Some(raw) = config.extend.get("screens") {
        screens.extend(convert_screens(raw)?);
    }
    Ok(screens)
}

fn convert_screens(raw: &CategoryConfig) -> Result<IndexMap<String, Screen>> {
    raw.iter()
        .map(|(name, entry)| {
            let screen = match entry {
                ThemeEntry::Value(min) => Screen::min(min),
                ThemeEntry::Record(bounds)
                    if bounds.keys().all(|key| key == "min" || key == "max")
                        && !bounds.is_empty() =>
                {
                    Screen {
                        min: bounds.get("min").cloned(),
                        max: bounds.get("max").cloned(),
                    }
                }
                _ => {
                    return Err(Error::config(
                        "A screen must be a width or a { min, max } table",
                        format!("theme.screens.{name}"),
                    ));
                }
            };
            Ok((name.clone(), screen))
        })
        .collect()
}

pub(crate) fn convert_category(name: &str, raw: &CategoryConfig) -> Result<ThemeMap> {
    let mut values = ThemeMap::new();
    for (key, entry) in raw {
        match entry {
            ThemeEntry::Value(value) => {
                values.insert(key.clone(), ThemeValue::Plain(value.clone()));
            }
            ThemeEntry::Pair(first, second) => {
                values.insert(key.clone(), ThemeValue::Pair(first.clone(), second.clone()));
            }
            ThemeEntry::List(items) => {
                if items.is_empty() {
                    return Err(Error::config(
                        "Theme value lists cannot be empty",
                        format!("theme.{name}.{key}"),
                    ));
                }
                values.insert(key.clone(), ThemeValue::List(items.clone()));
            }
            ThemeEntry::Record(record) if name == "boxShadow" => {
                let (Some(value), Some(default_color)) =
                    (record.get("value"), record.get("defaultColor"))
                else {
                    return Err(Error::config(
                        "A box shadow record needs `value` and `defaultColor`",
                        format!("theme.{name}.{key}"),
                    ));
                };
                values.insert(
                    key.clone(),
                    ThemeValue::Shadow {
                        value: value.clone(),
                        default_color: default_color.clone(),
                    },
                );
            }
            ThemeEntry::Record(record) => {
                for (sub_key, value) in record {
                    let flat = if sub_key == "DEFAULT" {
                        key.clone()
                    } else {
                        format!("{key}-{sub_key}")
                    };
                    values.insert(flat, ThemeValue::Plain(value.clone()));
                }
            }
        }
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::{
        CategoryConfig, ComputedCategory, Container, ContainerPadding, Screen, Theme,
        ThemeConfig, ThemeEntry, ThemeMap, ThemeValue,
    };
    use indexmap::IndexMap;

    fn category(entries: &[(&str, &str)]) -> CategoryConfig {
        entries
            .iter()
            .map(|(key, value)| (key.to_string(), ThemeEntry::from(*value)))
            .collect()
    }

    #[test]
    fn base_theme_flattens_colors_and_derives_categories() {
        let theme = Theme::resolve(&ThemeConfig::default()).expect("base theme resolves");
        assert_eq!(theme.get("colors.red-500").as_deref(), Some("#ef4444"));
        assert_eq!(theme.get("padding.4").as_deref(), Some("1rem"));
        assert_eq!(theme.get("borderColor.DEFAULT").as_deref(), Some("#e5e7eb"));
        assert_eq!(theme.get("fontSize.lg").as_deref(), Some("1.125rem"));
        assert_eq!(theme.get("screens.md").as_deref(), Some("768px"));
        assert_eq!(theme.get("maxWidth.screen-md").as_deref(), Some("768px"));
        assert!(theme.get("container.center").is_none());
        assert!(theme.get("spacing").is_none());
    }

    #[test]
    fn overrides_replace_and_extensions_merge() {
        let mut config = ThemeConfig::default();
        config
            .categories
            .insert("padding".to_string(), category(&[("4", "4px")]));
        config
            .extend
            .insert("margin".to_string(), category(&[("4", "4px"), ("huge", "20rem")]));
        let theme = Theme::resolve(&config).expect("theme resolves");

        let padding = theme.category("padding");
        assert_eq!(padding.len(), 1);
        assert_eq!(padding["4"], ThemeValue::from("4px"));
        assert_eq!(theme.get("margin.4").as_deref(), Some("4px"));
        assert_eq!(theme.get("margin.huge").as_deref(), Some("20rem"));
        assert_eq!(theme.get("margin.auto").as_deref(), Some("auto"));
    }

    #[test]
    fn computed_categories_see_user_plain_categories() {
        let mut config = ThemeConfig::default();
        config
            .categories
            .insert("spacing".to_string(), category(&[("gutter", "18px")]));
        let theme = Theme::resolve(&config).expect("theme resolves");
        assert_eq!(theme.get("padding.gutter").as_deref(), Some("18px"));
        assert!(theme.get("padding.4").is_none());
    }

    #[test]
    fn user_computed_category_fails_fast_on_missing_dependency() {
        let mut config = ThemeConfig::default();
        config.computed.insert(
            "gutters".to_string(),
            ComputedCategory::new(|view| Ok(view.category("gutterScale")?.clone())),
        );
        let err = Theme::resolve(&config).expect_err("missing category should fail");
        assert_eq!(err.context(), "theme.gutterScale");

        config.computed.insert(
            "gutters".to_string(),
            ComputedCategory::new(|view| {
                let mut values = ThemeMap::new();
                values.insert("page".to_string(), view.category("spacing")?["8"].clone());
                Ok(values)
            }),
        );
        let theme = Theme::resolve(&config).expect("theme resolves");
        assert_eq!(theme.get("gutters.page").as_deref(), Some("2rem"));
    }

    #[test]
    fn screens_accept_strings_and_ranges() {
        let mut config = ThemeConfig::default();
        let mut screens = IndexMap::new();
        screens.insert("sm".to_string(), ThemeEntry::from("640px"));
        let mut tablet = IndexMap::new();
        tablet.insert("min".to_string(), "768px".to_string());
        tablet.insert("max".to_string(), "1440px".to_string());
        screens.insert("tablet".to_string(), ThemeEntry::Record(tablet));
        config.categories.insert("screens".to_string(), screens);
        let theme = Theme::resolve(&config).expect("theme resolves");

        assert_eq!(theme.screens()["sm"], Screen::min("640px"));
        assert_eq!(theme.screens()["tablet"].max.as_deref(), Some("1440px"));
        assert_eq!(theme.get("screens.tablet").as_deref(), Some("1440px"));
        assert!(!theme.screens().contains_key("md"));
    }

    #[test]
    fn nested_colors_flatten_with_default() {
        let mut config = ThemeConfig::default();
        let mut brand = IndexMap::new();
        brand.insert("DEFAULT".to_string(), "#123456".to_string());
        brand.insert("light".to_string(), "#abcdef".to_string());
        let mut colors = IndexMap::new();
        colors.insert("brand".to_string(), ThemeEntry::Record(brand));
        config.extend.insert("colors".to_string(), colors);
        let theme = Theme::resolve(&config).expect("theme resolves");

        assert_eq!(theme.get("colors.brand").as_deref(), Some("#123456"));
        assert_eq!(theme.get("textColor.brand-light").as_deref(), Some("#abcdef"));
    }

    #[test]
    fn theme_lookup_composes_alpha() {
        let theme = Theme::resolve(&ThemeConfig::default()).expect("theme resolves");
        assert_eq!(
            theme.lookup_with_alpha("colors.blue-500 / 50%").as_deref(),
            Some("rgb(59 130 246 / 50%)")
        );
        assert!(theme.lookup_with_alpha("colors.nope / 50%").is_none());
    }

    #[test]
    fn container_padding_forms() {
        let container = Container {
            center: true,
            padding: Some(ContainerPadding::Uniform("15px".to_string())),
        };
        assert_eq!(container.default_padding(), Some("15px"));
        assert_eq!(container.screen_padding("md"), None);

        let mut per_screen = IndexMap::new();
        per_screen.insert("DEFAULT".to_string(), "1rem".to_string());
        per_screen.insert("lg".to_string(), "2rem".to_string());
        let container = Container {
            center: false,
            padding: Some(ContainerPadding::PerScreen(per_screen)),
        };
        assert_eq!(container.default_padding(), Some("1rem"));
        assert_eq!(container.screen_padding("lg"), Some("2rem"));
    }
}
