use crate::Declaration;
use crate::color::with_alpha_value;
use crate::theme::Theme;
use std::collections::BTreeMap;

/// Custom properties that some utilities expect to be initialized on every element.
///
/// Variants are declared in name order so sorted sets print alphabetically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DefaultGroup {
    BackdropFilter,
    Filter,
    FontVariantNumeric,
    GradientColorStops,
    RingWidth,
    ScrollSnapType,
    TouchAction,
    Transform,
}

impl DefaultGroup {
    pub const ALL: [DefaultGroup; 8] = [
        DefaultGroup::BackdropFilter,
        DefaultGroup::Filter,
        DefaultGroup::FontVariantNumeric,
        DefaultGroup::GradientColorStops,
        DefaultGroup::RingWidth,
        DefaultGroup::ScrollSnapType,
        DefaultGroup::TouchAction,
        DefaultGroup::Transform,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DefaultGroup::BackdropFilter => "backdrop-filter",
            DefaultGroup::Filter => "filter",
            DefaultGroup::FontVariantNumeric => "font-variant-numeric",
            DefaultGroup::GradientColorStops => "gradient-color-stops",
            DefaultGroup::RingWidth => "ring-width",
            DefaultGroup::ScrollSnapType => "scroll-snap-type",
            DefaultGroup::TouchAction => "touch-action",
            DefaultGroup::Transform => "transform",
        }
    }
}

fn blank(variables: &[&str]) -> Vec<Declaration> {
    variables
        .iter()
        .map(|variable| (variable.to_string(), " ".to_string()))
        .collect()
}

/// Declarations of every group, resolved against the theme once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Defaults {
    groups: BTreeMap<DefaultGroup, Vec<Declaration>>,
}

impl Defaults {
    pub fn new(theme: &Theme) -> Self {
        let lookup = |category: &str, fallback: &str| {
            theme
                .value(category, "DEFAULT")
                .map(|value| value.primary().to_string())
                .unwrap_or_else(|| fallback.to_string())
        };
        let ring_opacity = lookup("ringOpacity", "0.5");
        let ring_color = with_alpha_value(
            &lookup("ringColor", ""),
            &ring_opacity,
            &format!("rgb(147 197 253 / {ring_opacity})"),
        );

        let groups = DefaultGroup::ALL
            .into_iter()
            .map(|group| {
                let declarations: Vec<Declaration> = match group {
                    DefaultGroup::Transform => [
                        ("--tw-translate-x", "0"),
                        ("--tw-translate-y", "0"),
                        ("--tw-rotate", "0"),
                        ("--tw-skew-x", "0"),
                        ("--tw-skew-y", "0"),
                        ("--tw-scale-x", "1"),
                        ("--tw-scale-y", "1"),
                    ]
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                    DefaultGroup::GradientColorStops => blank(&[
                        "--tw-gradient-from",
                        "--tw-gradient-stops",
                        "--tw-gradient-to",
                    ]),
                    DefaultGroup::TouchAction => {
                        blank(&["--tw-pan-x", "--tw-pan-y", "--tw-pinch-zoom"])
                    }
                    DefaultGroup::ScrollSnapType => vec![(
                        "--tw-scroll-snap-strictness".to_string(),
                        "proximity".to_string(),
                    )],
                    DefaultGroup::FontVariantNumeric => blank(&[
                        "--tw-ordinal",
                        "--tw-slashed-zero",
                        "--tw-numeric-figure",
                        "--tw-numeric-spacing",
                        "--tw-numeric-fraction",
                    ]),
                    DefaultGroup::RingWidth => vec![
                        ("--tw-ring-inset".to_string(), " ".to_string()),
                        (
                            "--tw-ring-offset-width".to_string(),
                            lookup("ringOffsetWidth", "0px"),
                        ),
                        (
                            "--tw-ring-offset-color".to_string(),
                            lookup("ringOffsetColor", "#fff"),
                        ),
                        ("--tw-ring-color".to_string(), ring_color.clone()),
                        ("--tw-ring-offset-shadow".to_string(), "0 0 #0000".to_string()),
                        ("--tw-ring-shadow".to_string(), "0 0 #0000".to_string()),
                    ],
                    DefaultGroup::Filter => blank(&[
                        "--tw-blur",
                        "--tw-brightness",
                        "--tw-contrast",
                        "--tw-grayscale",
                        "--tw-hue-rotate",
                        "--tw-invert",
                        "--tw-saturate",
                        "--tw-sepia",
                        "--tw-drop-shadow",
                    ]),
                    DefaultGroup::BackdropFilter => blank(&[
                        "--tw-backdrop-blur",
                        "--tw-backdrop-brightness",
                        "--tw-backdrop-contrast",
                        "--tw-backdrop-grayscale",
                        "--tw-backdrop-hue-rotate",
                        "--tw-backdrop-invert",
                        "--tw-backdrop-opacity",
                        "--tw-backdrop-saturate",
                        "--tw-backdrop-sepia",
                    ]),
                };
                (group, declarations)
            })
            .collect();

        Self { groups }
    }

    pub fn get(&self, group: DefaultGroup) -> &[Declaration] {
        self.groups.get(&group).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultGroup, Defaults};
    use crate::theme::{Theme, ThemeConfig};

    #[test]
    fn groups_sort_by_name() {
        let mut names: Vec<_> = DefaultGroup::ALL.iter().map(|g| g.name()).collect();
        names.sort_unstable();
        let ordered: Vec<_> = DefaultGroup::ALL.iter().map(|g| g.name()).collect();
        assert_eq!(names, ordered);
    }

    #[test]
    fn ring_defaults_read_the_theme() {
        let theme = Theme::resolve(&ThemeConfig::default()).expect("theme");
        let defaults = Defaults::new(&theme);
        let ring = defaults.get(DefaultGroup::RingWidth);
        assert_eq!(ring[1], ("--tw-ring-offset-width".to_string(), "0px".to_string()));
        assert_eq!(ring[2], ("--tw-ring-offset-color".to_string(), "#fff".to_string()));
        assert_eq!(
            ring[3],
            ("--tw-ring-color".to_string(), "rgb(59 130 246 / 0.5)".to_string())
        );
        assert_eq!(defaults.get(DefaultGroup::Transform).len(), 7);
    }
}
