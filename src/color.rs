use crate::Declaration;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

const VALUE: &str = r"(?:\d+|\d*\.\d+)%?";
const SEPARATOR: &str = r"(?:\s*,\s*|\s+)";
const ALPHA_SEPARATOR: &str = r"\s*[,/]\s*";

const NAMED_COLORS: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "currentcolor", "cyan",
    "darkblue", "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Hsl,
}

/// A color split into channels so an alpha value can be composed onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedColor {
    pub mode: ColorMode,
    pub channels: [String; 3],
    pub alpha: Option<String>,
}

impl ParsedColor {
    pub fn with_alpha(mut self, alpha: impl Into<String>) -> Self {
        self.alpha = Some(alpha.into());
        self
    }
}

impl fmt::Display for ParsedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            ColorMode::Rgb => "rgb",
            ColorMode::Hsl => "hsl",
        };
        let [a, b, c] = &self.channels;
        write!(f, "{mode}({a} {b} {c}")?;
        if let Some(alpha) = &self.alpha {
            write!(f, " / {alpha}")?;
        }
        f.write_str(")")
    }
}

fn hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^#([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})?$")
            .expect("hex color pattern is valid")
    })
}

fn short_hex_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^#([a-f\d])([a-f\d])([a-f\d])([a-f\d])?$")
            .expect("short hex color pattern is valid")
    })
}

fn rgb_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"^rgba?\(\s*({VALUE}){SEPARATOR}({VALUE}){SEPARATOR}({VALUE})(?:{ALPHA_SEPARATOR}({VALUE}))?\s*\)$"
        );
        Regex::new(&pattern).expect("rgb pattern is valid")
    })
}

fn hsl_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"^hsla?\(\s*((?:{VALUE})(?:deg|rad|grad|turn)?){SEPARATOR}({VALUE}){SEPARATOR}({VALUE})(?:{ALPHA_SEPARATOR}({VALUE}))?\s*\)$"
        );
        Regex::new(&pattern).expect("hsl pattern is valid")
    })
}

pub fn parse_color(value: &str) -> Option<ParsedColor> {
    let value = value.trim();
    if value == "transparent" {
        return Some(ParsedColor {
            mode: ColorMode::Rgb,
            channels: ["0".to_string(), "0".to_string(), "0".to_string()],
            alpha: Some("0".to_string()),
        });
    }

    let expanded;
    let hex_input = match short_hex_re().captures(value) {
        Some(caps) => {
            let mut long = String::from("#");
            for idx in 1..=4 {
                if let Some(digit) = caps.get(idx) {
                    long.push_str(digit.as_str());
                    long.push_str(digit.as_str());
                }
            }
            expanded = long;
            expanded.as_str()
        }
        None => value,
    };
    if let Some(caps) = hex_re().captures(hex_input) {
        let channel = |idx: usize| {
            caps.get(idx)
                .and_then(|m| u8::from_str_radix(m.as_str(), 16).ok())
                .map(|v| v.to_string())
        };
        let alpha = caps
            .get(4)
            .and_then(|m| u8::from_str_radix(m.as_str(), 16).ok())
            .map(|v| (f64::from(v) / 255.0).to_string());
        return Some(ParsedColor {
            mode: ColorMode::Rgb,
            channels: [channel(1)?, channel(2)?, channel(3)?],
            alpha,
        });
    }

    for (re, mode) in [(rgb_re(), ColorMode::Rgb), (hsl_re(), ColorMode::Hsl)] {
        if let Some(caps) = re.captures(value) {
            let group = |idx: usize| caps.get(idx).map(|m| m.as_str().to_string());
            return Some(ParsedColor {
                mode,
                channels: [group(1)?, group(2)?, group(3)?],
                alpha: group(4),
            });
        }
    }

    None
}

/// Loose color sniffing used to route bracket values between color and non-color rules.
pub fn is_color(value: &str) -> bool {
    if parse_color(value).is_some() {
        return true;
    }
    let lower = value.trim().to_ascii_lowercase();
    NAMED_COLORS.binary_search(&lower.as_str()).is_ok()
}

pub fn with_alpha_value(color: &str, alpha: &str, fallback: &str) -> String {
    match parse_color(color) {
        Some(parsed) => parsed.with_alpha(alpha).to_string(),
        None => fallback.to_string(),
    }
}

/// Declarations for a color family whose opacity is driven by a custom property.
pub fn with_alpha_variable(
    color: &str,
    variable: &str,
    enabled: bool,
    properties: &[&str],
) -> Vec<Declaration> {
    let plain = || {
        properties
            .iter()
            .map(|property| (property.to_string(), color.to_string()))
            .collect()
    };
    if !enabled {
        return plain();
    }
    let Some(parsed) = parse_color(color).filter(|parsed| parsed.alpha.is_none()) else {
        return plain();
    };
    let composed = parsed.with_alpha(format!("var({variable})")).to_string();
    let mut declarations = vec![(variable.to_string(), "1".to_string())];
    declarations.extend(
        properties
            .iter()
            .map(|property| (property.to_string(), composed.clone())),
    );
    declarations
}

#[cfg(test)]
mod tests {
    use super::{NAMED_COLORS, is_color, parse_color, with_alpha_value, with_alpha_variable};

    #[test]
    fn named_colors_are_sorted() {
        let mut sorted = NAMED_COLORS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, NAMED_COLORS);
    }

    #[test]
    fn parses_hex_colors() {
        let parsed = parse_color("#3b82f6").expect("hex should parse");
        assert_eq!(parsed.to_string(), "rgb(59 130 246)");
        let short = parse_color("#f009").expect("short hex should parse");
        assert_eq!(short.to_string(), "rgb(255 0 0 / 0.6)");
    }

    #[test]
    fn parses_functional_colors() {
        assert_eq!(
            parse_color("rgba(1, 2, 3, 0.5)").map(|c| c.to_string()),
            Some("rgb(1 2 3 / 0.5)".to_string())
        );
        assert_eq!(
            parse_color("hsl(210deg 40% 50%)").map(|c| c.to_string()),
            Some("hsl(210deg 40% 50%)".to_string())
        );
        assert_eq!(
            parse_color("transparent").map(|c| c.to_string()),
            Some("rgb(0 0 0 / 0)".to_string())
        );
        assert!(parse_color("currentColor").is_none());
        assert!(parse_color("5px 10px teal").is_none());
    }

    #[test]
    fn sniffs_colors() {
        assert!(is_color("#dd2"));
        assert!(is_color("teal"));
        assert!(is_color("currentColor"));
        assert!(!is_color("5px_10px_teal"));
        assert!(!is_color("12px"));
    }

    #[test]
    fn composes_alpha() {
        assert_eq!(with_alpha_value("#ffffff", "0", "x"), "rgb(255 255 255 / 0)");
        assert_eq!(with_alpha_value("inherit", "0", "fallback"), "fallback");
    }

    #[test]
    fn alpha_variable_only_for_opaque_colors() {
        let declarations = with_alpha_variable("#000", "--tw-text-opacity", true, &["color"]);
        assert_eq!(
            declarations,
            vec![
                ("--tw-text-opacity".to_string(), "1".to_string()),
                (
                    "color".to_string(),
                    "rgb(0 0 0 / var(--tw-text-opacity))".to_string()
                ),
            ]
        );
        let translucent = with_alpha_variable("#0008", "--tw-text-opacity", true, &["color"]);
        assert_eq!(translucent.len(), 1);
        let disabled = with_alpha_variable("#000", "--tw-text-opacity", false, &["color"]);
        assert_eq!(disabled, vec![("color".to_string(), "#000".to_string())]);
    }
}
