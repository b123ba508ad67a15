use crate::error::Result;
use crate::theme::{Screen, ThemeMap, ThemeValue, ThemeView};
use indexmap::IndexMap;

/// A category derived from the plain categories.
pub type Compute = fn(&ThemeView<'_>) -> Result<ThemeMap>;

const PALETTE: &[(&str, [&str; 11])] = &[
    ("slate", ["#f8fafc", "#f1f5f9", "#e2e8f0", "#cbd5e1", "#94a3b8", "#64748b", "#475569", "#334155", "#1e293b", "#0f172a", "#020617"]),
    ("gray", ["#f9fafb", "#f3f4f6", "#e5e7eb", "#d1d5db", "#9ca3af", "#6b7280", "#4b5563", "#374151", "#1f2937", "#111827", "#030712"]),
    ("zinc", ["#fafafa", "#f4f4f5", "#e4e4e7", "#d4d4d8", "#a1a1aa", "#71717a", "#52525b", "#3f3f46", "#27272a", "#18181b", "#09090b"]),
    ("neutral", ["#fafafa", "#f5f5f5", "#e5e5e5", "#d4d4d4", "#a3a3a3", "#737373", "#525252", "#404040", "#262626", "#171717", "#0a0a0a"]),
    ("stone", ["#fafaf9", "#f5f5f4", "#e7e5e4", "#d6d3d1", "#a8a29e", "#78716c", "#57534e", "#44403c", "#292524", "#1c1917", "#0c0a09"]),
    ("red", ["#fef2f2", "#fee2e2", "#fecaca", "#fca5a5", "#f87171", "#ef4444", "#dc2626", "#b91c1c", "#991b1b", "#7f1d1d", "#450a0a"]),
    ("orange", ["#fff7ed", "#ffedd5", "#fed7aa", "#fdba74", "#fb923c", "#f97316", "#ea580c", "#c2410c", "#9a3412", "#7c2d12", "#431407"]),
    ("amber", ["#fffbeb", "#fef3c7", "#fde68a", "#fcd34d", "#fbbf24", "#f59e0b", "#d97706", "#b45309", "#92400e", "#78350f", "#451a03"]),
    ("yellow", ["#fefce8", "#fef9c3", "#fef08a", "#fde047", "#facc15", "#eab308", "#ca8a04", "#a16207", "#854d0e", "#713f12", "#422006"]),
    ("lime", ["#f7fee7", "#ecfccb", "#d9f99d", "#bef264", "#a3e635", "#84cc16", "#65a30d", "#4d7c0f", "#3f6212", "#365314", "#1a2e05"]),
    ("green", ["#f0fdf4", "#dcfce7", "#bbf7d0", "#86efac", "#4ade80", "#22c55e", "#16a34a", "#15803d", "#166534", "#14532d", "#052e16"]),
    ("emerald", ["#ecfdf5", "#d1fae5", "#a7f3d0", "#6ee7b7", "#34d399", "#10b981", "#059669", "#047857", "#065f46", "#064e3b", "#022c22"]),
    ("teal", ["#f0fdfa", "#ccfbf1", "#99f6e4", "#5eead4", "#2dd4bf", "#14b8a6", "#0d9488", "#0f766e", "#115e59", "#134e4a", "#042f2e"]),
    ("cyan", ["#ecfeff", "#cffafe", "#a5f3fc", "#67e8f9", "#22d3ee", "#06b6d4", "#0891b2", "#0e7490", "#155e75", "#164e63", "#083344"]),
    ("sky", ["#f0f9ff", "#e0f2fe", "#bae6fd", "#7dd3fc", "#38bdf8", "#0ea5e9", "#0284c7", "#0369a1", "#075985", "#0c4a6e", "#082f49"]),
    ("blue", ["#eff6ff", "#dbeafe", "#bfdbfe", "#93c5fd", "#60a5fa", "#3b82f6", "#2563eb", "#1d4ed8", "#1e40af", "#1e3a8a", "#172554"]),
    ("indigo", ["#eef2ff", "#e0e7ff", "#c7d2fe", "#a5b4fc", "#818cf8", "#6366f1", "#4f46e5", "#4338ca", "#3730a3", "#312e81", "#1e1b4b"]),
    ("violet", ["#f5f3ff", "#ede9fe", "#ddd6fe", "#c4b5fd", "#a78bfa", "#8b5cf6", "#7c3aed", "#6d28d9", "#5b21b6", "#4c1d95", "#2e1065"]),
    ("purple", ["#faf5ff", "#f3e8ff", "#e9d5ff", "#d8b4fe", "#c084fc", "#a855f7", "#9333ea", "#7e22ce", "#6b21a8", "#581c87", "#3b0764"]),
    ("fuchsia", ["#fdf4ff", "#fae8ff", "#f5d0fe", "#f0abfc", "#e879f9", "#d946ef", "#c026d3", "#a21caf", "#86198f", "#701a75", "#4a044e"]),
    ("pink", ["#fdf2f8", "#fce7f3", "#fbcfe8", "#f9a8d4", "#f472b6", "#ec4899", "#db2777", "#be185d", "#9d174d", "#831843", "#500724"]),
    ("rose", ["#fff1f2", "#ffe4e6", "#fecdd3", "#fda4af", "#fb7185", "#f43f5e", "#e11d48", "#be123c", "#9f1239", "#881337", "#4c0519"]),
];

const SHADES: [&str; 11] = ["50", "100", "200", "300", "400", "500", "600", "700", "800", "900", "950"];

const SPACING: &[(&str, &str)] = &[
    ("px", "1px"), ("0", "0px"), ("0.5", "0.125rem"), ("1", "0.25rem"), ("1.5", "0.375rem"),
    ("2", "0.5rem"), ("2.5", "0.625rem"), ("3", "0.75rem"), ("3.5", "0.875rem"), ("4", "1rem"),
    ("5", "1.25rem"), ("6", "1.5rem"), ("7", "1.75rem"), ("8", "2rem"), ("9", "2.25rem"),
    ("10", "2.5rem"), ("11", "2.75rem"), ("12", "3rem"), ("14", "3.5rem"), ("16", "4rem"),
    ("20", "5rem"), ("24", "6rem"), ("28", "7rem"), ("32", "8rem"), ("36", "9rem"),
    ("40", "10rem"), ("44", "11rem"), ("48", "12rem"), ("52", "13rem"), ("56", "14rem"),
    ("60", "15rem"), ("64", "16rem"), ("72", "18rem"), ("80", "20rem"), ("96", "24rem"),
];

const FONT_SIZE: &[(&str, &str, &str)] = &[
    ("xs", "0.75rem", "1rem"), ("sm", "0.875rem", "1.25rem"), ("base", "1rem", "1.5rem"),
    ("lg", "1.125rem", "1.75rem"), ("xl", "1.25rem", "1.75rem"), ("2xl", "1.5rem", "2rem"),
    ("3xl", "1.875rem", "2.25rem"), ("4xl", "2.25rem", "2.5rem"), ("5xl", "3rem", "1"),
    ("6xl", "3.75rem", "1"), ("7xl", "4.5rem", "1"), ("8xl", "6rem", "1"), ("9xl", "8rem", "1"),
];

const BOX_SHADOW: &[(&str, &str, &str)] = &[
    ("sm", "0 1px 2px 0 var(--tw-shadow-color)", "rgb(0 0 0 / 0.05)"),
    ("DEFAULT", "0 1px 3px 0 var(--tw-shadow-color), 0 1px 2px -1px var(--tw-shadow-color)", "rgb(0 0 0 / 0.1)"),
    ("md", "0 4px 6px -1px var(--tw-shadow-color), 0 2px 4px -2px var(--tw-shadow-color)", "rgb(0 0 0 / 0.1)"),
    ("lg", "0 10px 15px -3px var(--tw-shadow-color), 0 4px 6px -4px var(--tw-shadow-color)", "rgb(0 0 0 / 0.1)"),
    ("xl", "0 20px 25px -5px var(--tw-shadow-color), 0 8px 10px -6px var(--tw-shadow-color)", "rgb(0 0 0 / 0.1)"),
    ("2xl", "0 25px 50px -12px var(--tw-shadow-color)", "rgb(0 0 0 / 0.25)"),
    ("inner", "inset 0 2px 4px 0 var(--tw-shadow-color)", "rgb(0 0 0 / 0.05)"),
];

const POSITIONS: &[(&str, &str)] = &[
    ("bottom", "bottom"), ("center", "center"), ("left", "left"), ("left-bottom", "left bottom"),
    ("left-top", "left top"), ("right", "right"), ("right-bottom", "right bottom"),
    ("right-top", "right top"), ("top", "top"),
];

const KEYFRAMES: &[(&str, &str)] = &[
    ("spin", "to { transform: rotate(360deg); }"),
    ("ping", "75%, 100% { transform: scale(2); opacity: 0; }"),
    ("pulse", "50% { opacity: .5; }"),
    (
        "bounce",
        "0%, 100% { transform: translateY(-25%); animation-timing-function: cubic-bezier(0.8,0,1,1); }\n  50% { transform: none; animation-timing-function: cubic-bezier(0,0,0.2,1); }",
    ),
];

fn map(entries: &[(&str, &str)]) -> ThemeMap {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), ThemeValue::from(*value)))
        .collect()
}

fn numbered(range: std::ops::RangeInclusive<u32>, value: impl Fn(u32) -> String) -> ThemeMap {
    range
        .map(|n| (n.to_string(), ThemeValue::Plain(value(n))))
        .collect()
}

fn percent(numerator: u32, denominator: u32) -> String {
    let value = format!("{:.6}", f64::from(numerator) * 100.0 / f64::from(denominator));
    let value = value.trim_end_matches('0').trim_end_matches('.');
    format!("{value}%")
}

/// `1/2`, `1/3`... for every denominator in `denominators`.
fn fractions(denominators: &[u32]) -> ThemeMap {
    denominators
        .iter()
        .flat_map(|&d| (1..d).map(move |n| (n, d)))
        .map(|(n, d)| (format!("{n}/{d}"), ThemeValue::Plain(percent(n, d))))
        .collect()
}

fn joined(parts: impl IntoIterator<Item = ThemeMap>) -> ThemeMap {
    let mut values = ThemeMap::new();
    for part in parts {
        values.extend(part);
    }
    values
}

pub fn screens() -> IndexMap<String, Screen> {
    [("sm", "640px"), ("md", "768px"), ("lg", "1024px"), ("xl", "1280px"), ("2xl", "1536px")]
        .into_iter()
        .map(|(name, min)| (name.to_string(), Screen::min(min)))
        .collect()
}

fn colors() -> ThemeMap {
    let mut values = map(&[
        ("inherit", "inherit"),
        ("current", "currentColor"),
        ("transparent", "transparent"),
        ("black", "#000"),
        ("white", "#fff"),
    ]);
    for (family, hexes) in PALETTE {
        for (shade, hex) in SHADES.iter().zip(hexes) {
            values.insert(format!("{family}-{shade}"), ThemeValue::from(*hex));
        }
    }
    values
}

fn font_family() -> ThemeMap {
    map(&[
        ("sans", "ui-sans-serif, system-ui, sans-serif, \"Apple Color Emoji\", \"Segoe UI Emoji\", \"Segoe UI Symbol\", \"Noto Color Emoji\""),
        ("serif", "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif"),
        ("mono", "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace"),
    ])
}

fn grid_spans(max: u32) -> ThemeMap {
    joined([
        map(&[("auto", "auto")]),
        (1..=max)
            .map(|n| (format!("span-{n}"), ThemeValue::Plain(format!("span {n} / span {n}"))))
            .collect(),
        map(&[("span-full", "1 / -1")]),
    ])
}

fn grid_lines(max: u32) -> ThemeMap {
    joined([map(&[("auto", "auto")]), numbered(1..=max, |n| n.to_string())])
}

fn grid_template(max: u32) -> ThemeMap {
    joined([
        map(&[("none", "none")]),
        numbered(1..=max, |n| format!("repeat({n}, minmax(0, 1fr))")),
    ])
}

fn transition_times() -> ThemeMap {
    joined([
        map(&[("0", "0s")]),
        [75, 100, 150, 200, 300, 500, 700, 1000]
            .into_iter()
            .map(|ms: u32| (ms.to_string(), ThemeValue::Plain(format!("{ms}ms"))))
            .collect(),
    ])
}

/// Every category whose values do not depend on other categories.
pub fn plain() -> IndexMap<String, ThemeMap> {
    let mut categories = IndexMap::new();
    let mut add = |name: &str, values: ThemeMap| {
        categories.insert(name.to_string(), values);
    };

    add("colors", colors());
    add(
        "columns",
        joined([
            map(&[("auto", "auto")]),
            numbered(1..=12, |n| n.to_string()),
            map(&[
                ("3xs", "16rem"), ("2xs", "18rem"), ("xs", "20rem"), ("sm", "24rem"),
                ("md", "28rem"), ("lg", "32rem"), ("xl", "36rem"), ("2xl", "42rem"),
                ("3xl", "48rem"), ("4xl", "56rem"), ("5xl", "64rem"), ("6xl", "72rem"),
                ("7xl", "80rem"),
            ]),
        ]),
    );
    add("spacing", map(SPACING));
    add(
        "animation",
        map(&[
            ("none", "none"),
            ("spin", "spin 1s linear infinite"),
            ("ping", "ping 1s cubic-bezier(0, 0, 0.2, 1) infinite"),
            ("pulse", "pulse 2s cubic-bezier(0.4, 0, 0.6, 1) infinite"),
            ("bounce", "bounce 1s infinite"),
        ]),
    );
    add(
        "aria",
        map(&[
            ("busy", "busy=\"true\""), ("checked", "checked=\"true\""),
            ("disabled", "disabled=\"true\""), ("expanded", "expanded=\"true\""),
            ("hidden", "hidden=\"true\""), ("pressed", "pressed=\"true\""),
            ("readonly", "readonly=\"true\""), ("required", "required=\"true\""),
            ("selected", "selected=\"true\""),
        ]),
    );
    add(
        "aspectRatio",
        map(&[("auto", "auto"), ("square", "1 / 1"), ("video", "16 / 9")]),
    );
    add(
        "backgroundImage",
        joined([
            map(&[("none", "none")]),
            [
                ("t", "top"), ("tr", "top right"), ("r", "right"), ("br", "bottom right"),
                ("b", "bottom"), ("bl", "bottom left"), ("l", "left"), ("tl", "top left"),
            ]
            .into_iter()
            .map(|(key, direction)| {
                (
                    format!("gradient-to-{key}"),
                    ThemeValue::Plain(format!(
                        "linear-gradient(to {direction}, var(--tw-gradient-stops))"
                    )),
                )
            })
            .collect(),
        ]),
    );
    add("backgroundPosition", map(POSITIONS));
    add(
        "backgroundSize",
        map(&[("auto", "auto"), ("cover", "cover"), ("contain", "contain")]),
    );
    add(
        "blur",
        map(&[
            ("0", "0"), ("none", "0"), ("sm", "4px"), ("DEFAULT", "8px"), ("md", "12px"),
            ("lg", "16px"), ("xl", "24px"), ("2xl", "40px"), ("3xl", "64px"),
        ]),
    );
    add(
        "borderRadius",
        map(&[
            ("none", "0px"), ("sm", "0.125rem"), ("DEFAULT", "0.25rem"), ("md", "0.375rem"),
            ("lg", "0.5rem"), ("xl", "0.75rem"), ("2xl", "1rem"), ("3xl", "1.5rem"),
            ("full", "9999px"),
        ]),
    );
    add(
        "borderWidth",
        map(&[("DEFAULT", "1px"), ("0", "0px"), ("2", "2px"), ("4", "4px"), ("8", "8px")]),
    );
    add("boxShadow", {
        let mut values: ThemeMap = BOX_SHADOW
            .iter()
            .map(|(key, value, default_color)| {
                (
                    key.to_string(),
                    ThemeValue::Shadow {
                        value: value.to_string(),
                        default_color: default_color.to_string(),
                    },
                )
            })
            .collect();
        values.insert("none".to_string(), ThemeValue::from("none"));
        values
    });
    add(
        "brightness",
        map(&[
            ("0", "0"), ("50", ".5"), ("75", ".75"), ("90", ".9"), ("95", ".95"), ("100", "1"),
            ("105", "1.05"), ("110", "1.1"), ("125", "1.25"), ("150", "1.5"), ("200", "2"),
        ]),
    );
    add("content", map(&[("none", "none")]));
    add(
        "contrast",
        map(&[
            ("0", "0"), ("50", ".5"), ("75", ".75"), ("100", "1"), ("125", "1.25"),
            ("150", "1.5"), ("200", "2"),
        ]),
    );
    add("data", ThemeMap::new());
    add("dropShadow", {
        let pair = |a: &str, b: &str| ThemeValue::Pair(a.to_string(), b.to_string());
        let mut values = ThemeMap::new();
        values.insert("sm".to_string(), ThemeValue::from("0 1px 1px rgb(0 0 0 / 0.05)"));
        values.insert(
            "DEFAULT".to_string(),
            pair("0 1px 2px rgb(0 0 0 / 0.1)", "0 1px 1px rgb(0 0 0 / 0.06)"),
        );
        values.insert(
            "md".to_string(),
            pair("0 4px 3px rgb(0 0 0 / 0.07)", "0 2px 2px rgb(0 0 0 / 0.06)"),
        );
        values.insert(
            "lg".to_string(),
            pair("0 10px 8px rgb(0 0 0 / 0.04)", "0 4px 3px rgb(0 0 0 / 0.1)"),
        );
        values.insert(
            "xl".to_string(),
            pair("0 20px 13px rgb(0 0 0 / 0.03)", "0 8px 5px rgb(0 0 0 / 0.08)"),
        );
        values.insert("2xl".to_string(), ThemeValue::from("0 25px 25px rgb(0 0 0 / 0.15)"));
        values.insert("none".to_string(), ThemeValue::from("0 0 #0000"));
        values
    });
    add(
        "flex",
        map(&[("1", "1 1 0%"), ("auto", "1 1 auto"), ("initial", "0 1 auto"), ("none", "none")]),
    );
    add("flexGrow", map(&[("0", "0"), ("DEFAULT", "1")]));
    add("flexShrink", map(&[("0", "0"), ("DEFAULT", "1")]));
    add("fontFamily", font_family());
    add(
        "fontSize",
        FONT_SIZE
            .iter()
            .map(|(key, size, line_height)| {
                (
                    key.to_string(),
                    ThemeValue::Pair(size.to_string(), line_height.to_string()),
                )
            })
            .collect(),
    );
    add(
        "fontWeight",
        map(&[
            ("thin", "100"), ("extralight", "200"), ("light", "300"), ("normal", "400"),
            ("medium", "500"), ("semibold", "600"), ("bold", "700"), ("extrabold", "800"),
            ("black", "900"),
        ]),
    );
    add(
        "gradientColorStopPositions",
        (0..=20)
            .map(|step| {
                let value = format!("{}%", step * 5);
                (value.clone(), ThemeValue::Plain(value))
            })
            .collect(),
    );
    add("grayscale", map(&[("0", "0"), ("DEFAULT", "100%")]));
    let grid_auto = map(&[
        ("auto", "auto"), ("min", "min-content"), ("max", "max-content"),
        ("fr", "minmax(0, 1fr)"),
    ]);
    add("gridAutoColumns", grid_auto.clone());
    add("gridAutoRows", grid_auto);
    add("gridColumn", grid_spans(12));
    add("gridColumnEnd", grid_lines(13));
    add("gridColumnStart", grid_lines(13));
    add("gridRow", grid_spans(6));
    add("gridRowEnd", grid_lines(7));
    add("gridRowStart", grid_lines(7));
    add("gridTemplateColumns", grid_template(12));
    add("gridTemplateRows", grid_template(6));
    add(
        "hueRotate",
        map(&[
            ("0", "0deg"), ("15", "15deg"), ("30", "30deg"), ("60", "60deg"), ("90", "90deg"),
            ("180", "180deg"),
        ]),
    );
    add("invert", map(&[("0", "0"), ("DEFAULT", "100%")]));
    add("keyframes", map(KEYFRAMES));
    add(
        "letterSpacing",
        map(&[
            ("tighter", "-0.05em"), ("tight", "-0.025em"), ("normal", "0em"),
            ("wide", "0.025em"), ("wider", "0.05em"), ("widest", "0.1em"),
        ]),
    );
    add("lineClamp", numbered(1..=6, |n| n.to_string()));
    add(
        "lineHeight",
        map(&[
            ("none", "1"), ("tight", "1.25"), ("snug", "1.375"), ("normal", "1.5"),
            ("relaxed", "1.625"), ("loose", "2"), ("3", ".75rem"), ("4", "1rem"),
            ("5", "1.25rem"), ("6", "1.5rem"), ("7", "1.75rem"), ("8", "2rem"),
            ("9", "2.25rem"), ("10", "2.5rem"),
        ]),
    );
    add(
        "listStyleType",
        map(&[("none", "none"), ("disc", "disc"), ("decimal", "decimal")]),
    );
    add("listStyleImage", map(&[("none", "none")]));
    add(
        "minHeight",
        map(&[
            ("0", "0px"), ("full", "100%"), ("screen", "100vh"), ("min", "min-content"),
            ("max", "max-content"), ("fit", "fit-content"),
        ]),
    );
    add(
        "minWidth",
        map(&[
            ("0", "0px"), ("full", "100%"), ("min", "min-content"), ("max", "max-content"),
            ("fit", "fit-content"),
        ]),
    );
    add("objectPosition", map(POSITIONS));
    add(
        "opacity",
        map(&[
            ("0", "0"), ("5", "0.05"), ("10", "0.1"), ("15", "0.15"), ("20", "0.2"),
            ("25", "0.25"), ("30", "0.3"), ("35", "0.35"), ("40", "0.4"), ("45", "0.45"),
            ("50", "0.5"), ("55", "0.55"), ("60", "0.6"), ("65", "0.65"), ("70", "0.7"),
            ("75", "0.75"), ("80", "0.8"), ("85", "0.85"), ("90", "0.9"), ("95", "0.95"),
            ("100", "1"),
        ]),
    );
    add(
        "order",
        joined([
            map(&[("first", "-9999"), ("last", "9999"), ("none", "0")]),
            numbered(1..=12, |n| n.to_string()),
        ]),
    );
    let offsets = map(&[("0", "0px"), ("1", "1px"), ("2", "2px"), ("4", "4px"), ("8", "8px")]);
    add("outlineOffset", offsets.clone());
    add("outlineWidth", offsets.clone());
    add("ringOffsetWidth", offsets.clone());
    add(
        "ringWidth",
        joined([map(&[("DEFAULT", "3px")]), offsets.clone()]),
    );
    add(
        "rotate",
        map(&[
            ("0", "0deg"), ("1", "1deg"), ("2", "2deg"), ("3", "3deg"), ("6", "6deg"),
            ("12", "12deg"), ("45", "45deg"), ("90", "90deg"), ("180", "180deg"),
        ]),
    );
    add(
        "saturate",
        map(&[("0", "0"), ("50", ".5"), ("100", "1"), ("150", "1.5"), ("200", "2")]),
    );
    add(
        "scale",
        map(&[
            ("0", "0"), ("50", ".5"), ("75", ".75"), ("90", ".9"), ("95", ".95"), ("100", "1"),
            ("105", "1.05"), ("110", "1.1"), ("125", "1.25"), ("150", "1.5"),
        ]),
    );
    add("sepia", map(&[("0", "0"), ("DEFAULT", "100%")]));
    add(
        "skew",
        map(&[
            ("0", "0deg"), ("1", "1deg"), ("2", "2deg"), ("3", "3deg"), ("6", "6deg"),
            ("12", "12deg"),
        ]),
    );
    add("strokeWidth", map(&[("0", "0"), ("1", "1"), ("2", "2")]));
    add("supports", ThemeMap::new());
    add(
        "textDecorationThickness",
        joined([map(&[("auto", "auto"), ("from-font", "from-font")]), offsets.clone()]),
    );
    add(
        "textUnderlineOffset",
        joined([map(&[("auto", "auto")]), offsets]),
    );
    add(
        "transformOrigin",
        map(&[
            ("center", "center"), ("top", "top"), ("top-right", "top right"),
            ("right", "right"), ("bottom-right", "bottom right"), ("bottom", "bottom"),
            ("bottom-left", "bottom left"), ("left", "left"), ("top-left", "top left"),
        ]),
    );
    add("transitionDelay", transition_times());
    add(
        "transitionDuration",
        joined([map(&[("DEFAULT", "150ms")]), transition_times()]),
    );
    add(
        "transitionProperty",
        map(&[
            ("none", "none"),
            ("all", "all"),
            ("DEFAULT", "color, background-color, border-color, text-decoration-color, fill, stroke, opacity, box-shadow, transform, filter, backdrop-filter"),
            ("colors", "color, background-color, border-color, text-decoration-color, fill, stroke"),
            ("opacity", "opacity"),
            ("shadow", "box-shadow"),
            ("transform", "transform"),
        ]),
    );
    add(
        "transitionTimingFunction",
        map(&[
            ("DEFAULT", "cubic-bezier(0.4, 0, 0.2, 1)"), ("linear", "linear"),
            ("in", "cubic-bezier(0.4, 0, 1, 1)"), ("out", "cubic-bezier(0, 0, 0.2, 1)"),
            ("in-out", "cubic-bezier(0.4, 0, 0.2, 1)"),
        ]),
    );
    add(
        "verticalAlign",
        map(&[
            ("baseline", "baseline"), ("top", "top"), ("middle", "middle"),
            ("bottom", "bottom"), ("text-top", "text-top"), ("text-bottom", "text-bottom"),
            ("sub", "sub"), ("super", "super"),
        ]),
    );
    add(
        "willChange",
        map(&[
            ("auto", "auto"), ("scroll", "scroll-position"), ("contents", "contents"),
            ("transform", "transform"),
        ]),
    );
    add(
        "zIndex",
        joined([
            [0, 10, 20, 30, 40, 50]
                .into_iter()
                .map(|n: u32| (n.to_string(), ThemeValue::Plain(n.to_string())))
                .collect(),
            map(&[("auto", "auto")]),
        ]),
    );
    categories
}

macro_rules! alias {
    ($name:ident, $source:literal) => {
        fn $name(view: &ThemeView<'_>) -> Result<ThemeMap> {
            Ok(view.category($source)?.clone())
        }
    };
}

alias!(from_colors, "colors");
alias!(from_spacing, "spacing");
alias!(from_opacity, "opacity");
alias!(from_blur, "blur");
alias!(from_brightness, "brightness");
alias!(from_contrast, "contrast");
alias!(from_grayscale, "grayscale");
alias!(from_hue_rotate, "hueRotate");
alias!(from_invert, "invert");
alias!(from_saturate, "saturate");
alias!(from_sepia, "sepia");
alias!(from_border_width, "borderWidth");

fn accent_color(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([view.category("colors")?.clone(), map(&[("auto", "auto")])]))
}

fn border_color(view: &ThemeView<'_>) -> Result<ThemeMap> {
    let colors = view.category("colors")?;
    let default = colors
        .get("gray-200")
        .cloned()
        .unwrap_or_else(|| ThemeValue::from("currentColor"));
    let mut values = colors.clone();
    values.insert("DEFAULT".to_string(), default);
    Ok(values)
}

fn paint(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([map(&[("none", "none")]), view.category("colors")?.clone()]))
}

fn ring_color(view: &ThemeView<'_>) -> Result<ThemeMap> {
    let colors = view.category("colors")?;
    let default = colors
        .get("blue-500")
        .cloned()
        .unwrap_or_else(|| ThemeValue::from("#3b82f6"));
    let mut values = ThemeMap::new();
    values.insert("DEFAULT".to_string(), default);
    values.extend(colors.clone());
    Ok(values)
}

fn ring_opacity(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([map(&[("DEFAULT", "0.5")]), view.category("opacity")?.clone()]))
}

fn sizes() -> ThemeMap {
    map(&[("full", "100%")])
}

fn intrinsic() -> ThemeMap {
    map(&[("min", "min-content"), ("max", "max-content"), ("fit", "fit-content")])
}

fn flex_basis(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        map(&[("auto", "auto")]),
        view.category("spacing")?.clone(),
        fractions(&[2, 3, 4, 5, 6, 12]),
        sizes(),
    ]))
}

fn height(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        map(&[("auto", "auto")]),
        view.category("spacing")?.clone(),
        fractions(&[2, 3, 4, 5, 6]),
        sizes(),
        map(&[("screen", "100vh")]),
        intrinsic(),
    ]))
}

fn inset(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        map(&[("auto", "auto")]),
        view.category("spacing")?.clone(),
        fractions(&[2, 3, 4]),
        sizes(),
    ]))
}

fn margin(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([map(&[("auto", "auto")]), view.category("spacing")?.clone()]))
}

fn max_height(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        view.category("spacing")?.clone(),
        map(&[("none", "none")]),
        sizes(),
        map(&[("screen", "100vh")]),
        intrinsic(),
    ]))
}

fn max_width(view: &ThemeView<'_>) -> Result<ThemeMap> {
    let mut values = joined([
        map(&[
            ("none", "none"), ("0", "0rem"), ("xs", "20rem"), ("sm", "24rem"), ("md", "28rem"),
            ("lg", "32rem"), ("xl", "36rem"), ("2xl", "42rem"), ("3xl", "48rem"),
            ("4xl", "56rem"), ("5xl", "64rem"), ("6xl", "72rem"), ("7xl", "80rem"),
        ]),
        sizes(),
        intrinsic(),
        map(&[("prose", "65ch")]),
    ]);
    for (name, screen) in view.screens() {
        if let Some(width) = screen.min.as_ref().or(screen.max.as_ref()) {
            values.insert(format!("screen-{name}"), ThemeValue::Plain(width.clone()));
        }
    }
    Ok(values)
}

fn size(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        map(&[("auto", "auto")]),
        view.category("spacing")?.clone(),
        fractions(&[2, 3, 4, 5, 6, 12]),
        sizes(),
        intrinsic(),
    ]))
}

fn translate(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        view.category("spacing")?.clone(),
        fractions(&[2, 3, 4]),
        sizes(),
    ]))
}

fn width(view: &ThemeView<'_>) -> Result<ThemeMap> {
    Ok(joined([
        map(&[("auto", "auto")]),
        view.category("spacing")?.clone(),
        fractions(&[2, 3, 4, 5, 6, 12]),
        sizes(),
        map(&[("screen", "100vw")]),
        intrinsic(),
    ]))
}

static COMPUTED: &[(&str, Compute)] = &[
    ("accentColor", accent_color),
    ("backdropBlur", from_blur),
    ("backdropBrightness", from_brightness),
    ("backdropContrast", from_contrast),
    ("backdropGrayscale", from_grayscale),
    ("backdropHueRotate", from_hue_rotate),
    ("backdropInvert", from_invert),
    ("backdropOpacity", from_opacity),
    ("backdropSaturate", from_saturate),
    ("backdropSepia", from_sepia),
    ("backgroundColor", from_colors),
    ("backgroundOpacity", from_opacity),
    ("borderColor", border_color),
    ("borderOpacity", from_opacity),
    ("boxShadowColor", from_colors),
    ("caretColor", from_colors),
    ("divideColor", border_color),
    ("divideOpacity", from_opacity),
    ("divideWidth", from_border_width),
    ("fill", paint),
    ("flexBasis", flex_basis),
    ("gap", from_spacing),
    ("gradientColorStops", from_colors),
    ("height", height),
    ("inset", inset),
    ("margin", margin),
    ("maxHeight", max_height),
    ("maxWidth", max_width),
    ("outlineColor", from_colors),
    ("padding", from_spacing),
    ("placeholderColor", from_colors),
    ("placeholderOpacity", from_opacity),
    ("ringColor", ring_color),
    ("ringOffsetColor", from_colors),
    ("ringOpacity", ring_opacity),
    ("scrollMargin", from_spacing),
    ("scrollPadding", from_spacing),
    ("size", size),
    ("space", from_spacing),
    ("stroke", paint),
    ("textColor", from_colors),
    ("textDecorationColor", from_colors),
    ("textIndent", from_spacing),
    ("textOpacity", from_opacity),
    ("translate", translate),
    ("width", width),
];

/// Categories resolved in the second phase, in resolution order.
pub fn computed() -> &'static [(&'static str, Compute)] {
    COMPUTED
}

#[cfg(test)]
mod tests {
    use super::{colors, computed, fractions, percent, plain, screens};

    #[test]
    fn palette_has_every_family_and_shade() {
        let colors = colors();
        assert_eq!(colors.len(), 5 + 22 * 11);
        assert_eq!(colors["blue-500"].primary(), "#3b82f6");
        assert_eq!(colors["current"].primary(), "currentColor");
    }

    #[test]
    fn fractions_round_like_css_authors_write_them() {
        assert_eq!(percent(1, 2), "50%");
        assert_eq!(percent(1, 3), "33.333333%");
        assert_eq!(percent(2, 3), "66.666667%");
        let thirds = fractions(&[3]);
        assert_eq!(thirds.keys().collect::<Vec<_>>(), ["1/3", "2/3"]);
    }

    #[test]
    fn plain_and_computed_names_are_disjoint() {
        let plain = plain();
        for (name, _) in computed() {
            assert!(!plain.contains_key(*name), "{name} is defined twice");
        }
        assert_eq!(screens().len(), 5);
    }
}
