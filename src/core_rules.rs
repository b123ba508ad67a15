use crate::Declaration;
use crate::color::{with_alpha_value, with_alpha_variable};
use crate::defaults::DefaultGroup;
use crate::rules::{CoreFlags, Rule};
use crate::theme::{Theme, ThemeMap, ThemeValue};
use crate::variants::SelectorRewrite;
use std::sync::Arc;

/// A named built-in rule family, enabled or disabled as a whole.
pub type Family = (&'static str, Vec<Rule>);

const TRANSFORM: &str = "translate(var(--tw-translate-x), var(--tw-translate-y)) rotate(var(--tw-rotate)) skewX(var(--tw-skew-x)) skewY(var(--tw-skew-y)) scaleX(var(--tw-scale-x)) scaleY(var(--tw-scale-y))";
const TRANSFORM_GPU: &str = "translate3d(var(--tw-translate-x), var(--tw-translate-y), 0) rotate(var(--tw-rotate)) skewX(var(--tw-skew-x)) skewY(var(--tw-skew-y)) scaleX(var(--tw-scale-x)) scaleY(var(--tw-scale-y))";
const TOUCH_ACTION: &str = "var(--tw-pan-x) var(--tw-pan-y) var(--tw-pinch-zoom)";
const FILTER: &str = "var(--tw-blur) var(--tw-brightness) var(--tw-contrast) var(--tw-grayscale) var(--tw-hue-rotate) var(--tw-invert) var(--tw-saturate) var(--tw-sepia) var(--tw-drop-shadow)";
const BACKDROP_FILTER: &str = "var(--tw-backdrop-blur) var(--tw-backdrop-brightness) var(--tw-backdrop-contrast) var(--tw-backdrop-grayscale) var(--tw-backdrop-hue-rotate) var(--tw-backdrop-invert) var(--tw-backdrop-opacity) var(--tw-backdrop-saturate) var(--tw-backdrop-sepia)";
const NUMERIC: &str = "var(--tw-ordinal) var(--tw-slashed-zero) var(--tw-numeric-figure) var(--tw-numeric-spacing) var(--tw-numeric-fraction)";

const STANDARD_DIRECTIONS: &[&str] = &["x", "y", "t", "l", "b", "r"];
const OVERFLOWS: &[&str] = &["auto", "hidden", "clip", "visible", "scroll"];
const OVERSCROLLS: &[&str] = &["none", "contain", "auto"];
const BREAKS: &[&str] = &["auto", "avoid", "all", "avoid-page", "page", "left", "right", "column"];
const BLEND_MODES: &[&str] = &[
    "normal", "multiply", "screen", "overlay", "darken", "lighten", "color-dodge", "color-burn",
    "hard-light", "soft-light", "difference", "exclusion", "hue", "saturation", "color",
    "luminosity",
];
const CURSORS: &[&str] = &[
    "auto", "default", "pointer", "wait", "text", "move", "help", "not-allowed", "none",
    "context-menu", "progress", "cell", "crosshair", "vertical-text", "alias", "copy", "no-drop",
    "grab", "grabbing", "all-scroll", "col-resize", "row-resize", "n-resize", "e-resize",
    "s-resize", "w-resize", "ne-resize", "nw-resize", "se-resize", "sw-resize", "ew-resize",
    "ns-resize", "nesw-resize", "nwse-resize", "zoom-in", "zoom-out",
];
const DISPLAYS: &[&str] = &[
    "block", "inline-block", "inline", "flex", "inline-flex", "table", "inline-table",
    "table-caption", "table-cell", "table-column", "table-column-group", "table-footer-group",
    "table-header-group", "table-row-group", "table-row", "flow-root", "grid", "inline-grid",
    "contents", "list-item", "hidden",
];

/// One CSS property of a theme rule: either receives the value or is fixed.
#[derive(Debug, Clone, Copy)]
enum Prop {
    Value(&'static str),
    Fixed(&'static str, &'static str),
}

fn decl(property: impl Into<String>, value: impl Into<String>) -> Declaration {
    (property.into(), value.into())
}

fn expand(props: &[Prop], value: &str) -> Vec<Declaration> {
    props
        .iter()
        .map(|prop| match prop {
            Prop::Value(name) => decl(*name, value),
            Prop::Fixed(name, fixed) => decl(*name, *fixed),
        })
        .collect()
}

fn property(prefix: &str, values: Arc<ThemeMap>, name: &'static str) -> Rule {
    Rule::theme(prefix, values, move |value| vec![decl(name, value.primary())])
}

fn properties(prefix: &str, values: Arc<ThemeMap>, props: &'static [Prop]) -> Rule {
    Rule::theme(prefix, values, move |value| expand(props, value.primary()))
}

fn statics(entries: &[(&str, &[(&str, &str)])]) -> Vec<Rule> {
    entries
        .iter()
        .map(|(name, declarations)| Rule::fixed(*name, declarations.iter().copied()))
        .collect()
}

fn enum_rule(prefix: &str, property: &str, values: &[&str]) -> Vec<Rule> {
    enum_with(prefix, property, values, str::to_string)
}

fn enum_with(prefix: &str, property: &str, values: &[&str], transform: fn(&str) -> String) -> Vec<Rule> {
    values
        .iter()
        .map(|value| Rule::fixed(format!("{prefix}{value}"), [(property, transform(value))]))
        .collect()
}

fn prefix_flex(value: &str) -> String {
    match value {
        "start" | "end" => format!("flex-{value}"),
        _ => value.to_string(),
    }
}

fn prefix_space(value: &str) -> String {
    match value {
        "between" | "around" | "evenly" => format!("space-{value}"),
        _ => value.to_string(),
    }
}

fn suffixes(direction: &str) -> &'static [&'static str] {
    match direction {
        "x" => &["-left", "-right"],
        "y" => &["-top", "-bottom"],
        "t" => &["-top"],
        "r" => &["-right"],
        "b" => &["-bottom"],
        "l" => &["-left"],
        _ => &[""],
    }
}

fn suffixed(base: &'static str) -> impl Fn(&str, &str) -> Vec<Declaration> + Send + Sync + 'static {
    move |direction, value| {
        suffixes(direction)
            .iter()
            .map(|suffix| decl(format!("{base}{suffix}"), value))
            .collect()
    }
}

fn children() -> SelectorRewrite {
    SelectorRewrite::Template("& > * + *".to_string())
}

fn placeholder() -> SelectorRewrite {
    SelectorRewrite::Suffix("::placeholder".to_string())
}

fn alpha_color(
    prefix: &str,
    values: Arc<ThemeMap>,
    variable: &'static str,
    property: &'static str,
    enabled: bool,
) -> Rule {
    Rule::theme(prefix, values, move |value| {
        with_alpha_variable(value.primary(), variable, enabled, &[property])
    })
}

fn touch_action(name: &str, variable: &str) -> Rule {
    Rule::fixed(
        format!("touch-{name}"),
        [(variable, name), ("touch-action", TOUCH_ACTION)],
    )
    .default_group(DefaultGroup::TouchAction)
}

fn filter(name: &'static str, values: Arc<ThemeMap>) -> Rule {
    Rule::theme(name, values, move |value| {
        let value = value.primary();
        let function = if value.is_empty() {
            String::new()
        } else {
            format!("{name}({value})")
        };
        vec![decl(format!("--tw-{name}"), function), decl("filter", FILTER)]
    })
    .default_group(DefaultGroup::Filter)
}

fn backdrop_filter(name: &'static str, values: Arc<ThemeMap>) -> Rule {
    Rule::theme(name, values, move |value| {
        let value = value.primary();
        let function = match name.strip_prefix("backdrop-") {
            Some(function) if !value.is_empty() => format!("{function}({value})"),
            _ => String::new(),
        };
        vec![
            decl(format!("--tw-{name}"), function),
            decl("-webkit-backdrop-filter", BACKDROP_FILTER),
            decl("backdrop-filter", BACKDROP_FILTER),
        ]
    })
    .default_group(DefaultGroup::BackdropFilter)
}

fn transparent_to(value: &str) -> String {
    with_alpha_value(value, "0", "rgb(255 255 255 / 0)")
}

fn gradient_stop(prefix: &str, theme: &Theme, declare: fn(&str) -> Vec<Declaration>) -> Rule {
    Rule::theme(prefix, theme.category("gradientColorStops"), move |value| {
        declare(value.primary())
    })
    .color_only()
    .alpha(theme.category("opacity"))
    .default_group(DefaultGroup::GradientColorStops)
}

fn font_family(value: &ThemeValue) -> String {
    match value {
        ThemeValue::Plain(value) => value.clone(),
        ThemeValue::Pair(first, second) => format!("{first}, {second}"),
        ThemeValue::List(values) => values.join(", "),
        ThemeValue::Shadow { value, .. } => value.clone(),
    }
}

fn drop_shadow(value: &ThemeValue) -> String {
    let layers: Vec<&str> = match value {
        ThemeValue::Pair(first, second) => vec![first, second],
        ThemeValue::List(values) => values.iter().map(String::as_str).collect(),
        other => vec![other.primary()],
    };
    layers
        .iter()
        .map(|layer| format!("drop-shadow({layer})"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every built-in family, in cascade order.
pub fn catalog(theme: &Theme, flags: CoreFlags<'_>) -> Vec<Family> {
    let t = |category: &str| theme.category(category);
    let text_opacity = flags.enabled("textOpacity");
    let background_opacity = flags.enabled("backgroundOpacity");
    let border_opacity = flags.enabled("borderOpacity");
    let divide_opacity = flags.enabled("divideOpacity");
    let placeholder_opacity = flags.enabled("placeholderOpacity");
    let ring_opacity = flags.enabled("ringOpacity");
    let default_timing = theme
        .value("transitionTimingFunction", "DEFAULT")
        .map(|value| value.primary().to_string());
    let default_duration = theme
        .value("transitionDuration", "DEFAULT")
        .map(|value| value.primary().to_string());

    vec![
        ("container", vec![Rule::fixed("container", Vec::<Declaration>::new()).container()]),
        (
            "accessibility",
            statics(&[
                (
                    "sr-only",
                    &[
                        ("position", "absolute"),
                        ("width", "1px"),
                        ("height", "1px"),
                        ("padding", "0"),
                        ("margin", "-1px"),
                        ("overflow", "hidden"),
                        ("clip", "rect(0, 0, 0, 0)"),
                        ("white-space", "nowrap"),
                        ("border-width", "0"),
                    ],
                ),
                (
                    "not-sr-only",
                    &[
                        ("position", "static"),
                        ("width", "auto"),
                        ("height", "auto"),
                        ("padding", "0"),
                        ("margin", "0"),
                        ("overflow", "visible"),
                        ("clip", "auto"),
                        ("white-space", "normal"),
                    ],
                ),
            ]),
        ),
        (
            "pointerEvents",
            statics(&[
                ("pointer-events-auto", &[("pointer-events", "auto")]),
                ("pointer-events-none", &[("pointer-events", "none")]),
            ]),
        ),
        (
            "visibility",
            statics(&[
                ("visible", &[("visibility", "visible")]),
                ("invisible", &[("visibility", "hidden")]),
                ("collapse", &[("visibility", "collapse")]),
            ]),
        ),
        (
            "position",
            enum_rule("", "position", &["static", "fixed", "absolute", "relative", "sticky"]),
        ),
        (
            "inset",
            vec![
                Rule::directional(
                    "inset",
                    &["x", "y", "tr", "br", "bl", "tl"],
                    t("inset"),
                    |direction, value| {
                        let sides: &[&str] = match direction {
                            "x" => &["left", "right"],
                            "y" => &["top", "bottom"],
                            "tr" => &["top", "right"],
                            "br" => &["bottom", "right"],
                            "bl" => &["bottom", "left"],
                            "tl" => &["top", "left"],
                            _ => &["inset"],
                        };
                        sides.iter().map(|side| decl(*side, value)).collect()
                    },
                )
                .negative(),
                property("top", t("inset"), "top").negative(),
                property("right", t("inset"), "right").negative(),
                property("bottom", t("inset"), "bottom").negative(),
                property("left", t("inset"), "left").negative(),
            ],
        ),
        (
            "isolation",
            statics(&[
                ("isolate", &[("isolation", "isolate")]),
                ("isolation-auto", &[("isolation", "auto")]),
            ]),
        ),
        ("zIndex", vec![property("z", t("zIndex"), "z-index").negative()]),
        ("order", vec![property("order", t("order"), "order").negative()]),
        ("gridColumn", vec![property("col", t("gridColumn"), "grid-column")]),
        (
            "gridColumnStart",
            vec![property("col-start", t("gridColumnStart"), "grid-column-start").negative()],
        ),
        (
            "gridColumnEnd",
            vec![property("col-end", t("gridColumnEnd"), "grid-column-end").negative()],
        ),
        ("gridRow", vec![property("row", t("gridRow"), "grid-row")]),
        (
            "gridRowStart",
            vec![property("row-start", t("gridRowStart"), "grid-row-start").negative()],
        ),
        (
            "gridRowEnd",
            vec![property("row-end", t("gridRowEnd"), "grid-row-end").negative()],
        ),
        (
            "float",
            statics(&[
                ("float-start", &[("float", "inline-start")]),
                ("float-end", &[("float", "inline-end")]),
                ("float-right", &[("float", "right")]),
                ("float-left", &[("float", "left")]),
                ("float-none", &[("float", "none")]),
            ]),
        ),
        (
            "clear",
            statics(&[
                ("clear-start", &[("clear", "inline-start")]),
                ("clear-end", &[("clear", "inline-end")]),
                ("clear-left", &[("clear", "left")]),
                ("clear-right", &[("clear", "right")]),
                ("clear-both", &[("clear", "both")]),
                ("clear-none", &[("clear", "none")]),
            ]),
        ),
        ("boxSizing", enum_rule("box-", "box-sizing", &["border-box", "content-box"])),
        (
            "lineClamp",
            vec![
                properties(
                    "line-clamp",
                    t("lineClamp"),
                    &[
                        Prop::Fixed("overflow", "hidden"),
                        Prop::Fixed("display", "-webkit-box"),
                        Prop::Fixed("-webkit-box-orient", "vertical"),
                        Prop::Value("-webkit-line-clamp"),
                    ],
                ),
                Rule::fixed(
                    "line-clamp-none",
                    [
                        ("overflow", "visible"),
                        ("display", "block"),
                        ("-webkit-box-orient", "horizontal"),
                        ("-webkit-line-clamp", "none"),
                    ],
                ),
            ],
        ),
        (
            "display",
            enum_with("", "display", DISPLAYS, |value| match value {
                "hidden" => "none".to_string(),
                other => other.to_string(),
            }),
        ),
        ("aspectRatio", vec![property("aspect", t("aspectRatio"), "aspect-ratio")]),
        (
            "size",
            vec![properties("size", t("size"), &[Prop::Value("width"), Prop::Value("height")])],
        ),
        ("height", vec![property("h", t("height"), "height")]),
        ("minHeight", vec![property("min-h", t("minHeight"), "min-height")]),
        ("maxHeight", vec![property("max-h", t("maxHeight"), "max-height")]),
        ("width", vec![property("w", t("width"), "width")]),
        ("minWidth", vec![property("min-w", t("minWidth"), "min-width")]),
        ("maxWidth", vec![property("max-w", t("maxWidth"), "max-width")]),
        ("flex", vec![property("flex", t("flex"), "flex")]),
        ("flexShrink", vec![property("shrink", t("flexShrink"), "flex-shrink")]),
        ("flexGrow", vec![property("grow", t("flexGrow"), "flex-grow")]),
        ("flexBasis", vec![property("basis", t("flexBasis"), "flex-basis")]),
        ("tableLayout", enum_rule("table-", "table-layout", &["auto", "fixed"])),
        ("captionSide", enum_rule("caption-", "caption-side", &["top", "bottom"])),
        (
            "borderCollapse",
            enum_rule("border-", "border-collapse", &["collapse", "separate"]),
        ),
        (
            "transformOrigin",
            vec![property("origin", t("transformOrigin"), "transform-origin")],
        ),
        (
            "translate",
            vec![
                Rule::directional("translate", &["x", "y"], t("translate"), |direction, value| {
                    vec![
                        decl(format!("--tw-translate-{direction}"), value),
                        decl("transform", TRANSFORM),
                    ]
                })
                .negative()
                .mandatory()
                .default_group(DefaultGroup::Transform),
            ],
        ),
        (
            "rotate",
            vec![
                properties(
                    "rotate",
                    t("rotate"),
                    &[Prop::Value("--tw-rotate"), Prop::Fixed("transform", TRANSFORM)],
                )
                .negative()
                .default_group(DefaultGroup::Transform),
            ],
        ),
        (
            "skew",
            vec![
                Rule::directional("skew", &["x", "y"], t("skew"), |direction, value| {
                    vec![
                        decl(format!("--tw-skew-{direction}"), value),
                        decl("transform", TRANSFORM),
                    ]
                })
                .negative()
                .mandatory()
                .default_group(DefaultGroup::Transform),
            ],
        ),
        (
            "scale",
            vec![
                Rule::directional("scale", &["x", "y"], t("scale"), |direction, value| {
                    let mut declarations = match direction {
                        "all" => vec![decl("--tw-scale-x", value), decl("--tw-scale-y", value)],
                        _ => vec![decl(format!("--tw-scale-{direction}"), value)],
                    };
                    declarations.push(decl("transform", TRANSFORM));
                    declarations
                })
                .negative()
                .default_group(DefaultGroup::Transform),
            ],
        ),
        (
            "transform",
            statics(&[
                ("transform-gpu", &[("transform", TRANSFORM_GPU)]),
                ("transform-none", &[("transform", "none")]),
            ]),
        ),
        (
            "animation",
            vec![property("animate", t("animation"), "animation").keyframes()],
        ),
        ("cursor", enum_rule("cursor-", "cursor", CURSORS)),
        (
            "touchAction",
            vec![
                Rule::fixed("touch-auto", [("touch-action", "auto")]),
                Rule::fixed("touch-none", [("touch-action", "none")]),
                touch_action("pan-x", "--tw-pan-x"),
                touch_action("pan-left", "--tw-pan-x"),
                touch_action("pan-right", "--tw-pan-x"),
                touch_action("pan-y", "--tw-pan-y"),
                touch_action("pan-up", "--tw-pan-y"),
                touch_action("pan-down", "--tw-pan-y"),
                touch_action("pinch-zoom", "--tw-pinch-zoom"),
                Rule::fixed("touch-manipulation", [("touch-action", "manipulation")]),
            ],
        ),
        ("userSelect", enum_rule("select-", "user-select", &["auto", "all", "text", "none"])),
        (
            "resize",
            statics(&[
                ("resize-x", &[("resize", "horizontal")]),
                ("resize-y", &[("resize", "vertical")]),
                ("resize", &[("resize", "both")]),
                ("resize-none", &[("resize", "none")]),
            ]),
        ),
        (
            "scrollSnapType",
            vec![
                Rule::fixed("snap-none", [("scroll-snap-type", "none")]),
                Rule::fixed("snap-x", [("scroll-snap-type", "x var(--tw-scroll-snap-strictness)")])
                    .default_group(DefaultGroup::ScrollSnapType),
                Rule::fixed("snap-y", [("scroll-snap-type", "y var(--tw-scroll-snap-strictness)")])
                    .default_group(DefaultGroup::ScrollSnapType),
                Rule::fixed(
                    "snap-both",
                    [("scroll-snap-type", "both var(--tw-scroll-snap-strictness)")],
                )
                .default_group(DefaultGroup::ScrollSnapType),
                Rule::fixed("snap-mandatory", [("--tw-scroll-snap-strictness", "mandatory")]),
                Rule::fixed("snap-proximity", [("--tw-scroll-snap-strictness", "proximity")]),
            ],
        ),
        (
            "scrollSnapAlign",
            enum_rule("snap-", "scroll-snap-align", &["start", "end", "center", "align-none"]),
        ),
        ("scrollSnapStop", enum_rule("snap-", "scroll-snap-stop", &["normal", "always"])),
        (
            "scrollMargin",
            vec![
                Rule::directional(
                    "scroll-m",
                    STANDARD_DIRECTIONS,
                    t("scrollMargin"),
                    suffixed("scroll-margin"),
                )
                .negative()
                .omit_hyphen(),
            ],
        ),
        (
            "scrollPadding",
            vec![
                Rule::directional(
                    "scroll-p",
                    STANDARD_DIRECTIONS,
                    t("scrollPadding"),
                    suffixed("scroll-padding"),
                )
                .omit_hyphen(),
            ],
        ),
        (
            "listStylePosition",
            enum_rule("list-", "list-style-position", &["inside", "outside"]),
        ),
        ("listStyleType", vec![property("list", t("listStyleType"), "list-style-type")]),
        (
            "listStyleImage",
            vec![property("list-image", t("listStyleImage"), "list-style-image")],
        ),
        (
            "appearance",
            statics(&[
                ("appearance-none", &[("appearance", "none")]),
                ("appearance-auto", &[("appearance", "auto")]),
            ]),
        ),
        ("columns", vec![property("columns", t("columns"), "columns")]),
        ("breakBefore", enum_rule("break-before-", "break-before", BREAKS)),
        (
            "breakInside",
            enum_rule(
                "break-inside-",
                "break-inside",
                &["auto", "avoid", "avoid-page", "avoid-column"],
            ),
        ),
        ("breakAfter", enum_rule("break-after-", "break-after", BREAKS)),
        (
            "gridAutoColumns",
            vec![property("auto-cols", t("gridAutoColumns"), "grid-auto-columns")],
        ),
        (
            "gridAutoFlow",
            enum_with(
                "grid-flow-",
                "grid-auto-flow",
                &["row", "column", "row-dense", "column-dense"],
                |value| value.replace('-', " "),
            ),
        ),
        (
            "gridAutoRows",
            vec![property("auto-rows", t("gridAutoRows"), "grid-auto-rows")],
        ),
        (
            "gridTemplateColumns",
            vec![property("grid-cols", t("gridTemplateColumns"), "grid-template-columns")],
        ),
        (
            "gridTemplateRows",
            vec![property("grid-rows", t("gridTemplateRows"), "grid-template-rows")],
        ),
        (
            "flexDirection",
            statics(&[
                ("flex-row", &[("flex-direction", "row")]),
                ("flex-row-reverse", &[("display", "flex"), ("flex-direction", "row-reverse")]),
                ("flex-col", &[("display", "flex"), ("flex-direction", "column")]),
                (
                    "flex-col-reverse",
                    &[("display", "flex"), ("flex-direction", "column-reverse")],
                ),
            ]),
        ),
        (
            "flexWrap",
            statics(&[
                ("flex-wrap", &[("display", "flex"), ("flex-wrap", "wrap")]),
                ("flex-wrap-reverse", &[("display", "flex"), ("flex-wrap", "wrap-reverse")]),
                ("flex-nowrap", &[("flex-wrap", "nowrap")]),
            ]),
        ),
        (
            "placeContent",
            enum_with(
                "place-content-",
                "place-content",
                &["center", "start", "end", "between", "around", "evenly", "baseline", "stretch"],
                prefix_space,
            ),
        ),
        (
            "placeItems",
            enum_rule(
                "place-items-",
                "place-items",
                &["start", "end", "center", "baseline", "stretch"],
            ),
        ),
        (
            "alignContent",
            enum_with(
                "content-",
                "align-content",
                &[
                    "normal", "start", "end", "center", "between", "around", "evenly", "baseline",
                    "stretch",
                ],
                |value| prefix_space(&prefix_flex(value)),
            ),
        ),
        (
            "alignItems",
            enum_with(
                "items-",
                "align-items",
                &["start", "end", "center", "baseline", "stretch"],
                prefix_flex,
            ),
        ),
        (
            "justifyContent",
            enum_with(
                "justify-",
                "justify-content",
                &["normal", "start", "end", "center", "between", "around", "evenly", "stretch"],
                |value| prefix_space(&prefix_flex(value)),
            ),
        ),
        (
            "justifyItems",
            enum_rule(
                "justify-items-",
                "justify-items",
                &["start", "end", "center", "stretch"],
            ),
        ),
        (
            "gap",
            vec![
                property("gap", t("gap"), "gap"),
                property("gap-x", t("gap"), "column-gap"),
                property("gap-y", t("gap"), "row-gap"),
            ],
        ),
        (
            "space",
            vec![
                Rule::directional("space", &["x", "y"], t("space"), |direction, value| {
                    let side = if direction == "x" { "margin-left" } else { "margin-top" };
                    vec![decl(side, value)]
                })
                .negative()
                .mandatory()
                .rewrite(children()),
                Rule::directional("space-reverse", &["x", "y"], t("space"), |direction, value| {
                    let side = if direction == "x" { "margin-right" } else { "margin-bottom" };
                    vec![decl(side, value)]
                })
                .negative()
                .mandatory()
                .rewrite(children()),
            ],
        ),
        (
            "margin",
            vec![
                Rule::directional("m", STANDARD_DIRECTIONS, t("margin"), suffixed("margin"))
                    .negative()
                    .omit_hyphen(),
            ],
        ),
        (
            "divideWidth",
            vec![
                property("divide-x", t("divideWidth"), "border-left-width").rewrite(children()),
                property("divide-y", t("divideWidth"), "border-top-width").rewrite(children()),
                property("divide-reverse-x", t("divideWidth"), "border-right-width")
                    .rewrite(children()),
                property("divide-reverse-y", t("divideWidth"), "border-bottom-width")
                    .rewrite(children()),
            ],
        ),
        (
            "divideStyle",
            enum_rule("divide-", "border-style", &["solid", "dashed", "dotted", "double", "none"])
                .into_iter()
                .map(|rule| rule.rewrite(children()))
                .collect(),
        ),
        (
            "divideColor",
            vec![
                alpha_color(
                    "divide",
                    t("divideColor"),
                    "--tw-divide-opacity",
                    "border-color",
                    divide_opacity,
                )
                .rewrite(children())
                .color_only()
                .alpha_if(divide_opacity, t("divideOpacity")),
            ],
        ),
        (
            "divideOpacity",
            vec![property("divide", t("divideOpacity"), "--tw-divide-opacity").rewrite(children())],
        ),
        (
            "placeSelf",
            enum_rule(
                "place-self-",
                "place-self",
                &["auto", "start", "end", "center", "stretch"],
            ),
        ),
        (
            "alignSelf",
            enum_with(
                "self-",
                "align-self",
                &["auto", "start", "end", "center", "stretch", "baseline"],
                prefix_flex,
            ),
        ),
        (
            "justifySelf",
            enum_rule(
                "justify-self-",
                "justify-self",
                &["auto", "start", "end", "center", "stretch"],
            ),
        ),
        (
            "overflow",
            [
                enum_rule("overflow-", "overflow", OVERFLOWS),
                enum_rule("overflow-x-", "overflow-x", OVERFLOWS),
                enum_rule("overflow-y-", "overflow-y", OVERFLOWS),
            ]
            .concat(),
        ),
        (
            "overscrollBehavior",
            [
                enum_rule("overscroll-", "overscroll-behavior", OVERSCROLLS),
                enum_rule("overscroll-x-", "overscroll-behavior-x", OVERSCROLLS),
                enum_rule("overscroll-y-", "overscroll-behavior-y", OVERSCROLLS),
            ]
            .concat(),
        ),
        ("scrollBehavior", enum_rule("scroll-", "scroll-behavior", &["auto", "smooth"])),
        (
            "textOverflow",
            statics(&[
                (
                    "truncate",
                    &[
                        ("overflow", "hidden"),
                        ("text-overflow", "ellipsis"),
                        ("white-space", "nowrap"),
                    ],
                ),
                ("text-ellipsis", &[("text-overflow", "ellipsis")]),
                ("text-clip", &[("text-overflow", "clip")]),
            ]),
        ),
        ("hyphens", enum_rule("hyphens-", "hyphens", &["none", "manual", "auto"])),
        (
            "whitespace",
            enum_rule(
                "whitespace-",
                "white-space",
                &["normal", "nowrap", "pre", "pre-line", "pre-wrap", "break-spaces"],
            ),
        ),
        (
            "textWrap",
            statics(&[
                ("text-wrap", &[("text-wrap", "wrap")]),
                ("text-nowrap", &[("text-wrap", "nowrap")]),
                ("text-balance", &[("text-wrap", "balance")]),
            ]),
        ),
        (
            "wordBreak",
            statics(&[
                ("break-normal", &[("overflow-wrap", "normal"), ("word-break", "normal")]),
                ("break-words", &[("overflow-wrap", "break-word")]),
                ("break-all", &[("word-break", "break-all")]),
                ("break-keep", &[("word-break", "keep-all")]),
            ]),
        ),
        (
            "borderRadius",
            vec![Rule::directional(
                "rounded",
                &["t", "r", "l", "b", "tr", "br", "bl", "tl"],
                t("borderRadius"),
                |direction, value| {
                    let corners: &[&str] = match direction {
                        "t" => &["border-top-left-radius", "border-top-right-radius"],
                        "r" => &["border-top-right-radius", "border-bottom-right-radius"],
                        "b" => &["border-bottom-right-radius", "border-bottom-left-radius"],
                        "l" => &["border-top-left-radius", "border-bottom-left-radius"],
                        "tr" => &["border-top-right-radius"],
                        "br" => &["border-bottom-right-radius"],
                        "bl" => &["border-bottom-left-radius"],
                        "tl" => &["border-top-left-radius"],
                        _ => &["border-radius"],
                    };
                    corners.iter().map(|corner| decl(*corner, value)).collect()
                },
            )],
        ),
        (
            "borderWidth",
            vec![Rule::directional(
                "border",
                STANDARD_DIRECTIONS,
                t("borderWidth"),
                |direction, value| {
                    suffixes(direction)
                        .iter()
                        .map(|suffix| decl(format!("border{suffix}-width"), value))
                        .collect()
                },
            )],
        ),
        (
            "borderStyle",
            enum_rule(
                "border-",
                "border-style",
                &["solid", "dashed", "dotted", "double", "hidden", "none"],
            ),
        ),
        (
            "borderColor",
            vec![
                Rule::directional(
                    "border",
                    STANDARD_DIRECTIONS,
                    t("borderColor"),
                    move |direction, value| {
                        let sides: Vec<String> = suffixes(direction)
                            .iter()
                            .map(|suffix| format!("border{suffix}-color"))
                            .collect();
                        let sides: Vec<&str> = sides.iter().map(String::as_str).collect();
                        with_alpha_variable(value, "--tw-border-opacity", border_opacity, &sides)
                    },
                )
                .filter_default()
                .color_only()
                .alpha_if(border_opacity, t("borderOpacity")),
            ],
        ),
        (
            "borderOpacity",
            vec![property("border-opacity", t("borderOpacity"), "--tw-border-opacity")],
        ),
        (
            "backgroundColor",
            vec![
                alpha_color(
                    "bg",
                    t("backgroundColor"),
                    "--tw-bg-opacity",
                    "background-color",
                    background_opacity,
                )
                .color_only()
                .alpha_if(background_opacity, t("backgroundOpacity")),
            ],
        ),
        (
            "backgroundOpacity",
            vec![property("bg-opacity", t("backgroundOpacity"), "--tw-bg-opacity")],
        ),
        (
            "backgroundImage",
            vec![property("bg", t("backgroundImage"), "background-image").no_arbitrary()],
        ),
        (
            "gradientColorStops",
            vec![
                gradient_stop("from", theme, |value| {
                    vec![
                        decl("--tw-gradient-from", format!("{value} var(--tw-gradient-from-position)")),
                        decl(
                            "--tw-gradient-to",
                            format!("{} var(--tw-gradient-to-position)", transparent_to(value)),
                        ),
                        decl("--tw-gradient-stops", "var(--tw-gradient-from), var(--tw-gradient-to)"),
                    ]
                }),
                property("from", t("gradientColorStopPositions"), "--tw-gradient-from-position"),
                gradient_stop("via", theme, |value| {
                    vec![
                        decl(
                            "--tw-gradient-to",
                            format!("{} var(--tw-gradient-to-position)", transparent_to(value)),
                        ),
                        decl(
                            "--tw-gradient-stops",
                            format!(
                                "var(--tw-gradient-from), {value} var(--tw-gradient-via-position), var(--tw-gradient-to)"
                            ),
                        ),
                    ]
                }),
                property("via", t("gradientColorStopPositions"), "--tw-gradient-via-position"),
                gradient_stop("to", theme, |value| {
                    vec![decl("--tw-gradient-to", format!("{value} var(--tw-gradient-to-position)"))]
                }),
                property("to", t("gradientColorStopPositions"), "--tw-gradient-to-position"),
            ],
        ),
        (
            "boxDecorationBreak",
            enum_rule("box-decoration-", "box-decoration-break", &["slice", "clone"]),
        ),
        ("backgroundSize", vec![property("bg", t("backgroundSize"), "background-size")]),
        (
            "backgroundAttachment",
            enum_rule("bg-", "background-attachment", &["fixed", "local", "scroll"]),
        ),
        (
            "backgroundClip",
            enum_rule("bg-clip-", "background-clip", &["border", "padding", "content", "text"]),
        ),
        (
            "backgroundPosition",
            vec![
                property("bg", t("backgroundPosition"), "background-position").no_arbitrary(),
            ],
        ),
        (
            "backgroundRepeat",
            [
                enum_rule(
                    "bg-",
                    "background-repeat",
                    &["repeat", "no-repeat", "repeat-x", "repeat-y"],
                ),
                enum_rule("bg-repeat-", "background-repeat", &["round", "space"]),
            ]
            .concat(),
        ),
        (
            "backgroundOrigin",
            enum_with(
                "bg-origin-",
                "background-origin",
                &["border", "padding", "content"],
                |value| format!("{value}-box"),
            ),
        ),
        ("fill", vec![property("fill", t("fill"), "fill").alpha(t("opacity"))]),
        (
            "stroke",
            vec![property("stroke", t("stroke"), "stroke").color_only().alpha(t("opacity"))],
        ),
        ("strokeWidth", vec![property("stroke", t("strokeWidth"), "stroke-width")]),
        (
            "objectFit",
            enum_rule(
                "object-",
                "object-fit",
                &["contain", "cover", "fill", "none", "scale-down"],
            ),
        ),
        (
            "objectPosition",
            vec![property("object", t("objectPosition"), "object-position")],
        ),
        (
            "padding",
            vec![
                Rule::directional("p", STANDARD_DIRECTIONS, t("padding"), suffixed("padding"))
                    .omit_hyphen(),
            ],
        ),
        (
            "textAlign",
            enum_rule("text-", "text-align", &["left", "center", "right", "justify"]),
        ),
        ("textIndent", vec![property("indent", t("textIndent"), "text-indent").negative()]),
        (
            "verticalAlign",
            vec![property("align", t("verticalAlign"), "vertical-align")],
        ),
        (
            "fontFamily",
            vec![
                Rule::theme("font", t("fontFamily"), |value| {
                    vec![decl("font-family", font_family(value))]
                })
                .no_arbitrary(),
            ],
        ),
        (
            "fontSize",
            vec![
                Rule::theme("text", t("fontSize"), |value| match value {
                    ThemeValue::Pair(size, line_height) => {
                        vec![decl("font-size", size), decl("line-height", line_height)]
                    }
                    other => vec![decl("font-size", other.primary())],
                })
                .line_height(),
            ],
        ),
        ("fontWeight", vec![property("font", t("fontWeight"), "font-weight")]),
        (
            "textTransform",
            enum_with(
                "",
                "text-transform",
                &["uppercase", "lowercase", "capitalize", "normal-case"],
                |value| match value {
                    "normal-case" => "none".to_string(),
                    other => other.to_string(),
                },
            ),
        ),
        (
            "fontStyle",
            statics(&[
                ("italic", &[("font-style", "italic")]),
                ("not-italic", &[("font-style", "normal")]),
            ]),
        ),
        ("fontVariantNumeric", {
            let mut rules = vec![Rule::fixed("normal-nums", [("font-variant-numeric", "normal")])];
            rules.extend(
                [
                    ("--tw-ordinal", "ordinal"),
                    ("--tw-slashed-zero", "slashed-zero"),
                    ("--tw-numeric-figure", "lining-nums"),
                    ("--tw-numeric-figure", "oldstyle-nums"),
                    ("--tw-numeric-spacing", "proportional-nums"),
                    ("--tw-numeric-spacing", "tabular-nums"),
                    ("--tw-numeric-fraction", "diagonal-fractions"),
                    ("--tw-numeric-fraction", "stacked-fractions"),
                ]
                .into_iter()
                .map(|(variable, value)| {
                    Rule::fixed(value, [(variable, value), ("font-variant-numeric", NUMERIC)])
                        .default_group(DefaultGroup::FontVariantNumeric)
                }),
            );
            rules
        }),
        ("lineHeight", vec![property("leading", t("lineHeight"), "line-height")]),
        (
            "letterSpacing",
            vec![property("tracking", t("letterSpacing"), "letter-spacing").negative()],
        ),
        (
            "textColor",
            vec![
                alpha_color("text", t("textColor"), "--tw-text-opacity", "color", text_opacity)
                    .color_only()
                    .alpha_if(text_opacity, t("textOpacity")),
            ],
        ),
        (
            "textOpacity",
            vec![property("text-opacity", t("textOpacity"), "--tw-text-opacity")],
        ),
        (
            "textDecoration",
            enum_with(
                "",
                "text-decoration-line",
                &["underline", "overline", "line-through", "no-underline"],
                |value| match value {
                    "no-underline" => "none".to_string(),
                    other => other.to_string(),
                },
            ),
        ),
        (
            "textDecorationColor",
            vec![
                property("decoration", t("textDecorationColor"), "text-decoration-color")
                    .color_only()
                    .alpha(t("opacity")),
            ],
        ),
        (
            "textDecorationStyle",
            enum_rule(
                "decoration-",
                "text-decoration-style",
                &["solid", "double", "dotted", "dashed", "wavy"],
            ),
        ),
        (
            "textDecorationThickness",
            vec![property(
                "decoration",
                t("textDecorationThickness"),
                "text-decoration-thickness",
            )],
        ),
        (
            "textUnderlineOffset",
            vec![property(
                "underline-offset",
                t("textUnderlineOffset"),
                "text-underline-offset",
            )],
        ),
        (
            "fontSmoothing",
            statics(&[
                (
                    "antialiased",
                    &[
                        ("-webkit-font-smoothing", "antialiased"),
                        ("-moz-osx-font-smoothing", "grayscale"),
                    ],
                ),
                (
                    "subpixel-antialiased",
                    &[("-webkit-font-smoothing", "auto"), ("-moz-osx-font-smoothing", "auto")],
                ),
            ]),
        ),
        (
            "placeholderColor",
            vec![
                alpha_color(
                    "placeholder",
                    t("placeholderColor"),
                    "--tw-placeholder-opacity",
                    "color",
                    placeholder_opacity,
                )
                .rewrite(placeholder())
                .alpha_if(placeholder_opacity, t("placeholderOpacity")),
            ],
        ),
        (
            "placeholderOpacity",
            vec![
                property(
                    "placeholder-opacity",
                    t("placeholderOpacity"),
                    "--tw-placeholder-opacity",
                )
                .rewrite(placeholder()),
            ],
        ),
        (
            "caretColor",
            vec![property("caret", t("caretColor"), "caret-color").alpha(t("opacity"))],
        ),
        (
            "accentColor",
            vec![property("accent", t("accentColor"), "accent-color").alpha(t("opacity"))],
        ),
        ("opacity", vec![property("opacity", t("opacity"), "opacity")]),
        (
            "backgroundBlendMode",
            enum_rule("bg-blend-", "background-blend-mode", BLEND_MODES),
        ),
        (
            "mixBlendMode",
            [
                enum_rule("mix-blend-", "mix-blend-mode", BLEND_MODES),
                enum_rule("mix-blend-", "mix-blend-mode", &["plus-darker", "plus-lighter"]),
            ]
            .concat(),
        ),
        (
            "boxShadow",
            vec![Rule::theme("shadow", t("boxShadow"), |value| match value {
                ThemeValue::Shadow {
                    value,
                    default_color,
                } => vec![decl("--tw-shadow-color", default_color), decl("box-shadow", value)],
                other => vec![decl("box-shadow", other.primary())],
            })],
        ),
        (
            "boxShadowColor",
            vec![
                property("shadow", t("boxShadowColor"), "--tw-shadow-color")
                    .color_only()
                    .alpha(t("opacity")),
            ],
        ),
        (
            "outlineStyle",
            [
                statics(&[
                    (
                        "outline-none",
                        &[("outline", "2px solid transparent"), ("outline-offset", "2px")],
                    ),
                    ("outline", &[("outline-style", "solid")]),
                ]),
                enum_rule("outline-", "outline-style", &["dashed", "dotted", "double"]),
            ]
            .concat(),
        ),
        ("outlineWidth", vec![property("outline", t("outlineWidth"), "outline-width")]),
        (
            "outlineOffset",
            vec![property("outline-offset", t("outlineOffset"), "outline-offset").negative()],
        ),
        (
            "outlineColor",
            vec![
                property("outline", t("outlineColor"), "outline-color")
                    .color_only()
                    .alpha(t("opacity")),
            ],
        ),
        (
            "ringWidth",
            vec![
                Rule::theme("ring", t("ringWidth"), |value| {
                    vec![
                        decl(
                            "--tw-ring-offset-shadow",
                            "var(--tw-ring-inset) 0 0 0 var(--tw-ring-offset-width) var(--tw-ring-offset-color)",
                        ),
                        decl(
                            "--tw-ring-shadow",
                            format!(
                                "var(--tw-ring-inset) 0 0 0 calc({} + var(--tw-ring-offset-width)) var(--tw-ring-color)",
                                value.primary()
                            ),
                        ),
                        decl("box-shadow", "var(--tw-ring-offset-shadow), var(--tw-ring-shadow)"),
                    ]
                })
                .default_group(DefaultGroup::RingWidth),
                Rule::fixed("ring-inset", [("--tw-ring-inset", "inset")]),
            ],
        ),
        (
            "ringColor",
            vec![
                alpha_color(
                    "ring",
                    t("ringColor"),
                    "--tw-ring-opacity",
                    "--tw-ring-color",
                    ring_opacity,
                )
                .filter_default()
                .color_only()
                .alpha_if(ring_opacity, t("ringOpacity")),
            ],
        ),
        (
            "ringOpacity",
            vec![
                property("ring-opacity", t("ringOpacity"), "--tw-ring-opacity").filter_default(),
            ],
        ),
        (
            "ringOffsetWidth",
            vec![property("ring-offset", t("ringOffsetWidth"), "--tw-ring-offset-width")],
        ),
        (
            "ringOffsetColor",
            vec![
                property("ring-offset", t("ringOffsetColor"), "--tw-ring-offset-color")
                    .color_only()
                    .alpha(t("opacity")),
            ],
        ),
        ("blur", vec![filter("blur", t("blur"))]),
        ("brightness", vec![filter("brightness", t("brightness"))]),
        ("contrast", vec![filter("contrast", t("contrast"))]),
        (
            "dropShadow",
            vec![
                Rule::theme("drop-shadow", t("dropShadow"), |value| {
                    vec![decl("--tw-drop-shadow", drop_shadow(value)), decl("filter", FILTER)]
                })
                .default_group(DefaultGroup::Filter),
            ],
        ),
        ("grayscale", vec![filter("grayscale", t("grayscale"))]),
        ("hueRotate", vec![filter("hue-rotate", t("hueRotate"))]),
        ("invert", vec![filter("invert", t("invert"))]),
        ("saturate", vec![filter("saturate", t("saturate"))]),
        ("sepia", vec![filter("sepia", t("sepia"))]),
        ("filter", vec![Rule::fixed("filter-none", [("filter", "none")])]),
        ("backdropBlur", vec![backdrop_filter("backdrop-blur", t("backdropBlur"))]),
        (
            "backdropBrightness",
            vec![backdrop_filter("backdrop-brightness", t("backdropBrightness"))],
        ),
        (
            "backdropContrast",
            vec![backdrop_filter("backdrop-contrast", t("backdropContrast"))],
        ),
        (
            "backdropGrayscale",
            vec![backdrop_filter("backdrop-grayscale", t("backdropGrayscale"))],
        ),
        (
            "backdropHueRotate",
            vec![backdrop_filter("backdrop-hue-rotate", t("backdropHueRotate"))],
        ),
        ("backdropInvert", vec![backdrop_filter("backdrop-invert", t("backdropInvert"))]),
        (
            "backdropOpacity",
            vec![backdrop_filter("backdrop-opacity", t("backdropOpacity"))],
        ),
        (
            "backdropSaturate",
            vec![backdrop_filter("backdrop-saturate", t("backdropSaturate"))],
        ),
        ("backdropSepia", vec![backdrop_filter("backdrop-sepia", t("backdropSepia"))]),
        (
            "backdropFilter",
            vec![Rule::fixed(
                "backdrop-filter-none",
                [("-webkit-backdrop-filter", "none"), ("backdrop-filter", "none")],
            )],
        ),
        (
            "transitionProperty",
            vec![Rule::theme("transition", t("transitionProperty"), move |value| {
                let value = value.primary();
                let mut declarations = vec![decl("transition-property", value)];
                if value == "none" {
                    return declarations;
                }
                if let Some(timing) = &default_timing {
                    declarations.push(decl("transition-timing-function", timing));
                }
                if let Some(duration) = &default_duration {
                    declarations.push(decl("transition-duration", duration));
                }
                declarations
            })],
        ),
        (
            "transitionDelay",
            vec![property("delay", t("transitionDelay"), "transition-delay")],
        ),
        (
            "transitionDuration",
            vec![
                property("duration", t("transitionDuration"), "transition-duration")
                    .filter_default(),
            ],
        ),
        (
            "transitionTimingFunction",
            vec![
                property(
                    "ease",
                    t("transitionTimingFunction"),
                    "transition-timing-function",
                )
                .filter_default(),
            ],
        ),
        ("willChange", vec![property("will-change", t("willChange"), "will-change")]),
        ("content", vec![property("content", t("content"), "content")]),
        (
            "forcedColorAdjust",
            statics(&[
                ("forced-color-adjust-auto", &[("forced-color-adjust", "auto")]),
                ("forced-color-adjust-none", &[("forced-color-adjust", "none")]),
            ]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::{catalog, drop_shadow, transparent_to};
    use crate::rules::{ArbitraryPolicy, CoreFlags, Rule};
    use crate::theme::{Theme, ThemeConfig, ThemeValue};
    use std::collections::{BTreeMap, HashSet};

    fn theme() -> Theme {
        Theme::resolve(&ThemeConfig::default()).expect("theme")
    }

    fn find<'a>(families: &'a [(&'static str, Vec<Rule>)], family: &str) -> &'a [Rule] {
        families
            .iter()
            .find(|(name, _)| *name == family)
            .map(|(_, rules)| rules.as_slice())
            .expect("family exists")
    }

    #[test]
    fn family_names_are_unique() {
        let flags = BTreeMap::new();
        let families = catalog(&theme(), CoreFlags::new(&flags));
        let names: HashSet<_> = families.iter().map(|(name, _)| *name).collect();
        assert_eq!(names.len(), families.len());
        assert!(families.len() > 160);
    }

    #[test]
    fn opacity_families_toggle_alpha_variables() {
        let theme = theme();
        let white = ThemeValue::from("#fff");

        let flags = BTreeMap::new();
        let families = catalog(&theme, CoreFlags::new(&flags));
        let text = &find(&families, "textColor")[0];
        assert_eq!(text.declarations("", Some(&white)).len(), 2);
        assert!(text.meta().modifier.is_some());
        assert_eq!(text.meta().arbitrary, ArbitraryPolicy::ColorOnly);

        let mut flags = BTreeMap::new();
        flags.insert("textOpacity".to_string(), false);
        let families = catalog(&theme, CoreFlags::new(&flags));
        let text = &find(&families, "textColor")[0];
        assert_eq!(
            text.declarations("", Some(&white)),
            vec![("color".to_string(), "#fff".to_string())]
        );
        assert!(text.meta().modifier.is_none());
    }

    #[test]
    fn directional_declarations() {
        let flags = BTreeMap::new();
        let families = catalog(&theme(), CoreFlags::new(&flags));
        let margin = &find(&families, "margin")[0];
        let value = ThemeValue::from("1rem");
        assert_eq!(
            margin.declarations("x", Some(&value)),
            vec![
                ("margin-left".to_string(), "1rem".to_string()),
                ("margin-right".to_string(), "1rem".to_string()),
            ]
        );
        assert_eq!(
            margin.declarations("all", Some(&value)),
            vec![("margin".to_string(), "1rem".to_string())]
        );
        let scale = &find(&families, "scale")[0];
        assert_eq!(scale.declarations("all", Some(&ThemeValue::from(".5"))).len(), 3);
    }

    #[test]
    fn value_helpers() {
        assert_eq!(transparent_to("#000"), "rgb(0 0 0 / 0)");
        assert_eq!(transparent_to("var(--x)"), "rgb(255 255 255 / 0)");
        assert_eq!(
            drop_shadow(&ThemeValue::Pair("a".to_string(), "b".to_string())),
            "drop-shadow(a) drop-shadow(b)"
        );
    }
}
