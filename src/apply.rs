use crate::Declaration;
use crate::defaults::DefaultGroup;
use crate::error::{Error, Result};
use crate::generator::{apply_variants, declaration_lines};
use crate::parser::{Match, MatchKind, TokenParser};
use crate::rules::Rule;
use crate::theme::Theme;
use crate::variants::{Variant, VariantTable};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, OnceLock};

/// Where a composition comes from. Changes what may be nested and how errors read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `@apply` in hand-written CSS.
    Css,
    /// A shortcut definition.
    Shortcut,
    /// Inline styles, where only plain declarations can be expressed.
    Inline,
}

/// The output of one composed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Flat(Vec<Declaration>),
    /// A nested block such as `&:hover { color: red; }`.
    Nested(String),
}

impl Piece {
    pub fn line(&self) -> String {
        match self {
            Piece::Flat(declarations) => declaration_lines(declarations).join(" "),
            Piece::Nested(block) => block.clone(),
        }
    }
}

/// A composed token list, one piece per token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    pub pieces: Vec<Piece>,
    pub defaults: BTreeSet<DefaultGroup>,
    lines: Vec<String>,
}

impl Expansion {
    fn new(pieces: Vec<Piece>, defaults: BTreeSet<DefaultGroup>) -> Self {
        let lines = pieces.iter().map(Piece::line).collect();
        Self {
            pieces,
            defaults,
            lines,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// All declarations, or `None` when a piece is nested.
    pub fn declarations(&self) -> Option<Vec<Declaration>> {
        let mut declarations = Vec::new();
        for piece in &self.pieces {
            match piece {
                Piece::Flat(flat) => declarations.extend(flat.iter().cloned()),
                Piece::Nested(_) => return None,
            }
        }
        Some(declarations)
    }
}

/// Shortcut expansions, resolved once when the engine is built.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    expansions: HashMap<String, Expansion>,
}

impl ShortcutTable {
    pub fn build(rules: &[Arc<Rule>], parser: &TokenParser) -> Result<Self> {
        let definitions: IndexMap<&str, &str> = rules
            .iter()
            .filter_map(|rule| match rule.as_ref() {
                Rule::Shortcut { name, utilities } => Some((name.as_str(), utilities.as_str())),
                _ => None,
            })
            .collect();
        let mut table = Self::default();
        for name in definitions.keys() {
            table.expand(name, &definitions, parser, &mut Vec::new())?;
        }
        Ok(table)
    }

    fn expand(
        &mut self,
        name: &str,
        definitions: &IndexMap<&str, &str>,
        parser: &TokenParser,
        stack: &mut Vec<String>,
    ) -> Result<()> {
        if self.expansions.contains_key(name) {
            return Ok(());
        }
        let Some(utilities) = definitions.get(name) else {
            return Ok(());
        };
        let context = format!("\"{name}\": \"{utilities}\"");
        if stack.iter().any(|entry| entry == name) {
            return Err(Error::config(
                format!("Shortcut cycle: {} -> {name}", stack.join(" -> ")),
                context,
            ));
        }

        stack.push(name.to_string());
        for token in utilities.split_whitespace() {
            if let Some(nested) = parser.parse(token).as_ref().and_then(Match::shortcut) {
                self.expand(nested, definitions, parser, stack)?;
            }
        }
        stack.pop();

        let expansion = compose(
            utilities,
            &context,
            Source::Shortcut,
            |token| parser.parse(token).map(Arc::new),
            self,
        )
        .map_err(|err| Error::config(err.message(), err.context()))?;
        self.expansions.insert(name.to_string(), expansion);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Expansion> {
        self.expansions.get(name)
    }

    /// CSS lines of a shortcut, one per token.
    pub fn lines(&self, name: &str) -> &[String] {
        self.get(name).map(Expansion::lines).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }
}

/// Composes a space-separated token list into pieces. Tokens that need an
/// at-rule, keyframes, a container or a selector not anchored on `&` fail.
pub fn compose(
    tokens: &str,
    context: &str,
    source: Source,
    mut parse: impl FnMut(&str) -> Option<Arc<Match>>,
    shortcuts: &ShortcutTable,
) -> Result<Expansion> {
    let mut pieces = Vec::new();
    let mut defaults = BTreeSet::new();
    for token in tokens.split_whitespace() {
        let no_rule = || Error::composition(format!("No rule matching \"{token}\""), context);
        let found = parse(token).ok_or_else(no_rule)?;
        let meta = match &found.kind {
            MatchKind::Rule(resolved) => Some(resolved.rule.meta()),
            MatchKind::Property { .. } => None,
        };

        let (has_at_rule, selector) = apply_variants(
            "&",
            &found.variants,
            meta.and_then(|meta| meta.selector_rewrite.as_ref()),
        );
        let complex = has_at_rule
            || !selector.starts_with('&')
            || meta.is_some_and(|meta| meta.add_keyframes || meta.add_container)
            || (source == Source::Inline && selector != "&");
        let complex_error = || {
            let hint = if has_at_rule && source == Source::Css {
                " You can use @media screen(...) for media variants."
            } else {
                ""
            };
            Error::composition(
                format!("Complex utils like \"{token}\" are not supported.{hint}"),
                context,
            )
        };
        if complex {
            return Err(complex_error());
        }
        if let Some(group) = meta.and_then(|meta| meta.add_default) {
            defaults.insert(group);
        }

        let piece = match found.shortcut() {
            Some(name) => {
                let expansion = shortcuts.get(name).ok_or_else(no_rule)?;
                defaults.extend(expansion.defaults.iter().copied());
                match expansion.declarations() {
                    Some(declarations) if selector == "&" => Piece::Flat(declarations),
                    _ if source == Source::Inline => return Err(complex_error()),
                    _ if selector == "&" => Piece::Nested(expansion.lines().join(" ")),
                    _ => Piece::Nested(format!("{selector} {{ {} }}", expansion.lines().join(" "))),
                }
            }
            None if selector == "&" => Piece::Flat(found.declarations()),
            None => Piece::Nested(format!(
                "{selector} {{ {} }}",
                declaration_lines(&found.declarations()).join(" ")
            )),
        };
        pieces.push(piece);
    }
    Ok(Expansion::new(pieces, defaults))
}

/// Result of rewriting hand-written CSS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreTransformed {
    pub css: String,
    /// Set when an `@apply` used a default group for the first time, so
    /// previously generated utilities are stale.
    pub invalidate_utils: bool,
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("pattern is valid")
}

fn apply_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"[{\s]@apply ([^;}\n]+)([;}\n])"))
}

fn screen_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r"screen\(([a-z0-9-]+)\)"))
}

fn theme_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| compile(r#"theme\("([^)]+)"\)"#))
}

/// `Regex::replace_all` with a fallible replacer.
fn try_replace_all(
    re: &Regex,
    text: &str,
    mut replace: impl FnMut(&Captures<'_>) -> Result<String>,
) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&text[last..whole.start()]);
        output.push_str(&replace(&caps)?);
        last = whole.end();
    }
    output.push_str(&text[last..]);
    Ok(output)
}

/// Replaces every `@apply` directive with the lines `apply` returns for its
/// tokens. The terminating `;` is consumed, `}` and newlines are kept.
pub fn replace_apply(
    css: &str,
    mut apply: impl FnMut(&str, &str) -> Result<Vec<String>>,
) -> Result<String> {
    if !css.contains("@apply ") {
        return Ok(css.to_string());
    }
    try_replace_all(apply_re(), css, |caps| {
        let substring = &caps[0];
        let lines = apply(&caps[1], substring)?;
        let start = &substring[..1];
        let end = match &caps[2] {
            ";" => "",
            end => end,
        };
        Ok(format!("{start}{}{end}", lines.join("\n  ")))
    })
}

/// `screen(md)` becomes the media condition of the `md` variant.
pub fn replace_screens(css: &str, variants: &VariantTable) -> Result<String> {
    if !css.contains("screen(") {
        return Ok(css.to_string());
    }
    try_replace_all(screen_re(), css, |caps| {
        let substring = &caps[0];
        let name = &caps[1];
        let variant = variants.get(name).ok_or_else(|| {
            Error::composition(format!("No variant matching \"{name}\""), substring)
        })?;
        match variant {
            Variant::AtRule { condition, .. } if condition.starts_with("@media ") => {
                Ok(condition["@media ".len()..].to_string())
            }
            _ => Err(Error::composition(
                format!("\"{name}\" is not a media variant"),
                substring,
            )),
        }
    })
}

/// `theme("colors.red-500")` or `theme("colors.red-500 / 50%")` becomes the theme value.
pub fn replace_theme(css: &str, theme: &Theme) -> Result<String> {
    if !css.contains("theme(\"") {
        return Ok(css.to_string());
    }
    try_replace_all(theme_re(), css, |caps| {
        let path = &caps[1];
        theme.lookup_with_alpha(path).ok_or_else(|| {
            Error::composition(
                format!("Could not resolve \"{path}\" in current theme"),
                format!("theme({path})"),
            )
        })
    })
}

#[cfg(test)]
mod tests {
    use super::{
        Piece, ShortcutTable, Source, compose, replace_apply, replace_screens, replace_theme,
    };
    use crate::defaults::DefaultGroup;
    use crate::entries::EntryIndex;
    use crate::error::Error;
    use crate::parser::TokenParser;
    use crate::rules::get_rules;
    use crate::theme::{Theme, ThemeConfig};
    use crate::variants::VariantTable;
    use indexmap::IndexMap;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn setup(shortcuts: &[(&str, &str)]) -> crate::error::Result<(Theme, TokenParser, ShortcutTable)> {
        let theme = Theme::resolve(&ThemeConfig::default())?;
        let shortcuts: IndexMap<String, String> = shortcuts
            .iter()
            .map(|(name, utilities)| (name.to_string(), utilities.to_string()))
            .collect();
        let rules = get_rules(&theme, &BTreeMap::new(), Vec::new(), &shortcuts)?;
        let parser = TokenParser::new(
            VariantTable::new(&theme),
            EntryIndex::build(&rules)?,
            theme.category("lineHeight"),
        );
        let table = ShortcutTable::build(&rules, &parser)?;
        Ok((theme, parser, table))
    }

    fn run(
        tokens: &str,
        source: Source,
        parser: &TokenParser,
        table: &ShortcutTable,
    ) -> crate::error::Result<super::Expansion> {
        compose(tokens, tokens, source, |token| parser.parse(token).map(Arc::new), table)
    }

    #[test]
    fn flat_and_nested_pieces() {
        let (_, parser, table) = setup(&[]).expect("setup");
        let expansion = run("p-4 hover:underline", Source::Css, &parser, &table).expect("compose");
        assert_eq!(
            expansion.lines(),
            [
                "padding: 1rem;",
                "&:hover { text-decoration-line: underline; }",
            ]
        );
        assert!(matches!(expansion.pieces[0], Piece::Flat(_)));
        assert!(expansion.declarations().is_none());
    }

    #[test]
    fn media_variants_are_rejected_with_a_hint() {
        let (_, parser, table) = setup(&[]).expect("setup");
        let err = run("md:p-4", Source::Css, &parser, &table).expect_err("media variant");
        assert_eq!(
            err.message(),
            "Complex utils like \"md:p-4\" are not supported. You can use @media screen(...) for media variants."
        );
        let err = run("md:p-4", Source::Inline, &parser, &table).expect_err("media variant");
        assert_eq!(err.message(), "Complex utils like \"md:p-4\" are not supported.");
        assert!(run("group-hover:p-4", Source::Css, &parser, &table).is_err());
        assert!(run("animate-spin", Source::Css, &parser, &table).is_err());
        assert!(run("container", Source::Css, &parser, &table).is_err());
    }

    #[test]
    fn unknown_tokens_report_context() {
        let (_, parser, table) = setup(&[]).expect("setup");
        let err = compose("p-4 nope", " @apply p-4 nope;", Source::Css, |t| {
            parser.parse(t).map(Arc::new)
        }, &table)
        .expect_err("unknown");
        assert_eq!(
            err,
            Error::composition("No rule matching \"nope\"", " @apply p-4 nope;")
        );
    }

    #[test]
    fn inline_rejects_selector_variants() {
        let (_, parser, table) = setup(&[]).expect("setup");
        assert!(run("hover:p-4", Source::Inline, &parser, &table).is_err());
        let expansion = run("p-4 [mask-type:alpha] !m-2", Source::Inline, &parser, &table)
            .expect("inline");
        assert_eq!(
            expansion.declarations().expect("flat"),
            vec![
                ("padding".to_string(), "1rem".to_string()),
                ("mask-type".to_string(), "alpha".to_string()),
                ("margin".to_string(), "0.5rem !important".to_string()),
            ]
        );
    }

    #[test]
    fn arbitrary_properties_keep_their_variants() {
        let (_, parser, table) = setup(&[]).expect("setup");
        let expansion = run("[color:red] hover:[color:blue]", Source::Css, &parser, &table)
            .expect("compose");
        assert_eq!(expansion.lines(), ["color: red;", "&:hover { color: blue; }"]);
        assert!(run("md:[color:red]", Source::Css, &parser, &table).is_err());
        assert!(run("md:[color:red]", Source::Inline, &parser, &table).is_err());
        assert!(run("hover:[color:red]", Source::Inline, &parser, &table).is_err());
        assert!(run("[.x_&]:[color:red]", Source::Css, &parser, &table).is_err());
    }

    #[test]
    fn defaults_are_collected() {
        let (_, parser, table) = setup(&[("card", "rotate-3 p-4")]).expect("setup");
        let expansion = run("ring-2 card", Source::Css, &parser, &table).expect("compose");
        assert!(expansion.defaults.contains(&DefaultGroup::RingWidth));
        assert!(expansion.defaults.contains(&DefaultGroup::Transform));
    }

    #[test]
    fn nested_shortcuts_expand_in_any_order() {
        let (_, _, table) =
            setup(&[("btn-red", "btn bg-red-500"), ("btn", "px-4 hover:underline")])
                .expect("setup");
        assert_eq!(
            table.lines("btn"),
            ["padding-left: 1rem; padding-right: 1rem;", "&:hover { text-decoration-line: underline; }"]
        );
        assert_eq!(
            table.lines("btn-red")[0],
            "padding-left: 1rem; padding-right: 1rem; &:hover { text-decoration-line: underline; }"
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn shortcut_cycles_are_config_errors() {
        let err = setup(&[("a", "b p-4"), ("b", "a")]).expect_err("cycle");
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.message().contains("a -> b -> a"), "{}", err.message());
    }

    #[test]
    fn shortcut_with_unknown_token() {
        let err = setup(&[("btn", "p-4 nope")]).expect_err("unknown");
        assert_eq!(
            err,
            Error::config("No rule matching \"nope\"", "\"btn\": \"p-4 nope\"")
        );
    }

    #[test]
    fn apply_directives_are_replaced() {
        let css = ".a {\n  @apply p-4 m-2;\n}\n.b { @apply p-4 }";
        let output = replace_apply(css, |tokens, _| {
            Ok(tokens.split_whitespace().map(|t| format!("{t};")).collect())
        })
        .expect("apply");
        assert_eq!(output, ".a {\n  p-4;\n  m-2;\n}\n.b { p-4;}");
    }

    #[test]
    fn screens_are_replaced() {
        let (theme, _, _) = setup(&[]).expect("setup");
        let variants = VariantTable::new(&theme);
        assert_eq!(
            replace_screens("@media screen(md) {}", &variants).expect("screen"),
            "@media (min-width: 768px) {}"
        );
        let err = replace_screens("@media screen(hover) {}", &variants).expect_err("not media");
        assert_eq!(err, Error::composition("\"hover\" is not a media variant", "screen(hover)"));
        let err = replace_screens("@media screen(tv) {}", &variants).expect_err("unknown");
        assert_eq!(err.message(), "No variant matching \"tv\"");
    }

    #[test]
    fn theme_paths_are_replaced() {
        let (theme, _, _) = setup(&[]).expect("setup");
        assert_eq!(
            replace_theme("a { margin: theme(\"spacing.4\"); }", &theme).expect("theme"),
            "a { margin: 1rem; }"
        );
        let err = replace_theme("theme(\"colors.nope\")", &theme).expect_err("missing");
        assert_eq!(
            err,
            Error::composition(
                "Could not resolve \"colors.nope\" in current theme",
                "theme(colors.nope)"
            )
        );
    }
}
