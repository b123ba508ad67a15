use crate::Declaration;
use crate::apply::ShortcutTable;
use crate::defaults::{DefaultGroup, Defaults};
use crate::entries::{EntryIndex, RuleEntry};
use crate::parser::Match;
use crate::rules::Rule;
use crate::theme::{Container, Theme};
use crate::variants::{SelectorRewrite, Variant, VariantTable};
use std::collections::BTreeSet;
use std::sync::Arc;

/// How `codegen` prints every indexed utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodegenMode {
    /// Full blocks for every entry.
    WithContent,
    /// `.{class}{}` lines, for editor class lists.
    OmitContent,
    /// `.downdraft.{class}{}` without separators, for browser devtools.
    Devtools,
}

#[derive(Debug, Clone)]
struct AtRuleGroup {
    /// Set on the groups seeded for configured screens.
    screen: Option<String>,
    order: usize,
    condition: String,
    content: MatchTree,
}

/// Accepted matches, nested by at-rule condition. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct MatchTree {
    matches: Vec<Arc<Match>>,
    at_rules: Vec<AtRuleGroup>,
}

impl MatchTree {
    /// A root with one empty group per screen, so container overrides print for every screen.
    pub fn with_screens(theme: &Theme, variants: &VariantTable) -> Self {
        let at_rules = theme
            .screens()
            .keys()
            .filter_map(|name| {
                let (order, condition) = variants.get(name)?.at_rule()?;
                Some(AtRuleGroup {
                    screen: Some(name.clone()),
                    order,
                    condition,
                    content: MatchTree::default(),
                })
            })
            .collect();
        Self {
            matches: Vec::new(),
            at_rules,
        }
    }

    pub fn insert(&mut self, found: Arc<Match>) {
        let mut group = self;
        for (order, condition) in found.variants.iter().filter_map(Variant::at_rule) {
            let idx = match group
                .at_rules
                .iter()
                .position(|at_rule| at_rule.condition == condition)
            {
                Some(idx) => {
                    let existing = &mut group.at_rules[idx].order;
                    *existing = (*existing).min(order);
                    idx
                }
                None => {
                    group.at_rules.push(AtRuleGroup {
                        screen: None,
                        order,
                        condition,
                        content: MatchTree::default(),
                    });
                    group.at_rules.len() - 1
                }
            };
            group = &mut group.at_rules[idx].content;
        }
        group.matches.push(found);
    }

    /// True when neither this node nor any nested group holds a match.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.at_rules.iter().all(|at_rule| at_rule.content.is_empty())
    }
}

pub fn escape_selector(class: &str) -> String {
    let mut escaped = String::with_capacity(class.len() * 2);
    if class.starts_with(|ch: char| ch.is_ascii_digit()) {
        escaped.push('\\');
    }
    for ch in class.chars() {
        if matches!(
            ch,
            '.' | ':' | '/' | '[' | ']' | '!' | '#' | '=' | '\'' | '"' | ',' | '%' | '&' | '>'
                | '+' | '~' | '*' | '@' | '(' | ')'
        ) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub fn declaration_lines(declarations: &[Declaration]) -> Vec<String> {
    declarations
        .iter()
        .map(|(property, value)| format!("{property}: {value};"))
        .collect()
}

pub fn print_block(selector: &str, lines: &[String], indent: &str) -> String {
    let mut output = format!("{indent}{selector} {{\n");
    for line in lines {
        output.push_str(&format!("{indent}  {line}\n"));
    }
    output.push_str(&format!("{indent}}}\n"));
    output
}

/// Applies selector variants inner to outer, then the rule's own rewrite.
/// Returns whether any variant was an at-rule, and the selector.
pub fn apply_variants(
    selector: &str,
    variants: &[Variant],
    rewrite: Option<&SelectorRewrite>,
) -> (bool, String) {
    let mut has_at_rule = false;
    let mut selector = selector.to_string();
    for variant in variants.iter().rev() {
        match variant.rewrite() {
            Some(rewrite) => selector = rewrite.apply(&selector),
            None => has_at_rule = true,
        }
    }
    if let Some(rewrite) = rewrite {
        selector = rewrite.apply(&selector);
    }
    (has_at_rule, selector)
}

pub fn print_container_class(container: &Container) -> String {
    let mut declarations = vec![("width".to_string(), "100%".to_string())];
    if container.center {
        declarations.push(("margin-left".to_string(), "auto".to_string()));
        declarations.push(("margin-right".to_string(), "auto".to_string()));
    }
    if let Some(padding) = container.default_padding() {
        declarations.push(("padding-left".to_string(), padding.to_string()));
        declarations.push(("padding-right".to_string(), padding.to_string()));
    }
    print_block(".container", &declaration_lines(&declarations), "")
}

fn print_screen_container(container: &Container, screen: &str, min: &str) -> String {
    let padding = container
        .screen_padding(screen)
        .map(|padding| format!("padding-left: {padding}; padding-right: {padding}; "))
        .unwrap_or_default();
    format!("  .container {{ max-width: {min}; {padding}}}")
}

/// Vendor-prefixed pseudo selectors are printed alone: a browser that does not know
/// one drops the whole rule.
fn is_unsafe_selector(selector: &str) -> bool {
    selector.contains(":-") || selector.contains("::-")
}

/// The full selector of a scanned match.
fn match_selector(found: &Match) -> String {
    let rewrite = found
        .rule()
        .and_then(|rule| rule.meta().selector_rewrite.as_ref());
    let (_, selector) = apply_variants(
        &format!(".{}", escape_selector(&found.token)),
        &found.variants,
        rewrite,
    );
    selector
}

/// Everything CSS printing reads, borrowed from the engine.
pub struct Generator<'a> {
    pub theme: &'a Theme,
    pub defaults: &'a Defaults,
    pub shortcuts: &'a ShortcutTable,
}

impl Generator<'_> {
    /// Declaration lines of one match. Shortcuts print their expansion.
    pub fn lines(&self, found: &Match) -> Vec<String> {
        match found.shortcut() {
            Some(name) => self.shortcuts.lines(name).to_vec(),
            None => declaration_lines(&found.declarations()),
        }
    }

    fn entry_lines(&self, entry: &RuleEntry) -> Vec<String> {
        match entry.rule.as_ref() {
            Rule::Shortcut { name, .. } => self.shortcuts.lines(name).to_vec(),
            rule => declaration_lines(&rule.declarations(&entry.direction, entry.value().as_ref())),
        }
    }

    pub fn generate(
        &self,
        tree: &MatchTree,
        defaults: &BTreeSet<DefaultGroup>,
        keyframes: &BTreeSet<String>,
    ) -> String {
        let mut printer = Printer {
            generator: self,
            output: String::new(),
            use_container: false,
        };
        printer.print_tree(tree, "");

        let mut header = String::new();
        if !defaults.is_empty() {
            let declarations: Vec<Declaration> = defaults
                .iter()
                .flat_map(|group| self.defaults.get(*group).iter().cloned())
                .collect();
            header.push_str(&print_block(
                "*, ::before, ::after, ::backdrop",
                &declaration_lines(&declarations),
                "",
            ));
            header.push('\n');
        }
        for name in keyframes {
            if let Some(body) = self.theme.value("keyframes", name) {
                header.push_str(&format!("@keyframes {name} {{\n  {}\n}}\n", body.primary()));
            }
        }
        if !keyframes.is_empty() {
            header.push('\n');
        }

        header + &printer.output
    }

    pub fn codegen(&self, entries: &EntryIndex, mode: CodegenMode) -> String {
        match mode {
            CodegenMode::OmitContent => entries
                .iter()
                .map(|(name, _)| format!(".{}{{}}", escape_selector(name)))
                .collect::<Vec<_>>()
                .join("\n"),
            CodegenMode::Devtools => entries
                .iter()
                .map(|(name, _)| format!(".downdraft.{}{{}}", escape_selector(name)))
                .collect(),
            CodegenMode::WithContent => entries
                .iter()
                .map(|(name, entry)| {
                    let meta = entry.rule.meta();
                    if meta.add_container {
                        return print_container_class(self.theme.container());
                    }
                    let (_, selector) = apply_variants(
                        &format!(".{}", escape_selector(name)),
                        &[],
                        meta.selector_rewrite.as_ref(),
                    );
                    print_block(&selector, &self.entry_lines(entry), "")
                })
                .collect(),
        }
    }
}

struct Printer<'a, 'g> {
    generator: &'a Generator<'g>,
    output: String,
    use_container: bool,
}

impl Printer<'_, '_> {
    fn print_tree(&mut self, tree: &MatchTree, indent: &str) {
        let mut matches: Vec<&Arc<Match>> = tree.matches.iter().collect();
        matches.sort_by(|a, b| a.order().cmp(&b.order()).then_with(|| a.token.cmp(&b.token)));
        let lines: Vec<Vec<String>> = matches
            .iter()
            .map(|found| self.generator.lines(found))
            .collect();
        let selectors: Vec<String> = matches.iter().map(|found| match_selector(found)).collect();

        for (idx, found) in matches.iter().enumerate() {
            if found.rule().is_some_and(|rule| rule.meta().add_container) {
                if indent.is_empty() {
                    self.use_container = true;
                    self.output
                        .push_str(&print_container_class(self.generator.theme.container()));
                }
                continue;
            }
            let selector = &selectors[idx];
            let current = &lines[idx];
            let merge = lines.get(idx + 1) == Some(current)
                && !is_unsafe_selector(selector)
                && !is_unsafe_selector(&selectors[idx + 1]);
            if merge {
                self.output.push_str(&format!("{indent}{selector},\n"));
            } else {
                self.output.push_str(&print_block(selector, current, indent));
            }
        }

        let mut at_rules: Vec<&AtRuleGroup> = tree.at_rules.iter().collect();
        at_rules.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then_with(|| a.condition.cmp(&b.condition))
        });
        for at_rule in at_rules {
            self.print_at_rule(at_rule, indent);
        }
    }

    fn print_at_rule(&mut self, at_rule: &AtRuleGroup, indent: &str) {
        let theme = self.generator.theme;
        let screen = at_rule
            .screen
            .as_deref()
            .filter(|_| self.use_container)
            .and_then(|name| Some((name, theme.screens().get(name)?)));

        let mut container_min = None;
        if let Some((name, bounds)) = screen {
            match (&bounds.min, &bounds.max) {
                (Some(min), Some(_)) => {
                    let declaration = print_screen_container(theme.container(), name, min);
                    self.output
                        .push_str(&format!("@media (min-width: {min}) {{\n{declaration}\n}}\n"));
                }
                (Some(min), None) => container_min = Some((name, min)),
                _ => {}
            }
        }
        if container_min.is_none() && at_rule.content.is_empty() {
            return;
        }

        self.output
            .push_str(&format!("{indent}{} {{\n", at_rule.condition));
        if let Some((name, min)) = container_min {
            let declaration = print_screen_container(theme.container(), name, min);
            self.output.push_str(&format!("{declaration}\n"));
        }
        self.print_tree(&at_rule.content, &format!("{indent}  "));
        self.output.push_str(&format!("{indent}}}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchTree, apply_variants, escape_selector, print_block, print_container_class};
    use crate::theme::{Container, ContainerPadding, Theme, ThemeConfig};
    use crate::variants::{SelectorRewrite, Variant, VariantTable};

    #[test]
    fn escapes_selector_characters() {
        assert_eq!(escape_selector("md:p-4"), "md\\:p-4");
        assert_eq!(escape_selector("w-1/2"), "w-1\\/2");
        assert_eq!(escape_selector("bg-[#fff]"), "bg-\\[\\#fff\\]");
        assert_eq!(escape_selector("p-0.5"), "p-0\\.5");
        assert_eq!(escape_selector("2xl:p-4"), "\\2xl\\:p-4");
        assert_eq!(escape_selector("!m-4"), "\\!m-4");
    }

    #[test]
    fn prints_indented_blocks() {
        let lines = vec!["padding: 1rem;".to_string(), "margin: 0;".to_string()];
        assert_eq!(
            print_block(".p-4", &lines, "  "),
            "  .p-4 {\n    padding: 1rem;\n    margin: 0;\n  }\n"
        );
    }

    #[test]
    fn variants_apply_inner_to_outer() {
        let variants = vec![
            Variant::Rewrite(SelectorRewrite::Ancestor(".dark".to_string())),
            Variant::AtRule {
                order: 0,
                condition: "@media print".to_string(),
            },
            Variant::Rewrite(SelectorRewrite::Suffix(":hover".to_string())),
        ];
        let rewrite = SelectorRewrite::Template("& > * + *".to_string());
        assert_eq!(
            apply_variants(".x", &variants, Some(&rewrite)),
            (true, ".dark .x:hover > * + *".to_string())
        );
        assert_eq!(apply_variants("&", &variants[2..], None), (false, "&:hover".to_string()));
    }

    #[test]
    fn container_class() {
        let container = Container {
            center: true,
            padding: Some(ContainerPadding::Uniform("2rem".to_string())),
        };
        assert_eq!(
            print_container_class(&container),
            ".container {\n  width: 100%;\n  margin-left: auto;\n  margin-right: auto;\n  padding-left: 2rem;\n  padding-right: 2rem;\n}\n"
        );
    }

    #[test]
    fn seeded_tree_is_empty() {
        let theme = Theme::resolve(&ThemeConfig::default()).expect("theme");
        let tree = MatchTree::with_screens(&theme, &VariantTable::new(&theme));
        assert_eq!(tree.at_rules.len(), 5);
        assert!(tree.is_empty());
    }
}
