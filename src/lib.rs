pub mod apply;
pub mod base_theme;
pub mod color;
pub mod config;
pub mod core_rules;
pub mod defaults;
pub mod entries;
pub mod error;
pub mod generator;
pub mod parser;
pub mod rules;
pub mod scanner;
pub mod theme;
pub mod variants;

pub use apply::PreTransformed;
pub use config::{Safelist, UserConfig, UserRules};
pub use error::{Error, Result};
pub use generator::CodegenMode;
pub use rules::Rule;
pub use theme::{Theme, ThemeConfig};

use apply::{ShortcutTable, Source, compose};
use defaults::{DefaultGroup, Defaults};
use entries::EntryIndex;
use generator::{Generator, MatchTree};
use parser::{Match, MatchKind, ScanCache, TokenParser};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;
use variants::VariantTable;

/// A CSS property and its value.
pub type Declaration = (String, String);

/// Collects utilities from scanned sources and prints the CSS they need.
///
/// Scans mutate the engine; call `generate` once the sources are scanned.
#[derive(Debug)]
pub struct Engine {
    theme: Theme,
    defaults: Defaults,
    parser: TokenParser,
    shortcuts: ShortcutTable,
    cache: ScanCache,
    tree: MatchTree,
    seen: HashSet<String>,
    used_defaults: BTreeSet<DefaultGroup>,
    used_keyframes: BTreeSet<String>,
    files: HashMap<String, HashSet<String>>,
}

impl Engine {
    pub fn new(config: UserConfig) -> Result<Self> {
        let theme = Theme::resolve(&config.theme)?;
        let defaults = Defaults::new(&theme);
        let variants = VariantTable::new(&theme);
        let user_rules = config.rules.resolve(&theme);
        let rules = rules::get_rules(&theme, &config.core_rules, user_rules, &config.shortcuts)?;
        let entries = EntryIndex::build(&rules)?;
        let tree = MatchTree::with_screens(&theme, &variants);
        let parser = TokenParser::new(variants, entries, theme.category("lineHeight"));
        let shortcuts = ShortcutTable::build(&rules, &parser)?;
        log::debug!(
            "engine ready: {} rules, {} entries, {} variants, {} shortcuts",
            rules.len(),
            parser.entries().len(),
            parser.variants().len(),
            shortcuts.len()
        );

        let mut engine = Self {
            theme,
            defaults,
            parser,
            shortcuts,
            cache: ScanCache::new(config.blocklist),
            tree,
            seen: HashSet::new(),
            used_defaults: BTreeSet::new(),
            used_keyframes: BTreeSet::new(),
            files: HashMap::new(),
        };

        let safelist = config.safelist.resolve(&engine.theme);
        for token in &safelist {
            let Some(found) = engine.cache.parse(&engine.parser, token) else {
                return Err(Error::config(
                    format!("No rule matching \"{token}\" in safelist"),
                    format!("safelist = {safelist:?}"),
                ));
            };
            engine.add_match(found);
        }

        Ok(engine)
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Registers every utility found in `text`. Returns whether one was new.
    pub fn scan(&mut self, text: &str) -> bool {
        let mut found_new = false;
        for token in scanner::extract_tokens(text) {
            found_new |= self.scan_token(token);
        }
        found_new
    }

    pub fn scan_token(&mut self, token: &str) -> bool {
        match self.cache.parse(&self.parser, token) {
            Some(found) => self.add_match(found),
            None => false,
        }
    }

    /// `scan` for a file that is rescanned on change. Skips the work when the
    /// file holds no utility beyond the ones recorded for it last time.
    pub fn scan_file(&mut self, path: &str, text: &str) -> bool {
        let accepted: HashSet<String> = scanner::extract_tokens(text)
            .into_iter()
            .filter(|token| self.cache.parse(&self.parser, token).is_some())
            .map(str::to_string)
            .collect();
        if self
            .files
            .get(path)
            .is_some_and(|recorded| accepted.is_subset(recorded))
        {
            return false;
        }
        let mut found_new = false;
        for token in &accepted {
            found_new |= self.scan_token(token);
        }
        self.files.insert(path.to_string(), accepted);
        found_new
    }

    fn add_match(&mut self, found: Arc<Match>) -> bool {
        if !self.seen.insert(found.token.clone()) {
            return false;
        }
        if let MatchKind::Rule(resolved) = &found.kind {
            let meta = resolved.rule.meta();
            if let Some(group) = meta.add_default {
                self.used_defaults.insert(group);
            }
            if meta.add_keyframes {
                if let Some(value) = &resolved.value {
                    let name = value.primary().split(' ').next().unwrap_or_default();
                    if self.theme.value("keyframes", name).is_some() {
                        self.used_keyframes.insert(name.to_string());
                    }
                }
            }
        }
        if let Some(expansion) = found.shortcut().and_then(|name| self.shortcuts.get(name)) {
            self.used_defaults.extend(expansion.defaults.iter().copied());
        }
        self.tree.insert(found);
        true
    }

    /// Resolves utilities to declarations for an inline `style` attribute.
    pub fn apply_inline(&mut self, text: &str) -> Result<Vec<Declaration>> {
        let parser = &self.parser;
        let cache = &mut self.cache;
        let expansion = compose(
            text,
            text,
            Source::Inline,
            |token| cache.parse(parser, token),
            &self.shortcuts,
        )?;
        self.used_defaults.extend(expansion.defaults.iter().copied());
        expansion.declarations().ok_or_else(|| {
            Error::composition("Nested utilities cannot be inlined", text)
        })
    }

    /// Expands `@apply`, `screen()` and `theme()` in hand-written CSS.
    pub fn pre_transform(&mut self, css: &str) -> Result<PreTransformed> {
        let mut invalidate_utils = false;
        let parser = &self.parser;
        let cache = &mut self.cache;
        let shortcuts = &self.shortcuts;
        let used_defaults = &mut self.used_defaults;
        let css = apply::replace_apply(css, |tokens, context| {
            let expansion = compose(
                tokens,
                context,
                Source::Css,
                |token| cache.parse(parser, token),
                shortcuts,
            )?;
            for group in &expansion.defaults {
                if used_defaults.insert(*group) {
                    invalidate_utils = true;
                }
            }
            Ok(expansion.lines().to_vec())
        })?;
        let css = apply::replace_screens(&css, self.parser.variants())?;
        let css = apply::replace_theme(&css, &self.theme)?;
        Ok(PreTransformed {
            css,
            invalidate_utils,
        })
    }

    fn generator(&self) -> Generator<'_> {
        Generator {
            theme: &self.theme,
            defaults: &self.defaults,
            shortcuts: &self.shortcuts,
        }
    }

    /// CSS for every utility registered so far.
    pub fn generate(&self) -> String {
        self.generator()
            .generate(&self.tree, &self.used_defaults, &self.used_keyframes)
    }

    /// CSS for every known utility, scanned or not.
    pub fn codegen(&self, mode: CodegenMode) -> String {
        self.generator().codegen(self.parser.entries(), mode)
    }
}
