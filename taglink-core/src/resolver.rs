//! Namespace-aware symbol lookups

use crate::error::Error;
use crate::index::SymbolIndex;
use tracing::warn;

pub const SCOPE_SEPARATOR: &str = "::";

/// The documented library's namespace and the short aliases hand-written docs use for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub aliases: Vec<String>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// `ci::gl::Fbo` → `cinder::gl::Fbo` when `ci` is an alias of `cinder`.
    fn expand_alias(&self, symbol: &str) -> Option<String> {
        self.aliases.iter().find_map(|alias| {
            symbol
                .strip_prefix(alias.as_str())
                .and_then(|rest| rest.strip_prefix(SCOPE_SEPARATOR))
                .map(|rest| format!("{}{}{}", self.name, SCOPE_SEPARATOR, rest))
        })
    }

    fn qualify(&self, symbol: &str) -> String {
        format!("{}{}{}", self.name, SCOPE_SEPARATOR, symbol)
    }
}

/// Looks symbols up in a [`SymbolIndex`], normalizing namespace qualification.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a SymbolIndex,
    namespace: &'a Namespace,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a SymbolIndex, namespace: &'a Namespace) -> Self {
        Self { index, namespace }
    }

    pub fn index(&self) -> &'a SymbolIndex {
        self.index
    }

    /// Resolve `symbol` to its documentation file.
    ///
    /// Order:
    /// 1. `alias::Name` is rewritten to `namespace::Name` and looked up with no fallback; a miss
    ///    is [`Error::MissingSymbol`].
    /// 2. `symbol` as given.
    /// 3. `namespace::symbol`.
    ///
    /// Anything else is `Ok(None)`.
    pub fn resolve(&self, symbol: &str) -> Result<Option<&'a str>, Error> {
        let symbol = symbol.trim();
        if let Some(expanded) = self.namespace.expand_alias(symbol) {
            return self
                .index
                .get(&expanded)
                .map(Some)
                .ok_or_else(|| Error::MissingSymbol {
                    symbol: symbol.to_string(),
                });
        }
        if let Some(file) = self.index.get(symbol) {
            return Ok(Some(file));
        }
        Ok(self.index.get(&self.namespace.qualify(symbol)))
    }

    /// Like [`Resolver::resolve`], but logs a warning on a miss.
    pub fn resolve_or_warn(&self, symbol: &str) -> Result<Option<&'a str>, Error> {
        let resolved = self.resolve(symbol)?;
        if resolved.is_none() {
            warn!("could not find {}", symbol);
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (SymbolIndex, Namespace) {
        let index = [("ns::Foo", "foo.html"), ("ns::gl::Fbo", "fbo.html"), ("Bare", "bare.html")]
            .into_iter()
            .collect();
        (index, Namespace::new("ns").with_alias("ali"))
    }

    #[test]
    fn alias_is_expanded() {
        let (index, ns) = fixture();
        let resolver = Resolver::new(&index, &ns);
        assert_eq!(resolver.resolve("ali::Foo").unwrap(), Some("foo.html"));
        assert_eq!(resolver.resolve("ali::gl::Fbo").unwrap(), Some("fbo.html"));
    }

    #[test]
    fn exact_name_wins() {
        let (index, ns) = fixture();
        let resolver = Resolver::new(&index, &ns);
        assert_eq!(resolver.resolve("ns::Foo").unwrap(), Some("foo.html"));
        assert_eq!(resolver.resolve("Bare").unwrap(), Some("bare.html"));
    }

    #[test]
    fn bare_name_falls_back_to_namespace() {
        let (index, ns) = fixture();
        let resolver = Resolver::new(&index, &ns);
        assert_eq!(resolver.resolve("Foo").unwrap(), Some("foo.html"));
        assert_eq!(resolver.resolve("gl::Fbo").unwrap(), Some("fbo.html"));
    }

    #[test]
    fn unknown_name_is_a_miss() {
        let (index, ns) = fixture();
        let resolver = Resolver::new(&index, &ns);
        assert_eq!(resolver.resolve("Bar").unwrap(), None);
        assert_eq!(resolver.resolve_or_warn("Bar").unwrap(), None);
    }

    #[test]
    fn unknown_aliased_name_is_an_error() {
        let (index, ns) = fixture();
        let resolver = Resolver::new(&index, &ns);
        let err = resolver.resolve("ali::Bar").unwrap_err();
        assert!(matches!(err, Error::MissingSymbol { ref symbol } if symbol == "ali::Bar"));
    }

    #[test]
    fn alias_must_be_a_whole_scope() {
        let (index, ns) = fixture();
        let resolver = Resolver::new(&index, &ns);
        // "alias::Foo" does not start with "ali::", so it goes through the regular fallbacks.
        assert_eq!(resolver.resolve("alias::Foo").unwrap(), None);
    }
}
