//! Request path resolution and page composition.
//!
//! # Responsibilities
//! - Decide, per path, between a cached page, a static asset and the
//!   template fallback
//! - Compose the served HTML for cached routes
//!
//! # Design Decisions
//! - A dot in the last path segment always means a static asset, even if a
//!   cached route would match
//! - Unmatched and failed routes get the raw template with 200 so the client
//!   router can take over

use std::path::{Path, PathBuf};

use crate::cache::{CacheEntry, RenderCache};
use crate::markup::BaseTemplate;

/// What to do with a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// Hand the request to the static file service.
    Asset,
    /// Serve the template filled with this entry.
    Rendered(&'a CacheEntry),
    /// Serve the template unchanged.
    Fallback,
}

impl Resolution<'_> {
    /// Metrics label.
    pub fn outcome(&self) -> &'static str {
        match self {
            Resolution::Asset => "asset",
            Resolution::Rendered(_) => "rendered",
            Resolution::Fallback => "fallback",
        }
    }
}

/// Whether the final segment of `path` names a file.
pub fn is_asset_path(path: &str) -> bool {
    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

/// Everything needed to answer a request, fixed at startup.
#[derive(Debug)]
pub struct SiteState {
    cache: RenderCache,
    template: BaseTemplate,
    output_folder: PathBuf,
}

impl SiteState {
    pub fn new(cache: RenderCache, template: BaseTemplate, output_folder: impl Into<PathBuf>) -> Self {
        Self {
            cache,
            template,
            output_folder: output_folder.into(),
        }
    }

    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        if is_asset_path(path) {
            return Resolution::Asset;
        }
        match self.cache.lookup(path) {
            Some(entry) => Resolution::Rendered(entry),
            None => Resolution::Fallback,
        }
    }

    /// The HTML served for `path`; `None` for static assets.
    pub fn page(&self, path: &str) -> Option<String> {
        match self.resolve(path) {
            Resolution::Asset => None,
            Resolution::Rendered(entry) => Some(self.template.compose(self.cache.global(), &entry.fragment)),
            Resolution::Fallback => Some(self.template.raw().to_string()),
        }
    }

    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    pub fn template(&self) -> &BaseTemplate {
        &self.template
    }

    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DEFAULT_BODY_PLACEHOLDER, DEFAULT_HEAD_PLACEHOLDER};
    use crate::markup::HtmlFragment;

    fn site() -> SiteState {
        let entry = |pattern: &str, exact: bool, body: &str| CacheEntry {
            pattern: pattern.to_string(),
            exact,
            handler: body.to_string(),
            fragment: HtmlFragment::new("", body),
        };
        let cache = RenderCache::new(
            HtmlFragment::new("<meta>", "<nav></nav>"),
            vec![
                entry("/", true, "home"),
                entry("/app.js", true, "script"),
                entry("/docs", false, "docs"),
            ],
        );
        let template = BaseTemplate::new(
            format!("<head>{}</head><body>{}</body>", DEFAULT_HEAD_PLACEHOLDER, DEFAULT_BODY_PLACEHOLDER),
            DEFAULT_HEAD_PLACEHOLDER,
            DEFAULT_BODY_PLACEHOLDER,
        );
        SiteState::new(cache, template, "dist")
    }

    #[test]
    fn test_is_asset_path() {
        assert!(is_asset_path("/app.js"));
        assert!(is_asset_path("/static/css/site.min.css"));
        assert!(!is_asset_path("/"));
        assert!(!is_asset_path("/v1.2/docs"));
        assert!(!is_asset_path("/about"));
    }

    #[test]
    fn test_rendered_page_prepends_global() {
        let site = site();
        assert_eq!(
            site.page("/").unwrap(),
            "<head><meta></head><body><nav></nav>home</body>"
        );
        assert_eq!(site.resolve("/docs/intro").outcome(), "rendered");
    }

    #[test]
    fn test_dotted_path_is_always_an_asset() {
        let site = site();
        assert_eq!(site.resolve("/app.js"), Resolution::Asset);
        assert_eq!(site.page("/app.js"), None);
    }

    #[test]
    fn test_unmatched_path_gets_raw_template() {
        let site = site();
        assert_eq!(site.resolve("/contact"), Resolution::Fallback);
        assert_eq!(site.page("/contact").unwrap(), site.template().raw());
    }
}
