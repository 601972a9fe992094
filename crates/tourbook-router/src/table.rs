//! Ordered route table.

use std::collections::HashSet;

use tracing::trace;

use crate::error::RouteError;
use crate::pattern::{Params, RoutePattern, split_path};

/// One entry of a route table.
#[derive(Debug, Clone)]
pub struct Route<P> {
    pattern: RoutePattern,
    name: Option<String>,
    page: P,
}

impl<P> Route<P> {
    pub fn pattern(&self) -> &RoutePattern {
        &self.pattern
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn page(&self) -> &P {
        &self.page
    }
}

/// The outcome of resolving a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, P> {
    /// The page to render.
    pub page: &'a P,
    /// Name of the matched route, if it has one.
    pub name: Option<&'a str>,
    /// The matched pattern; `None` when the fallback page was used.
    pub pattern: Option<&'a RoutePattern>,
    /// Captured placeholder values.
    pub params: Params,
}

impl<P> RouteMatch<'_, P> {
    /// Whether this match came from the table's fallback page.
    pub fn is_fallback(&self) -> bool {
        self.pattern.is_none()
    }
}

/// A static, ordered mapping from path patterns to pages.
///
/// Resolution walks the routes in declaration order and the first structural
/// match wins, so a static `/tours/popular` declared before `/tours/:slug`
/// shadows it and vice versa.
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    routes: Vec<Route<P>>,
    fallback: Option<P>,
}

impl<P> RouteTable<P> {
    /// Start declaring a table.
    pub fn builder() -> RouteTableBuilder<P> {
        RouteTableBuilder {
            entries: Vec::new(),
            fallback: None,
        }
    }

    /// Resolve a path to a page.
    ///
    /// Returns the fallback page if no route matches and one was declared,
    /// otherwise `None`.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch<'_, P>> {
        let parts = split_path(path);

        let found = self.routes.iter().find_map(|route| {
            route
                .pattern
                .match_segments(&parts)
                .map(|params| RouteMatch {
                    page: &route.page,
                    name: route.name.as_deref(),
                    pattern: Some(&route.pattern),
                    params,
                })
        });

        match found {
            Some(found) => {
                trace!(path, name = ?found.name, "Route matched");
                Some(found)
            }
            None => {
                trace!(path, fallback = self.fallback.is_some(), "No route matched");
                self.fallback.as_ref().map(|page| RouteMatch {
                    page,
                    name: None,
                    pattern: None,
                    params: Params::default(),
                })
            }
        }
    }

    /// Build the path of a named route.
    pub fn reverse(&self, name: &str, params: &[(&str, &str)]) -> Result<String, RouteError> {
        let route = self
            .route(name)
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))?;
        route.pattern.build(name, params)
    }

    /// Look up a route by name.
    pub fn route(&self, name: &str) -> Option<&Route<P>> {
        self.routes.iter().find(|r| r.name.as_deref() == Some(name))
    }

    /// All routes in declaration order.
    pub fn routes(&self) -> &[Route<P>] {
        &self.routes
    }

    /// The fallback page, if declared.
    pub fn fallback(&self) -> Option<&P> {
        self.fallback.as_ref()
    }
}

/// Collects route declarations; patterns are validated by [`build`](Self::build).
#[derive(Debug)]
pub struct RouteTableBuilder<P> {
    entries: Vec<(String, Option<String>, P)>,
    fallback: Option<P>,
}

impl<P> RouteTableBuilder<P> {
    /// Add an unnamed route.
    pub fn route(mut self, pattern: &str, page: P) -> Self {
        self.entries.push((pattern.to_string(), None, page));
        self
    }

    /// Add a named route.
    pub fn named(mut self, name: &str, pattern: &str, page: P) -> Self {
        self.entries
            .push((pattern.to_string(), Some(name.to_string()), page));
        self
    }

    /// Page to show when nothing matches.
    pub fn fallback(mut self, page: P) -> Self {
        self.fallback = Some(page);
        self
    }

    /// Validate every pattern and freeze the table.
    pub fn build(self) -> Result<RouteTable<P>, RouteError> {
        let mut names = HashSet::new();
        let mut routes = Vec::with_capacity(self.entries.len());

        for (pattern, name, page) in self.entries {
            if let Some(ref name) = name
                && !names.insert(name.clone())
            {
                return Err(RouteError::DuplicateName(name.clone()));
            }
            routes.push(Route {
                pattern: RoutePattern::parse(&pattern)?,
                name,
                page,
            });
        }

        Ok(RouteTable {
            routes,
            fallback: self.fallback,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum View {
        Home,
        List,
        Popular,
        Detail,
        NotFound,
    }

    fn table() -> RouteTable<View> {
        RouteTable::builder()
            .named("home", "/", View::Home)
            .named("list", "/items", View::List)
            .named("popular", "/items/popular", View::Popular)
            .named("detail", "/items/:id", View::Detail)
            .build()
            .unwrap()
    }

    #[test]
    fn first_match_wins() {
        let table = table();
        assert_eq!(table.resolve("/items/popular").unwrap().page, &View::Popular);

        let detail = table.resolve("/items/42").unwrap();
        assert_eq!(detail.page, &View::Detail);
        assert_eq!(detail.name, Some("detail"));
        assert_eq!(detail.params.get("id"), Some("42"));
        assert!(!detail.is_fallback());
    }

    #[test]
    fn declaration_order_decides_shadowing() {
        let table = RouteTable::builder()
            .route("/items/:id", View::Detail)
            .route("/items/popular", View::Popular)
            .build()
            .unwrap();
        assert_eq!(table.resolve("/items/popular").unwrap().page, &View::Detail);
    }

    #[test]
    fn unmatched_without_fallback_is_none() {
        assert!(table().resolve("/nonexistent").is_none());
    }

    #[test]
    fn unmatched_with_fallback() {
        let table = RouteTable::builder()
            .route("/", View::Home)
            .fallback(View::NotFound)
            .build()
            .unwrap();

        let miss = table.resolve("/nowhere").unwrap();
        assert_eq!(miss.page, &View::NotFound);
        assert!(miss.is_fallback());
        assert!(miss.params.is_empty());
        assert_eq!(table.fallback(), Some(&View::NotFound));
    }

    #[test]
    fn reverse_named_routes() {
        let table = table();
        assert_eq!(table.reverse("home", &[]).unwrap(), "/");
        assert_eq!(table.reverse("detail", &[("id", "7")]).unwrap(), "/items/7");
        assert_eq!(
            table.reverse("missing", &[]),
            Err(RouteError::UnknownName("missing".into()))
        );
        assert!(matches!(
            table.reverse("detail", &[]),
            Err(RouteError::MissingParam { .. })
        ));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = RouteTable::builder()
            .named("a", "/x", View::Home)
            .named("a", "/y", View::List)
            .build();
        assert!(matches!(result, Err(RouteError::DuplicateName(name)) if name == "a"));
    }

    #[test]
    fn invalid_pattern_fails_build() {
        let result = RouteTable::builder().route("items", View::List).build();
        assert!(matches!(result, Err(RouteError::InvalidPattern { .. })));
    }
}
