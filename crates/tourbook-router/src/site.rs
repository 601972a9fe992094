//! The booking site's pages and route table.

use std::fmt;

use serde::Serialize;

use crate::table::RouteTable;

/// Pages the front end can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Landing,
    Cart,
    CompanyList,
    Company,
    TourList,
    Tour,
    Auth,
    Wishlist,
    Account,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Cart => "cart",
            Page::CompanyList => "company-list",
            Page::Company => "company",
            Page::TourList => "tour-list",
            Page::Tour => "tour",
            Page::Auth => "auth",
            Page::Wishlist => "wishlist",
            Page::Account => "account",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The site's route table, in declaration order. There is no fallback page.
pub fn routes() -> RouteTable<Page> {
    RouteTable::builder()
        .named("main", "/", Page::Landing)
        .named("cart", "/cart", Page::Cart)
        .named("companies", "/company", Page::CompanyList)
        .named("company", "/company/:slug", Page::Company)
        .named("tours", "/tours", Page::TourList)
        .named("tour", "/tours/:slug", Page::Tour)
        .named("auth", "/auth", Page::Auth)
        .named("wishlist", "/wishlist", Page::Wishlist)
        .named("account", "/account", Page::Account)
        .build()
        .expect("site route patterns are valid")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tour_detail_captures_slug() {
        let routes = routes();
        let matched = routes.resolve("/tours/abc").unwrap();
        assert_eq!(matched.page, &Page::Tour);
        assert_eq!(matched.name, Some("tour"));
        assert_eq!(matched.params.get("slug"), Some("abc"));
    }

    #[test]
    fn paths_match_case_insensitively() {
        let routes = routes();
        let matched = routes.resolve("/Tours/abc").unwrap();
        assert_eq!(matched.page, &Page::Tour);
        assert_eq!(matched.params.get("slug"), Some("abc"));
        assert_eq!(routes.resolve("/CART").unwrap().page, &Page::Cart);
    }

    #[test]
    fn unknown_path_resolves_to_nothing() {
        assert!(routes().resolve("/nonexistent").is_none());
    }

    #[test]
    fn every_static_page_resolves() {
        let routes = routes();
        let expected = [
            ("/", Page::Landing),
            ("/cart", Page::Cart),
            ("/company", Page::CompanyList),
            ("/tours", Page::TourList),
            ("/auth", Page::Auth),
            ("/wishlist", Page::Wishlist),
            ("/account", Page::Account),
        ];
        for (path, page) in expected {
            let matched = routes.resolve(path).unwrap();
            assert_eq!(matched.page, &page, "{path}");
            assert!(matched.params.is_empty());
        }
    }

    #[test]
    fn company_detail_captures_slug() {
        let matched = routes().resolve("/company/north-trails/").map(|m| {
            (*m.page, m.params.get("slug").map(str::to_string))
        });
        assert_eq!(matched, Some((Page::Company, Some("north-trails".into()))));
    }

    #[test]
    fn reverse_site_routes() {
        let routes = routes();
        assert_eq!(routes.reverse("tour", &[("slug", "altai")]).unwrap(), "/tours/altai");
        assert_eq!(routes.reverse("main", &[]).unwrap(), "/");
    }

    #[test]
    fn pages_serialize_as_kebab_case() {
        assert_eq!(
            serde_json::to_string(&Page::CompanyList).unwrap(),
            "\"company-list\""
        );
        assert_eq!(Page::TourList.to_string(), "tour-list");
    }
}
