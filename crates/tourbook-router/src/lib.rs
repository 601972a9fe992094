//! tourbook-router - Client-side routing for the tourbook front end.
//!
//! A [`RouteTable`] is a static, ordered list of path patterns mapped to page
//! identifiers; resolving a path returns the first structural match and its
//! captured parameters. [`History`] drives a table the way a browser history
//! does, and [`site::routes`] is the booking site's own table.
//!
//! # Example
//!
//! ```
//! use tourbook_router::site::{self, Page};
//!
//! let routes = site::routes();
//! let matched = routes.resolve("/tours/abc").unwrap();
//! assert_eq!(matched.page, &Page::Tour);
//! assert_eq!(matched.params.get("slug"), Some("abc"));
//!
//! assert!(routes.resolve("/nonexistent").is_none());
//! ```

mod error;
mod history;
mod pattern;
pub mod site;
mod table;

pub use error::RouteError;
pub use history::History;
pub use pattern::{Params, RoutePattern};
pub use table::{Route, RouteMatch, RouteTable, RouteTableBuilder};
