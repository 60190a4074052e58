//! Navigation surface of the single-page app.
//!
//! The client router owns rendering; the server only needs to know which page
//! a path lands on for logging.

use std::fmt;

/// A page of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Menu,
    Contact,
    About,
    Order,
    /// Any path that is not one of the routed pages.
    NotFound,
}

impl Page {
    /// Every routed page, in navigation order.
    pub const ROUTED: [Page; 5] = [Page::Home, Page::Menu, Page::Contact, Page::About, Page::Order];

    /// Route path of the page. `None` for the not-found view.
    pub fn path(&self) -> Option<&'static str> {
        match self {
            Page::Home => Some("/"),
            Page::Menu => Some("/menu"),
            Page::Contact => Some("/contact"),
            Page::About => Some("/about"),
            Page::Order => Some("/order"),
            Page::NotFound => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Menu => "Menu",
            Page::Contact => "Contact",
            Page::About => "About",
            Page::Order => "Order",
            Page::NotFound => "Not Found",
        }
    }

    /// Resolve a request path (optionally with query or fragment) to a page.
    ///
    /// A single trailing slash is ignored. Never fails: unknown paths are
    /// [`Page::NotFound`].
    pub fn resolve(path: &str) -> Page {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(trimmed) => trimmed,
        };
        Self::ROUTED
            .into_iter()
            .find(|page| page.path() == Some(path))
            .unwrap_or(Page::NotFound)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
