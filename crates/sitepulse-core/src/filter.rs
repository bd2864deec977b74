// ── Display filter ──
//
// Location + free-text search over sites or status records. Always returns
// a new view; the source slice is never reordered or mutated.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::model::{Site, StatusRecord};

/// Anything the filter can look at.
pub trait Searchable {
    fn site(&self) -> &Site;
}

impl Searchable for Site {
    fn site(&self) -> &Site {
        self
    }
}

impl Searchable for StatusRecord {
    fn site(&self) -> &Site {
        &self.site
    }
}

impl<T: Searchable> Searchable for Arc<T> {
    fn site(&self) -> &Site {
        self.as_ref().site()
    }
}

/// Location selection: everything, or one exact tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum LocationFilter {
    #[default]
    All,
    Tag(String),
}

impl LocationFilter {
    pub fn matches(&self, location: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(tag) => tag == location,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Tag(tag) => Some(tag),
        }
    }
}

impl fmt::Display for LocationFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

impl FromStr for LocationFilter {
    type Err = std::convert::Infallible;

    /// `ALL` (any case) or an empty string select everything.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            Ok(Self::Tag(s.to_owned()))
        }
    }
}

/// Location filter plus case-insensitive search over name, domain, and
/// location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayFilter {
    pub location: LocationFilter,
    pub query: String,
}

impl DisplayFilter {
    pub fn new(location: LocationFilter, query: impl Into<String>) -> Self {
        Self {
            location,
            query: query.into(),
        }
    }

    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        let site = item.site();
        if !self.location.matches(&site.location) {
            return false;
        }
        let needle = self.query.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        [&site.name, &site.domain, &site.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Matching items, in source order.
    pub fn apply<T: Searchable + Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().filter(|item| self.matches(*item)).cloned().collect()
    }
}
