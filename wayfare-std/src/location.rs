//! Locations: `pathname` + `?query` + `#fragment`.

use std::{fmt, sync::LazyLock};
use url::{Url, form_urlencoded};
use wayfare_core::{Query, RouteError};

static BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse("http://localhost/").expect("base url is valid"));

/// A location split into its routable parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    /// The path, always starting with `/`.
    pub pathname: String,
    /// Query parameters. The first occurrence of a key wins.
    pub query: Query,
    /// The fragment without its leading `#`.
    pub fragment: Option<String>,
}

impl Location {
    /// A location with only a pathname.
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Self::default()
        }
    }

    /// Split `location` into pathname, query and fragment.
    ///
    /// Relative inputs are resolved against `/`.
    pub fn parse(location: &str) -> Result<Self, RouteError> {
        let url = BASE
            .join(location)
            .map_err(|e| RouteError::InvalidLocation {
                location: location.to_string(),
                reason: e.to_string(),
            })?;

        let mut query = Query::new();
        for (key, value) in url.query_pairs() {
            query
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }

        Ok(Self {
            pathname: url.path().to_string(),
            query,
            fragment: url.fragment().filter(|f| !f.is_empty()).map(str::to_string),
        })
    }

    /// Merge `query` into this location, overwriting keys it names.
    pub fn with_query(mut self, query: &Query) -> Self {
        self.query
            .extend(query.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Set the fragment. A leading `#` is accepted; empty fragments are ignored.
    pub fn with_fragment(mut self, fragment: Option<&str>) -> Self {
        if let Some(fragment) = fragment {
            let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
            if !fragment.is_empty() {
                self.fragment = Some(fragment.to_string());
            }
        }
        self
    }

    /// The location as a string.
    pub fn href(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pathname)?;
        if !self.query.is_empty() {
            write!(f, "?{}", encode_query(&self.query))?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}

/// Encode `query` as `application/x-www-form-urlencoded`.
pub fn encode_query(query: &Query) -> String {
    form_urlencoded::Serializer::new(String::new())
        .extend_pairs(query.iter())
        .finish()
}
