use crate::utils::is_valid_identifier;

/// A stored identifier-to-URL mapping, owned by the record store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub identifier: String,
    pub location_url: String,
}

impl Record {
    pub fn new(identifier: impl Into<String>, location_url: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            location_url: location_url.into(),
        }
    }
}

pub const MIRROR_BASE: &str = "https://sci-hub.se/";
pub const RESOLVER_BASE: &str = "https://doi.org/";

/// The two outbound links built for a valid identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedLinks {
    pub mirror: String,
    pub resolver: String,
}

impl DerivedLinks {
    /// Returns None when the identifier does not pass validation
    pub fn for_identifier(identifier: &str) -> Option<Self> {
        if !is_valid_identifier(identifier) {
            return None;
        }

        Some(Self {
            mirror: format!("{MIRROR_BASE}{identifier}"),
            resolver: format!("{RESOLVER_BASE}{identifier}"),
        })
    }
}

/// What a single render produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Invalid,
    Found { count: usize },
}
