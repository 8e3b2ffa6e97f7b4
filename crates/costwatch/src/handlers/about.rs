//! Static project metadata.

use axum::Json;
use serde::Serialize;

/// One entry of the author list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Author {
    /// Parses a cargo author string of the form `Name <email>`.
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        match raw.split_once('<') {
            Some((name, rest)) => Some(Self {
                name: name.trim().to_string(),
                email: Some(rest.trim_end_matches('>').trim().to_string())
                    .filter(|email| !email.is_empty()),
            }),
            None => Some(Self {
                name: raw.to_string(),
                email: None,
            }),
        }
    }
}

fn authors(raw: &str) -> Vec<Author> {
    raw.split(':').filter_map(Author::parse).collect()
}

/// GET /about - Authors taken from the package metadata.
pub async fn about() -> Json<Vec<Author>> {
    Json(authors(env!("CARGO_PKG_AUTHORS")))
}
