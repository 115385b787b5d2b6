use crate::AppState;
use crate::features::pages::Action;
use axum::{extract::FromRequestParts, http::StatusCode, http::request::Parts};
use regex::Regex;

/// Matches request paths against `/(view|edit|save)/<title>` where the title is one or more
/// ASCII letters or digits.
///
/// This is the only validation a title gets before it becomes a filename, so anything that
/// could leave the pages directory (`.`, `/`, percent escapes) must fail to match. The raw,
/// undecoded path is matched for that reason.
pub struct PathValidator {
    pattern: Regex,
}

impl PathValidator {
    pub fn new() -> Result<Self, regex::Error> {
        let actions = Action::ALL
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("^/({})/([a-zA-Z0-9]+)$", actions))?;

        Ok(Self { pattern })
    }

    pub fn validate(&self, path: &str) -> Option<(Action, String)> {
        let captures = self.pattern.captures(path)?;
        let action = Action::from_name(captures.get(1)?.as_str())?;
        let title = captures.get(2)?.as_str().to_string();

        Some((action, title))
    }
}

/// A page title taken from a request path that passed [`PathValidator`].
#[derive(Debug)]
pub struct ValidTitle(pub String);

impl FromRequestParts<AppState> for ValidTitle {
    type Rejection = StatusCode;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // matched undecoded: "/view/Fo%6F" is a 404 rather than the page "Foo"
        match state.validator.validate(parts.uri.path()) {
            Some((_, title)) => Ok(ValidTitle(title)),
            None => {
                tracing::debug!(path = parts.uri.path(), "rejected page path");
                Err(StatusCode::NOT_FOUND)
            }
        }
    }
}
