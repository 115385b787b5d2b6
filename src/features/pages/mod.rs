pub mod form;
pub mod handlers;
pub mod router;

use crate::AppState;
use axum::{
    Router,
    http::StatusCode,
    routing::{MethodRouter, any},
};
use derive_more::derive::Display;

pub use form::PageBody;
pub use router::{PathValidator, ValidTitle};

/// The three things a client can do with a page. The display form is the first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[display("view")]
    View,
    #[display("edit")]
    Edit,
    #[display("save")]
    Save,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::View, Action::Edit, Action::Save];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.to_string() == name)
    }

    // every action accepts any method, save reads its form from the body and the query
    fn handler(self) -> MethodRouter<AppState> {
        match self {
            Action::View => any(handlers::view_handler),
            Action::Edit => any(handlers::edit_handler),
            Action::Save => any(handlers::save_handler),
        }
    }

    pub fn path_for(self, title: &str) -> String {
        format!("/{}/{}", self, title)
    }
}

// one route per action, each guarded by the ValidTitle extractor
pub fn pages_router() -> Router<AppState> {
    Action::ALL
        .into_iter()
        .fold(Router::new(), |router, action| {
            router.route(&format!("/{}/{{title}}", action), action.handler())
        })
        .fallback(not_found)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
