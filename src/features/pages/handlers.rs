use crate::AppState;
use crate::domain::Page;
use crate::features::pages::{Action, PageBody, ValidTitle};
use crate::render::TemplateName;
use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};

pub async fn view_handler(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Response {
    match state.store.load(&title).await {
        Ok(page) => render_page(&state, TemplateName::View, &page),

        // nothing to show yet, send the client off to create it
        Err(e) => {
            if e.is_not_found() {
                tracing::debug!(%title, "page not found, redirecting to editor");
            } else {
                tracing::warn!(%title, error = %e, "failed to load page, redirecting to editor");
            }
            found(&Action::Edit.path_for(&title))
        }
    }
}

pub async fn edit_handler(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
) -> Response {
    let page = match state.store.load(&title).await {
        Ok(page) => page,
        Err(e) => {
            if !e.is_not_found() {
                tracing::warn!(%title, error = %e, "failed to load page, editing a blank one");
            }
            Page::empty(title)
        }
    };

    render_page(&state, TemplateName::Edit, &page)
}

pub async fn save_handler(
    State(state): State<AppState>,
    ValidTitle(title): ValidTitle,
    PageBody(body): PageBody,
) -> Response {
    let page = Page::new(title, body);

    match state.store.save(&page).await {
        Ok(()) => {
            tracing::info!(title = %page.title, bytes = page.body.len(), "saved page");
            found(&Action::View.path_for(&page.title))
        }
        Err(e) => {
            tracing::error!(title = %page.title, error = %e, "failed to save page");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn render_page(state: &AppState, name: TemplateName, page: &Page) -> Response {
    match state.templates.render_to_vec(name, page) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(title = %page.title, error = %e, "failed to render page");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

// 302 Found, axum's Redirect only builds 303/307/308
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
