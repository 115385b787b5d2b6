use crate::domain::Page;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use thiserror::Error;

const EMBEDDED_VIEW: &str = include_str!("../../templates/view.html");
const EMBEDDED_EDIT: &str = include_str!("../../templates/edit.html");

/// The fixed set of templates the server renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateName {
    View,
    Edit,
}

impl TemplateName {
    // the ".html" suffix turns on tera's autoescaping
    pub fn file_name(self) -> &'static str {
        match self {
            TemplateName::View => "view.html",
            TemplateName::Edit => "edit.html",
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to compile templates: {0}")]
    Compile(#[source] tera::Error),

    #[error("unable to read template {}: {source}", path.display())]
    MissingSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render {name}: {source}")]
    Execute {
        name: &'static str,
        #[source]
        source: tera::Error,
    },
}

// what a template gets to see of a page
#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    body: Cow<'a, str>,
}

/// Compiled templates. Built once at startup and read-only afterwards, so it can be shared
/// between requests behind an `Arc`.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn from_sources(view: &str, edit: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            (TemplateName::View.file_name(), view),
            (TemplateName::Edit.file_name(), edit),
        ])
        .map_err(RenderError::Compile)?;

        Ok(Self { tera })
    }

    /// Reads `view.html` and `edit.html` from `dir`. Both must exist.
    pub fn from_dir(dir: &Path) -> Result<Self, RenderError> {
        let read = |name: TemplateName| {
            let path = dir.join(name.file_name());
            std::fs::read_to_string(&path).map_err(|source| RenderError::MissingSource { path, source })
        };

        let view = read(TemplateName::View)?;
        let edit = read(TemplateName::Edit)?;
        Self::from_sources(&view, &edit)
    }

    // the templates shipped in the "templates" directory of this crate
    pub fn embedded() -> Result<Self, RenderError> {
        Self::from_sources(EMBEDDED_VIEW, EMBEDDED_EDIT)
    }

    pub fn render<W: Write>(
        &self,
        writer: W,
        name: TemplateName,
        page: &Page,
    ) -> Result<(), RenderError> {
        let execute_err = |source| RenderError::Execute {
            name: name.file_name(),
            source,
        };

        let context = Context::from_serialize(PageContext {
            title: &page.title,
            body: page.body_text(),
        })
        .map_err(execute_err)?;

        self.tera
            .render_to(name.file_name(), &context, writer)
            .map_err(execute_err)
    }

    // renders fully before anything is sent, a failure never leaves a half written response
    pub fn render_to_vec(&self, name: TemplateName, page: &Page) -> Result<Vec<u8>, RenderError> {
        let mut buf = Vec::new();
        self.render(&mut buf, name, page)?;
        Ok(buf)
    }
}
