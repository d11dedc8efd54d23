use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use crate::site::Page;

/// Name the single page template is registered under.
const PAGE_TEMPLATE: &str = "page";

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Failed to load template {}", path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: tera::Error,
    },
    #[error("Failed to render template")]
    Render(#[source] tera::Error),
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Renders pages through one user supplied template file.
#[derive(Debug)]
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        // Page bodies are already HTML
        tera.autoescape_on(vec![]);
        tera.add_template_file(path, Some(PAGE_TEMPLATE))
            .map_err(|source| TemplateError::Load {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self { tera })
    }

    /// Render the template with the page's fields as top-level variables
    pub fn render(&self, page: &Page) -> Result<String, TemplateError> {
        let context = Context::from_serialize(page).map_err(TemplateError::Render)?;
        self.tera
            .render(PAGE_TEMPLATE, &context)
            .map_err(TemplateError::Render)
    }

    /// Render a page and write it to `output_path`, replacing any existing file
    pub fn render_to_file(&self, page: &Page, output_path: &Path) -> Result<(), TemplateError> {
        let rendered = self.render(page)?;

        std::fs::write(output_path, rendered).map_err(|source| TemplateError::Write {
            path: output_path.to_path_buf(),
            source,
        })
    }
}
