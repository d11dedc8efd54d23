use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::builder::{BuildError, Site};
use crate::markdown::{split_document, to_html};
use crate::menu::build_menu;
use crate::scanner::{LANDING_FILE, LANDING_STEM, SourceEntry};
use crate::site::Page;

/// State carried down the recursive walk.
///
/// Each directory gets its own context; nothing is shared between sibling subtrees
/// apart from the immutable [`Site`].
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub site: &'a Site,
    pub src_dir: PathBuf,
    pub dst_dir: PathBuf,
}

impl<'a> RenderContext<'a> {
    pub fn root(site: &'a Site) -> Self {
        Self {
            site,
            src_dir: site.source_dir().to_path_buf(),
            dst_dir: site.output_dir().to_path_buf(),
        }
    }

    /// Context for the subdirectory `name` of the current directory.
    pub fn child(&self, name: &str) -> Self {
        Self {
            site: self.site,
            src_dir: self.src_dir.join(name),
            dst_dir: self.dst_dir.join(name),
        }
    }
}

/// Renders one output document and returns the path it was written to.
///
/// With a `source` the title is the document's first line and the rest becomes the body.
/// Without one a landing document is synthesized for the current directory, titled
/// after the last selection segment. The menu is always built from the site root.
pub fn process_document(
    context: &RenderContext<'_>,
    selection: &[String],
    source: Option<&SourceEntry>,
) -> Result<PathBuf, BuildError> {
    let site = context.site;
    let mut page = Page::new(site.name(), site.title(), site.prefix());
    let mut selection = selection.to_vec();

    match source {
        Some(entry) => {
            selection.push(entry.name.clone());
            let content = std::fs::read_to_string(&entry.path).map_err(|source| {
                BuildError::Read {
                    path: entry.path.clone(),
                    source,
                }
            })?;
            let (title, body) = split_document(&content);
            page.title = title.to_string();
            page.html_content = to_html(body);
        }
        None => {
            if let Some(last) = selection.last() {
                page.title = format!("{last}/");
            }
            debug!(dir = %context.dst_dir.display(), "Synthesizing landing document");
        }
    }

    page.items = build_menu(site.source_dir(), "", site.prefix(), &selection)?;

    let output_path = destination(&context.dst_dir, source)?;
    site.template().render_to_file(&page, &output_path)?;
    info!(title = %page.title, output = %output_path.display(), "Rendered");

    Ok(output_path)
}

/// Landing documents go straight into `dst_dir`; every other document gets a
/// directory named after its stem.
fn destination(dst_dir: &Path, source: Option<&SourceEntry>) -> Result<PathBuf, BuildError> {
    match source.map(SourceEntry::stem) {
        Some(stem) if stem != LANDING_STEM => {
            let dir = dst_dir.join(stem);
            std::fs::create_dir_all(&dir).map_err(|source| BuildError::Write {
                path: dir.clone(),
                source,
            })?;
            Ok(dir.join(LANDING_FILE))
        }
        _ => Ok(dst_dir.join(LANDING_FILE)),
    }
}
