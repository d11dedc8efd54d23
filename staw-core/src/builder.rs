use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::renderer::{RenderContext, process_document};
use crate::scanner::{EntryKind, ScanError, scan_dir};
use crate::template::{TemplateError, TemplateRenderer};

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no template given")]
    MissingTemplate,
    #[error("no site title given")]
    MissingTitle,
    #[error("no site input directory given")]
    MissingSourceDir,
    #[error("no output directory given")]
    MissingOutputDir,
    #[error("Failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy {} to {}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl BuildError {
    /// Whether the error was raised while validating configuration, before any traversal.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            BuildError::MissingTemplate
                | BuildError::MissingTitle
                | BuildError::MissingSourceDir
                | BuildError::MissingOutputDir
        )
    }
}

#[derive(Debug, Default)]
pub struct SiteBuilder {
    source_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    template: Option<PathBuf>,
    config: SiteConfig,
}

impl SiteBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // Required configuration
    pub fn source_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.source_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn template<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.template = Some(path.as_ref().to_path_buf());
        self
    }

    // Title, prefix and stylesheet
    pub fn site_config(mut self, config: SiteConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and load the template.
    ///
    /// Nothing is written to the output directory here.
    pub fn build(self) -> Result<Site, BuildError> {
        let template_path = non_empty(self.template).ok_or(BuildError::MissingTemplate)?;
        let title = self
            .config
            .title
            .filter(|t| !t.is_empty())
            .ok_or(BuildError::MissingTitle)?;
        let source_dir = non_empty(self.source_dir).ok_or(BuildError::MissingSourceDir)?;
        let output_dir = non_empty(self.output_dir).ok_or(BuildError::MissingOutputDir)?;

        let metadata = std::fs::metadata(&source_dir).map_err(|source| BuildError::Read {
            path: source_dir.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(BuildError::Read {
                path: source_dir,
                source: std::io::Error::other("not a directory"),
            });
        }

        let template = TemplateRenderer::from_file(&template_path)?;

        Ok(Site {
            name: site_name(&source_dir),
            title,
            prefix: self.config.prefix,
            stylesheet: non_empty(self.config.css.map(PathBuf::from)),
            source_dir,
            output_dir,
            template,
        })
    }
}

fn non_empty(path: Option<PathBuf>) -> Option<PathBuf> {
    path.filter(|p| !p.as_os_str().is_empty())
}

/// Final component of the source directory, resolving `.` and `..` when possible.
fn site_name(source_dir: &Path) -> String {
    source_dir
        .canonicalize()
        .ok()
        .as_deref()
        .unwrap_or(source_dir)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_dir.to_string_lossy().into_owned())
}

/// A validated site, ready to render.
#[derive(Debug)]
pub struct Site {
    name: String,
    title: String,
    prefix: String,
    stylesheet: Option<PathBuf>,
    source_dir: PathBuf,
    output_dir: PathBuf,
    template: TemplateRenderer,
}

impl Site {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn template(&self) -> &TemplateRenderer {
        &self.template
    }

    /// Render the whole tree, then copy the stylesheet into the output root.
    ///
    /// The first error aborts the run; files already written stay in place.
    pub fn render_all(&self) -> Result<(), BuildError> {
        info!(
            source = %self.source_dir.display(),
            output = %self.output_dir.display(),
            "Building site"
        );

        process_path(&RenderContext::root(self), &[])?;

        if let Some(css) = &self.stylesheet {
            let name = css.file_name().ok_or_else(|| BuildError::Read {
                path: css.clone(),
                source: std::io::Error::other("stylesheet has no file name"),
            })?;
            copy_file(css, &self.output_dir.join(name))?;
        }

        Ok(())
    }
}

/// Mirrors `context.src_dir` into `context.dst_dir`, depth first.
///
/// Subdirectories recurse with the selection path extended by their name,
/// documents are rendered and everything else is copied. A directory without
/// an `index.md` gets a synthesized landing document once its children are done.
pub fn process_path(context: &RenderContext<'_>, selection: &[String]) -> Result<(), BuildError> {
    std::fs::create_dir_all(&context.dst_dir).map_err(|source| BuildError::Write {
        path: context.dst_dir.clone(),
        source,
    })?;

    let mut has_landing = false;
    for entry in scan_dir(&context.src_dir)? {
        match entry.kind {
            EntryKind::Directory => {
                let mut child_selection = selection.to_vec();
                child_selection.push(entry.name.clone());
                process_path(&context.child(&entry.name), &child_selection)?;
            }
            EntryKind::Document => {
                has_landing |= entry.is_landing();
                process_document(context, selection, Some(&entry))?;
            }
            EntryKind::Asset => {
                copy_file(&entry.path, &context.dst_dir.join(&entry.name))?;
            }
        }
    }

    if !has_landing {
        process_document(context, selection, None)?;
    }

    Ok(())
}

fn copy_file(from: &Path, to: &Path) -> Result<(), BuildError> {
    debug!(from = %from.display(), to = %to.display(), "Copying");
    std::fs::copy(from, to).map_err(|source| BuildError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Build a site in one call.
pub fn build_site(
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
    template: &Path,
) -> Result<(), BuildError> {
    SiteBuilder::new()
        .source_dir(source_dir)
        .output_dir(output_dir)
        .template(template)
        .site_config(config.clone())
        .build()?
        .render_all()
}
