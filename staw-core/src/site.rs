use serde::Serialize;

use crate::menu::MenuEntry;

/// Render context for one output document.
///
/// Serialized field names are the template's variables.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    /// Display name of the site root (the source directory's name).
    pub site: String,
    pub site_title: String,
    pub prefix: String,
    pub title: String,
    pub html_content: String,
    pub items: Vec<MenuEntry>,
}

impl Page {
    pub fn new(site: &str, site_title: &str, prefix: &str) -> Self {
        Self {
            site: site.to_string(),
            site_title: site_title.to_string(),
            prefix: prefix.to_string(),
            ..Self::default()
        }
    }
}
