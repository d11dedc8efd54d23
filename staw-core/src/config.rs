use serde::{Deserialize, Serialize};

/// Site-wide settings shared by every rendered page.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title, required.
    pub title: Option<String>,
    /// URL prefix prepended to every menu link, e.g. for local testing.
    pub prefix: String,
    /// Stylesheet copied verbatim into the output root.
    pub css: Option<String>,
}
