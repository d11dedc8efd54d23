pub mod builder;
pub mod config;
pub mod markdown;
pub mod menu;
pub mod renderer;
pub mod scanner;
pub mod site;
pub mod template;

// Re-export main types
pub use builder::{BuildError, Site, SiteBuilder, build_site};
pub use menu::{MenuEntry, build_menu};
pub use renderer::{RenderContext, process_document};
pub use site::Page;
pub use template::{TemplateError, TemplateRenderer};
