//! Navigation menu builder.
//!
//! A menu lists the immediate entries of a directory. The entry on the active
//! branch is expanded one level, recursively, so the result is the active spine
//! plus the siblings at every level along it.

use std::path::Path;

use serde::Serialize;
use tracing::trace;

use crate::builder::BuildError;
use crate::markdown::read_title;
use crate::scanner::{EntryKind, LANDING_FILE, SourceEntry, scan_dir};

/// One navigation node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub prefix: String,
    /// Target relative to the site root.
    pub path: String,
    pub name: String,
    /// Set on the entry whose name heads the selection path.
    pub selected: bool,
    /// Only populated for a selected directory.
    pub items: Vec<MenuEntry>,
}

/// Builds the menu for `dir`, whose entries live under the URL path `out_path`
/// (empty at the site root, otherwise ending in `/`).
///
/// `selection` is the remaining chain of names leading to the page being
/// rendered. A landing document is always placed first; everything else keeps
/// the directory's listing order.
pub fn build_menu(
    dir: &Path,
    out_path: &str,
    prefix: &str,
    selection: &[String],
) -> Result<Vec<MenuEntry>, BuildError> {
    trace!(dir = %dir.display(), ?selection, "Building menu");

    let mut menu = Vec::new();
    for entry in scan_dir(dir)? {
        let selected = selection.first().is_some_and(|head| *head == entry.name);

        match entry.kind {
            EntryKind::Directory => {
                menu.push(menu_node(&entry, out_path, prefix, selection, selected)?);
            }
            EntryKind::Document => {
                let leaf = menu_leaf(&entry, out_path, prefix, selected)?;
                if entry.is_landing() {
                    menu.insert(0, leaf);
                } else {
                    menu.push(leaf);
                }
            }
            EntryKind::Asset => {}
        }
    }

    Ok(menu)
}

fn menu_node(
    entry: &SourceEntry,
    out_path: &str,
    prefix: &str,
    selection: &[String],
    selected: bool,
) -> Result<MenuEntry, BuildError> {
    let node_path = format!("{out_path}{}/", entry.name);
    let items = if selected {
        build_menu(&entry.path, &node_path, prefix, &selection[1..])?
    } else {
        Vec::new()
    };

    Ok(MenuEntry {
        prefix: prefix.to_string(),
        path: format!("{node_path}{LANDING_FILE}"),
        name: format!("{}/", entry.name),
        selected,
        items,
    })
}

fn menu_leaf(
    entry: &SourceEntry,
    out_path: &str,
    prefix: &str,
    selected: bool,
) -> Result<MenuEntry, BuildError> {
    let title = read_title(&entry.path).map_err(|source| BuildError::Read {
        path: entry.path.clone(),
        source,
    })?;

    let path = if entry.is_landing() {
        format!("{out_path}{LANDING_FILE}")
    } else {
        format!("{out_path}{}/{LANDING_FILE}", entry.stem())
    };

    Ok(MenuEntry {
        prefix: prefix.to_string(),
        path,
        name: title,
        selected,
        items: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn selection(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn create_site() -> tempfile::TempDir {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a/deep")).unwrap();
        fs::create_dir_all(root.join("b")).unwrap();
        fs::write(root.join("about.md"), "About us\nText").unwrap();
        fs::write(root.join("index.md"), "Home\nWelcome").unwrap();
        fs::write(root.join("style.css"), "body {}").unwrap();
        fs::write(root.join("a/page.md"), "Page A\nText").unwrap();
        fs::write(root.join("a/deep/index.md"), "Deep\nText").unwrap();
        fs::write(root.join("b/page.md"), "Page B\nText").unwrap();
        temp_dir
    }

    #[test]
    fn test_landing_entry_comes_first() {
        let site = create_site();

        let menu = build_menu(site.path(), "", "", &[]).unwrap();

        let names: Vec<_> = menu.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "a/", "About us", "b/"]);
        assert_eq!(menu[0].path, "index.html");
        assert_eq!(menu[2].path, "about/index.html");
    }

    #[test]
    fn test_empty_selection_collapses_everything() {
        let site = create_site();

        let menu = build_menu(site.path(), "", "/prefix", &[]).unwrap();

        assert!(menu.iter().all(|e| !e.selected && e.items.is_empty()));
        assert!(menu.iter().all(|e| e.prefix == "/prefix"));
    }

    #[test]
    fn test_selected_branch_expands_siblings_stay_collapsed() {
        let site = create_site();

        let menu = build_menu(site.path(), "", "", &selection(&["a", "page.md"])).unwrap();

        let a = menu.iter().find(|e| e.name == "a/").unwrap();
        let b = menu.iter().find(|e| e.name == "b/").unwrap();
        assert!(a.selected);
        assert_eq!(a.path, "a/index.html");
        assert!(!b.selected);
        assert!(b.items.is_empty());

        let children: Vec<_> = a.items.iter().map(|e| (e.name.as_str(), e.selected)).collect();
        assert_eq!(children, vec![("deep/", false), ("Page A", true)]);
        assert_eq!(a.items[1].path, "a/page/index.html");
        assert!(a.items[0].items.is_empty());
    }

    #[test]
    fn test_selection_expands_along_the_whole_spine() {
        let site = create_site();

        let menu =
            build_menu(site.path(), "", "", &selection(&["a", "deep", "index.md"])).unwrap();

        let a = menu.iter().find(|e| e.name == "a/").unwrap();
        let deep = a.items.iter().find(|e| e.name == "deep/").unwrap();
        assert!(deep.selected);
        assert_eq!(deep.path, "a/deep/index.html");
        assert_eq!(deep.items.len(), 1);
        assert_eq!(deep.items[0].name, "Deep");
        assert_eq!(deep.items[0].path, "a/deep/index.html");
        assert!(deep.items[0].selected);
    }

    #[test]
    fn test_at_most_one_selected_per_level() {
        let site = create_site();

        let menu = build_menu(site.path(), "", "", &selection(&["b", "page.md"])).unwrap();

        assert_eq!(menu.iter().filter(|e| e.selected).count(), 1);
        for entry in &menu {
            assert_eq!(!entry.items.is_empty(), entry.selected && entry.name.ends_with('/'));
        }
    }

    #[test]
    fn test_unreadable_directory_is_an_error() {
        let temp_dir = tempfile::tempdir().unwrap();

        let result = build_menu(&temp_dir.path().join("missing"), "", "", &[]);

        assert!(matches!(result, Err(BuildError::Scan(_))));
    }
}
