//! Deterministic CSS assembly.
//!
//! Groups resolved entries by theme and category, and renders each theme
//! into one stylesheet file per non-empty category. Sections always come
//! out in the fixed category order and entries sort lexicographically by
//! property name, so the same input graph always produces byte-identical
//! output (up to the export timestamp in the header).

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::classify::Category;
use crate::model::ResolvedEntry;
use crate::schedule::CollectionResolution;

/// Slug used when a collection has a single mode.
pub const SINGLE_THEME_SLUG: &str = "theme";

/// Suffix stripped from multi-mode theme slugs.
const LIGHT_SUFFIX: &str = "-light";

/// Derive the output slug for a mode.
///
/// Single-mode collections always use the literal slug `"theme"`.
/// Multi-mode collections kebab-case the full display name first, then
/// strip a trailing `-light` suffix if present: `"Brand Light"` becomes
/// `brand-light` and then `brand`, while `"Dark Mode"` stays `dark-mode`.
#[must_use]
pub fn theme_slug(mode_count: usize, mode_name: &str) -> String {
    if mode_count <= 1 {
        return SINGLE_THEME_SLUG.to_string();
    }
    let slugged = slug::slugify(mode_name);
    match slugged.strip_suffix(LIGHT_SUFFIX) {
        Some(stripped) => stripped.to_string(),
        None => slugged,
    }
}

/// Output property name for a variable: `--{category}-{kebab-name}`.
#[must_use]
pub fn property_name(category: Category, variable_name: &str) -> String {
    format!("--{}-{}", category.prefix(), slug::slugify(variable_name))
}

/// One rendered output file of a theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeFile {
    /// File name relative to the theme directory (e.g. `color.css`).
    pub name: String,
    pub content: String,
}

/// One theme's resolved entries, renderable to per-category files.
#[derive(Debug, Clone)]
pub struct ThemeDocument {
    slug: String,
    exported_at: DateTime<Utc>,
    entries: Vec<ResolvedEntry>,
}

impl ThemeDocument {
    fn new(slug: String, exported_at: DateTime<Utc>) -> Self {
        Self {
            slug,
            exported_at,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    /// Render this theme into one file per non-empty category, in the
    /// fixed category order.
    #[must_use]
    pub fn render_files(&self) -> Vec<ThemeFile> {
        let timestamp = self.exported_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let mut files = Vec::new();

        for category in Category::ALL {
            let mut section: Vec<&ResolvedEntry> = self
                .entries
                .iter()
                .filter(|entry| entry.category == category)
                .collect();
            if section.is_empty() {
                continue;
            }
            section.sort_by(|a, b| a.name.cmp(&b.name));

            let mut content = format!(
                "/* {slug} {prefix} tokens, exported {timestamp} */\n\n:root {{\n",
                slug = self.slug,
                prefix = category.prefix(),
            );
            for entry in section {
                content.push_str(&format!("  {}: {};\n", entry.name, entry.value));
            }
            content.push_str("}\n");

            files.push(ThemeFile {
                name: format!("{}.css", category.prefix()),
                content,
            });
        }

        files
    }
}

/// Group resolved collections into per-theme documents, keyed by slug.
///
/// Entries from different collections that map to the same slug end up in
/// the same document. The map is ordered so downstream output (file
/// lists, commit messages) is deterministic.
#[must_use]
pub fn assemble(
    collections: &[CollectionResolution],
    exported_at: DateTime<Utc>,
) -> BTreeMap<String, ThemeDocument> {
    let mut documents: BTreeMap<String, ThemeDocument> = BTreeMap::new();

    for collection in collections {
        let mode_count = collection.themes.len();
        for theme in &collection.themes {
            let slug = theme_slug(mode_count, &theme.mode.name);
            documents
                .entry(slug.clone())
                .or_insert_with(|| ThemeDocument::new(slug, exported_at))
                .entries
                .extend(theme.entries.iter().cloned());
        }
    }

    documents
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::Mode;
    use crate::schedule::ThemeResolution;

    fn entry(name: &str, value: &str, category: Category) -> ResolvedEntry {
        ResolvedEntry {
            name: name.into(),
            value: value.into(),
            category,
            source_id: "v".into(),
        }
    }

    fn exported_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
    }

    // === theme_slug ===

    #[test]
    fn test_single_mode_uses_literal_theme() {
        assert_eq!(theme_slug(1, "Default"), "theme");
        assert_eq!(theme_slug(0, "anything"), "theme");
    }

    #[test]
    fn test_multi_mode_kebab_cases_full_name() {
        assert_eq!(theme_slug(2, "Dark Mode"), "dark-mode");
        assert_eq!(theme_slug(2, "Light"), "light");
    }

    #[test]
    fn test_light_suffix_is_stripped_after_slugging() {
        assert_eq!(theme_slug(2, "Brand Light"), "brand");
        // No dash before "light": nothing to strip.
        assert_eq!(theme_slug(2, "Twilight"), "twilight");
    }

    // === property_name ===

    #[test]
    fn test_property_name_is_prefixed_kebab() {
        assert_eq!(
            property_name(Category::Color, "brand/primary 500"),
            "--color-brand-primary-500"
        );
        assert_eq!(
            property_name(Category::Measure, "spacing-md"),
            "--measure-spacing-md"
        );
    }

    // === rendering ===

    #[test]
    fn test_sections_follow_fixed_order_not_alphabetical() {
        let resolution = CollectionResolution {
            themes: vec![ThemeResolution {
                mode: Mode {
                    id: "m".into(),
                    name: "Only".into(),
                },
                entries: vec![
                    entry("--measure-spacing-sm", "0.5rem", Category::Measure),
                    entry("--color-accent", "hsl(0, 100%, 50%)", Category::Color),
                    entry("--font-font-weight-bold", "700", Category::Font),
                ],
            }],
            diagnostics: vec![],
        };

        let documents = assemble(&[resolution], exported_at());
        let document = documents.get("theme").unwrap();
        let files = document.render_files();

        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["color.css", "font.css", "measure.css"]);
    }

    #[test]
    fn test_entries_sorted_by_name_within_file() {
        let resolution = CollectionResolution {
            themes: vec![ThemeResolution {
                mode: Mode {
                    id: "m".into(),
                    name: "Only".into(),
                },
                entries: vec![
                    entry("--color-zebra", "hsl(0, 0%, 0%)", Category::Color),
                    entry("--color-accent", "hsl(0, 100%, 50%)", Category::Color),
                ],
            }],
            diagnostics: vec![],
        };

        let documents = assemble(&[resolution], exported_at());
        let files = documents.get("theme").unwrap().render_files();

        let accent = files[0].content.find("--color-accent").unwrap();
        let zebra = files[0].content.find("--color-zebra").unwrap();
        assert!(accent < zebra);
    }

    #[test]
    fn test_header_carries_export_timestamp() {
        let resolution = CollectionResolution {
            themes: vec![ThemeResolution {
                mode: Mode {
                    id: "m".into(),
                    name: "Only".into(),
                },
                entries: vec![entry("--color-accent", "hsl(0, 100%, 50%)", Category::Color)],
            }],
            diagnostics: vec![],
        };

        let documents = assemble(&[resolution], exported_at());
        let files = documents.get("theme").unwrap().render_files();

        assert!(files[0].content.starts_with("/* theme color tokens, exported 2025-03-14T09:30:00Z */"));
        assert!(files[0].content.contains(":root {\n  --color-accent: hsl(0, 100%, 50%);\n}\n"));
    }

    #[test]
    fn test_multi_mode_documents_keyed_by_slug() {
        let make_theme = |id: &str, name: &str| ThemeResolution {
            mode: Mode {
                id: id.into(),
                name: name.into(),
            },
            entries: vec![entry("--color-accent", "hsl(0, 100%, 50%)", Category::Color)],
        };
        let resolution = CollectionResolution {
            themes: vec![make_theme("m1", "Light"), make_theme("m2", "Dark")],
            diagnostics: vec![],
        };

        let documents = assemble(&[resolution], exported_at());
        let slugs: Vec<&str> = documents.keys().map(String::as_str).collect();
        assert_eq!(slugs, vec!["dark", "light"]);
    }

    #[test]
    fn test_same_slug_from_two_collections_merges() {
        let theme = |entries| ThemeResolution {
            mode: Mode {
                id: "m".into(),
                name: "Only".into(),
            },
            entries,
        };
        let first = CollectionResolution {
            themes: vec![theme(vec![entry("--color-a", "x", Category::Color)])],
            diagnostics: vec![],
        };
        let second = CollectionResolution {
            themes: vec![theme(vec![entry("--color-b", "y", Category::Color)])],
            diagnostics: vec![],
        };

        let documents = assemble(&[first, second], exported_at());
        assert_eq!(documents.len(), 1);
        assert_eq!(documents.get("theme").unwrap().entries().len(), 2);
    }
}
