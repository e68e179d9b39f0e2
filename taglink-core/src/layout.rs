//! Category layout file
//!
//! A line-oriented text file listing what goes on the index page:
//!
//! ```text
//! [Images]
//! Surface                  Surface8u
//! Channel                  Channel8u
//!
//! [OpenGL]
//! GL Texture               ci::gl::Texture2d
//! ```
//!
//! A line whose first word starts with `[` opens a category. Every other non-blank line is a
//! phrase followed by the symbol it links to; the symbol is the last word. Lines starting with
//! `#` are comments.

use crate::error::Error;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutEntry {
    pub phrase: String,
    pub symbol: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub entries: Vec<LayoutEntry>,
}

impl Category {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    pub categories: Vec<Category>,
}

impl Layout {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Ok(Self::parse(&source))
    }

    /// Parse layout text. Parsing never fails: unknown shapes are read as entries.
    pub fn parse(source: &str) -> Self {
        let mut categories = Vec::new();
        // Entries that show up before the first header land in an implicit, unnamed category
        // which is only kept when it has entries. Declared categories are always kept.
        let mut current = Category::new("");
        let mut implicit = true;

        for line in source.lines() {
            let line = line.trim();
            let mut words: Vec<&str> = line.split_whitespace().collect();
            let Some(first) = words.first() else {
                continue;
            };
            if first.starts_with('#') {
                continue;
            }
            if first.starts_with('[') {
                let previous = std::mem::replace(&mut current, Category::new(header_name(line)));
                if !implicit || !previous.entries.is_empty() {
                    categories.push(previous);
                }
                implicit = false;
                continue;
            }
            let symbol = words.pop().unwrap_or_default();
            let phrase = if words.is_empty() {
                symbol.to_string()
            } else {
                words.join(" ")
            };
            current.entries.push(LayoutEntry {
                phrase,
                symbol: symbol.to_string(),
            });
        }

        if !implicit || !current.entries.is_empty() {
            categories.push(current);
        }
        Layout { categories }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All entries across categories, in file order.
    pub fn entries(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }
}

fn header_name(line: &str) -> String {
    line.replace(['[', ']'], "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(phrase: &str, symbol: &str) -> LayoutEntry {
        LayoutEntry {
            phrase: phrase.to_string(),
            symbol: symbol.to_string(),
        }
    }

    #[test]
    fn parses_categories_and_entries() {
        let layout = Layout::parse(
            "[Images]\nSurface   Surface8u\nImage IO   ImageIo\n\n[OpenGL]\nGL Texture  ci::gl::Texture2d\n",
        );
        assert_eq!(layout.categories.len(), 2);
        assert_eq!(layout.categories[0].name, "Images");
        assert_eq!(
            layout.categories[0].entries,
            vec![entry("Surface", "Surface8u"), entry("Image IO", "ImageIo")]
        );
        assert_eq!(layout.categories[1].name, "OpenGL");
        assert_eq!(
            layout.categories[1].entries,
            vec![entry("GL Texture", "ci::gl::Texture2d")]
        );
    }

    #[test]
    fn phrase_words_are_joined_with_single_spaces() {
        let layout = Layout::parse("[Basics]\n   Vector \t  class    Vec3   \n");
        assert_eq!(layout.categories[0].entries, vec![entry("Vector class", "Vec3")]);
    }

    #[test]
    fn single_word_line_is_its_own_phrase() {
        let layout = Layout::parse("[Basics]\nRand\n");
        assert_eq!(layout.categories[0].entries, vec![entry("Rand", "Rand")]);
    }

    #[test]
    fn header_brackets_are_stripped() {
        let layout = Layout::parse("[ Audio & Video ]\n");
        assert_eq!(layout.categories[0].name, "Audio & Video");
        assert!(layout.categories[0].entries.is_empty());
    }

    #[test]
    fn entries_before_any_header_go_into_unnamed_category() {
        let layout = Layout::parse("Timer Timer\n[Math]\nRandom Rand\n");
        assert_eq!(layout.categories.len(), 2);
        assert_eq!(layout.categories[0].name, "");
        assert_eq!(layout.categories[0].entries, vec![entry("Timer", "Timer")]);
        assert_eq!(layout.categories[1].name, "Math");
    }

    #[test]
    fn empty_header_is_still_a_category() {
        let layout = Layout::parse("[]\n[Math]\nPerlin Perlin\n[]\n");
        assert_eq!(layout.categories.len(), 3);
        assert_eq!(layout.categories[0].name, "");
        assert!(layout.categories[0].entries.is_empty());
        assert_eq!(layout.categories[1].name, "Math");
        assert_eq!(layout.categories[2].name, "");
        assert!(layout.categories[2].entries.is_empty());
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let layout = Layout::parse("# generated by hand\n\n[Math]\n# Rand later\nPerlin Perlin\n");
        assert_eq!(layout.categories.len(), 1);
        assert_eq!(layout.entries().count(), 1);
    }

    #[test]
    fn empty_source_gives_empty_layout() {
        assert!(Layout::parse("").is_empty());
        assert!(Layout::parse("\n   \n").is_empty());
    }

    #[test]
    fn missing_layout_file_is_not_found() {
        let err = Layout::from_path("/definitely/not/here/class_layout.txt").unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
