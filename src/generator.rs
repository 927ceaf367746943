//! Keyword expansion: Cartesian product of each pattern's lists rendered through its templates.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::{Config, ConfigError, ListRef, Pattern, Vocabulary};
use crate::template::Template;

/// Contribution of one pattern before global deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternStats {
    pub name: String,
    /// Number of tuples in the pattern's Cartesian product
    pub combinations: usize,
    /// Non-empty strings the pattern offered to the keyword set
    pub candidates: usize,
}

#[derive(Debug)]
pub struct Generation {
    /// Unique keywords in ascending byte order
    pub keywords: Vec<String>,
    pub patterns: Vec<PatternStats>,
}

impl Generation {
    pub fn total_candidates(&self) -> usize {
        self.patterns.iter().map(|p| p.candidates).sum()
    }
}

/// Expand every pattern of `config` into one sorted, duplicate-free keyword list.
///
/// Validation runs first, so a bad config yields an error and no keywords.
pub fn generate(config: &Config) -> Result<Generation, ConfigError> {
    let compiled = config.compile()?;

    let mut keywords = BTreeSet::new();
    let patterns = config
        .patterns
        .iter()
        .zip(&compiled)
        .map(|(p, templates)| expand_pattern(p, templates, &config.vocabulary, &mut keywords))
        .collect();

    Ok(Generation {
        keywords: keywords.into_iter().collect(),
        patterns,
    })
}

/// Expects a validated pattern, so every referenced list exists.
fn expand_pattern(
    pattern: &Pattern,
    templates: &[Template],
    vocabulary: &Vocabulary,
    keywords: &mut BTreeSet<String>,
) -> PatternStats {
    let lists: Vec<&[String]> = pattern
        .lists
        .iter()
        .map(|r| vocabulary.get(&r.list).map_or(&[][..], |words| r.select(words)))
        .collect();
    let slots: Vec<&str> = pattern.lists.iter().map(ListRef::slot_name).collect();

    let mut stats = PatternStats {
        name: pattern.name.clone(),
        combinations: 0,
        candidates: 0,
    };

    if !templates.is_empty() {
        for tuple in Combinations::new(&lists) {
            stats.combinations += 1;
            for template in templates {
                let keyword = template.render(|slot| {
                    slots.iter().position(|s| *s == slot).map(|i| tuple[i])
                });
                if offer(keywords, keyword) {
                    stats.candidates += 1;
                }
            }
        }
    }

    for phrase in &pattern.phrases {
        if offer(keywords, phrase.clone()) {
            stats.candidates += 1;
        }
    }

    debug!(
        pattern = %stats.name,
        combinations = stats.combinations,
        candidates = stats.candidates,
        "expanded pattern"
    );
    stats
}

/// Insert a non-blank keyword. Returns whether it counted as a candidate,
/// regardless of whether the set already held it.
fn offer(keywords: &mut BTreeSet<String>, keyword: String) -> bool {
    if keyword.trim().is_empty() {
        return false;
    }
    keywords.insert(keyword);
    true
}

/// Cartesian product over word lists, rightmost list varying fastest.
///
/// Yields nothing when any list is empty and a single empty tuple when there
/// are no lists at all.
pub struct Combinations<'a> {
    lists: &'a [&'a [String]],
    indices: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    pub fn new(lists: &'a [&'a [String]]) -> Self {
        Self {
            lists,
            indices: vec![0; lists.len()],
            done: lists.iter().any(|l| l.is_empty()),
        }
    }
}

impl<'a> Iterator for Combinations<'a> {
    type Item = Vec<&'a str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let tuple = self
            .indices
            .iter()
            .zip(self.lists)
            .map(|(&i, list)| list[i].as_str())
            .collect();

        self.done = true;
        for pos in (0..self.indices.len()).rev() {
            self.indices[pos] += 1;
            if self.indices[pos] < self.lists[pos].len() {
                self.done = false;
                break;
            }
            self.indices[pos] = 0;
        }

        Some(tuple)
    }
}
