//! Display-name heuristic for projects.
//!
//! A project only carries an opaque identifier, so its name is derived from the titles of
//! its member conversations. Stages run in order and the first one that produces a name wins:
//!
//! 1. explicit project-label patterns in a title ("X - Project", "Brand & Theme", "X Plan", ...)
//! 2. the first title containing a project keyword ("plan", "system", "app", ...)
//! 3. the most frequent distinctive words across the first ten titles
//! 4. the wordiest mid-length title
//! 5. `Project <id suffix>`
//!
//! The function is pure: the same title list always yields the same name.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

const MIN_PATTERN_NAME_LEN: usize = 3;
const MAX_PATTERN_NAME_LEN: usize = 50;
const MAX_TITLES_FOR_FREQUENCY: usize = 10;
const MIN_BEST_TITLE_LEN: usize = 10;
const MAX_BEST_TITLE_LEN: usize = 40;
const ID_SUFFIX_LEN: usize = 8;

/// Title patterns denoting an explicit project label, in priority order
static PROJECT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)^(.*?)\s*[:-]\s*Project",
        r"(?i)^Project\s*[:-]\s*(.*)$",
        r"(?i)^(.*?)\s+Project\s*$",
        r"(?i)^(.*?)\s*&\s*(.*)$",
        r"(?i)^(.*?)\s+(Plan|Planning|Strategy|Trip|Story|Stories)$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("project name pattern is valid"))
    .collect()
});

const PROJECT_KEYWORDS: [&str; 8] =
    ["plan", "strategy", "system", "platform", "app", "tool", "design", "development"];

const STOP_WORDS: [&str; 35] = [
    "the", "and", "for", "with", "from", "this", "that", "chat", "new", "how", "what", "why",
    "when", "where", "who", "can", "will", "should", "are", "but", "not", "all", "one", "had",
    "has", "was", "were", "you", "your", "they", "their", "our", "its", "his", "her",
];

const EXCLUDED_BRAND_WORDS: [&str; 4] = ["using", "about", "create", "make"];

/// Derive a display name for a project from its member titles.
///
/// `titles` should be de-duplicated and in first-seen order; empty titles are ignored.
/// The result is never empty.
///
/// # Examples
///
/// ```
/// use chat_archive_explorer::derive_project_name;
///
/// assert_eq!(derive_project_name("g-p-1", &["Website Redesign - Project"]), "Website Redesign");
/// assert_eq!(derive_project_name("g-p-1", &["Mars Mission Plan", "Mars Mission Budget"]), "Mars Mission Plan");
/// assert_eq!(derive_project_name("g-p-0123456789abcdef", &[] as &[&str]), "Project 89abcdef");
/// ```
pub fn derive_project_name<S: AsRef<str>>(project_id: &str, titles: &[S]) -> String {
    let titles: Vec<&str> = titles.iter().map(AsRef::as_ref).filter(|t| !t.is_empty()).collect();

    name_from_patterns(&titles)
        .or_else(|| name_from_keywords(&titles))
        .or_else(|| name_from_common_words(&titles))
        .or_else(|| name_from_best_title(&titles))
        .unwrap_or_else(|| fallback_name(project_id))
}

fn name_from_patterns(titles: &[&str]) -> Option<String> {
    for title in titles {
        for pattern in PROJECT_PATTERNS.iter() {
            let Some(captures) = pattern.captures(title) else {
                continue;
            };

            let group = |i| captures.get(i).map(|m| m.as_str()).filter(|s| !s.is_empty());
            let extracted = match (group(1), group(2)) {
                (Some(first), Some(second)) => format!("{} {}", first.trim(), second.trim()),
                (Some(first), None) => first.trim().to_string(),
                _ => continue,
            };

            let len = extracted.chars().count();
            if (MIN_PATTERN_NAME_LEN..=MAX_PATTERN_NAME_LEN).contains(&len) {
                let cleaned: String = extracted.chars().filter(|c| !matches!(c, '"' | '\'')).collect();
                if !cleaned.trim().is_empty() {
                    return Some(cleaned);
                }
            }
        }
    }
    None
}

fn name_from_keywords(titles: &[&str]) -> Option<String> {
    titles
        .iter()
        .find(|title| {
            let lower = title.to_lowercase();
            PROJECT_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
        })
        .map(|title| title.to_string())
}

fn name_from_common_words(titles: &[&str]) -> Option<String> {
    if titles.len() <= 1 {
        return None;
    }

    // (word, count) in first-seen order
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for title in titles.iter().take(MAX_TITLES_FOR_FREQUENCY) {
        for word in title.to_lowercase().split_whitespace() {
            if word.chars().count() <= 2 || STOP_WORDS.contains(&word) {
                continue;
            }
            match positions.get(word) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    positions.insert(word.to_string(), counts.len());
                    counts.push((word.to_string(), 1));
                }
            }
        }
    }

    let threshold = titles.len().min(2);
    let mut common: Vec<(String, usize)> =
        counts.into_iter().filter(|(_, count)| *count >= threshold).collect();
    // Stable sort keeps first-seen order among equal counts
    common.sort_by(|a, b| b.1.cmp(&a.1));
    let common: Vec<String> = common.into_iter().map(|(word, _)| word).collect();

    let brands: Vec<&str> = common
        .iter()
        .map(String::as_str)
        .filter(|word| {
            word.len() > 3
                && word.chars().all(|c| c.is_ascii_alphabetic())
                && !EXCLUDED_BRAND_WORDS.contains(word)
        })
        .collect();

    if brands.len() >= 2 {
        Some(title_case(&brands[..2].join(" ")))
    } else if brands.len() == 1 && common.len() >= 3 {
        Some(title_case(brands[0]))
    } else if common.len() >= 2 {
        Some(title_case(&common[..2].join(" ")))
    } else {
        None
    }
}

fn name_from_best_title(titles: &[&str]) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for title in titles {
        let len = title.chars().count();
        if len <= MIN_BEST_TITLE_LEN || len >= MAX_BEST_TITLE_LEN {
            continue;
        }
        let words = title.split_whitespace().count();
        if best.is_none_or(|(_, best_words)| words > best_words) {
            best = Some((title, words));
        }
    }

    best.map(|(title, _)| title.to_string())
}

/// `Project <suffix>` using the *last* eight characters of the id's final segment,
/// which is the part that differs between projects
fn fallback_name(project_id: &str) -> String {
    let suffix = match project_id.rsplit_once('-') {
        Some((_, last)) if !last.is_empty() => {
            let chars: Vec<char> = last.chars().collect();
            chars[chars.len().saturating_sub(ID_SUFFIX_LEN)..].iter().collect()
        }
        _ => project_id.to_string(),
    };
    format!("Project {}", suffix)
}

/// Upper-case every ASCII word character that starts a word
fn title_case(text: &str) -> String {
    let mut previous_is_word = false;
    text.chars()
        .map(|c| {
            let is_word = c.is_ascii_alphanumeric() || c == '_';
            let mapped = if is_word && !previous_is_word { c.to_ascii_uppercase() } else { c };
            previous_is_word = is_word;
            mapped
        })
        .collect()
}
