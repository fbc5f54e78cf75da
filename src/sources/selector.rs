use scraper::{ElementRef, Html, Selector};

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("invalid selector {pattern:?}: {message}")]
    Invalid { pattern: String, message: String },
}

/// One CSS pattern in a chain, keeping its source text for diagnostics.
#[derive(Debug, Clone)]
pub struct Pattern {
    css: &'static str,
    selector: Selector,
}

impl Pattern {
    pub fn parse(css: &'static str) -> Result<Self, PatternError> {
        let selector = Selector::parse(css).map_err(|e| PatternError::Invalid {
            pattern: css.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { css, selector })
    }

    pub fn css(&self) -> &'static str {
        self.css
    }
}

/// Ordered fallback patterns for one field. Earlier patterns win.
#[derive(Debug, Clone, Default)]
pub struct PatternChain {
    patterns: Vec<Pattern>,
    /// All patterns as one selector group, for document-order selection.
    union: Option<Selector>,
}

impl PatternChain {
    pub fn parse(patterns: &[&'static str]) -> Result<Self, PatternError> {
        let patterns = patterns
            .iter()
            .map(|&css| Pattern::parse(css))
            .collect::<Result<Vec<_>, _>>()?;

        let union = if patterns.is_empty() {
            None
        } else {
            let group = patterns
                .iter()
                .map(Pattern::css)
                .collect::<Vec<_>>()
                .join(", ");
            Some(Selector::parse(&group).map_err(|e| PatternError::Invalid {
                pattern: group.clone(),
                message: e.to_string(),
            })?)
        };

        Ok(Self { patterns, union })
    }

    /// Every element in `document` matching any pattern, once each, in
    /// document order.
    pub fn select_all<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        match &self.union {
            Some(union) => document.select(union).collect(),
            None => Vec::new(),
        }
    }
}

/// Trim and collapse internal whitespace runs to a single space.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text nodes are joined with a space so adjacent block elements
/// (`<li>` bullets, label spans) stay separate words.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_text(&element.text().collect::<Vec<_>>().join(" "))
}

/// First non-empty text produced by the chain, with the index of the pattern
/// that produced it. Patterns after the winning one are not evaluated.
pub fn extract_field_indexed(fragment: ElementRef<'_>, chain: &PatternChain) -> Option<(usize, String)> {
    first_non_empty(&chain.patterns, |pattern| {
        fragment
            .select(&pattern.selector)
            .next()
            .map(element_text)
            .unwrap_or_default()
    })
}

/// Calls `text_of` on each candidate in order and stops at the first
/// non-empty result.
fn first_non_empty<T>(candidates: &[T], mut text_of: impl FnMut(&T) -> String) -> Option<(usize, String)> {
    candidates.iter().enumerate().find_map(|(index, candidate)| {
        let text = text_of(candidate);
        (!text.is_empty()).then_some((index, text))
    })
}

/// Normalized text of the first matching pattern, or an empty string.
pub fn extract_field(fragment: ElementRef<'_>, chain: &PatternChain) -> String {
    extract_field_indexed(fragment, chain)
        .map(|(_, text)| text)
        .unwrap_or_default()
}

/// First non-empty `attribute` value on an element matched by the chain.
pub fn extract_attr(fragment: ElementRef<'_>, chain: &PatternChain, attribute: &str) -> Option<String> {
    chain.patterns.iter().find_map(|pattern| {
        fragment
            .select(&pattern.selector)
            .next()
            .and_then(|el| el.value().attr(attribute))
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(String::from)
    })
}

/// Root-relative links get the source origin; anything else is kept as is.
pub fn resolve_link(href: &str, origin: &str) -> String {
    if href.starts_with('/') {
        format!("{}{href}", origin.trim_end_matches('/'))
    } else {
        href.to_string()
    }
}
