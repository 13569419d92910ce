//! Pulls lyrics text out of a Genius song page.
//!
//! Genius keeps renaming its styled-component classes, so containers are
//! located with a ranked list of selector strategies; the first strategy that
//! matches anything decides which elements are read.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use thiserror::Error;

/// Shorter than this after cleanup counts as "no lyrics".
pub const MIN_LYRICS_CHARS: usize = 20;

static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").unwrap());
static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .unwrap()
});
static BR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());
static DIV_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</div>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static SECTION_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());
static NUMERIC_ENTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));").unwrap());
static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static SCRIPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").unwrap());
static STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").unwrap());

/// Elements that never have content.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScrapeError {
    #[error("could not find lyrics on the page")]
    NoContainer,
    #[error("lyrics extracted but appear to be empty")]
    TooShort(usize),
}

/// Attributes of one opening tag.
pub struct Attributes(HashMap<String, String>);

impl Attributes {
    fn parse(raw: &str) -> Self {
        let map = ATTRIBUTE
            .captures_iter(raw)
            .map(|c| {
                let value = c
                    .get(2)
                    .or_else(|| c.get(3))
                    .or_else(|| c.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                (c[1].to_ascii_lowercase(), value.to_string())
            })
            .collect();
        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whole-token class match, like a `.class` selector.
    pub fn has_class(&self, class: &str) -> bool {
        self.get("class")
            .is_some_and(|c| c.split_whitespace().any(|t| t == class))
    }
}

pub struct SelectorStrategy {
    pub name: &'static str,
    pub matches: fn(&Attributes) -> bool,
}

/// Most specific first.
pub const SELECTOR_STRATEGIES: [SelectorStrategy; 4] = [
    SelectorStrategy {
        name: r#"[data-lyrics-container="true"]"#,
        matches: |a| a.get("data-lyrics-container") == Some("true"),
    },
    SelectorStrategy {
        name: ".Lyrics__Container-sc-1ynbvzw-1",
        matches: |a| a.has_class("Lyrics__Container-sc-1ynbvzw-1"),
    },
    SelectorStrategy {
        name: r#"[class*="Lyrics__Container"]"#,
        matches: |a| a.get("class").is_some_and(|c| c.contains("Lyrics__Container")),
    },
    SelectorStrategy {
        name: ".lyrics",
        matches: |a| a.has_class("lyrics"),
    },
];

/// Drop markup a browser never renders: comments, scripts, styles.
pub fn strip_inert(html: &str) -> String {
    let t = COMMENT.replace_all(html, "");
    let t = SCRIPT.replace_all(&t, "");
    STYLE.replace_all(&t, "").into_owned()
}

/// Inner HTML of every element accepted by `matches`, in document order.
/// Elements nested inside an earlier match are not reported twice. Void,
/// self-closed and unclosed elements have empty inner HTML.
pub fn select_inner_html<'a>(html: &'a str, matches: fn(&Attributes) -> bool) -> Vec<&'a str> {
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(caps) = OPEN_TAG.captures_at(html, pos) {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(pos..pos + 1);
        let tag = &caps[1];
        let raw_attrs = &caps[2];
        pos = whole.end;

        if !matches(&Attributes::parse(raw_attrs)) {
            continue;
        }

        let is_void = VOID_ELEMENTS.iter().any(|v| tag.eq_ignore_ascii_case(v));
        if is_void || raw_attrs.trim_end().ends_with('/') {
            found.push("");
            continue;
        }

        match find_close(html, tag, whole.end) {
            Some((inner_end, after)) => {
                found.push(&html[whole.end..inner_end]);
                pos = after;
            }
            None => found.push(""),
        }
    }

    found
}

/// Find the close tag balancing an element of `tag` opened just before
/// `from`. Returns (start of close tag, end of close tag).
fn find_close(html: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let pattern = format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(tag));
    let re = Regex::new(&pattern).ok()?;
    let mut depth = 1usize;

    for m in re.captures_iter(&html[from..]) {
        let whole = m.get(0)?;
        let closing = !m[1].is_empty();
        if closing {
            depth -= 1;
            if depth == 0 {
                return Some((from + whole.start(), from + whole.end()));
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    None
}

/// Turn one container's markup into display text.
pub fn html_to_text(inner: &str) -> String {
    let t = BR.replace_all(inner, "\n");
    let t = DIV_CLOSE.replace_all(&t, "\n");
    let t = ANY_TAG.replace_all(&t, "");
    let t = decode_entities(&t);
    let t = SECTION_HEADER.replace_all(&t, "\n$0\n");
    let t = BLANK_RUNS.replace_all(&t, "\n\n");
    t.trim().to_string()
}

fn decode_entities(s: &str) -> String {
    let s = NUMERIC_ENTITY.replace_all(s, |c: &regex::Captures| {
        let code = match (c.get(1), c.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        code.and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| c[0].to_string())
    });

    // &amp; last so "&amp;lt;" stays "&lt;"
    s.replace("&quot;", "\"")
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Run the strategies in order and build the lyrics from the first one that
/// finds containers.
pub fn extract_lyrics(html: &str) -> Result<String, ScrapeError> {
    let html = strip_inert(html);
    let (strategy, containers) = SELECTOR_STRATEGIES
        .iter()
        .map(|s| (s, select_inner_html(&html, s.matches)))
        .find(|(_, found)| !found.is_empty())
        .ok_or(ScrapeError::NoContainer)?;

    tracing::debug!(
        selector = strategy.name,
        containers = containers.len(),
        "found lyrics containers"
    );

    let lyrics = containers
        .iter()
        .map(|c| html_to_text(c))
        .collect::<Vec<_>>()
        .join("\n\n");
    let lyrics = lyrics.trim();

    let chars = lyrics.chars().count();
    if chars < MIN_LYRICS_CHARS {
        return Err(ScrapeError::TooShort(chars));
    }

    Ok(lyrics.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENIUS_PAGE: &str = r#"
        <html><body>
        <div class="SongHeader">Song</div>
        <div data-lyrics-container="true" class="Lyrics__Container-sc-abc">[Verse 1]<br/>I&#x27;m walking down the line<br>With &quot;nothing&quot; on my mind<br/><div class="inner">Inline bit</div></div>
        <div class="Ad">buy stuff</div>
        <div data-lyrics-container="true" class="Lyrics__Container-sc-abc">[Chorus]<br/>Rock &amp; roll<br/>Forever</div>
        </body></html>
    "#;

    #[test]
    fn test_structured_container_wins() {
        let lyrics = extract_lyrics(GENIUS_PAGE).unwrap();
        assert_eq!(
            lyrics,
            "[Verse 1]\n\nI'm walking down the line\nWith \"nothing\" on my mind\nInline bit\n\n[Chorus]\n\nRock & roll\nForever"
        );
    }

    #[test]
    fn test_nested_divs_are_balanced() {
        let found = select_inner_html(GENIUS_PAGE, SELECTOR_STRATEGIES[0].matches);
        assert_eq!(found.len(), 2);
        assert!(found[0].ends_with(r#"<div class="inner">Inline bit</div>"#));
    }

    #[test]
    fn test_falls_back_to_partial_class_match() {
        let html = r#"<div class="Lyrics__Container-sc-zzz other">First line of the song<br>Second line here</div>"#;
        assert!(select_inner_html(html, SELECTOR_STRATEGIES[0].matches).is_empty());
        assert!(select_inner_html(html, SELECTOR_STRATEGIES[1].matches).is_empty());
        assert_eq!(
            extract_lyrics(html).unwrap(),
            "First line of the song\nSecond line here"
        );
    }

    #[test]
    fn test_legacy_lyrics_class() {
        let html = r#"<div class='lyrics'><p>Old style page<br/>still has words</p></div><div class="lyrics-footer">x</div>"#;
        assert_eq!(extract_lyrics(html).unwrap(), "Old style page\nstill has words");
    }

    #[test]
    fn test_no_container_is_an_error() {
        let html = "<html><body><div class=\"not-it\">Nothing here at all, really</div></body></html>";
        assert_eq!(extract_lyrics(html), Err(ScrapeError::NoContainer));
    }

    #[test]
    fn test_trivial_text_is_an_error() {
        let html = r#"<div data-lyrics-container="true"><br/> <br/></div>"#;
        assert_eq!(extract_lyrics(html), Err(ScrapeError::TooShort(0)));
    }

    #[test]
    fn test_blank_runs_collapse() {
        assert_eq!(html_to_text("a<br><br><br><br>b"), "a\n\nb");
    }

    #[test]
    fn test_entities_decode_once() {
        assert_eq!(decode_entities("&amp;lt; &lt;"), "&lt; <");
        assert_eq!(decode_entities("&amp;#8217;"), "&#8217;");
    }

    #[test]
    fn test_numeric_entities() {
        assert_eq!(decode_entities("Don&#8217;t stop"), "Don\u{2019}t stop");
        assert_eq!(decode_entities("Don&#x2019;t &#X27;"), "Don\u{2019}t '");
        assert_eq!(decode_entities("&#39;bad&#xD800;"), "'bad&#xD800;");
    }

    #[test]
    fn test_void_element_has_no_lyrics() {
        let html = r#"<img class="lyrics" src="x.png"><div class="footer">Cookie policy and terms of service for this website</div>"#;
        assert_eq!(select_inner_html(html, SELECTOR_STRATEGIES[3].matches), vec![""]);
        assert_eq!(extract_lyrics(html), Err(ScrapeError::TooShort(0)));

        let html = r#"<input class="lyrics"><p>Newsletter signup text that is long enough</p>"#;
        assert_eq!(extract_lyrics(html), Err(ScrapeError::TooShort(0)));
    }

    #[test]
    fn test_unclosed_element_does_not_swallow_page() {
        let html = r#"<p class="lyrics">dangling<div class="footer">Cookie policy and terms of service</div>"#;
        assert_eq!(select_inner_html(html, SELECTOR_STRATEGIES[3].matches), vec![""]);
        assert_eq!(extract_lyrics(html), Err(ScrapeError::TooShort(0)));
    }

    #[test]
    fn test_commented_markup_is_ignored() {
        let html = r#"<!-- <div class="lyrics">old template placeholder text here</div> -->"#;
        assert_eq!(extract_lyrics(html), Err(ScrapeError::NoContainer));

        let html = r#"<!-- <div class="lyrics">stale</div> --><div class="lyrics">Real words of the song here</div>"#;
        assert_eq!(extract_lyrics(html).unwrap(), "Real words of the song here");
    }

    #[test]
    fn test_script_and_style_bodies_are_ignored() {
        let html = r#"<script>var t = '<div class="lyrics">injected by a script tag</div>';</script>
            <style>.lyrics { color: red; }</style>
            <div class="footer">nothing</div>"#;
        assert_eq!(extract_lyrics(html), Err(ScrapeError::NoContainer));
    }
}
