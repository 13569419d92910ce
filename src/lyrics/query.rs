use once_cell::sync::Lazy;
use regex::Regex;

use crate::observer::Track;

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)").unwrap());
static BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[.*?\]").unwrap());
static DASH_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*.*$").unwrap());
static FEAT_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\bfeat\.|\bft\.|\bwith\b).*$").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Separators checked, in order, when picking the primary artist.
const ARTIST_SEPARATORS: [&str; 6] = [",", "&", "feat.", "ft.", "featuring", "with"];

/// "Song (Live) [Remix] - Radio Edit" -> "Song"
pub fn clean_track_title(title: &str) -> String {
    let t = PARENS.replace_all(title, "");
    let t = BRACKETS.replace_all(&t, "");
    let t = DASH_SUFFIX.replace(&t, "");
    let t = FEAT_SUFFIX.replace(&t, "");
    t.trim().to_string()
}

/// "Drake & Future" -> "Drake"
pub fn clean_artist_name(artist: &str) -> String {
    let first = artist
        .split(',')
        .next()
        .and_then(|s| s.split('&').next())
        .and_then(|s| s.split("feat").next())
        .and_then(|s| s.split("ft.").next())
        .unwrap_or("");
    WHITESPACE.replace_all(first, " ").trim().to_string()
}

/// Substring before the first separator found; the whole name otherwise.
pub fn main_artist(artist: &str) -> String {
    ARTIST_SEPARATORS
        .iter()
        .find_map(|sep| artist.find(sep).map(|idx| &artist[..idx]))
        .unwrap_or(artist)
        .trim()
        .to_string()
}

/// One way of turning a track into a search query.
pub struct QueryVariant {
    pub name: &'static str,
    pub build: fn(&Track) -> String,
}

fn raw(t: &Track) -> String {
    format!("{} {}", t.title, t.artist)
}

fn title_only(t: &Track) -> String {
    t.title.clone()
}

fn cleaned(t: &Track) -> String {
    format!("{} {}", clean_track_title(&t.title), clean_artist_name(&t.artist))
}

fn primary_artist_first(t: &Track) -> String {
    format!("{} {}", main_artist(&t.artist), clean_track_title(&t.title))
}

/// Tried in this order; the first variant with a hit wins.
pub const QUERY_VARIANTS: [QueryVariant; 4] = [
    QueryVariant { name: "raw", build: raw },
    QueryVariant { name: "title", build: title_only },
    QueryVariant { name: "cleaned", build: cleaned },
    QueryVariant { name: "primary-artist", build: primary_artist_first },
];

/// (variant name, query) pairs in search order.
pub fn build_queries(track: &Track) -> Vec<(&'static str, String)> {
    QUERY_VARIANTS
        .iter()
        .map(|v| (v.name, (v.build)(track)))
        .collect()
}
