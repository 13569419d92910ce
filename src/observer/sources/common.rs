use anyhow::{Context, Result};
use std::process::Command;

use crate::observer::Track;

/// Field separator our scripts print between title and artist.
pub const FIELD_SEP: &str = "|||";

/// Run a command and return trimmed stdout, failing on non-zero exit.
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .output()
        .with_context(|| format!("Failed to execute {}", program))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{} error: {}", program, stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Check if a process with this exact name is running via pgrep
pub fn is_process_running(name: &str) -> bool {
    match Command::new("pgrep").arg("-x").arg(name).output() {
        Ok(o) => o.status.success(),
        Err(_) => false,
    }
}

/// Parse `title|||artist`. `STOPPED`, empty output or an empty title mean
/// nothing is playing.
pub fn parse_track_output(output: &str) -> Option<Track> {
    let output = output.trim();
    if output.is_empty() || output == "STOPPED" {
        return None;
    }

    let mut parts = output.splitn(2, FIELD_SEP);
    let title = parts.next()?.trim();
    if title.is_empty() {
        return None;
    }
    let artist = parts.next().unwrap_or("");

    Some(Track::new(title, artist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::traits::UNKNOWN_ARTIST;

    #[test]
    fn test_parse_track_output() {
        let t = parse_track_output("Song Name|||Artist Name\n").unwrap();
        assert_eq!(t.title, "Song Name");
        assert_eq!(t.artist, "Artist Name");
    }

    #[test]
    fn test_missing_artist_falls_back() {
        let t = parse_track_output("Only Title|||").unwrap();
        assert_eq!(t.artist, UNKNOWN_ARTIST);
        let t = parse_track_output("Only Title").unwrap();
        assert_eq!(t.artist, UNKNOWN_ARTIST);
    }

    #[test]
    fn test_nothing_playing() {
        assert!(parse_track_output("STOPPED").is_none());
        assert!(parse_track_output("").is_none());
        assert!(parse_track_output("|||Artist").is_none());
    }

    #[test]
    fn test_title_may_contain_pipes() {
        let t = parse_track_output("A | B|||C").unwrap();
        assert_eq!(t.title, "A | B");
        assert_eq!(t.artist, "C");
    }
}
