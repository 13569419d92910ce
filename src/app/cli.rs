use clap::Parser;
use std::path::PathBuf;

/// lyrica - now playing, Genius lyrics and translation next to your player 🎵
#[derive(Parser, Debug)]
#[command(name = "lyrica", version, about)]
pub struct Args {
    /// Player to watch (spotify, music, or any MPRIS name)
    #[arg(long, default_value = "spotify")]
    pub player: String,

    /// Use a fixed track instead of watching a player
    #[arg(long, requires = "artist")]
    pub title: Option<String>,

    /// Artist for --title
    #[arg(long, requires = "title")]
    pub artist: Option<String>,

    /// Print lyrics for the current track to stdout and exit
    #[arg(long)]
    pub once: bool,

    /// With --once, also print a translation into this language code
    #[arg(long, value_name = "LANG", requires = "once")]
    pub translate: Option<String>,

    /// Read settings from this file instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log verbosity for the log file (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lyrica"]).unwrap();
        assert_eq!(args.player, "spotify");
        assert_eq!(args.log_level, "info");
        assert!(!args.once);
        assert!(args.title.is_none());
    }

    #[test]
    fn test_static_track_needs_both_fields() {
        assert!(Args::try_parse_from(["lyrica", "--title", "Song"]).is_err());
        let args =
            Args::try_parse_from(["lyrica", "--title", "Song", "--artist", "Band"]).unwrap();
        assert_eq!(args.artist.as_deref(), Some("Band"));
    }

    #[test]
    fn test_translate_requires_once() {
        assert!(Args::try_parse_from(["lyrica", "--translate", "es"]).is_err());
        let args = Args::try_parse_from(["lyrica", "--once", "--translate", "es"]).unwrap();
        assert_eq!(args.translate.as_deref(), Some("es"));
    }
}
