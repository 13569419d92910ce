use super::common::{is_process_running, parse_track_output, run_command};
use crate::observer::{Track, TrackSource};
use anyhow::Result;

/// Spotify / Music desktop app, read over AppleScript 🍎
pub struct AppleScriptSource {
    app: String,
}

impl AppleScriptSource {
    pub fn new(app: &str) -> Self {
        Self {
            app: app.to_string(),
        }
    }

    fn script(&self) -> String {
        format!(
            r#"
            tell application "{}"
                if player state is stopped then
                    return "STOPPED"
                end if

                set tName to name of current track
                set tArtist to artist of current track
                return tName & "|||" & tArtist
            end tell
        "#,
            self.app
        )
    }
}

impl TrackSource for AppleScriptSource {
    fn name(&self) -> &str {
        &self.app
    }

    fn current_track(&self) -> Result<Option<Track>> {
        if !is_process_running(&self.app) {
            return Ok(None);
        }

        match run_command("osascript", &["-e", &self.script()]) {
            Ok(output) => Ok(parse_track_output(&output)),
            Err(e) => {
                tracing::debug!(error = %e, app = %self.app, "AppleScript query failed");
                Ok(None)
            }
        }
    }
}
