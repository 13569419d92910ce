use super::common::{parse_track_output, run_command, FIELD_SEP};
use crate::observer::{Track, TrackSource};
use anyhow::Result;

/// Any MPRIS player (spotify, ncspot, firefox...) read through `playerctl`.
pub struct MprisSource {
    player: String,
}

impl MprisSource {
    pub fn new(player: &str) -> Self {
        Self {
            player: player.to_string(),
        }
    }

    fn player_arg(&self) -> String {
        format!("--player={}", self.player)
    }
}

impl TrackSource for MprisSource {
    fn name(&self) -> &str {
        &self.player
    }

    fn current_track(&self) -> Result<Option<Track>> {
        let player = self.player_arg();

        // "No players found" exits non-zero; that is just nothing playing
        let status = match run_command("playerctl", &[&player, "status"]) {
            Ok(s) => s,
            Err(e) => {
                tracing::trace!(error = %e, "playerctl status failed");
                return Ok(None);
            }
        };
        if status == "Stopped" {
            return Ok(None);
        }

        let format = format!("{{{{title}}}}{}{{{{artist}}}}", FIELD_SEP);
        match run_command("playerctl", &[&player, "metadata", "--format", &format]) {
            Ok(output) => Ok(parse_track_output(&output)),
            Err(e) => {
                tracing::debug!(error = %e, player = %self.player, "playerctl metadata failed");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_arg() {
        assert_eq!(MprisSource::new("spotify").player_arg(), "--player=spotify");
    }
}
