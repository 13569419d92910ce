//! Now-playing detection. A [`TrackSource`] adapter is polled on a timer and
//! the [`TrackObserver`] turns raw observations into discrete events.

pub mod sources;
pub mod traits;

pub use sources::{app_name, get_source, StaticSource};
pub use traits::{Track, TrackSource};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Poll rate while waiting for the player to show up.
pub const WAITING_INTERVAL: Duration = Duration::from_millis(1000);
/// Poll rate once the player has been seen.
pub const WATCHING_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    /// The player reported a track for the first time.
    PlayerDetected,
    TrackChanged(Track),
    /// Something was playing and now nothing is.
    Idle,
    /// Playback came back on the same track after [`ObserverEvent::Idle`].
    Resumed,
}

/// Deduplicates observations: a track is only announced when its title
/// differs from the last announced one.
#[derive(Debug, Default)]
pub struct TrackObserver {
    last: Option<Track>,
    player_seen: bool,
    idle: bool,
}

impl TrackObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Track> {
        self.last.as_ref()
    }

    pub fn poll_interval(&self) -> Duration {
        if self.player_seen {
            WATCHING_INTERVAL
        } else {
            WAITING_INTERVAL
        }
    }

    pub fn observe(&mut self, observed: Option<Track>) -> Vec<ObserverEvent> {
        let mut events = Vec::new();

        let Some(track) = observed else {
            if self.player_seen && !self.idle {
                self.idle = true;
                events.push(ObserverEvent::Idle);
            }
            return events;
        };

        if !self.player_seen {
            self.player_seen = true;
            events.push(ObserverEvent::PlayerDetected);
        }

        let title_changed = self
            .last
            .as_ref()
            .map_or(true, |last| last.title != track.title);

        if title_changed {
            self.idle = false;
            self.last = Some(track.clone());
            events.push(ObserverEvent::TrackChanged(track));
        } else if self.idle {
            self.idle = false;
            events.push(ObserverEvent::Resumed);
        }

        events
    }
}

/// Poll `source` forever, forwarding events until the receiver goes away.
pub fn spawn_observer<E>(source: Arc<dyn TrackSource>, tx: mpsc::Sender<E>)
where
    E: From<ObserverEvent> + Send + 'static,
{
    tokio::spawn(async move {
        let mut observer = TrackObserver::new();
        tracing::info!(source = source.name(), "waiting for player");

        loop {
            let source_ref = source.clone();
            let observed = tokio::task::spawn_blocking(move || source_ref.current_track()).await;

            let track = match observed {
                Ok(Ok(track)) => track,
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "track source failed");
                    None
                }
                Err(e) => {
                    tracing::error!(error = %e, "track poll task panicked");
                    None
                }
            };

            for event in observer.observe(track) {
                if let ObserverEvent::TrackChanged(ref t) = event {
                    tracing::info!(title = %t.title, artist = %t.artist, "track changed");
                }
                if tx.send(E::from(event)).await.is_err() {
                    return;
                }
            }

            tokio::time::sleep(observer.poll_interval()).await;
        }
    });
}
