use crate::types::{PlaybackState, RecentlyPlayedResponse};

use super::{SpotifyClient, SpotifyError};

impl SpotifyClient {
    /// Returns the ids of the most recently played tracks, newest first.
    ///
    /// Entries without an id (local files) are skipped.
    pub async fn get_recently_played(&self, limit: u32) -> Result<Vec<String>, SpotifyError> {
        let query = vec![("limit".to_string(), limit.to_string())];
        let res: RecentlyPlayedResponse = self
            .get_json("/me/player/recently-played", &query)
            .await?;

        Ok(res.items.into_iter().filter_map(|item| item.track.id).collect())
    }

    /// Current playback state, or `None` when nothing is playing.
    pub async fn get_playback_state(&self) -> Result<Option<PlaybackState>, SpotifyError> {
        self.get_optional_json("/me/player", &[]).await
    }
}
