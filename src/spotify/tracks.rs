use crate::{
    recommend::RecommendationRequest,
    types::{RecommendationsResponse, SeveralTracksResponse, Track},
};

use super::{SpotifyClient, SpotifyError};

/// Maximum number of ids accepted by `GET /tracks`.
pub const SEVERAL_TRACKS_MAX_IDS: usize = 50;

impl SpotifyClient {
    /// Asks Spotify for recommendations matching `request`.
    ///
    /// An absent `tracks` field is returned as an empty list; deciding what an
    /// empty answer means is up to the caller.
    pub async fn get_recommendations(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Track>, SpotifyError> {
        let res: RecommendationsResponse = self
            .get_json("/recommendations", &request.query_pairs())
            .await?;
        Ok(res.tracks.unwrap_or_default())
    }

    /// Looks tracks up by id, in batches of [`SEVERAL_TRACKS_MAX_IDS`].
    ///
    /// Ids Spotify does not know come back as `null` and are dropped, so the
    /// result can be shorter than `ids`.
    pub async fn get_several_tracks(&self, ids: &[&str]) -> Result<Vec<Track>, SpotifyError> {
        let mut tracks = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(SEVERAL_TRACKS_MAX_IDS) {
            let query = vec![("ids".to_string(), chunk.join(","))];
            let res: SeveralTracksResponse = self.get_json("/tracks", &query).await?;
            tracks.extend(res.tracks.into_iter().flatten());
        }
        Ok(tracks)
    }
}
