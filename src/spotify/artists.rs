use crate::types::{Artist, FollowedArtistsResponse};

use super::{SpotifyApi, SpotifyClient, SpotifyError};

/// Page size used when walking the followed artists (Spotify's maximum).
pub const FOLLOWED_ARTISTS_PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    /// Retrieves a page of followed artists from the Spotify Web API.
    ///
    /// Fetches artists that the authenticated user follows using pagination with
    /// cursor-based navigation.
    ///
    /// # Arguments
    ///
    /// * `limit` - Maximum number of artists to return in this request (1-50)
    /// * `after` - Optional cursor for pagination, specifying where to start the next page
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing:
    /// - `Ok((Vec<Artist>, Option<String>))` - List of artists and optional next cursor
    /// - `Err(SpotifyError)` - Network error, API error, or missing authentication
    ///
    /// # Example
    ///
    /// ```
    /// let client = SpotifyClient::new(token);
    /// let (artists, next_cursor) = client.get_followed_artists(20, None).await?;
    ///
    /// // Fetch next page if available
    /// if let Some(cursor) = next_cursor {
    ///     let (more_artists, _) = client.get_followed_artists(20, Some(cursor)).await?;
    /// }
    /// ```
    pub async fn get_followed_artists(
        &self,
        limit: u32,
        after: Option<String>,
    ) -> Result<(Vec<Artist>, Option<String>), SpotifyError> {
        let mut query = vec![
            ("type".to_string(), "artist".to_string()),
            ("limit".to_string(), limit.to_string()),
        ];
        if let Some(after_val) = after {
            query.push(("after".to_string(), after_val));
        }

        let res: FollowedArtistsResponse = self.get_json("/me/following", &query).await?;
        let next_after = match res.artists.next {
            Some(_) => res.artists.cursors.and_then(|c| c.after),
            None => None,
        };

        Ok((res.artists.items, next_after))
    }
}

/// Walks every page of the user's followed artists.
///
/// Follows the `after` cursor until Spotify stops handing one out. A cursor
/// that does not move forward ends the walk as well. Any failing page fails
/// the whole walk.
pub async fn all_followed_artists<A>(api: &A, page_size: u32) -> Result<Vec<Artist>, SpotifyError>
where
    A: SpotifyApi + ?Sized,
{
    let mut artists = Vec::new();
    let mut after: Option<String> = None;

    loop {
        let (page, next) = api.followed_artists(page_size, after.clone()).await?;
        artists.extend(page);

        match next {
            Some(cursor) if after.as_deref() != Some(cursor.as_str()) => after = Some(cursor),
            _ => break,
        }
    }

    Ok(artists)
}
