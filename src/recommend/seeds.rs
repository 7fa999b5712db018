use std::collections::HashSet;

use crate::{
    spotify::{
        SpotifyApi,
        artists::{FOLLOWED_ARTISTS_PAGE_SIZE, all_followed_artists},
    },
    types::Artist,
    warning,
};

/// Upper bound on seeds per recommendation request, across all kinds.
pub const MAX_SEEDS: usize = 5;

/// Recently played tracks considered as seed candidates.
pub const RECENTLY_PLAYED_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedKind {
    Artist,
    Track,
    Genre,
}

/// Everything the user's account offers as seeds, before selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedCandidates {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
    pub genres: Vec<String>,
}

/// The seeds actually sent to Spotify. Never more than [`MAX_SEEDS`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedSet {
    pub artists: Vec<String>,
    pub tracks: Vec<String>,
    pub genres: Vec<String>,
}

impl SeedSet {
    /// Picks the first [`MAX_SEEDS`] candidates in artist, track, genre order.
    ///
    /// Artists therefore win over tracks and tracks over genres when the
    /// account offers more candidates than fit.
    pub fn select(candidates: &SeedCandidates) -> Self {
        let ordered = candidates
            .artists
            .iter()
            .map(|id| (SeedKind::Artist, id))
            .chain(candidates.tracks.iter().map(|id| (SeedKind::Track, id)))
            .chain(candidates.genres.iter().map(|g| (SeedKind::Genre, g)))
            .take(MAX_SEEDS);

        let mut seeds = SeedSet::default();
        for (kind, value) in ordered {
            match kind {
                SeedKind::Artist => seeds.artists.push(value.clone()),
                SeedKind::Track => seeds.tracks.push(value.clone()),
                SeedKind::Genre => seeds.genres.push(value.clone()),
            }
        }
        seeds
    }

    pub fn len(&self) -> usize {
        self.artists.len() + self.tracks.len() + self.genres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `seed_artists`, `seed_tracks` and `seed_genres`, each only when non-empty.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        [
            ("seed_artists", &self.artists),
            ("seed_tracks", &self.tracks),
            ("seed_genres", &self.genres),
        ]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .map(|(key, values)| (key.to_string(), values.join(",")))
        .collect()
    }
}

/// Gathers seed candidates from the user's account.
///
/// Followed artists are walked once and feed both the artist and the genre
/// candidates. Recently played tracks come from a single page. A failing call
/// is logged and leaves its categories empty; it never fails the request.
pub async fn collect_seeds<A>(api: &A) -> SeedCandidates
where
    A: SpotifyApi + ?Sized,
{
    let followed = match all_followed_artists(api, FOLLOWED_ARTISTS_PAGE_SIZE).await {
        Ok(artists) => artists,
        Err(e) => {
            warning!("Cannot load followed artists, no artist or genre seeds. Err: {}", e);
            Vec::new()
        }
    };

    let tracks = match api.recently_played(RECENTLY_PLAYED_LIMIT).await {
        Ok(ids) => ids,
        Err(e) => {
            warning!("Cannot load recently played tracks, no track seeds. Err: {}", e);
            Vec::new()
        }
    };

    SeedCandidates {
        artists: followed.iter().map(|a| a.id.clone()).collect(),
        genres: genres_of(&followed),
        tracks,
    }
}

/// Lowercased genre tags of `artists`, de-duplicated, first occurrence first.
pub fn genres_of(artists: &[Artist]) -> Vec<String> {
    let mut genres: Vec<String> = artists
        .iter()
        .flat_map(|a| a.genres.iter())
        .map(|g| g.trim().to_lowercase())
        .filter(|g| !g.is_empty())
        .collect();

    let mut seen = HashSet::new();
    genres.retain(|genre| seen.insert(genre.clone()));
    genres
}
