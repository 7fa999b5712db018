use crate::{types::UserProfile, warning};

use super::{SpotifyApi, SpotifyClient, SpotifyError};

pub const PREMIUM_PRODUCT: &str = "premium";

impl SpotifyClient {
    pub async fn get_current_user(&self) -> Result<UserProfile, SpotifyError> {
        self.get_json("/me", &[]).await
    }
}

/// Whether the signed in user has a premium subscription.
///
/// In-browser playback needs premium. A failed profile lookup is logged and
/// treated as a free account.
pub async fn is_premium<A>(api: &A) -> bool
where
    A: SpotifyApi + ?Sized,
{
    match api.current_user().await {
        Ok(profile) => profile.product.as_deref() == Some(PREMIUM_PRODUCT),
        Err(e) => {
            warning!("Cannot read user profile, assuming free account. Err: {}", e);
            false
        }
    }
}
