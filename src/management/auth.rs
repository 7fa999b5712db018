use std::path::PathBuf;

use crate::{spotify, types::Token, warning};

/// Seconds before expiry at which the CLI token is refreshed.
const REFRESH_BUFFER_SECS: u64 = 240;

/// Keeps the CLI's Spotify token on disk between runs.
pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json)
            .await
            .map_err(|e| e.to_string())
    }

    /// Returns an access token, refreshing and persisting it first when it is
    /// about to expire. A failed refresh keeps the old token; Spotify will
    /// then answer with 401 and the caller is told to authenticate again.
    pub async fn get_valid_token(&mut self) -> String {
        if self.token.expires_within(REFRESH_BUFFER_SECS) {
            match spotify::auth::refresh_token(&self.token.refresh_token).await {
                Ok(new_token) => {
                    self.token = new_token;
                    if let Err(e) = self.persist().await {
                        warning!("Cannot persist refreshed token. Err: {}", e);
                    }
                }
                Err(e) => warning!("Cannot refresh token. Err: {}", e),
            }
        }

        self.token.access_token.clone()
    }

    fn token_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("moodtunes/cache/token.json");
        path
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
