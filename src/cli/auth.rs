use crate::{server::AppState, spotify};

pub async fn auth(state: AppState) {
    spotify::auth::auth(state).await;
}
