use axum::{Extension, response::Html};
use axum_extra::extract::cookie::CookieJar;

use crate::server::AppState;

use super::session_id;

const SIGNED_IN: &str = r#"<form id="mood-form" method="post" action="/recommendations">
  <label for="mood_text">How are you feeling?</label>
  <textarea id="mood_text" name="mood_text" rows="3"></textarea>
  <button type="submit">Find music</button>
</form>
<p id="status"></p>
<ol id="tracks"></ol>
<p><a href="/logout">Log out</a></p>
<script>
const form = document.getElementById("mood-form");
const status = document.getElementById("status");
const list = document.getElementById("tracks");

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  status.textContent = "Finding music...";
  list.replaceChildren();

  const res = await fetch("/recommendations", {
    method: "POST",
    body: new URLSearchParams(new FormData(form)),
  });
  const data = await res.json();
  if (!res.ok) {
    status.textContent = data.error;
    if (res.status === 401) window.location.href = "/login";
    return;
  }

  status.textContent = `Mood: ${data.mood ?? "none"} (${data.source})`;
  for (const track of data.tracks) {
    const item = document.createElement("li");
    const link = document.createElement("a");
    link.textContent = `${track.name} - ${track.artist}`;
    if (track.spotify_url) link.href = track.spotify_url;
    item.append(link);
    if (track.preview_url) {
      const audio = document.createElement("audio");
      audio.controls = true;
      audio.src = track.preview_url;
      item.append(audio);
    }
    list.append(item);
  }
});
</script>"#;

const SIGNED_OUT: &str = r#"<p><a href="/login">Log in with Spotify</a></p>"#;

pub async fn index(jar: CookieJar, Extension(state): Extension<AppState>) -> Html<String> {
    let authenticated = match session_id(&jar) {
        Some(id) => state.sessions.is_authenticated(&id).await,
        None => false,
    };

    let body = if authenticated { SIGNED_IN } else { SIGNED_OUT };
    Html(format!(
        "<!doctype html><html><head><title>moodtunes</title></head><body><h1>moodtunes</h1>{}</body></html>",
        body
    ))
}
