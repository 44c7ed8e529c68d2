//! Browser side effects: speech synthesis, the expiry audio cue, the
//! startup media-map fetch, and the confetti JS interop.
//!
//! Everything here degrades silently: a missing capability or a failed
//! fetch is logged and skipped, never surfaced as an error.

use gloo_utils::window;
use log::{debug, warn};
use stage_scoreboard::countdown::VoiceCue;
use stage_scoreboard::MediaMap;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, Response, SpeechSynthesisUtterance};

use crate::config;

#[wasm_bindgen(module = "/confetti_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = fireConfetti)]
    fn fire_confetti_js();
}

/// Celebratory particle burst for score increases.
pub fn fire_confetti() {
    fire_confetti_js();
}

/// Speak one countdown cue. Cancels any utterance still in flight so at
/// most one is queued; skips silently where synthesis is unavailable.
pub fn speak(cue: &VoiceCue) {
    let synth = match window().speech_synthesis() {
        Ok(synth) => synth,
        Err(_) => {
            debug!("speech synthesis unavailable, skipping narration");
            return;
        }
    };
    let utterance = match SpeechSynthesisUtterance::new_with_text(&cue.phrase()) {
        Ok(utterance) => utterance,
        Err(err) => {
            warn!("failed to build utterance: {:?}", err);
            return;
        }
    };
    utterance.set_rate(config::SPEECH_RATE);
    utterance.set_pitch(config::SPEECH_PITCH);
    utterance.set_volume(config::SPEECH_VOLUME);
    synth.cancel();
    synth.speak(&utterance);
}

/// Pre-create and preload the time's-up audio element.
pub fn load_expiry_cue() -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(config::EXPIRY_CUE_URL) {
        Ok(audio) => {
            audio.set_preload("auto");
            audio.load();
            Some(audio)
        }
        Err(err) => {
            warn!("failed to create expiry cue element: {:?}", err);
            None
        }
    }
}

/// Play the time's-up cue. Playback failures are ignored.
pub fn play_expiry_cue(audio: &Option<HtmlAudioElement>) {
    if let Some(audio) = audio {
        let _ = audio.play();
    }
}

/// Fetch the direction-to-media mapping once at startup.
pub async fn fetch_media_map() -> Result<MediaMap, String> {
    let response = JsFuture::from(window().fetch_with_str(config::MEDIA_MAP_URL))
        .await
        .map_err(|err| format!("media map request failed: {:?}", err))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| "unexpected fetch response".to_string())?;
    let body_promise: js_sys::Promise = response
        .text()
        .map_err(|err| format!("media map body unavailable: {:?}", err))?;
    let body = JsFuture::from(body_promise)
        .await
        .map_err(|err| format!("media map read failed: {:?}", err))?;
    let body = body
        .as_string()
        .ok_or_else(|| "media map body is not text".to_string())?;
    MediaMap::from_json(&body).map_err(|err| err.to_string())
}
