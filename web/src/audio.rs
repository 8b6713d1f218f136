use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use gloo::utils::document;
use minigames_core::GameKind;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, HtmlMediaElement};
use yew::Callback;

pub(crate) const MUSIC_ELEMENT_ID: &str = "gameMusic";

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct FadeSettings {
    pub target_volume: f64,
    pub step: f64,
    pub every_ms: u32,
}

impl FadeSettings {
    pub(crate) const fn for_game(kind: GameKind) -> Self {
        use GameKind::*;
        let (target_volume, step) = match kind {
            Clicker => (0.15, 0.02),
            Guess => (0.15, 0.01),
            Rocket => (0.2, 0.02),
            CosmicDodge => (0.3, 0.03),
            RockPaperScissors => (0.1, 0.01),
        };
        Self {
            target_volume,
            step,
            every_ms: 100,
        }
    }

    /// Volume after one more step, `None` once the target is reached.
    pub(crate) fn next_volume(&self, volume: f64) -> Option<f64> {
        if volume >= self.target_volume {
            None
        } else if self.step <= 0. {
            Some(self.target_volume)
        } else {
            Some((volume + self.step).min(self.target_volume))
        }
    }
}

/// Running volume ramp. Dropping it stops the ramp, not the music. The ramp
/// also ends by itself at the target volume.
#[derive(Debug)]
pub(crate) struct MusicFade {
    _alive: Rc<()>,
}

fn music_element() -> Option<HtmlAudioElement> {
    document()
        .get_element_by_id(MUSIC_ELEMENT_ID)
        .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok())
}

fn stop_all_audio() {
    let Ok(nodes) = document().query_selector_all("audio") else {
        return;
    };
    for i in 0..nodes.length() {
        if let Some(media) = nodes.get(i).and_then(|n| n.dyn_into::<HtmlMediaElement>().ok()) {
            let _ = media.pause();
            media.set_current_time(0.);
        }
    }
}

/// Starts playback; autoplay rejections are logged and otherwise ignored.
fn play(media: &HtmlMediaElement) {
    match media.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("music playback blocked: {:?}", err);
            }
        }),
        Err(err) => log::warn!("music playback failed: {:?}", err),
    }
}

/// Pauses every other track and ramps the game music up from silence.
pub(crate) fn fade_in(settings: FadeSettings) -> Option<MusicFade> {
    let Some(audio) = music_element() else {
        log::debug!("no #{} element, playing without music", MUSIC_ELEMENT_ID);
        return None;
    };

    stop_all_audio();
    audio.set_volume(0.);
    play(&audio);

    let alive = Rc::new(());
    schedule_step(audio, settings, Rc::downgrade(&alive));
    Some(MusicFade { _alive: alive })
}

fn schedule_step(audio: HtmlAudioElement, settings: FadeSettings, alive: Weak<()>) {
    Timeout::new(settings.every_ms, move || {
        if alive.upgrade().is_none() {
            return;
        }
        let Some(volume) = settings.next_volume(audio.volume()) else {
            return;
        };
        audio.set_volume(volume);
        if volume < settings.target_volume {
            schedule_step(audio, settings, alive);
        }
    })
    .forget();
}

pub(crate) fn is_playing() -> bool {
    music_element().is_some_and(|audio| !audio.paused())
}

/// Reports every play and pause of the game music until the listeners drop.
pub(crate) fn watch_playback(on_change: Callback<bool>) -> Vec<EventListener> {
    let Some(audio) = music_element() else {
        return Vec::new();
    };
    [("play", true), ("pause", false)]
        .into_iter()
        .map(|(event_type, playing)| {
            let on_change = on_change.clone();
            EventListener::new(&audio, event_type, move |_| on_change.emit(playing))
        })
        .collect()
}

/// Flips between playing and paused, returns whether music is now playing.
pub(crate) fn toggle_music() -> bool {
    let Some(audio) = music_element() else {
        return false;
    };
    if audio.paused() {
        play(&audio);
        true
    } else {
        let _ = audio.pause();
        false
    }
}
