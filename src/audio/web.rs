//! WebAudio backend
//!
//! Decoded sound files are fetched in the background after `unlock`. Until a
//! file is ready (or if it fails) a procedurally generated sound plays
//! instead - no cue ever waits on a download.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{
    AudioBuffer, AudioBufferSourceNode, AudioContext, GainNode, OscillatorNode, OscillatorType,
    Response,
};

use super::{AudioSink, MusicTracker, SoundKey};
use crate::assets::{AssetCache, AssetError};
use crate::settings::Settings;

type SoundCache = Rc<RefCell<AssetCache<SoundKey, AudioBuffer>>>;

/// Gain of the fallback melody once it fades in
const FALLBACK_MUSIC_GAIN: f32 = 0.12;
/// Gain and length of the fallback hit blip
const FALLBACK_HIT_GAIN: f32 = 0.18;
const FALLBACK_HIT_SECS: f64 = 0.06;

/// Whatever is producing the current music track
enum MusicNode {
    Decoded(AudioBufferSourceNode),
    Procedural {
        generation: u64,
        lead: OscillatorNode,
        octave: OscillatorNode,
        gain: GainNode,
    },
}

impl MusicNode {
    fn shut_down(self) {
        match self {
            MusicNode::Decoded(src) => {
                src.stop().ok();
                src.disconnect().ok();
            }
            MusicNode::Procedural {
                lead, octave, gain, ..
            } => {
                lead.stop().ok();
                octave.stop().ok();
                lead.disconnect().ok();
                octave.disconnect().ok();
                gain.disconnect().ok();
            }
        }
    }
}

/// Audio manager for the browser
pub struct WebAudio {
    ctx: Option<AudioContext>,
    master: Option<GainNode>,
    settings: Settings,
    sounds: SoundCache,
    music: MusicTracker,
    music_node: Option<MusicNode>,
}

impl WebAudio {
    pub fn new(settings: Settings) -> Self {
        Self {
            ctx: None,
            master: None,
            settings,
            sounds: Rc::new(RefCell::new(AssetCache::new())),
            music: MusicTracker::new(),
            music_node: None,
        }
    }

    /// Context and master bus, resuming the context if the browser suspended it
    fn output(&self) -> Option<(AudioContext, GainNode)> {
        let ctx = self.ctx.clone()?;
        let master = self.master.clone()?;
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        Some((ctx, master))
    }

    /// Start a background fetch + decode unless one was already requested
    fn load(&self, ctx: &AudioContext, key: SoundKey) {
        if !self.sounds.borrow_mut().request(key) {
            return;
        }
        let cache = self.sounds.clone();
        let ctx = ctx.clone();
        spawn_local(async move {
            let result = fetch_and_decode(&ctx, key.path()).await;
            cache.borrow_mut().resolve(key, result);
        });
    }

    fn decoded(&self, key: SoundKey) -> Option<AudioBuffer> {
        self.sounds.borrow().get(key).cloned()
    }

    /// A gain stage feeding the master bus
    fn channel(ctx: &AudioContext, master: &GainNode, level: f32) -> Option<GainNode> {
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(level);
        gain.connect_with_audio_node(master).ok()?;
        Some(gain)
    }

    fn play_decoded(
        ctx: &AudioContext,
        out: &GainNode,
        buffer: &AudioBuffer,
        looping: bool,
    ) -> Option<AudioBufferSourceNode> {
        let src = ctx.create_buffer_source().ok()?;
        src.set_buffer(Some(buffer));
        src.set_loop(looping);
        src.connect_with_audio_node(out).ok()?;
        src.start().ok()?;
        Some(src)
    }

    fn create_osc(
        ctx: &AudioContext,
        out: &GainNode,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<OscillatorNode> {
        let osc = ctx.create_oscillator().ok()?;
        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(out).ok()?;
        Some(osc)
    }

    /// Two detuned square waves stepping through the battle melody
    fn start_procedural_music(&mut self, ctx: &AudioContext, master: &GainNode) -> Option<()> {
        let gain = Self::channel(ctx, master, 0.0)?;
        let lead = Self::create_osc(ctx, &gain, 110.0, OscillatorType::Square)?;
        let octave = Self::create_osc(ctx, &gain, 220.0, OscillatorType::Square)?;
        octave.detune().set_value(-8.0);
        lead.start().ok()?;
        octave.start().ok()?;

        let generation = self.music.start(ctx.current_time());
        self.music_node = Some(MusicNode::Procedural {
            generation,
            lead,
            octave,
            gain,
        });
        Some(())
    }

    /// Short square blip
    fn play_procedural_hit(&self, ctx: &AudioContext, master: &GainNode) -> Option<()> {
        let gain = Self::channel(ctx, master, FALLBACK_HIT_GAIN * self.settings.effective_sfx())?;
        let osc = Self::create_osc(ctx, &gain, 440.0, OscillatorType::Square)?;
        let t = ctx.current_time();
        osc.start().ok()?;
        osc.stop_with_when(t + FALLBACK_HIT_SECS).ok()?;
        Some(())
    }
}

impl AudioSink for WebAudio {
    fn unlock(&mut self) {
        if self.ctx.is_some() {
            return;
        }

        // May fail outside a secure context or without a user gesture
        let Ok(ctx) = AudioContext::new() else {
            log::warn!("Failed to create AudioContext - audio disabled");
            return;
        };
        let Ok(master) = ctx.create_gain() else {
            log::warn!("Failed to create master gain - audio disabled");
            return;
        };
        master.gain().set_value(self.settings.effective_master());
        if master.connect_with_audio_node(&ctx.destination()).is_err() {
            log::warn!("Failed to connect master gain - audio disabled");
            return;
        }

        for key in SoundKey::ALL {
            self.load(&ctx, key);
        }
        log::info!("Audio unlocked");
        self.ctx = Some(ctx);
        self.master = Some(master);
    }

    fn stop_music(&mut self) {
        self.music.stop();
        if let Some(node) = self.music_node.take() {
            node.shut_down();
        }
    }

    fn play_battle_music(&mut self) {
        let Some((ctx, master)) = self.output() else {
            return;
        };
        self.stop_music();

        if let Some(buffer) = self.decoded(SoundKey::BattleTheme) {
            let src = Self::channel(&ctx, &master, self.settings.effective_music())
                .and_then(|out| Self::play_decoded(&ctx, &out, &buffer, true));
            if let Some(src) = src {
                self.music.start(ctx.current_time());
                self.music_node = Some(MusicNode::Decoded(src));
                return;
            }
        }

        self.load(&ctx, SoundKey::BattleTheme);
        if self.start_procedural_music(&ctx, &master).is_none() {
            log::warn!("Failed to start fallback battle music");
        }
    }

    fn play_hit(&mut self) {
        let Some((ctx, master)) = self.output() else {
            return;
        };

        if let Some(buffer) = self.decoded(SoundKey::Hit) {
            let played = Self::channel(&ctx, &master, self.settings.effective_sfx())
                .and_then(|out| Self::play_decoded(&ctx, &out, &buffer, false));
            if played.is_some() {
                return;
            }
        }

        self.load(&ctx, SoundKey::Hit);
        self.play_procedural_hit(&ctx, &master);
    }

    fn update(&mut self, _dt: f32) {
        let Some(ctx) = &self.ctx else { return };
        let Some(MusicNode::Procedural {
            generation,
            lead,
            octave,
            gain,
        }) = &self.music_node
        else {
            return;
        };

        let now = ctx.current_time();
        let Some(freq) = self.music.note_for(*generation, now) else {
            return;
        };
        lead.frequency().set_value_at_time(freq, now).ok();
        octave.frequency().set_value_at_time(freq * 2.0, now).ok();
        gain.gain()
            .set_target_at_time(FALLBACK_MUSIC_GAIN * self.settings.effective_music(), now, 0.01)
            .ok();
    }
}

async fn fetch_and_decode(ctx: &AudioContext, path: &str) -> Result<AudioBuffer, AssetError> {
    let fetch_err = |e: JsValue| AssetError::Fetch {
        path: path.to_string(),
        reason: format!("{e:?}"),
    };
    let decode_err = |e: JsValue| AssetError::Decode {
        path: path.to_string(),
        reason: format!("{e:?}"),
    };

    let window = web_sys::window().ok_or_else(|| AssetError::Unavailable {
        path: path.to_string(),
    })?;
    let response: Response = JsFuture::from(window.fetch_with_str(path))
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(fetch_err)?;
    if !response.ok() {
        return Err(AssetError::Fetch {
            path: path.to_string(),
            reason: format!("HTTP {}", response.status()),
        });
    }

    let bytes: js_sys::ArrayBuffer = JsFuture::from(response.array_buffer().map_err(fetch_err)?)
        .await
        .map_err(fetch_err)?
        .dyn_into()
        .map_err(decode_err)?;
    let decoded = JsFuture::from(ctx.decode_audio_data(&bytes).map_err(decode_err)?)
        .await
        .map_err(decode_err)?;
    decoded.dyn_into::<AudioBuffer>().map_err(decode_err)
}
