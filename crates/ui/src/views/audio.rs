use dioxus::document::eval;
use dioxus::prelude::*;
use services::{Playback, SpeechClip};
use tracing::trace;

use crate::context::AppContext;

/// Plays synthesized speech in the webview. Mounted once, in the app layout.
///
/// Clips are scheduled back to back on one `AudioContext`; a stop command silences every
/// source that has been started or scheduled.
#[component]
pub fn NarrationPlayer() -> Element {
    let ctx = use_context::<AppContext>();
    use_hook(move || {
        let Some(mut clips) = ctx.take_speech_clips() else {
            return;
        };
        spawn(async move {
            while let Some(playback) = clips.recv().await {
                trace!(?playback, "speech playback");
                let _ = eval(&playback_script(&playback));
            }
        });
    });
    use_drop(|| {
        let _ = eval(STOP_SCRIPT);
    });

    rsx! {}
}

const STOP_SCRIPT: &str = r#"(function() {
            const audio = window.__studyAudio;
            if (!audio) return;
            for (const source of audio.sources) {
                try { source.stop(); } catch (_) {}
            }
            audio.sources.clear();
            audio.end = 0;
        })();"#;

pub(crate) fn playback_script(playback: &Playback) -> String {
    match playback {
        Playback::Clip(clip) => clip_script(clip),
        Playback::Stop => STOP_SCRIPT.to_string(),
    }
}

fn clip_script(clip: &SpeechClip) -> String {
    let data = clip.to_base64();
    let rate = clip.sample_rate();
    let channels = clip.channels();
    format!(
        r#"(function() {{
            const Ctx = window.AudioContext || window.webkitAudioContext;
            if (!Ctx) return;
            const audio = window.__studyAudio || (window.__studyAudio = {{
                ctx: new Ctx(),
                sources: new Set(),
                end: 0,
            }});
            const ctx = audio.ctx;
            const raw = atob({data:?});
            const bytes = new Uint8Array(raw.length);
            for (let i = 0; i < raw.length; i++) bytes[i] = raw.charCodeAt(i);
            const view = new DataView(bytes.buffer);
            const channels = {channels};
            const frames = Math.floor(bytes.length / 2 / channels);
            if (frames === 0) return;
            const buffer = ctx.createBuffer(channels, frames, {rate});
            for (let ch = 0; ch < channels; ch++) {{
                const out = buffer.getChannelData(ch);
                for (let i = 0; i < frames; i++) {{
                    out[i] = view.getInt16((i * channels + ch) * 2, true) / 32768;
                }}
            }}
            const source = ctx.createBufferSource();
            source.buffer = buffer;
            source.connect(ctx.destination);
            source.onended = () => audio.sources.delete(source);
            const start = Math.max(ctx.currentTime, audio.end);
            audio.end = start + buffer.duration;
            audio.sources.add(source);
            source.start(start);
        }})();"#
    )
}
