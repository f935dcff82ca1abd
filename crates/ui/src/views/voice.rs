use dioxus::core::Task;
use dioxus::document::eval;
use dioxus::prelude::*;
use dioxus_router::use_navigator;
use services::NarrationCoordinator;
use tracing::{debug, trace};

use crate::context::{AppContext, use_accessibility};
use crate::routes::Route;
use crate::vm::{VoiceCommand, voice_command};

/// Listens for spoken navigation commands while accessibility mode is on.
///
/// Recognition runs in the webview and streams final transcripts back over the eval channel.
#[component]
pub fn VoiceNavigator() -> Element {
    let ctx = use_context::<AppContext>();
    let accessibility = use_accessibility();
    let navigator = use_navigator();
    let mut announcer = use_signal(|| NarrationCoordinator::new(ctx.narrator()));
    let mut listener = use_signal(|| None::<Task>);

    use_effect(move || {
        let enabled = accessibility();
        if let Some(task) = listener.write().take() {
            task.cancel();
            let _ = eval(STOP_RECOGNITION);
        }
        if !enabled {
            return;
        }
        let task = spawn(async move {
            let mut recognition = eval(START_RECOGNITION);
            while let Ok(transcript) = recognition.recv::<String>().await {
                trace!(%transcript, "voice transcript");
                let Some(command) = voice_command(&transcript) else {
                    continue;
                };
                debug!(?command, "voice navigation");
                let _ = navigator.push(route_for(command));
                announcer.write().announce(command.announcement());
            }
        });
        listener.set(Some(task));
    });
    use_drop(|| {
        let _ = eval(STOP_RECOGNITION);
    });

    rsx! {}
}

fn route_for(command: VoiceCommand) -> Route {
    match command {
        VoiceCommand::Dashboard => Route::Dashboard {},
        VoiceCommand::StudyHub => Route::Study {},
        VoiceCommand::EducatorTools => Route::Educator {},
        VoiceCommand::Analytics => Route::Progress {},
    }
}

const START_RECOGNITION: &str = r#"
        const Recognition = window.SpeechRecognition || window.webkitSpeechRecognition;
        if (!Recognition) return;
        const previous = window.__studyVoice;
        if (previous) {
            previous.active = false;
            try { previous.recognition.stop(); } catch (_) {}
        }
        const recognition = new Recognition();
        recognition.continuous = true;
        recognition.lang = "en-US";
        recognition.interimResults = false;
        const voice = { active: true, recognition };
        window.__studyVoice = voice;
        recognition.onresult = (event) => {
            const result = event.results[event.results.length - 1];
            dioxus.send(result[0].transcript);
        };
        const restart = () => {
            if (!voice.active) return;
            try { recognition.start(); } catch (_) {}
        };
        recognition.onerror = restart;
        recognition.onend = restart;
        recognition.start();
        await new Promise(() => {});
        "#;

const STOP_RECOGNITION: &str = r#"
        const voice = window.__studyVoice;
        if (voice) {
            voice.active = false;
            try { voice.recognition.stop(); } catch (_) {}
            window.__studyVoice = null;
        }
        "#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_route_to_their_views() {
        assert!(matches!(route_for(VoiceCommand::Dashboard), Route::Dashboard {}));
        assert!(matches!(route_for(VoiceCommand::StudyHub), Route::Study {}));
        assert!(matches!(route_for(VoiceCommand::EducatorTools), Route::Educator {}));
        assert!(matches!(route_for(VoiceCommand::Analytics), Route::Progress {}));
    }

    #[test]
    fn recognition_streams_final_transcripts() {
        assert!(START_RECOGNITION.contains("recognition.continuous = true;"));
        assert!(START_RECOGNITION.contains("recognition.lang = \"en-US\";"));
        assert!(START_RECOGNITION.contains("dioxus.send(result[0].transcript)"));
        assert!(START_RECOGNITION.contains("if (!voice.active) return;"));
    }

    #[test]
    fn stop_disables_restart_before_stopping() {
        let inactive = STOP_RECOGNITION.find("voice.active = false").unwrap();
        let stop = STOP_RECOGNITION.find("voice.recognition.stop()").unwrap();
        assert!(inactive < stop);
        assert!(STOP_RECOGNITION.contains("window.__studyVoice = null"));
    }
}
