/// Destination named by a spoken navigation command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoiceCommand {
    Dashboard,
    StudyHub,
    EducatorTools,
    Analytics,
}

impl VoiceCommand {
    /// Spoken confirmation once the route changes.
    #[must_use]
    pub fn announcement(self) -> &'static str {
        match self {
            Self::Dashboard => "Opening dashboard",
            Self::StudyHub => "Opening study hub",
            Self::EducatorTools => "Opening educator tools",
            Self::Analytics => "Opening analytics",
        }
    }
}

const KEYWORDS: &[(VoiceCommand, &[&str])] = &[
    (VoiceCommand::Dashboard, &["dashboard"]),
    (VoiceCommand::StudyHub, &["study hub", "study room"]),
    (VoiceCommand::EducatorTools, &["teacher", "tools", "educator"]),
    (VoiceCommand::Analytics, &["analytics", "progress", "data"]),
];

/// Matches a recognized transcript against the navigation keywords.
///
/// Matching is case-insensitive substring search; the first destination with a hit wins.
#[must_use]
pub fn voice_command(transcript: &str) -> Option<VoiceCommand> {
    let transcript = transcript.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|word| transcript.contains(word)))
        .map(|(command, _)| *command)
}
