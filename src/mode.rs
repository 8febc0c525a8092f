use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Explain,
    Example,
    Exercise,
    Debug,
    Feedback,
}

/// Keyword rules in priority order. The first rule with a matching keyword wins.
const MODE_RULES: &[(Mode, &[&str])] = &[
    (Mode::Explain, &["explain", "what is"]),
    (Mode::Example, &["example", "show me"]),
    (Mode::Exercise, &["exercise", "practice", "problem"]),
    (
        Mode::Debug,
        &["error", "traceback", "doesn't work", "doesnt work"],
    ),
];

const DEFAULT_MODE: Mode = Mode::Feedback;

impl Mode {
    #[cfg(test)]
    const ALL: [Mode; 5] = [
        Mode::Explain,
        Mode::Example,
        Mode::Exercise,
        Mode::Debug,
        Mode::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Example => "example",
            Self::Exercise => "exercise",
            Self::Debug => "debug",
            Self::Feedback => "feedback",
        }
    }

    /// Extra guidance appended to the system prompt for this kind of turn.
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Explain => "Focus on explaining the concept simply, like teaching a beginner.",
            Self::Example => "Focus on giving a clear, short code example with comments.",
            Self::Exercise => "Focus on giving 1–2 small practice tasks, do not fully solve them.",
            Self::Debug => {
                "Look for mistakes in the code, explain what is wrong, then show a fixed version."
            }
            Self::Feedback => {
                "Give helpful, encouraging feedback and suggest what the student should try next."
            }
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn detect_mode(user_input: &str) -> Mode {
    let text = user_input.to_lowercase();

    MODE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(mode, _)| *mode)
        .unwrap_or(DEFAULT_MODE)
}
