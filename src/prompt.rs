use crate::mode::{Mode, detect_mode};
use crate::model::Message;

pub const SYSTEM_PROMPT: &str = "
You are a friendly Python tutor for beginners.

Your goals:
- Explain Python concepts clearly in simple language.
- Give short, correct code examples with comments.
- Create small practice exercises.
- Give encouraging feedback.

Always respond using this structure:

Concept Explanation:
[Explain the concept or answer the question in simple terms.]

Code Example:
[Provide a short, commented Python example related to the question.]

Practice Exercise:
[Give the user 1 small exercise they can try.]

Feedback:
[If the user gave code, give feedback on it.
If they did not give code, encourage them to try the exercise.]
";

pub const MODE_INSTRUCTION_SEPARATOR: &str = "\n\nExtra instructions for this turn: ";

pub fn system_content(mode: Mode) -> String {
    let instruction = mode.instruction();
    let mut content = String::with_capacity(
        SYSTEM_PROMPT.len() + MODE_INSTRUCTION_SEPARATOR.len() + instruction.len(),
    );
    content.push_str(SYSTEM_PROMPT);
    content.push_str(MODE_INSTRUCTION_SEPARATOR);
    content.push_str(instruction);
    content
}

/// The system message always comes first; the user text is passed through untouched.
pub fn build_messages(user_input: &str, mode: Mode) -> [Message; 2] {
    [
        Message::system(system_content(mode)),
        Message::user(user_input),
    ]
}

pub fn build_turn_messages(user_input: &str) -> (Mode, [Message; 2]) {
    let mode = detect_mode(user_input);
    (mode, build_messages(user_input, mode))
}
