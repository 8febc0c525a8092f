use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::model::TokenUsage;
use crate::model_gateway::ModelGateway;
use crate::tutor::{Tutor, TutorReply};

const WELCOME: &str = "Welcome to your Python AI Tutor! Type 'quit' or 'exit' to stop.";
const GOODBYE: &str = "Goodbye! Keep practicing Python :)";

pub async fn run_repl<G>(tutor: &Tutor<G>) -> Result<()>
where
    G: ModelGateway,
{
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(tutor, stdin.lock(), stdout.lock()).await
}

pub async fn run_session<G, R, W>(tutor: &Tutor<G>, mut input: R, mut out: W) -> Result<()>
where
    G: ModelGateway,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{WELCOME}").context("Failed to write to stdout")?;

    loop {
        write!(out, "\nYou: ").context("Failed to write to stdout")?;
        out.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read stdin")?;
        if read == 0 {
            info!("stdin closed, ending session");
            break;
        }

        let user_input = strip_line_ending(&line);
        if is_exit_command(user_input) {
            writeln!(out, "{GOODBYE}").context("Failed to write to stdout")?;
            break;
        }

        let reply = tutor.ask(user_input).await?;
        print_reply(&mut out, &reply)?;
    }

    Ok(())
}

pub fn print_reply(out: &mut impl Write, reply: &TutorReply) -> Result<()> {
    writeln!(out, "\n{}", format_usage(&reply.usage)).context("Failed to write to stdout")?;
    writeln!(out, "\nTutor:\n{}", reply.answer).context("Failed to write to stdout")?;
    out.flush().context("Failed to flush stdout")
}

pub fn format_usage(usage: &TokenUsage) -> String {
    format!(
        "(Token usage: prompt={}, completion={}, total={})",
        usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
    )
}

fn is_exit_command(input: &str) -> bool {
    let trimmed = input.trim();
    trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit")
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io::Cursor;

    use anyhow::anyhow;

    use super::{format_usage, is_exit_command, run_session, strip_line_ending};
    use crate::model::{Message, TokenUsage};
    use crate::model_gateway::{
        ModelGateway, ModelGatewayFuture, ModelGatewayRequest, ModelGatewayResponse,
    };
    use crate::tutor::Tutor;

    struct ScriptedGateway {
        inputs: RefCell<Vec<String>>,
        fail: bool,
    }

    impl ScriptedGateway {
        fn new(fail: bool) -> Self {
            Self {
                inputs: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl ModelGateway for &ScriptedGateway {
        fn chat<'a>(&'a self, request: ModelGatewayRequest) -> ModelGatewayFuture<'a> {
            let messages: Vec<Message> = request.messages;
            self.inputs.borrow_mut().push(messages[1].content.clone());
            let result = if self.fail {
                Err(anyhow!("service unavailable"))
            } else {
                Ok(ModelGatewayResponse {
                    content: format!("echo: {}", messages[1].content),
                    usage: TokenUsage {
                        prompt_tokens: 7,
                        completion_tokens: 2,
                        total_tokens: 9,
                    },
                })
            };
            Box::pin(async move { result })
        }
    }

    async fn run_script(gateway: &ScriptedGateway, script: &str) -> (anyhow::Result<()>, String) {
        let tutor = Tutor::new(gateway);
        let mut out = Vec::new();
        let result = run_session(&tutor, Cursor::new(script.as_bytes()), &mut out).await;
        (result, String::from_utf8(out).expect("output should be utf-8"))
    }

    #[test]
    fn exit_commands_are_trimmed_and_case_insensitive() {
        assert!(is_exit_command("quit"));
        assert!(is_exit_command("  EXIT \t"));
        assert!(is_exit_command("Quit"));
        assert!(!is_exit_command("quit now"));
        assert!(!is_exit_command(""));
    }

    #[test]
    fn strip_line_ending_only_removes_terminator() {
        assert_eq!(strip_line_ending("  hi  \n"), "  hi  ");
        assert_eq!(strip_line_ending("hi\r\n"), "hi");
        assert_eq!(strip_line_ending("hi"), "hi");
        assert_eq!(strip_line_ending("\n"), "");
    }

    #[test]
    fn format_usage_lists_all_counters() {
        let usage = TokenUsage {
            prompt_tokens: 1,
            completion_tokens: 2,
            total_tokens: 3,
        };
        assert_eq!(
            format_usage(&usage),
            "(Token usage: prompt=1, completion=2, total=3)"
        );
    }

    #[tokio::test]
    async fn session_prints_usage_and_reply_then_says_goodbye() {
        let gateway = ScriptedGateway::new(false);
        let (result, output) = run_script(&gateway, "what is a dict?\nquit\n").await;

        result.expect("session should succeed");
        assert_eq!(
            output,
            "Welcome to your Python AI Tutor! Type 'quit' or 'exit' to stop.\n\
             \nYou: \n(Token usage: prompt=7, completion=2, total=9)\n\
             \nTutor:\necho: what is a dict?\n\
             \nYou: Goodbye! Keep practicing Python :)\n"
        );
        assert_eq!(*gateway.inputs.borrow(), vec!["what is a dict?".to_string()]);
    }

    #[tokio::test]
    async fn session_sends_blank_and_padded_lines_unmodified() {
        let gateway = ScriptedGateway::new(false);
        let (result, _) = run_script(&gateway, "\n  spaced out  \nEXIT\n").await;

        result.expect("session should succeed");
        assert_eq!(
            *gateway.inputs.borrow(),
            vec![String::new(), "  spaced out  ".to_string()]
        );
    }

    #[tokio::test]
    async fn session_ends_quietly_on_eof() {
        let gateway = ScriptedGateway::new(false);
        let (result, output) = run_script(&gateway, "hello").await;

        result.expect("session should succeed");
        assert_eq!(*gateway.inputs.borrow(), vec!["hello".to_string()]);
        assert!(!output.contains("Goodbye"));
    }

    #[tokio::test]
    async fn session_stops_on_service_error() {
        let gateway = ScriptedGateway::new(true);
        let (result, output) = run_script(&gateway, "hello\nhello again\n").await;

        let err = result.expect_err("service error should end the session");
        assert!(format!("{err:#}").contains("service unavailable"));
        assert_eq!(gateway.inputs.borrow().len(), 1);
        assert!(!output.contains("Tutor:"));
    }
}
