use anyhow::Result;
use askviz::{cli, config::Config, error::ClientError, handlers};
use is_terminal::IsTerminal;
use std::io::{self, Read};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = cli::Cli::parse();

    // CLI overrides land in the environment before the config loads
    if let Some(url) = args.base_url.as_deref() {
        std::env::set_var("API_BASE_URL", url);
    }
    if let Some(secs) = args.timeout {
        std::env::set_var("REQUEST_TIMEOUT", secs.to_string());
    }

    let cfg = Config::load();

    // stdin handling (pipe support)
    let mut question_from_stdin = String::new();
    let stdin_is_tty = io::stdin().is_terminal();
    if !stdin_is_tty {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        question_from_stdin = buf.trim().to_string();
    }

    // Resolve question: positional arg wins over piped stdin
    let arg_question = args.question.unwrap_or_default();
    let question = if arg_question.trim().is_empty() {
        question_from_stdin
    } else {
        arg_question
    };

    let color = if args.no_color {
        false
    } else if args.color {
        true
    } else {
        cfg.get_bool("COLOR_OUTPUT") && io::stdout().is_terminal()
    };

    if args.tui {
        let initial = if question.trim().is_empty() {
            None
        } else {
            Some(question.as_str())
        };
        return handlers::repl::run(initial).await;
    }

    if question.trim().is_empty() {
        return Err(ClientError::EmptyQuestion.into());
    }

    handlers::oneshot::run(question.trim(), color).await
}
