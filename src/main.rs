//! Command-line entry point.
//!
//! Streams a single prompt through the Messages API and prints the text as
//! it arrives. Logs go to stderr. Exits 1 if the request is rejected or the
//! stream carries an `error:` event.
//!
//! ```bash
//! ANTHROPIC_API_KEY=sk-ant-xxx anthropic-http "How high is the sky?"
//! ```

use std::io::Write;

use anthropic_http::{Client, Error, Message, MessagesRequest};

const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_MAX_TOKENS: u32 = 1024;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("LOG_LEVEL")
                .unwrap_or_else(|_| "info".to_string())
                .parse()
                .unwrap_or_else(|_| tracing_subscriber::filter::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let prompt = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if prompt.is_empty() {
        eprintln!("usage: anthropic-http <prompt>");
        std::process::exit(2);
    }

    if let Err(e) = run(&prompt).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run(prompt: &str) -> Result<(), Error> {
    let client = Client::from_env()?;
    let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

    tracing::info!(model = %model, "Sending prompt");

    let request = MessagesRequest::new(model, DEFAULT_MAX_TOKENS, vec![Message::user(prompt)]);
    let mut response = client.messages_stream(&request).await?.error_for_status()?;

    let mut stream_error = None;
    let mut stdout = std::io::stdout();
    while let Some(event) = response.next_event().await {
        let event = event?;
        if event.is_error() {
            tracing::error!(payload = %event.payload, "Stream error event");
            stream_error.get_or_insert_with(|| event.payload.to_string());
            continue;
        }
        if let Some(text) = event.text_delta() {
            print!("{text}");
            let _ = stdout.flush();
        }
    }
    println!();

    stream_error.map_or(Ok(()), |payload| Err(Error::Stream { payload }))
}
