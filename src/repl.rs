// src/repl.rs
// Interactive terminal client for the triage service

use std::time::Duration;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::schema::{TriageRequest, TriageResponse, MIN_MESSAGE_CHARS};

/// Hard timeout on each submission; a timeout renders the same panel as any
/// other transport failure.
const SUBMIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Readline loop that submits customer messages to the triage service and
/// renders the classification result.
pub struct Repl {
    editor: DefaultEditor,
    http: reqwest::Client,
    api_url: String,
}

impl Repl {
    pub fn new(api_url: String) -> Result<Self> {
        let editor = DefaultEditor::new()?;
        let http = reqwest::Client::builder()
            .timeout(SUBMIT_TIMEOUT)
            .build()?;
        Ok(Self {
            editor,
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Run the REPL loop
    pub async fn run(&mut self) -> Result<()> {
        println!("Customer Inquiry Triage ({})", self.api_url);
        println!("Type a customer message (Ctrl+D to exit, /help for commands)");
        println!();

        loop {
            let readline = self.editor.readline(">>> ");
            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    let _ = self.editor.add_history_entry(line);

                    if let Some(cmd) = line.strip_prefix('/') {
                        if self.handle_command(cmd) {
                            break;
                        }
                        continue;
                    }

                    self.submit(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Goodbye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }
        Ok(())
    }

    /// Handle a slash command. Returns true when the REPL should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "help" => {
                println!("Commands:");
                println!("  /help  - Show this help");
                println!("  /quit  - Exit");
                println!();
                println!("Anything else is submitted as a customer message.");
                false
            }
            "quit" | "exit" => {
                println!("Goodbye!");
                true
            }
            _ => {
                println!("Unknown command: /{}", cmd);
                false
            }
        }
    }

    /// Validate locally, post to the service, and render the outcome.
    async fn submit(&self, message: &str) {
        // Same minimum-length rule the server enforces; saves a round trip.
        let request = TriageRequest {
            message: message.to_string(),
        };
        if request.validate().is_err() {
            render_error(&format!(
                "Please enter a message with at least {} characters.",
                MIN_MESSAGE_CHARS
            ));
            return;
        }

        println!("Classifying...");
        let result = self
            .http
            .post(format!("{}/triage", self.api_url))
            .json(&request)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                match response.json::<TriageResponse>().await {
                    Ok(triage) => render_result(&triage),
                    Err(e) => render_error(&format!("Could not decode server response: {e}")),
                }
            }
            Ok(response) => {
                let status = response.status();
                let detail = response
                    .json::<serde_json::Value>()
                    .await
                    .ok()
                    .and_then(|body| body.get("detail")?.as_str().map(str::to_string))
                    .unwrap_or_else(|| "Could not decode error response.".to_string());
                render_error(&format!("API error (status {}): {}", status.as_u16(), detail));
            }
            // Connect failures and timeouts render the same panel.
            Err(_) => {
                render_error("Could not connect to the triage API. Is the server running?");
            }
        }
    }
}

fn render_result(triage: &TriageResponse) {
    println!();
    println!("Triage Result");
    println!("  Category:   {}", triage.category.label());
    println!("  Confidence: {:.2}%", triage.score * 100.0);
    println!("  Reasoning:  {}", triage.reasoning);
    println!();
}

fn render_error(message: &str) {
    println!();
    println!("Error");
    println!("  {}", message);
    println!();
}
