//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Analyses run in the background; a watcher task prints every state the
//! orchestrator publishes, so switching modes while a request is pending
//! shows the discard immediately.

use crate::attachment::load_attachment;
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use tokio::task::JoinHandle;
use tracing::debug;
use veritas_analyzer::{Orchestrator, SubmissionController};
use veritas_domain::Modality;

/// Run the interactive REPL.
pub async fn run_repl(
    orchestrator: &Orchestrator,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info("Veritas REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut controller = SubmissionController::new(orchestrator.clone());
    let watcher = spawn_state_watcher(orchestrator, formatter.clone());

    loop {
        let prompt = format!("veritas [{}]> ", controller.modality());

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        let outcome = execute_repl_command(cmd, &mut controller, formatter).await;
                        if let Err(e) = outcome {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    watcher.abort();
    editor.save_history(&history_path).ok();

    Ok(())
}

/// Print each state the orchestrator publishes.
fn spawn_state_watcher(orchestrator: &Orchestrator, formatter: Formatter) -> JoinHandle<()> {
    let mut states = orchestrator.subscribe();
    tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            debug!(state = state.name(), "state published");
            match formatter.format_state(&state) {
                Ok(Some(rendered)) => println!("\n{}", rendered),
                Ok(None) => {}
                Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
            }
        }
    })
}

/// REPL command type.
#[derive(Debug, PartialEq)]
enum ReplCommand {
    Exit,
    Help,
    Mode(Modality),
    Text(String),
    Url(String),
    Attach(PathBuf),
    Analyze,
    Status,
    Health,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "mode" => {
            let modality = rest.parse::<Modality>().map_err(|_| {
                CliError::InvalidInput(format!(
                    "Unknown mode: '{}'. Expected text, image, video or url",
                    rest
                ))
            })?;
            Ok(ReplCommand::Mode(modality))
        }
        "text" => Ok(ReplCommand::Text(rest.to_string())),
        "url" => Ok(ReplCommand::Url(rest.to_string())),
        "attach" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: attach <path>".to_string()));
            }
            Ok(ReplCommand::Attach(PathBuf::from(rest)))
        }
        "analyze" | "go" => Ok(ReplCommand::Analyze),
        "status" => Ok(ReplCommand::Status),
        "health" => Ok(ReplCommand::Health),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            head
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    controller: &mut SubmissionController,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Mode(modality) => {
            controller.select_modality(modality);
            println!("{}", formatter.info(&format!("Mode: {}", modality.title())));
        }
        ReplCommand::Text(body) => controller.set_text(body),
        ReplCommand::Url(address) => controller.set_url_text(address),
        ReplCommand::Attach(path) => attach(controller, &path, formatter)?,
        ReplCommand::Analyze => {
            let pending = controller.dispatch_current()?;
            debug!(
                modality = %pending.modality(),
                token = pending.token().value(),
                "spawning analysis"
            );
            tokio::spawn(pending);
        }
        ReplCommand::Status => {
            let state = controller.orchestrator().state();
            match formatter.format_state(&state)? {
                Some(rendered) => println!("{}", rendered),
                None => println!("{}", formatter.info("Idle")),
            }
        }
        ReplCommand::Health => {
            commands::execute_health(controller.orchestrator(), formatter).await?;
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

/// Load a file into the image or video slot, depending on the mode.
fn attach(controller: &mut SubmissionController, path: &Path, formatter: &Formatter) -> Result<()> {
    let file = load_attachment(path)?;
    let name = file.file_name.clone();

    match controller.modality() {
        Modality::Video => controller.set_video_attachment(file)?,
        Modality::Image => controller.set_attachment(file)?,
        other => {
            return Err(CliError::InvalidInput(format!(
                "{} mode does not take attachments",
                other.title()
            )))
        }
    }

    println!("{}", formatter.success(&format!("Attached {}", name)));
    Ok(())
}

/// Print help message.
fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  mode <text|image|video|url>   Switch input mode (clears the last result)");
    println!("  text <content>                Set the text to analyze");
    println!("  url <address>                 Set the URL to analyze");
    println!("  attach <path>                 Select an image or video file");
    println!("  analyze                       Analyze the current input");
    println!("  status                        Show the current analysis state");
    println!("  health                        Check the analysis service");
    println!("  help                          Show this help message");
    println!("  exit                          Exit REPL mode");
    println!();
}

/// Get the history file path.
fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dir = home.join(".veritas");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exit() {
        assert_eq!(parse_repl_command("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("q").unwrap(), ReplCommand::Exit);
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_repl_command("mode url").unwrap(), ReplCommand::Mode(Modality::Url));
        assert!(parse_repl_command("mode audio").is_err());
    }

    #[test]
    fn test_parse_text_keeps_inner_spacing() {
        assert_eq!(
            parse_repl_command("text Breaking:  moon  made of cheese").unwrap(),
            ReplCommand::Text("Breaking:  moon  made of cheese".to_string())
        );
    }

    #[test]
    fn test_parse_attach_requires_path() {
        assert!(parse_repl_command("attach").is_err());
        assert_eq!(
            parse_repl_command("attach photos/cat.png").unwrap(),
            ReplCommand::Attach(PathBuf::from("photos/cat.png"))
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert!(parse_repl_command("frobnicate").is_err());
    }
}
