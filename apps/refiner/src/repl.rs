use anyhow::Result;
use refine_core::{EditingSession, Generator, RefinementController, RefinementHistory};
use shared::{
    domain::{ContentType, Platform, PresetInstruction},
    error::FailureReport,
};
use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::warn;

use crate::truncate_text;

const HELP: &str = "commands:
  refine <instruction>   rewrite the current version
  preset <label>         refine with a preset (see `presets`)
  presets                list preset labels
  draft <topic>          replace the content with a generated draft
  set <content>          replace the content with your own text
  revert [index]         step back one version, or jump to index
  redo                   step forward after a revert
  history                list versions
  show                   print the current version
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Refine(String),
    Preset(String),
    Presets,
    Draft(String),
    Set(String),
    Revert(Option<usize>),
    Redo,
    History,
    Show,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_command(line: &str) -> ReplCommand {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "" => ReplCommand::Empty,
        "refine" => ReplCommand::Refine(rest.to_string()),
        "preset" => ReplCommand::Preset(rest.to_string()),
        "presets" => ReplCommand::Presets,
        "draft" => ReplCommand::Draft(rest.to_string()),
        "set" => ReplCommand::Set(rest.to_string()),
        "revert" | "undo" if rest.is_empty() => ReplCommand::Revert(None),
        "revert" | "undo" => match rest.parse() {
            Ok(index) => ReplCommand::Revert(Some(index)),
            Err(_) => ReplCommand::Unknown(line.to_string()),
        },
        "redo" => ReplCommand::Redo,
        "history" => ReplCommand::History,
        "show" => ReplCommand::Show,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line.to_string()),
    }
}

pub async fn run<G: Generator>(
    controller: &RefinementController<G>,
    session: &mut EditingSession,
    platform: Platform,
) -> Result<()> {
    println!("{HELP}");
    if let Some(current) = session.history(platform).and_then(RefinementHistory::current) {
        println!("\n{}", current.content);
    }

    let mut lines = BufReader::new(io::stdin()).lines();
    loop {
        eprint!("{platform}> ");
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            ReplCommand::Empty => {}
            ReplCommand::Quit => break,
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Presets => {
                for preset in PresetInstruction::ALL {
                    println!("{:<16} {}", preset.label(), preset.text());
                }
            }
            ReplCommand::Unknown(line) => println!("unrecognized command: {line} (try `help`)"),
            ReplCommand::Refine(instruction) => {
                refine(controller, session, platform, &instruction).await;
            }
            ReplCommand::Preset(label) => match PresetInstruction::from_label(&label) {
                Some(preset) => refine(controller, session, platform, preset.text()).await,
                None => println!("unknown preset '{label}' (try `presets`)"),
            },
            ReplCommand::Draft(topic) => {
                match controller
                    .draft(&topic, &ContentType::TrendAnalysis, platform)
                    .await
                {
                    Ok(history) => {
                        let history = session.insert(platform, history);
                        show(history, platform);
                    }
                    Err(err) => print_failure(&err),
                }
            }
            ReplCommand::Set(content) if content.is_empty() => println!("nothing to set"),
            ReplCommand::Set(content) => {
                session.start(platform, content);
            }
            ReplCommand::Revert(target) => {
                let Some(history) = session.history_mut(platform) else {
                    println!("no content yet");
                    continue;
                };
                match target {
                    None if !history.can_revert() => println!("already at the first version"),
                    None => {
                        history.revert_to_previous();
                        show(history, platform);
                    }
                    Some(index) => {
                        let outcome = history.revert_to(index).map(|_| ());
                        match outcome {
                            Ok(()) => show(history, platform),
                            Err(err) => println!("{err}"),
                        }
                    }
                }
            }
            ReplCommand::Redo => {
                let Some(history) = session.history_mut(platform) else {
                    println!("no content yet");
                    continue;
                };
                if history.can_advance() {
                    history.advance_to_next();
                    show(history, platform);
                } else {
                    println!("already at the latest version");
                }
            }
            ReplCommand::History => match session.history(platform) {
                Some(history) => list(history),
                None => println!("no content yet"),
            },
            ReplCommand::Show => match session.history(platform) {
                Some(history) => show(history, platform),
                None => println!("no content yet"),
            },
        }
    }

    Ok(())
}

async fn refine<G: Generator>(
    controller: &RefinementController<G>,
    session: &mut EditingSession,
    platform: Platform,
    instruction: &str,
) {
    match session.refine(controller, platform, instruction).await {
        Ok(entry) => println!("\n{}\n", entry.content),
        Err(err) => print_failure(&err),
    }
}

fn print_failure(err: &refine_core::RefineError) {
    let report = FailureReport::from(err);
    warn!(code = ?report.code, "refinement request failed");
    println!("error ({:?}): {}", report.code, report.message);
}

fn show(history: &RefinementHistory, platform: Platform) {
    if let Some(current) = history.current() {
        let chars = current.content.chars().count();
        let limit = platform.char_limit();
        println!("\n{}\n", current.content);
        println!(
            "[version {}/{}, {chars}/{limit} chars{}]",
            history.cursor().map_or(0, |cursor| cursor + 1),
            history.len(),
            if chars > limit { ", over the platform limit" } else { "" }
        );
    }
}

fn list(history: &RefinementHistory) {
    for (index, entry) in history.entries().iter().enumerate() {
        let marker = if history.cursor() == Some(index) { '*' } else { ' ' };
        let prompt = if entry.is_initial() {
            "(original)".to_string()
        } else {
            truncate_text(&entry.prompt, 60)
        };
        println!(
            "{marker} {index:>2}  {}  {prompt}",
            entry.created_at.format("%Y-%m-%d %H:%M:%S")
        );
        println!("       {}", truncate_text(&entry.content.replace('\n', " "), 100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_command("refine  make it punchier "),
            ReplCommand::Refine("make it punchier".into())
        );
        assert_eq!(
            parse_command("preset storytelling"),
            ReplCommand::Preset("storytelling".into())
        );
        assert_eq!(parse_command("revert"), ReplCommand::Revert(None));
        assert_eq!(parse_command("undo 2"), ReplCommand::Revert(Some(2)));
        assert_eq!(parse_command("redo"), ReplCommand::Redo);
        assert_eq!(parse_command("   "), ReplCommand::Empty);
    }

    #[test]
    fn malformed_revert_index_is_unknown() {
        assert_eq!(
            parse_command("revert two"),
            ReplCommand::Unknown("revert two".into())
        );
        assert_eq!(parse_command("publish"), ReplCommand::Unknown("publish".into()));
    }
}
