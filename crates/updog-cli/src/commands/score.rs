//! Interactive scoring over stdin.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tracing::warn;
use updog_core::scoring::ApplyOutcome;
use updog_core::storage::ExportArchive;
use updog_core::{Config, GameKind, Participant};

use super::open_session;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Press(String),
    Toggle(String),
    Undo,
    Finish,
    Reset,
    Next,
    Skip,
    Previous,
    Start,
    Pause,
    Stop,
    Add {
        handler: String,
        dog: String,
        registration: String,
    },
    Flip,
    Status,
    Standings,
    Help,
    Quit,
}

/// Parse one input line. Blank lines and incomplete commands yield `None`.
///
/// Anything that is not a known command is taken as a button id.
fn parse_line(line: &str) -> Option<ReplCommand> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "" => return None,
        "press" | "p" if !rest.is_empty() => ReplCommand::Press(rest.to_string()),
        "toggle" | "t" if !rest.is_empty() => ReplCommand::Toggle(rest.to_string()),
        "press" | "p" | "toggle" | "t" => return None,
        "undo" | "u" => ReplCommand::Undo,
        "finish" | "boom" | "boom!" => ReplCommand::Finish,
        "reset" => ReplCommand::Reset,
        "next" | "n" => ReplCommand::Next,
        "skip" => ReplCommand::Skip,
        "prev" | "previous" => ReplCommand::Previous,
        "start" => ReplCommand::Start,
        "pause" => ReplCommand::Pause,
        "stop" => ReplCommand::Stop,
        "add" => {
            let mut fields = rest.split(',').map(str::trim);
            let handler = fields.next().unwrap_or_default().to_string();
            let dog = fields.next().unwrap_or_default().to_string();
            if handler.is_empty() || dog.is_empty() {
                return None;
            }
            ReplCommand::Add {
                handler,
                dog,
                registration: fields.next().unwrap_or_default().to_string(),
            }
        }
        "flip" => ReplCommand::Flip,
        "status" | "s" => ReplCommand::Status,
        "standings" => ReplCommand::Standings,
        "help" | "?" => ReplCommand::Help,
        "quit" | "q" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Press(line.to_string()),
    };
    Some(command)
}

fn print_help() {
    println!("  <button> | press <button>   score a button, e.g. 5 or jump_3");
    println!("  toggle <name>               flip a bonus toggle, e.g. sweet_spot");
    println!("  start | pause | stop        control the round timer");
    println!("  finish                      end the round (Boom!)");
    println!("  undo | reset                undo the last change / clear the round");
    println!("  next | skip | prev          move between teams");
    println!("  add <handler>, <dog>[, utn] add a team to the queue");
    println!("  flip | status | standings   field orientation / views");
    println!("  quit");
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

pub fn run(config: &Config, game: GameKind) -> Result<()> {
    let mut session = open_session(config, game);
    let archive = ExportArchive::new(&config.data_dir);

    println!("{}", session.scoreboard());
    println!("Type 'help' for commands.");
    prompt()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if session.tick() {
            println!("Time is up.");
        }
        let Some(command) = parse_line(&line) else {
            prompt()?;
            continue;
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => print_help(),
            ReplCommand::Status => println!("{}", session.scoreboard()),
            ReplCommand::Standings => print!("{}", session.standings()),
            ReplCommand::Press(id) => {
                match session.press(&id) {
                    ApplyOutcome::Ignored => println!("'{}' is not available", id),
                    ApplyOutcome::Scored { points } => println!("{:+}", points),
                    ApplyOutcome::Completed { points } => {
                        println!("{:+}, round complete", points)
                    }
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Toggle(id) => {
                if !session.toggle(&id) {
                    println!("'{}' cannot be toggled now", id);
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Undo => {
                if !session.undo() {
                    println!("Nothing to undo");
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Finish => {
                if !session.finish() {
                    println!("Round has not started or is already finished");
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Reset => {
                session.reset_round();
                println!("{}", session.scoreboard());
            }
            ReplCommand::Next => {
                match session.next() {
                    Some(advance) => {
                        println!(
                            "{} finished with {} points",
                            advance.participant, advance.summary.total
                        );
                        if let Some(export) = advance.export {
                            match archive.write_json(game, &export) {
                                Ok(path) => println!("Saved {}", path.display()),
                                Err(e) => warn!("Failed to write round export: {}", e),
                            }
                        }
                    }
                    None => println!("No active team"),
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Skip => {
                if !session.skip() {
                    println!("No active team");
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Previous => {
                if !session.previous() {
                    println!("No completed team to return to");
                }
                println!("{}", session.scoreboard());
            }
            ReplCommand::Start => {
                if !session.start_timer() {
                    println!("Timer cannot start: round finished or time is up");
                }
            }
            ReplCommand::Pause => session.pause_timer(),
            ReplCommand::Stop => session.stop_timer(),
            ReplCommand::Add {
                handler,
                dog,
                registration,
            } => {
                session.add_team(Participant::new(handler, dog).with_registration(registration));
                println!("{}", session.scoreboard());
            }
            ReplCommand::Flip => {
                session.flip_field();
                let side = if session.ui().field_flipped { "flipped" } else { "normal" };
                println!("Field orientation: {}", side);
            }
        }
        prompt()?;
    }

    session.pause_timer();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_word_is_press() {
        assert_eq!(parse_line("2a"), Some(ReplCommand::Press("2a".to_string())));
        assert_eq!(
            parse_line("press jump_3"),
            Some(ReplCommand::Press("jump_3".to_string()))
        );
    }

    #[test]
    fn test_verbs() {
        assert_eq!(parse_line("  UNDO "), Some(ReplCommand::Undo));
        assert_eq!(parse_line("Boom!"), Some(ReplCommand::Finish));
        assert_eq!(
            parse_line("t sweet_spot"),
            Some(ReplCommand::Toggle("sweet_spot".to_string()))
        );
        assert_eq!(parse_line("q"), Some(ReplCommand::Quit));
    }

    #[test]
    fn test_incomplete_commands() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("toggle"), None);
        assert_eq!(parse_line("add Alex"), None);
    }

    #[test]
    fn test_add_with_spaces() {
        assert_eq!(
            parse_line("add Jo Smith, Comet, UDC-9"),
            Some(ReplCommand::Add {
                handler: "Jo Smith".to_string(),
                dog: "Comet".to_string(),
                registration: "UDC-9".to_string(),
            })
        );
    }
}
