//! Read-eval-print loop over a session.

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{error, info, warn};

use crate::command::{Command, USAGE};
use crate::config::Config;
use crate::render::{render, render_moves};
use crate::session::Session;

fn print_state<W: Write>(session: &Session, config: &Config, out: &mut W) -> anyhow::Result<()> {
    if config.json_output {
        let json = serde_json::to_string(&session.view()).context("Failed to serialize state")?;
        writeln!(out, "{}", json)?;
    } else {
        write!(out, "{}", render(session.state()))?;
    }
    Ok(())
}

/// Run commands from `input` until it ends or the user quits.
///
/// Malformed lines print the usage and leave the game untouched. An engine
/// invariant failure ends the loop with an error.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    config: &Config,
    input: R,
    out: &mut W,
) -> anyhow::Result<()> {
    print_state(session, config, out)?;

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line) {
            Ok(Command::Action(request)) => match session.dispatch(request) {
                Ok(changed) => {
                    if !changed && !config.json_output {
                        writeln!(out, "(nothing changed)")?;
                    }
                    print_state(session, config, out)?;
                }
                Err(e) => {
                    error!(session = %session.id, "Session aborted: {}", e);
                    return Err(e).context("Game engine failed");
                }
            },
            Ok(Command::Show) => print_state(session, config, out)?,
            Ok(Command::Moves) => writeln!(out, "{}", render_moves(session.state()))?,
            Ok(Command::Help) => writeln!(out, "{}", USAGE)?,
            Ok(Command::Quit) => break,
            Err(e) => {
                warn!("Rejected input {:?}: {}", line, e);
                writeln!(out, "{}\n{}", e, USAGE)?;
            }
        }
        out.flush()?;
    }

    info!(session = %session.id, "Session closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backgammon_core::GamePhase;

    fn run_script(script: &str, config: &Config) -> (Session, String) {
        let mut session = Session::new(Some(11));
        let mut out = Vec::new();
        run(&mut session, config, script.as_bytes(), &mut out).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_roll_then_quit() {
        let (session, out) = run_script("roll\nquit\nroll\n", &Config::default());
        assert_eq!(session.state().phase, GamePhase::Moving);
        assert!(out.contains("turn: white to move"));
    }

    #[test]
    fn test_malformed_input_prints_usage() {
        let (session, out) = run_script("move 13\nbogus\n", &Config::default());
        assert_eq!(session.state().phase, GamePhase::Rolling);
        assert!(out.contains("Missing argument: destination"));
        assert!(out.contains("Unknown command: bogus"));
        assert!(out.contains("commands:"));
    }

    #[test]
    fn test_wrong_phase_action_reports_no_change() {
        let (session, out) = run_script("end\n", &Config::default());
        assert_eq!(session.state().phase, GamePhase::Rolling);
        assert!(out.contains("(nothing changed)"));
    }

    #[test]
    fn test_json_output_is_parseable() {
        let config = Config {
            seed: None,
            json_output: true,
        };
        let (session, out) = run_script("roll\n", &config);
        let last = out.lines().last().unwrap();
        let value: serde_json::Value = serde_json::from_str(last).unwrap();
        assert_eq!(value["session_id"], session.id.to_string());
        assert!(value["state"]["legal_moves"].is_array());
    }
}
