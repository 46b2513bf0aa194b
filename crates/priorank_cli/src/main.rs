//! Interactive menu front-end for the priorank core.
//!
//! # Responsibility
//! - Prompt for theme names, item labels and comparison verdicts.
//! - Render ranking views as textual bars.
//!
//! All invariants live in `priorank_core`; this binary only translates
//! between stdin/stdout and the session API. An aborted comparison prompt
//! records nothing.

use log::warn;
use priorank_core::{
    default_log_level, init_logging, open_db, RankSession, SessionError, SqliteStateRepository,
    Verdict,
};
use std::io::{self, BufRead, Write};

const DEFAULT_DB_FILE: &str = "priorank.db";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_FILE.to_string());

    if let Ok(cwd) = std::env::current_dir() {
        let log_dir = cwd.join("logs");
        if let Some(log_dir) = log_dir.to_str() {
            if let Err(err) = init_logging(default_log_level(), log_dir) {
                eprintln!("warning: logging disabled: {err}");
            }
        }
    }

    let conn = open_db(&db_path)?;
    let mut session = RankSession::hydrate(SqliteStateRepository::new(&conn))?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    main_loop(&mut session, &mut input)?;
    println!("Goodbye!");
    Ok(())
}

fn main_loop<R: priorank_core::StateRepository>(
    session: &mut RankSession<R>,
    input: &mut impl BufRead,
) -> io::Result<()> {
    loop {
        let themes = session.theme_summaries();
        print_menu(&themes);

        let choice = match prompt(input, &format!("\nEnter choice (1-{}): ", themes.len() + 5))? {
            Some(line) => line,
            None => return Ok(()),
        };
        let Ok(number) = choice.parse::<usize>() else {
            println!("Please enter a valid number!");
            continue;
        };

        match number {
            n if n >= 1 && n <= themes.len() => {
                ranking_mode(session, input, &themes[n - 1].0)?;
            }
            n if n == themes.len() + 1 => create_theme(session, input)?,
            n if n == themes.len() + 2 => {
                if let Some(theme) = pick_theme(input, &themes, "add items to")? {
                    add_items(session, input, &theme)?;
                }
            }
            n if n == themes.len() + 3 => {
                if let Some(theme) = pick_theme(input, &themes, "view")? {
                    view_rankings(session, &theme);
                }
            }
            n if n == themes.len() + 4 => {
                if let Some(theme) = pick_theme(input, &themes, "delete")? {
                    match session.remove_theme(&theme) {
                        Ok(()) => println!("Theme '{theme}' deleted."),
                        Err(err) => report(&err),
                    }
                }
            }
            n if n == themes.len() + 5 => return Ok(()),
            _ => println!("Invalid choice!"),
        }
    }
}

fn print_menu(themes: &[(String, usize)]) {
    println!("\n=== priorank ===");
    println!("\nAvailable themes:");
    if themes.is_empty() {
        println!("  No themes available");
    } else {
        for (index, (name, count)) in themes.iter().enumerate() {
            println!("  {}. {name} ({count} items)", index + 1);
        }
    }
    println!("\n  {}. Create new theme", themes.len() + 1);
    println!("  {}. Add items to existing theme", themes.len() + 2);
    println!("  {}. View rankings", themes.len() + 3);
    println!("  {}. Delete a theme", themes.len() + 4);
    println!("  {}. Exit", themes.len() + 5);
}

fn create_theme<R: priorank_core::StateRepository>(
    session: &mut RankSession<R>,
    input: &mut impl BufRead,
) -> io::Result<()> {
    println!("\n--- Create New Theme ---");
    let Some(name) = prompt(input, "Enter theme name: ")? else {
        return Ok(());
    };

    match session.create_theme(&name) {
        Ok(()) => println!("Theme '{}' created.", name.trim()),
        Err(err) => {
            report(&err);
            return Ok(());
        }
    }

    if let Some(answer) = prompt(input, "Add items now? (y/n): ")? {
        if answer.eq_ignore_ascii_case("y") {
            add_items(session, input, name.trim())?;
        }
    }
    Ok(())
}

fn add_items<R: priorank_core::StateRepository>(
    session: &mut RankSession<R>,
    input: &mut impl BufRead,
    theme: &str,
) -> io::Result<()> {
    println!("\n--- Add Items to '{theme}' ---");
    println!("Enter items (one per line, empty line to finish):");

    let mut added = 0usize;
    loop {
        let Some(label) = prompt(input, "> ")? else {
            break;
        };
        if label.is_empty() {
            break;
        }
        match session.add_item(theme, &label) {
            Ok(()) => added += 1,
            Err(err) => report(&err),
        }
    }
    if added > 0 {
        println!("Added {added} items to '{theme}'");
    } else {
        println!("No items added.");
    }
    Ok(())
}

fn ranking_mode<R: priorank_core::StateRepository>(
    session: &mut RankSession<R>,
    input: &mut impl BufRead,
    theme: &str,
) -> io::Result<()> {
    println!("\n--- Ranking Mode: {theme} ---");
    println!("Use '<' to choose the left item, '>' the right item, 'q' to quit");

    loop {
        let matchup = match session.next_matchup(theme) {
            Ok(matchup) => matchup,
            Err(err) => {
                report(&err);
                return Ok(());
            }
        };

        println!("\nWhich is more important/better?");
        println!("  <  {}", matchup.left);
        println!("  >  {}", matchup.right);

        let Some(choice) = prompt(input, "Your choice (</>): ")? else {
            return Ok(());
        };
        let verdict = match parse_verdict(&choice) {
            VerdictInput::Decided(verdict) => verdict,
            VerdictInput::Quit => return Ok(()),
            VerdictInput::Invalid => {
                println!("Invalid choice! Use '<', '>', or 'q'");
                continue;
            }
        };

        let winner = match verdict {
            Verdict::Left => matchup.left.clone(),
            Verdict::Right => matchup.right.clone(),
        };
        match session.record_verdict(theme, &matchup, verdict) {
            Ok(exchanged) => println!("'{winner}' wins! (+{exchanged:.1})"),
            Err(err) => report(&err),
        }
    }
}

fn view_rankings<R: priorank_core::StateRepository>(session: &RankSession<R>, theme: &str) {
    let rows = match session.rankings(theme) {
        Ok(rows) => rows,
        Err(err) => {
            report(&err);
            return;
        }
    };

    println!("\n--- Rankings: {theme} ---");
    for (rank, row) in rows.iter().enumerate() {
        println!("{:2}. {}", rank + 1, row.label);
        println!(
            "    {} ({:.0})",
            "-".repeat(row.bar_units as usize),
            row.rating
        );
        if row.plays > 0 {
            println!(
                "    Plays: {}, Wins: {}, Losses: {}",
                row.plays, row.wins, row.losses
            );
        }
    }
}

fn pick_theme(
    input: &mut impl BufRead,
    themes: &[(String, usize)],
    action: &str,
) -> io::Result<Option<String>> {
    if themes.is_empty() {
        println!("No themes available! Create a theme first.");
        return Ok(None);
    }

    println!("\nSelect theme to {action}:");
    for (index, (name, _)) in themes.iter().enumerate() {
        println!("  {}. {name}", index + 1);
    }

    let Some(choice) = prompt(input, "Enter theme number: ")? else {
        return Ok(None);
    };
    match choice.parse::<usize>() {
        Ok(number) if number >= 1 && number <= themes.len() => {
            Ok(Some(themes[number - 1].0.clone()))
        }
        _ => {
            println!("Invalid theme selection!");
            Ok(None)
        }
    }
}

enum VerdictInput {
    Decided(Verdict),
    Quit,
    Invalid,
}

fn parse_verdict(choice: &str) -> VerdictInput {
    match choice.trim() {
        "<" => VerdictInput::Decided(Verdict::Left),
        ">" => VerdictInput::Decided(Verdict::Right),
        "q" | "Q" => VerdictInput::Quit,
        _ => VerdictInput::Invalid,
    }
}

/// Prints a prompt and reads one trimmed line; `None` means end of input.
fn prompt(input: &mut impl BufRead, text: &str) -> io::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn report(err: &SessionError) {
    warn!("event=user_op module=cli status=error error={err}");
    println!("{err}");
}

#[cfg(test)]
mod tests {
    use super::{parse_verdict, VerdictInput};
    use priorank_core::Verdict;

    #[test]
    fn verdict_parsing_covers_all_inputs() {
        assert!(matches!(
            parse_verdict("<"),
            VerdictInput::Decided(Verdict::Left)
        ));
        assert!(matches!(
            parse_verdict(" > "),
            VerdictInput::Decided(Verdict::Right)
        ));
        assert!(matches!(parse_verdict("q"), VerdictInput::Quit));
        assert!(matches!(parse_verdict("Q"), VerdictInput::Quit));
        assert!(matches!(parse_verdict("x"), VerdictInput::Invalid));
        assert!(matches!(parse_verdict(""), VerdictInput::Invalid));
    }
}
