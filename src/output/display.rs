//! Display functions for game state and results

use super::formatters::{KEYBOARD_ROWS, attempts_bar, draft_cells, paint_tile, verdict_label};
use crate::core::{MAX_ATTEMPTS, Verdict, Word};
use crate::engine::{AvailabilityMap, Ledger, Phase, Rejection, SubmitOutcome};
use colored::Colorize;

/// Print every attempt, the open draft and the rows still to play
pub fn print_board(ledger: &Ledger) {
    println!();
    for (i, attempt) in ledger.attempts().iter().enumerate() {
        let tiles: String = attempt
            .cells()
            .map(|cell| paint_tile(cell.letter, cell.verdict).to_string())
            .collect();
        println!(
            "  {} {}  {}",
            (i + 1).to_string().bright_black(),
            tiles,
            attempt.feedback().to_emoji()
        );
    }

    let mut row = ledger.len();
    if let Some(draft) = ledger.draft() {
        row += 1;
        println!(
            "  {} {}",
            row.to_string().bright_black(),
            spaced(&draft_cells(draft)).bright_white().bold()
        );
    }
    for empty in row + 1..=MAX_ATTEMPTS {
        println!(
            "  {} {}",
            empty.to_string().bright_black(),
            spaced("_____").bright_black()
        );
    }
    println!();
}

/// Print the on-screen keyboard coloured with the best known verdicts
pub fn print_keyboard(map: &AvailabilityMap) {
    for (indent, row) in KEYBOARD_ROWS.iter().enumerate() {
        let keys: String = row
            .chars()
            .map(|letter| paint_tile(letter, map.get(letter)).to_string())
            .collect();
        println!("  {}{keys}", " ".repeat(indent * 2));
    }

    let legend: Vec<String> = [Verdict::Correct, Verdict::Present, Verdict::Absent]
        .into_iter()
        .map(|verdict| format!("{} {}", verdict.emoji(), verdict_label(verdict)))
        .collect();
    println!("\n  {}", legend.join("   ").bright_black());
}

/// Print the result of one submission
pub fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Rejected(rejection) => print_rejection(*rejection),
        SubmitOutcome::Accepted {
            feedback,
            delta,
            phase,
            revealed,
        } => {
            println!("  {}", feedback.to_emoji());
            if !delta.is_empty() {
                let learned: Vec<String> = delta
                    .iter()
                    .map(|(letter, verdict)| {
                        format!("{}{}", letter.to_ascii_uppercase(), verdict.emoji())
                    })
                    .collect();
                println!("  {} {}", "Learned:".bright_black(), learned.join(" "));
            }
            match phase {
                Phase::Won => println!("{}", "✅ Solved!".green().bold()),
                Phase::Lost => {
                    let secret = revealed
                        .as_ref()
                        .map_or_else(String::new, |word| word.text().to_uppercase());
                    println!(
                        "{} {}",
                        "❌ Out of attempts. The word was".red().bold(),
                        secret.bright_yellow().bold()
                    );
                }
                _ => {}
            }
        }
    }
}

/// Print why a guess was refused
pub fn print_rejection(rejection: Rejection) {
    let detail = match rejection {
        Rejection::WrongLength { expected, actual } => {
            format!("{rejection}: need {expected} letters, got {actual}")
        }
        other => other.to_string(),
    };
    println!("{} {}", "❌".red(), detail.red());
}

/// Print a one-screen summary of the session
pub fn print_status(
    phase: Phase,
    ledger: &Ledger,
    map: &AvailabilityMap,
    revealed: Option<&Word>,
) {
    println!("\n{}", "─".repeat(40).cyan());
    println!(
        "Phase: {}   Attempts: {} {}/{}",
        phase.to_string().bright_yellow().bold(),
        attempts_bar(ledger.len()).cyan(),
        ledger.len(),
        MAX_ATTEMPTS
    );
    println!("{}", "─".repeat(40).cyan());

    if phase == Phase::Initial {
        println!("\nNo game in progress. Run `new` to start one.\n");
        return;
    }

    print_board(ledger);
    print_keyboard(map);

    if let Some(secret) = revealed {
        println!(
            "\n  Secret: {}",
            secret.text().to_uppercase().bright_yellow().bold()
        );
    }
    println!();
}

/// Print the end-of-game banner
pub fn print_game_over(phase: Phase, ledger: &Ledger, revealed: Option<&Word>) {
    println!("\n{}", "═".repeat(50).bright_cyan());
    if phase == Phase::Won {
        let turns = ledger.len();
        let verdict = match turns {
            1 => "🏆 Hole in one!",
            2 => "⭐ Magnificent!",
            3 => "💫 Splendid!",
            4 => "✨ Great!",
            5 => "👍 Nice work!",
            _ => "😅 Phew!",
        };
        println!("  {}", verdict.bright_green().bold());
        println!(
            "  Solved in {} {}",
            turns.to_string().bright_cyan().bold(),
            if turns == 1 { "guess" } else { "guesses" }
        );
    } else if let Some(secret) = revealed {
        println!(
            "  {} {}",
            "The word was".red().bold(),
            secret.text().to_uppercase().bright_yellow().bold()
        );
    }

    println!("\n  Guess history:");
    for (i, attempt) in ledger.attempts().iter().enumerate() {
        println!(
            "    {}. {} {}",
            (i + 1).to_string().bright_black(),
            attempt.word().text().to_uppercase().bright_white().bold(),
            attempt.feedback().to_emoji()
        );
    }
    println!("{}", "═".repeat(50).bright_cyan());
}

/// Pad every cell to the width of a tile
fn spaced(cells: &str) -> String {
    cells.chars().map(|c| format!(" {c} ")).collect()
}
