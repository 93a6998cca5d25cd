//! Interactive terminal chat over the shared [`ScoutBot`].

use std::io::{self, Write};

use colored::Colorize;
use scout_rag::{AskOptions, ChatRole, IndicatifProgress, ScoutBot, Transcript};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const FAILURE_LINE: &str = "Sorry, I couldn't answer that right now. Please try again.";

fn banner() {
    println!();
    println!("{}", "⚾ ScoutBot".bold().blue());
    println!("Ask me about baseball scouting reports (2013–2019)");
    println!(
        "{}",
        "Type a question and press Enter. /history shows the session, /quit exits.".dimmed()
    );
    println!("{}", "─".repeat(56).dimmed());
}

fn render_turn(role: ChatRole, content: &str) {
    match role {
        ChatRole::User => println!("{} {content}", "you ›".green().bold()),
        ChatRole::Assistant => println!("{} {content}", "scoutbot ›".cyan().bold()),
    }
}

fn render(transcript: &Transcript) {
    if transcript.is_empty() {
        println!("{}", "(no messages yet)".dimmed());
        return;
    }
    for turn in transcript.turns() {
        render_turn(turn.role, &turn.content);
    }
}

/// Runs the read-ask-print loop until EOF or `/quit`.
///
/// Provider failures print a generic line and the session goes on.
pub async fn run(bot: &ScoutBot, opts: AskOptions) -> anyhow::Result<()> {
    banner();
    let mut transcript = Transcript::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{} ", "you ›".green().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let input = line.trim();
        match input {
            "" => continue,
            "/quit" | "/exit" => break,
            "/history" => {
                render(&transcript);
                continue;
            }
            _ => {}
        }

        transcript.push_user(input);

        let prog = IndicatifProgress::spinner();
        match bot.ask_with_progress(input, opts, &prog).await {
            Ok(qa) => {
                render_turn(ChatRole::Assistant, &qa.answer);
                transcript.push_assistant(qa.answer);
            }
            Err(e) => {
                warn!(error = %e, "chat turn failed");
                println!("{} {}", "scoutbot ›".cyan().bold(), FAILURE_LINE.red());
            }
        }
        println!();
    }

    Ok(())
}
