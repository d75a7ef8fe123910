//! The `gwara play` command.

use std::io::{self, BufRead, Write};

use anyhow::Result;

use gwara_core::controller::QuizController;
use gwara_core::model::OptionKey;
use gwara_core::session::AnswerOutcome;

use crate::commands::{setup, QuizArgs};
use crate::render;

pub async fn execute(args: QuizArgs) -> Result<()> {
    let setup = setup(&args)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(
        &setup.controller,
        setup.amount,
        setup.level,
        &mut stdin.lock(),
        &mut stdout.lock(),
    )
    .await
}

/// Play rounds until the player quits, declines another round, or input ends.
pub async fn run(
    controller: &QuizController,
    amount: u32,
    level: u32,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "{}", render::TITLE)?;

    loop {
        writeln!(out, "\nLoading {amount} question(s) at level {level}...")?;
        let outcome = controller.fetch_questions(amount, level).await?;
        if !outcome.has_questions() {
            writeln!(out, "No questions were loaded.")?;
            return Ok(());
        }
        let listing = controller.with_session(render::all_questions);
        writeln!(out, "\n{listing}")?;

        if !answer_all(controller, input, out)? {
            writeln!(out, "Bye!")?;
            return Ok(());
        }

        let summary = controller.summary();
        writeln!(out, "\n{}", render::score_line(&summary))?;
        writeln!(out, "{}", render::results_table(&summary))?;
        writeln!(
            out,
            "{}",
            render::result_image_line(controller.result_image())
        )?;

        write!(out, "\nPlay again? (y/n): ")?;
        out.flush()?;
        match read_line(input)? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => controller.reset_session(),
            _ => return Ok(()),
        }
    }
}

/// Prompt for every unanswered question in order.
///
/// Returns `false` if the player quit or input ended first.
fn answer_all(
    controller: &QuizController,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool> {
    while let Some(index) = controller.with_session(|s| s.next_unanswered()) {
        let text = controller.with_session(|s| render::question(s, index));
        write!(out, "\n{text}Your answer (a/b/c, q to quit): ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            return Ok(false);
        };
        if line.eq_ignore_ascii_case("q") {
            return Ok(false);
        }

        let key = match line.parse::<OptionKey>() {
            Ok(key) => key,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        match controller.submit_answer(index, key)? {
            AnswerOutcome::Recorded { correct: true } => writeln!(out, "Correct!")?,
            AnswerOutcome::Recorded { correct: false } => {
                let answer =
                    controller.with_session(|s| s.questions()[index].correct_option.clone());
                writeln!(out, "Wrong, the answer is: {answer}")?;
            }
            AnswerOutcome::AlreadyAnswered => {}
        }
    }
    Ok(true)
}

/// Next trimmed line, or `None` at end of input.
fn read_line(input: &mut impl BufRead) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
