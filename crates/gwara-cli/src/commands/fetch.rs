//! The `gwara fetch` command.

use anyhow::Result;
use serde::Serialize;

use gwara_core::controller::QuizController;
use gwara_core::model::Question;

use crate::commands::{setup, QuizArgs};
use crate::render;

#[derive(Serialize)]
struct FetchOutput<'a> {
    amount: u32,
    level: u32,
    questions: &'a [Question],
}

pub async fn execute(args: QuizArgs, format: String) -> Result<()> {
    let setup = setup(&args)?;
    println!(
        "{}",
        fetch_and_format(&setup.controller, setup.amount, setup.level, &format).await?
    );
    Ok(())
}

/// Fetch questions and format them as `text` or `json`.
///
/// A failed fetch is not an error here: it yields an empty list.
pub async fn fetch_and_format(
    controller: &QuizController,
    amount: u32,
    level: u32,
    format: &str,
) -> Result<String> {
    anyhow::ensure!(
        matches!(format, "text" | "json"),
        "unknown format: '{format}' (expected text or json)"
    );

    controller.fetch_questions(amount, level).await?;
    let session = controller.snapshot();

    if format == "json" {
        let output = FetchOutput {
            amount: session.amount(),
            level: session.level(),
            questions: session.questions(),
        };
        return Ok(serde_json::to_string_pretty(&output)?);
    }

    if session.questions().is_empty() {
        return Ok("No questions were loaded.".to_string());
    }
    Ok(render::all_questions(&session))
}
