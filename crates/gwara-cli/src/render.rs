//! Text rendering of questions and results.

use comfy_table::{Cell, Table};

use gwara_core::model::OptionKey;
use gwara_core::result::ResultImage;
use gwara_core::session::{OptionStatus, SessionState, SessionSummary};

pub const TITLE: &str = "Quiz o gwarze wielkopolskiej";

/// One question with its options, marking the chosen one once answered.
pub fn question(session: &SessionState, index: usize) -> String {
    let Some(question) = session.questions().get(index) else {
        return String::new();
    };

    let mut out = format!("{}. {}\n", index + 1, question.word);
    for key in OptionKey::ALL {
        let value = question.option(key).unwrap_or_default();
        let marker = match session.option_status(index, key) {
            OptionStatus::Unselected => "",
            OptionStatus::Correct => "  [correct]",
            OptionStatus::Incorrect => "  [incorrect]",
        };
        out.push_str(&format!("   {key}: {value}{marker}\n"));
    }
    out
}

/// Every question of the session, in order.
pub fn all_questions(session: &SessionState) -> String {
    (0..session.total())
        .map(|index| question(session, index))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn score_line(summary: &SessionSummary) -> String {
    format!("Your score: {} / {}", summary.score, summary.total)
}

pub fn result_image_line(image: ResultImage) -> String {
    if image.is_failure() {
        format!("Result: {image} (try again!)")
    } else {
        format!("Result: {image}")
    }
}

/// Table of every question with the chosen and the correct answer.
pub fn results_table(summary: &SessionSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["#", "Word", "Your answer", "Correct answer", ""]);

    for row in &summary.answers {
        let chosen = match (row.chosen, &row.chosen_value) {
            (Some(key), Some(value)) => format!("{key}: {value}"),
            _ => "-".to_string(),
        };
        let verdict = match row.correct {
            Some(true) => "OK",
            Some(false) => "WRONG",
            None => "",
        };
        table.add_row(vec![
            Cell::new(row.index + 1),
            Cell::new(&row.word),
            Cell::new(chosen),
            Cell::new(&row.correct_value),
            Cell::new(verdict),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use gwara_core::model::{QuestionRequest, RawOptions, RawQuestion};
    use gwara_core::shuffle::{randomize_questions, ScriptedRandom};

    use super::*;

    fn session() -> SessionState {
        let raws = vec![RawQuestion {
            word: "pyra".into(),
            options: RawOptions {
                a: "ziemniak".into(),
                b: "gruszka".into(),
                c: "kamień".into(),
            },
        }];
        let mut session = SessionState::new();
        session.begin_fetch(QuestionRequest::default()).unwrap();
        let questions = randomize_questions(raws, &mut ScriptedRandom::new(&[2, 1]));
        session.finish_fetch(session.id(), questions);
        session
    }

    #[test]
    fn unanswered_question_has_no_markers() {
        let text = question(&session(), 0);
        assert_eq!(
            text,
            "1. pyra\n   a: ziemniak\n   b: gruszka\n   c: kamień\n"
        );
    }

    #[test]
    fn answered_question_marks_the_choice() {
        let mut session = session();
        session.submit_answer(0, OptionKey::B).unwrap();
        let text = question(&session, 0);
        assert!(text.contains("b: gruszka  [incorrect]"));
        assert!(!text.contains("[correct]"));
    }

    #[test]
    fn out_of_range_renders_nothing() {
        assert!(question(&session(), 3).is_empty());
    }

    #[test]
    fn results_table_lists_answers() {
        let mut session = session();
        session.submit_answer(0, OptionKey::A).unwrap();
        let summary = session.summary();
        let rendered = results_table(&summary).to_string();
        assert!(rendered.contains("pyra"));
        assert!(rendered.contains("a: ziemniak"));
        assert!(rendered.contains("OK"));
        assert_eq!(score_line(&summary), "Your score: 1 / 1");
    }

    #[test]
    fn failure_image_suggests_retry() {
        assert_eq!(
            result_image_line(ResultImage::Blad),
            "Result: blad.png (try again!)"
        );
        assert_eq!(result_image_line(ResultImage::Pyra), "Result: pyra.png");
    }
}
