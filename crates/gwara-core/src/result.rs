//! Result image selection.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shuffle::RandomSource;

/// Ratio of correct answers below which the quiz counts as failed.
pub const PASS_THRESHOLD: f64 = 0.5;

/// Picture shown next to the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultImage {
    /// Shown when fewer than half the answers were correct.
    Blad,
    Rogal,
    Pyra,
    Koziolek,
}

impl ResultImage {
    /// Images a passing score picks from.
    pub const SUCCESS: [ResultImage; 3] =
        [ResultImage::Rogal, ResultImage::Pyra, ResultImage::Koziolek];

    /// Asset file name.
    pub fn file_name(self) -> &'static str {
        match self {
            ResultImage::Blad => "blad.png",
            ResultImage::Rogal => "rogal.png",
            ResultImage::Pyra => "pyra.png",
            ResultImage::Koziolek => "koziolek.png",
        }
    }

    pub fn is_failure(self) -> bool {
        self == ResultImage::Blad
    }
}

impl fmt::Display for ResultImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Choose the result image for `score` correct answers out of `total`.
///
/// A ratio under [`PASS_THRESHOLD`] always gives [`ResultImage::Blad`];
/// otherwise one of [`ResultImage::SUCCESS`] is drawn uniformly. An empty
/// quiz (`total == 0`) counts as failed.
pub fn select_result_image(score: usize, total: usize, rng: &mut dyn RandomSource) -> ResultImage {
    if total == 0 || (score as f64 / total as f64) < PASS_THRESHOLD {
        return ResultImage::Blad;
    }
    ResultImage::SUCCESS[rng.next_index(ResultImage::SUCCESS.len())]
}
