use serde::{Deserialize, Serialize};

/// The kind of question a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// Scored as correct (> 0) or incorrect.
    #[serde(rename = "MC")]
    MultipleChoice,
    /// Scored on a continuous scale.
    Essay,
}

impl QuestionKind {
    /// Returns the short tag used in mixed tables.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "MC",
            QuestionKind::Essay => "Essay",
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Rounds `value` to `places` decimal places, ties to even.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round_ties_even() / factor
}

/// Renders an optional number for tables, `-` when absent.
pub(crate) fn display_opt(value: &Option<f64>) -> String {
    match value {
        Some(v) => format!("{v}"),
        None => "-".to_string(),
    }
}
