//! Built-in two-question bank used when no question file is configured.

use wic_core::model::Question;

use crate::json::parse_question_bank;
use crate::repository::StorageError;

pub const SAMPLE_BANK_JSON: &str = r#"[
  {
    "id": 1,
    "passage": "The scientist's findings were groundbreaking, fundamentally altering our understanding of cellular biology.",
    "blank_sentence": "Her research was so _____ that it changed the entire field.",
    "choice_A": "A. revolutionary",
    "choice_B": "B. mundane",
    "choice_C": "C. confusing",
    "choice_D": "D. expensive",
    "correct_answer": "A. revolutionary",
    "strategy_tag": "Contextual Definition",
    "explanation": "The passage describes findings as 'groundbreaking' and 'fundamentally altering understanding', which directly supports 'revolutionary' as the correct answer."
  },
  {
    "id": 2,
    "passage": "Despite the harsh criticism from reviewers, the author remained steadfast in her artistic vision.",
    "blank_sentence": "The writer was _____ in maintaining her creative direction.",
    "choice_A": "A. flexible",
    "choice_B": "B. unwavering",
    "choice_C": "C. uncertain",
    "choice_D": "D. dismissive",
    "correct_answer": "B. unwavering",
    "strategy_tag": "Contrast/Despite Signal",
    "explanation": "'Despite the harsh criticism' signals a contrast - the author didn't change course, remaining 'steadfast' or 'unwavering'."
  }
]"#;

/// # Errors
///
/// Returns `StorageError` if the embedded bank is malformed.
pub fn sample_questions() -> Result<Vec<Question>, StorageError> {
    parse_question_bank(SAMPLE_BANK_JSON)
}
