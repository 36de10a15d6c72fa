use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::model::ids::QuestionId;

/// Placeholder token marking the blank in `blank_sentence`.
pub const BLANK: &str = "_____";

//
// ─── CHOICE LABELS ─────────────────────────────────────────────────────────────
//

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChoiceLabel {
    A,
    B,
    C,
    D,
}

impl ChoiceLabel {
    pub const ALL: [ChoiceLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    #[must_use]
    pub fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Case-insensitive lookup used by keyboard shortcuts.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid choice label: {0:?}")]
pub struct ParseChoiceLabelError(String);

impl FromStr for ChoiceLabel {
    type Err = ParseChoiceLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Self::from_letter(letter).ok_or_else(|| ParseChoiceLabelError(s.to_string()))
            }
            _ => Err(ParseChoiceLabelError(s.to_string())),
        }
    }
}

/// Returns the wording of a labelled choice (`"A. revolutionary"` → `"revolutionary"`).
///
/// The wording is the segment after the first `". "` and before any further
/// `". "`. Choices without a usable label prefix are returned whole.
#[must_use]
pub fn choice_content(choice: &str) -> &str {
    let mut parts = choice.split(". ");
    parts.next();
    match parts.next() {
        Some(content) if !content.is_empty() => content,
        _ => choice,
    }
}

/// Leading letter of a labelled choice, as shown in the session summary.
#[must_use]
pub fn choice_letter(choice: &str) -> Option<char> {
    choice.chars().next()
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("choice {label} duplicates another choice")]
    DuplicateChoice { label: ChoiceLabel },

    #[error("correct answer {answer:?} is not one of the choices")]
    UnknownCorrectAnswer { answer: String },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question as it arrives from a question bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub id: QuestionId,
    pub passage: String,
    pub blank_sentence: String,
    pub choices: [String; 4],
    pub correct_answer: String,
    pub strategy_tag: String,
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyField` for blank text, `DuplicateChoice` when two
    /// choices are identical, and `UnknownCorrectAnswer` when the correct answer does
    /// not exactly match a choice.
    pub fn validate(self) -> Result<Question, QuestionError> {
        require_text("passage", &self.passage)?;
        require_text("blank_sentence", &self.blank_sentence)?;
        for label in ChoiceLabel::ALL {
            require_text(choice_field(label), &self.choices[label.index()])?;
        }
        require_text("correct_answer", &self.correct_answer)?;
        require_text("strategy_tag", &self.strategy_tag)?;
        require_text("explanation", &self.explanation)?;

        for label in ChoiceLabel::ALL {
            let choice = &self.choices[label.index()];
            if self.choices[..label.index()].contains(choice) {
                return Err(QuestionError::DuplicateChoice { label });
            }
        }

        let correct = ChoiceLabel::ALL
            .into_iter()
            .find(|label| self.choices[label.index()] == self.correct_answer)
            .ok_or_else(|| QuestionError::UnknownCorrectAnswer {
                answer: self.correct_answer.clone(),
            })?;

        Ok(Question {
            id: self.id,
            passage: self.passage,
            blank_sentence: self.blank_sentence,
            choices: self.choices,
            correct,
            strategy_tag: self.strategy_tag,
            explanation: self.explanation,
        })
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), QuestionError> {
    if value.trim().is_empty() {
        return Err(QuestionError::EmptyField { field });
    }
    Ok(())
}

fn choice_field(label: ChoiceLabel) -> &'static str {
    match label {
        ChoiceLabel::A => "choice_A",
        ChoiceLabel::B => "choice_B",
        ChoiceLabel::C => "choice_C",
        ChoiceLabel::D => "choice_D",
    }
}

/// A single words-in-context item. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    passage: String,
    blank_sentence: String,
    choices: [String; 4],
    correct: ChoiceLabel,
    strategy_tag: String,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn passage(&self) -> &str {
        &self.passage
    }

    #[must_use]
    pub fn blank_sentence(&self) -> &str {
        &self.blank_sentence
    }

    #[must_use]
    pub fn choice(&self, label: ChoiceLabel) -> &str {
        &self.choices[label.index()]
    }

    /// Choices in A..D order.
    pub fn choices(&self) -> impl Iterator<Item = (ChoiceLabel, &str)> {
        ChoiceLabel::ALL
            .into_iter()
            .map(|label| (label, self.choice(label)))
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        self.choice(self.correct)
    }

    #[must_use]
    pub fn correct_label(&self) -> ChoiceLabel {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, label: ChoiceLabel) -> bool {
        self.choice(label) == self.correct_answer()
    }

    /// Every choice other than the correct answer, in A..D order.
    pub fn distractors(&self) -> impl Iterator<Item = (ChoiceLabel, &str)> {
        self.choices().filter(|(label, _)| !self.is_correct(*label))
    }

    #[must_use]
    pub fn strategy_tag(&self) -> &str {
        &self.strategy_tag
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// The blank sentence with its first placeholder replaced by the correct wording.
    #[must_use]
    pub fn substituted_sentence(&self) -> String {
        self.blank_sentence
            .replacen(BLANK, choice_content(self.correct_answer()), 1)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            id: QuestionId::new(1),
            passage: "The findings were groundbreaking.".into(),
            blank_sentence: "Her research was so _____ that it changed the entire field.".into(),
            choices: [
                "A. revolutionary".into(),
                "B. mundane".into(),
                "C. confusing".into(),
                "D. expensive".into(),
            ],
            correct_answer: "A. revolutionary".into(),
            strategy_tag: "Contextual Definition".into(),
            explanation: "Groundbreaking supports revolutionary.".into(),
        }
    }

    #[test]
    fn valid_draft_resolves_correct_label() {
        let question = draft().validate().unwrap();
        assert_eq!(question.correct_label(), ChoiceLabel::A);
        assert_eq!(question.correct_answer(), "A. revolutionary");
        assert!(question.is_correct(ChoiceLabel::A));
        for label in [ChoiceLabel::B, ChoiceLabel::C, ChoiceLabel::D] {
            assert!(!question.is_correct(label));
        }
    }

    #[test]
    fn correct_answer_must_match_a_choice_exactly() {
        let mut d = draft();
        d.correct_answer = "A. Revolutionary".into();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, QuestionError::UnknownCorrectAnswer { .. }));
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut d = draft();
        d.choices[2] = "  ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::EmptyField { field: "choice_C" }
        );
    }

    #[test]
    fn duplicate_choices_are_rejected() {
        let mut d = draft();
        d.choices[3] = "B. mundane".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::DuplicateChoice {
                label: ChoiceLabel::D
            }
        );
    }

    #[test]
    fn substitution_uses_choice_wording() {
        let question = draft().validate().unwrap();
        assert_eq!(
            question.substituted_sentence(),
            "Her research was so revolutionary that it changed the entire field."
        );
    }

    #[test]
    fn substitution_without_placeholder_keeps_sentence() {
        let mut d = draft();
        d.blank_sentence = "No blank here.".into();
        let question = d.validate().unwrap();
        assert_eq!(question.substituted_sentence(), "No blank here.");
    }

    #[test]
    fn choice_content_falls_back_to_whole_choice() {
        assert_eq!(choice_content("B. unwavering"), "unwavering");
        assert_eq!(choice_content("unlabelled"), "unlabelled");
        assert_eq!(choice_content("A. "), "A. ");
        assert_eq!(choice_content("A. first. second"), "first");
    }

    #[test]
    fn distractors_skip_correct_answer() {
        let question = draft().validate().unwrap();
        let labels: Vec<_> = question.distractors().map(|(label, _)| label).collect();
        assert_eq!(labels, vec![ChoiceLabel::B, ChoiceLabel::C, ChoiceLabel::D]);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!("c".parse::<ChoiceLabel>().unwrap(), ChoiceLabel::C);
        assert!("E".parse::<ChoiceLabel>().is_err());
        assert!("AB".parse::<ChoiceLabel>().is_err());
        assert_eq!(choice_letter("D. expensive"), Some('D'));
    }
}
