//! The "find your ideal floor" questionnaire and its navigation.

mod profile;
mod questionnaire;
mod session;

use thiserror::Error;

use crate::domain::quiz::QuestionId;

pub use profile::{AreaType, Environment, Feature, QuizProfile, Room};
pub use questionnaire::{
    Questionnaire, AREA_QUESTION, ENVIRONMENT_QUESTION, FEATURES_QUESTION, HUMIDITY_QUESTION,
    PREFERENCE_QUESTION, ROOM_QUESTION,
};
pub use session::{QuizSession, QuizStep};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QuizError {
    #[error("questionnaire has no questions")]
    EmptyQuestionnaire,
    #[error("question {question} is not part of the questionnaire")]
    UnknownQuestion { question: QuestionId },
    #[error("`{option}` is not an option of question {question}")]
    UnknownOption { question: QuestionId, option: String },
    #[error("answer shape does not match question {question} (multi-select: {expected_multiple})")]
    ShapeMismatch { question: QuestionId, expected_multiple: bool },
    #[error("question {question} must be answered before moving on")]
    Unanswered { question: QuestionId },
    #[error("cannot move {direction} from question index {index}")]
    InvalidMove { index: usize, direction: &'static str },
    #[error("quiz is still at question index {index}")]
    NotFinished { index: usize },
    #[error("quiz is already finished")]
    AlreadyFinished,
}
