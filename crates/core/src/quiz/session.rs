use std::collections::BTreeSet;

use crate::domain::quiz::{Answer, AnswerSet, Question};
use crate::quiz::{Questionnaire, QuizError};

/// Result of moving forward through the quiz.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizStep {
    Question(usize),
    Finished(AnswerSet),
}

/// Linear walk over a questionnaire, collecting answers as it goes.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questionnaire: Questionnaire,
    index: usize,
    answers: AnswerSet,
    finished: bool,
}

impl QuizSession {
    pub fn new(questionnaire: Questionnaire) -> Result<Self, QuizError> {
        if questionnaire.is_empty() {
            return Err(QuizError::EmptyQuestionnaire);
        }
        Ok(Self { questionnaire, index: 0, answers: AnswerSet::new(), finished: false })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn question_count(&self) -> usize {
        self.questionnaire.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.questionnaire.len()
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn current(&self) -> &Question {
        // index never leaves 0..len and len > 0
        &self.questionnaire.questions()[self.index]
    }

    pub fn progress_percent(&self) -> f64 {
        (self.index + 1) as f64 / self.questionnaire.len() as f64 * 100.0
    }

    /// Records `option` for the current question. Single-select questions
    /// replace the previous pick; multi-select questions toggle membership.
    pub fn select(&mut self, option: &str) -> Result<(), QuizError> {
        self.ensure_open()?;
        let question = self.current();
        if !question.has_option(option) {
            return Err(QuizError::UnknownOption { question: question.id, option: option.to_owned() });
        }
        let (id, multiple) = (question.id, question.multiple);

        if !multiple {
            self.answers.insert(id, Answer::Single(option.to_owned()));
            return Ok(());
        }

        let mut selected = match self.answers.remove(id) {
            Some(Answer::Multiple(values)) => values,
            _ => BTreeSet::new(),
        };
        if !selected.remove(option) {
            selected.insert(option.to_owned());
        }
        self.answers.insert(id, Answer::Multiple(selected));
        Ok(())
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.answers
            .get(self.current().id)
            .is_some_and(|answer| answer.selections().contains(&option))
    }

    pub fn can_advance(&self) -> bool {
        self.answers.get(self.current().id).is_some_and(|answer| !answer.is_empty())
    }

    /// Moves to the next question, or finishes the quiz when on the last one.
    pub fn next(&mut self) -> Result<QuizStep, QuizError> {
        self.ensure_open()?;
        if !self.can_advance() {
            return Err(QuizError::Unanswered { question: self.current().id });
        }

        if self.is_last() {
            self.finished = true;
            return Ok(QuizStep::Finished(self.answers.clone()));
        }

        self.index += 1;
        Ok(QuizStep::Question(self.index))
    }

    pub fn previous(&mut self) -> Result<usize, QuizError> {
        self.ensure_open()?;
        if self.index == 0 {
            return Err(QuizError::InvalidMove { index: self.index, direction: "previous" });
        }
        self.index -= 1;
        Ok(self.index)
    }

    /// Consumes a finished session and hands back its answers.
    pub fn into_answers(self) -> Result<AnswerSet, QuizError> {
        if !self.finished {
            return Err(QuizError::NotFinished { index: self.index });
        }
        Ok(self.answers)
    }

    fn ensure_open(&self) -> Result<(), QuizError> {
        if self.finished {
            return Err(QuizError::AlreadyFinished);
        }
        Ok(())
    }
}
