use crate::domain::quiz::{Answer, AnswerSet, Question, QuestionId};
use crate::quiz::QuizError;

pub const AREA_QUESTION: QuestionId = QuestionId(1);
pub const ENVIRONMENT_QUESTION: QuestionId = QuestionId(2);
pub const ROOM_QUESTION: QuestionId = QuestionId(3);
pub const HUMIDITY_QUESTION: QuestionId = QuestionId(4);
pub const FEATURES_QUESTION: QuestionId = QuestionId(5);
pub const PREFERENCE_QUESTION: QuestionId = QuestionId(6);

/// Ordered, immutable list of quiz questions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The "find your ideal floor" questionnaire shown on the storefront.
    pub fn floor_picker() -> Self {
        Self::new(vec![
            question(AREA_QUESTION, "O piso é para qual tipo de área?", &["Residencial", "Comercial"]),
            question(ENVIRONMENT_QUESTION, "Qual o tipo de ambiente?", &["Casa", "Apartamento"]),
            question(
                ROOM_QUESTION,
                "Onde o piso será instalado?",
                &["Sala", "Cozinha", "Banheiro", "Área externa", "Quarto", "Corredor"],
            ),
            question(HUMIDITY_QUESTION, "O local tem contato com água ou umidade?", &["Sim", "Não"]),
            Question {
                multiple: true,
                ..question(
                    FEATURES_QUESTION,
                    "Meu piso precisa ter... (pode escolher mais de uma opção)",
                    &[
                        "Resistente à água",
                        "Proteção antibacteriana",
                        "Conforto térmico",
                        "Conforto acústico",
                        "Antiderrapante",
                        "Fácil de limpar",
                    ],
                )
            },
            question(PREFERENCE_QUESTION, "O piso que eu prefiro é...", &["Piso Vinílico", "Piso Laminado"]),
        ])
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn find(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Checks an answer set that was built outside a [`super::QuizSession`].
    ///
    /// Missing answers are allowed; unknown questions, unknown options and a
    /// single/multi shape that does not match the question are rejected.
    pub fn validate(&self, answers: &AnswerSet) -> Result<(), QuizError> {
        let mut ids: Vec<_> = answers.iter().map(|(id, _)| *id).collect();
        ids.sort();

        for id in ids {
            let question = self.find(id).ok_or(QuizError::UnknownQuestion { question: id })?;
            let Some(answer) = answers.get(id) else {
                continue;
            };

            match (question.multiple, answer) {
                (false, Answer::Multiple(_)) | (true, Answer::Single(_)) => {
                    return Err(QuizError::ShapeMismatch {
                        question: id,
                        expected_multiple: question.multiple,
                    });
                }
                _ => {}
            }

            if let Some(option) =
                answer.selections().into_iter().find(|option| !question.has_option(option))
            {
                return Err(QuizError::UnknownOption {
                    question: id,
                    option: option.to_owned(),
                });
            }
        }

        Ok(())
    }
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::floor_picker()
    }
}

fn question(id: QuestionId, prompt: &str, options: &[&str]) -> Question {
    Question {
        id,
        prompt: prompt.to_owned(),
        options: options.iter().map(|option| (*option).to_owned()).collect(),
        multiple: false,
    }
}
