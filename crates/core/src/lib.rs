pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod quiz;
pub mod recommend;

pub use catalog::{Catalog, CatalogError, CatalogFilter, CatalogQuery, Page, PageRequest};
pub use domain::product::{FloorCategory, Product, ProductId};
pub use domain::quiz::{Answer, AnswerSet, Question, QuestionId};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use quiz::{Questionnaire, QuizError, QuizProfile, QuizSession, QuizStep};
pub use recommend::{recommend, RecommendationEngine, ScoredProduct, ScoringWeights};
