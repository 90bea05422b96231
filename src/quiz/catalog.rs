use std::{collections::HashSet, fs, path::Path};

use log::info;
use thiserror::Error;

use crate::models::quiz::{default_questions, Question};

#[derive(Error, Debug)]
pub enum QuizError {
    #[error("quiz catalog is empty")]
    EmptyCatalog,

    #[error("question id {0} appears more than once")]
    DuplicateId(i64),

    #[error("question {0} has no options")]
    NoOptions(i64),

    #[error("correct answer of question {0} is not one of its options")]
    CorrectNotInOptions(i64),

    #[error("failed to read quiz catalog: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse quiz catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fixed set of questions, checked once when loaded.
#[derive(Debug, Clone)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.id) {
                return Err(QuizError::DuplicateId(question.id));
            }
            if question.options.is_empty() {
                return Err(QuizError::NoOptions(question.id));
            }
            if !question.options.contains(&question.correct) {
                return Err(QuizError::CorrectNotInOptions(question.id));
            }
        }

        Ok(Self { questions })
    }

    pub fn builtin() -> Self {
        Self {
            questions: default_questions(),
        }
    }

    /// Loads a JSON array of questions.
    pub fn from_file(path: &Path) -> Result<Self, QuizError> {
        let data = fs::read_to_string(path)?;
        let questions: Vec<Question> = serde_json::from_str(&data)?;
        let catalog = Self::new(questions)?;

        info!(
            "Loaded {} quiz questions from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    // Never true: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub fn first(&self) -> &Question {
        &self.questions[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, options: &[&str], correct: &str) -> Question {
        Question {
            id,
            text: format!("question {}", id),
            options: options.iter().map(|option| option.to_string()).collect(),
            correct: correct.to_string(),
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let builtin = Catalog::builtin();
        assert_eq!(builtin.len(), 5);
        assert!(Catalog::new(default_questions()).is_ok());
        assert_eq!(builtin.get(2).map(|q| q.correct.as_str()), Some("grep"));
        assert!(builtin.get(42).is_none());
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(QuizError::EmptyCatalog)));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let questions = vec![question(1, &["a"], "a"), question(1, &["b"], "b")];
        assert!(matches!(
            Catalog::new(questions),
            Err(QuizError::DuplicateId(1))
        ));
    }

    #[test]
    fn correct_answer_must_be_an_option() {
        assert!(matches!(
            Catalog::new(vec![question(3, &["a", "b"], "c")]),
            Err(QuizError::CorrectNotInOptions(3))
        ));
        assert!(matches!(
            Catalog::new(vec![question(4, &[], "c")]),
            Err(QuizError::NoOptions(4))
        ));
    }

    #[test]
    fn catalog_loads_from_json_file() {
        let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
        fs::write(
            &path,
            r#"[{"id": 7, "text": "Which shell builtin changes directory?", "options": ["cd", "ls"], "correct": "cd"}]"#,
        )
        .unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.first().id, 7);
    }
}
