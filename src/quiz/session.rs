use std::{
    collections::HashSet,
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::info;
use rand::{seq::SliceRandom, thread_rng, Rng};

use super::catalog::Catalog;
use crate::models::quiz::{AnswerOutcome, AnswerResult, AnswerSubmission, Question, QuestionSummary};

pub const POINTS_PER_CORRECT_ANSWER: i64 = 10;
pub const INVALID_QUESTION_ID: &str = "invalid question id";

#[derive(Debug, Default)]
struct SessionState {
    high_score: i64,
    asked: HashSet<i64>,
}

/// Process-wide quiz state. Both fields live behind one mutex so selection and
/// scoring never interleave their read-modify-write.
#[derive(Debug)]
pub struct QuizSession {
    catalog: Catalog,
    state: Mutex<SessionState>,
}

impl QuizSession {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn next_question(&self) -> QuestionSummary {
        self.next_question_with(&mut thread_rng())
    }

    /// Picks uniformly among questions not yet asked in this cycle. Once every
    /// question has been asked the cycle starts over.
    pub fn next_question_with<R: Rng + ?Sized>(&self, rng: &mut R) -> QuestionSummary {
        let mut state = self.lock();

        if state.asked.len() >= self.catalog.len() {
            info!("All {} questions asked, starting a new cycle", self.catalog.len());
            state.asked.clear();
        }

        let candidates: Vec<&Question> = self
            .catalog
            .iter()
            .filter(|question| !state.asked.contains(&question.id))
            .collect();

        let question = candidates
            .choose(rng)
            .copied()
            .unwrap_or_else(|| self.catalog.first());

        state.asked.insert(question.id);

        QuestionSummary {
            id: question.id,
            text: question.text.clone(),
            options: question.options.clone(),
            total_questions: self.catalog.len(),
        }
    }

    pub fn submit_answer(&self, submission: &AnswerSubmission) -> AnswerOutcome {
        let question = match self.catalog.get(submission.id) {
            Some(question) => question,
            None => {
                return AnswerOutcome::Rejected {
                    error: INVALID_QUESTION_ID.to_string(),
                }
            }
        };

        let is_correct = submission.answer == question.correct;
        let score = if is_correct {
            submission.score.saturating_add(POINTS_PER_CORRECT_ANSWER)
        } else {
            submission.score
        };

        let mut state = self.lock();
        if score > state.high_score {
            info!("New high score: {} (was {})", score, state.high_score);
            state.high_score = score;
        }

        AnswerOutcome::Scored(AnswerResult {
            is_correct,
            correct_answer: question.correct.clone(),
            score,
            high_score: state.high_score,
        })
    }

    pub fn high_score(&self) -> i64 {
        self.lock().high_score
    }

    /// Starts a fresh question cycle. The high score survives.
    pub fn reset(&self) {
        self.lock().asked.clear();
    }

    pub fn asked_count(&self) -> usize {
        self.lock().asked.len()
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
