use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub correct: String,
}

/// What clients get to see of a question. Never carries the correct option.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionSummary {
    pub id: i64,
    pub text: String,
    pub options: Vec<String>,
    pub total_questions: usize,
}

/// Query of `GET /quiz/question`. `previous_id` is accepted in any form but plays
/// no part in selection.
#[derive(Deserialize, Debug, Default)]
pub struct QuestionQuery {
    pub previous_id: Option<String>,
}

/// Body of `POST /quiz/answer`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnswerSubmission {
    pub id: i64,
    pub answer: String,
    #[serde(default)]
    pub score: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnswerResult {
    pub is_correct: bool,
    pub correct_answer: String,
    pub score: i64,
    pub high_score: i64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AnswerOutcome {
    Scored(AnswerResult),
    Rejected { error: String },
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct HighScore {
    pub high_score: i64,
}

pub fn default_questions() -> Vec<Question> {
    let question = |id: i64, text: &str, options: [&str; 4], correct: &str| Question {
        id,
        text: text.to_string(),
        options: options.iter().map(|option| option.to_string()).collect(),
        correct: correct.to_string(),
    };

    vec![
        question(
            1,
            "What command lists directory contents?",
            ["ls", "cd", "rm", "pwd"],
            "ls",
        ),
        question(
            2,
            "Which command searches for text in files?",
            ["find", "grep", "locate", "cat"],
            "grep",
        ),
        question(
            3,
            "What changes file permissions?",
            ["chmod", "chown", "mv", "cp"],
            "chmod",
        ),
        question(
            4,
            "Which command displays the current directory?",
            ["dir", "pwd", "path", "where"],
            "pwd",
        ),
        question(
            5,
            "What removes a file?",
            ["rm", "del", "erase", "unlink"],
            "rm",
        ),
    ]
}
