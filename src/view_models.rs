// src/view_models.rs

/// Una pregunta corregida, lista para pintar en la vista de resultados.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedbackCard {
    pub question_id: String,
    pub number: usize, // 1-based
    pub prompt: String,
    pub options: Vec<String>, // "A. texto"
    pub user_answer: String,
    pub correct_answer: String,
    pub similarity: Option<String>,
    pub score: Option<String>,
    pub verdict: Option<String>,
    pub explanation: Option<String>,
    pub is_correct: bool,
}

impl FeedbackCard {
    pub fn heading(&self) -> String {
        format!("Q{}. {}", self.number, self.prompt)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_correct {
            "✅ Correct"
        } else {
            "❌ Incorrect"
        }
    }
}
