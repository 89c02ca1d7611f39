use super::*;
use crate::model::{EvaluatedQuestion, QuestionOptions};

fn non_blank(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

fn card_for(idx: usize, q: &EvaluatedQuestion) -> FeedbackCard {
    let options = match (&q.kind, &q.options) {
        (QuestionKind::Mcq, Some(opts)) => option_lines(opts),
        _ => Vec::new(),
    };

    FeedbackCard {
        question_id: q.question_id.clone(),
        number: idx + 1,
        prompt: q.prompt.clone(),
        options,
        user_answer: non_blank(q.user_answer.as_ref()).unwrap_or_else(|| "—".to_string()),
        correct_answer: q.correct_answer.clone(),
        similarity: q.similarity.map(|s| format!("{s:.2}")),
        score: q.score.map(|s| format!("{s:.2}")),
        verdict: non_blank(q.verdict.as_ref()),
        explanation: non_blank(q.explanation.as_ref()),
        is_correct: q.is_correct,
    }
}

fn option_lines(options: &QuestionOptions) -> Vec<String> {
    options
        .labeled()
        .into_iter()
        .map(|(label, text)| format!("{label}. {text}"))
        .collect()
}

impl QuizApp {
    /// "4 / 5", o `None` si todavía no hay corrección.
    pub fn score_line(&self) -> Option<String> {
        self.result
            .as_ref()
            .map(|r| format!("{} / {}", r.total_correct, r.total_questions))
    }

    pub fn feedback_cards(&self) -> Vec<FeedbackCard> {
        self.result
            .as_ref()
            .map(|r| {
                r.evaluated_quiz
                    .iter()
                    .enumerate()
                    .map(|(i, q)| card_for(i, q))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_format_answers_and_similarity() {
        let mut app = QuizApp::with_backend("http://127.0.0.1:9");
        assert_eq!(app.score_line(), None);
        assert!(app.feedback_cards().is_empty());

        let result: SubmissionResult = serde_json::from_str(
            r#"{"total_correct":1,"total_questions":2,"evaluated_quiz":[
                {"question_id":"q_0","question":"Pick","type":"MCQ",
                 "options":{"A":"one","B":"two"},"user_answer":"B","correct_answer":"B",
                 "is_correct":true,"similarity":null,"explanation":""},
                {"question_id":"q_1","question":"Say","type":"SAQ","options":null,
                 "user_answer":"","correct_answer":"thing","is_correct":false,
                 "similarity":0.4567,"explanation":"Missed the point"}
            ]}"#,
        )
        .unwrap();
        app.result = Some(result);

        assert_eq!(app.score_line().as_deref(), Some("1 / 2"));
        let cards = app.feedback_cards();
        assert_eq!(cards[0].heading(), "Q1. Pick");
        assert_eq!(cards[0].options, vec!["A. one", "B. two"]);
        assert_eq!(cards[0].explanation, None);
        assert_eq!(cards[0].status_label(), "✅ Correct");
        assert_eq!(cards[1].user_answer, "—");
        assert_eq!(cards[1].similarity.as_deref(), Some("0.46"));
        assert!(cards[1].options.is_empty());
        assert_eq!(cards[1].status_label(), "❌ Incorrect");
    }
}
