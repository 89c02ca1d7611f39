use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Fases del asistente, en orden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Upload,
    Mcq,
    Saq,
    Submit,
    Result,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    #[serde(rename = "MCQ")]
    Mcq,
    #[serde(rename = "SAQ")]
    Saq,
    #[serde(other)]
    Other,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::Mcq => "MCQ",
            QuestionKind::Saq => "SAQ",
            QuestionKind::Other => "Question",
        }
    }
}

/// PDF elegido por el usuario. El nombre hace de clave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Opciones de una MCQ: el backend manda una lista o un objeto `label -> texto`.
/// El objeto conserva el orden en que llega.
#[derive(Clone, Debug, PartialEq)]
pub enum QuestionOptions {
    List(Vec<String>),
    Labeled(Vec<(String, String)>),
}

impl QuestionOptions {
    /// Textos de las opciones en orden de llegada.
    pub fn texts(&self) -> Vec<&str> {
        match self {
            QuestionOptions::List(items) => items.iter().map(String::as_str).collect(),
            QuestionOptions::Labeled(pairs) => pairs.iter().map(|(_, t)| t.as_str()).collect(),
        }
    }

    /// Pares (etiqueta, texto). Las listas usan la secuencia A, B, C, D...
    pub fn labeled(&self) -> Vec<(String, &str)> {
        match self {
            QuestionOptions::List(items) => items
                .iter()
                .enumerate()
                .map(|(i, t)| (option_label(i), t.as_str()))
                .collect(),
            QuestionOptions::Labeled(pairs) => {
                pairs.iter().map(|(l, t)| (l.clone(), t.as_str())).collect()
            }
        }
    }
}

const OPTION_LABELS: [&str; 4] = ["A", "B", "C", "D"];

/// Etiqueta estable para la opción `idx`: A..D y luego "Option N".
pub fn option_label(idx: usize) -> String {
    OPTION_LABELS
        .get(idx)
        .map(|l| l.to_string())
        .unwrap_or_else(|| format!("Option {}", idx + 1))
}

fn option_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl<'de> Deserialize<'de> for QuestionOptions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = QuestionOptions;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a list of options or a map of label to option text")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(value) = seq.next_element::<serde_json::Value>()? {
                    items.push(option_text(value));
                }
                Ok(QuestionOptions::List(items))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut pairs = Vec::new();
                while let Some((label, value)) = map.next_entry::<String, serde_json::Value>()? {
                    pairs.push((label, option_text(value)));
                }
                Ok(QuestionOptions::Labeled(pairs))
            }
        }

        deserializer.deserialize_any(OptionsVisitor)
    }
}

impl Serialize for QuestionOptions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        match self {
            QuestionOptions::List(items) => items.serialize(serializer),
            QuestionOptions::Labeled(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (label, text) in pairs {
                    map.serialize_entry(label, text)?;
                }
                map.end()
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Question {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "question", default)]
    pub prompt: String,
    #[serde(default)]
    pub options: Option<QuestionOptions>,
}

impl Question {
    /// Id de la pregunta, o `q_<posición>` si el backend no mandó ninguno.
    pub fn id_or_position(&self, position: usize) -> String {
        match &self.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => format!("q_{position}"),
        }
    }
}

/// Respuestas de un tipo de pregunta: id -> etiqueta (MCQ) o texto libre (SAQ).
pub type AnswerSet = HashMap<String, String>;

/// Preguntas del quiz activo, ya separadas por tipo.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActiveQuiz {
    pub mcq: Vec<Question>,
    pub saq: Vec<Question>,
}

impl ActiveQuiz {
    /// Asigna ids a las preguntas que no traen (posición en la lista completa)
    /// y descarta los tipos desconocidos. Tras esto toda pregunta tiene `id`.
    ///
    /// Falla si una MCQ llega sin opciones o si dos preguntas acaban con el
    /// mismo id: el asistente no podría avanzar o mezclaría respuestas.
    pub fn from_questions(questions: Vec<Question>) -> Result<Self, String> {
        let mut quiz = ActiveQuiz::default();
        let mut seen = HashSet::new();
        for (idx, mut q) in questions.into_iter().enumerate() {
            if q.kind == QuestionKind::Other {
                log::warn!("Ignoring question {idx} with unknown type");
                continue;
            }
            let id = q.id_or_position(idx);
            if !seen.insert(id.clone()) {
                return Err(format!("duplicate question id `{id}`"));
            }
            if q.kind == QuestionKind::Mcq
                && q.options.as_ref().is_none_or(|o| o.texts().is_empty())
            {
                return Err(format!("MCQ `{id}` has no options"));
            }
            q.id = Some(id);
            match q.kind {
                QuestionKind::Mcq => quiz.mcq.push(q),
                _ => quiz.saq.push(q),
            }
        }
        Ok(quiz)
    }

    pub fn questions(&self, kind: QuestionKind) -> &[Question] {
        match kind {
            QuestionKind::Mcq => &self.mcq,
            QuestionKind::Saq => &self.saq,
            QuestionKind::Other => &[],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EvaluatedQuestion {
    pub question_id: String,
    #[serde(rename = "question", default)]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Option<QuestionOptions>,
    #[serde(default)]
    pub user_answer: Option<String>,
    #[serde(default)]
    pub correct_answer: String,
    pub is_correct: bool,
    #[serde(default)]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub verdict: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    pub total_correct: u32,
    pub total_questions: u32,
    pub evaluated_quiz: Vec<EvaluatedQuestion>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Rechazo del backend al subir los PDFs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadError {
    pub message: String,
    pub files: Vec<String>,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            files: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_labels_fall_back_after_d() {
        assert_eq!(option_label(0), "A");
        assert_eq!(option_label(3), "D");
        assert_eq!(option_label(4), "Option 5");
    }

    #[test]
    fn labeled_options_keep_backend_order() {
        let q: Question = serde_json::from_str(
            r#"{"type":"MCQ","question":"?","options":{"C":"third","A":"first","B":"second"}}"#,
        )
        .unwrap();
        let options = q.options.unwrap();
        assert_eq!(options.texts(), vec!["third", "first", "second"]);
        assert_eq!(options.labeled()[0], ("C".to_string(), "third"));
    }

    #[test]
    fn list_options_get_letter_labels() {
        let q: Question =
            serde_json::from_str(r#"{"type":"MCQ","question":"?","options":["x","y"]}"#).unwrap();
        let options = q.options.unwrap();
        let labeled = options.labeled();
        assert_eq!(labeled, vec![("A".to_string(), "x"), ("B".to_string(), "y")]);
    }

    #[test]
    fn unknown_question_types_are_dropped_when_partitioning() {
        let questions: Vec<Question> = serde_json::from_str(
            r#"[
                {"type":"MCQ","question":"one","options":["a","b"]},
                {"type":"ESSAY","question":"two"},
                {"id":"s1","type":"SAQ","question":"three"}
            ]"#,
        )
        .unwrap();
        let quiz = ActiveQuiz::from_questions(questions).unwrap();
        assert_eq!(quiz.mcq.len(), 1);
        assert_eq!(quiz.saq.len(), 1);
        assert_eq!(quiz.mcq[0].id.as_deref(), Some("q_0"));
        assert_eq!(quiz.saq[0].id.as_deref(), Some("s1"));
    }

    #[test]
    fn mcq_without_options_is_rejected() {
        for options in ["", r#","options":null"#, r#","options":[]"#, r#","options":{}"#] {
            let body = format!(r#"[{{"id":"m1","type":"MCQ","question":"?"{options}}}]"#);
            let questions: Vec<Question> = serde_json::from_str(&body).unwrap();
            let err = ActiveQuiz::from_questions(questions).unwrap_err();
            assert!(err.contains("m1"), "{body}: {err}");
        }
    }

    #[test]
    fn saq_without_options_is_fine() {
        let questions: Vec<Question> =
            serde_json::from_str(r#"[{"type":"SAQ","question":"Why?"}]"#).unwrap();
        let quiz = ActiveQuiz::from_questions(questions).unwrap();
        assert_eq!(quiz.saq[0].id.as_deref(), Some("q_0"));
    }

    #[test]
    fn synthesized_id_clashing_with_backend_id_is_rejected() {
        let questions: Vec<Question> = serde_json::from_str(
            r#"[
                {"id":"q_1","type":"MCQ","question":"one","options":["a","b"]},
                {"type":"MCQ","question":"two","options":["a","b"]}
            ]"#,
        )
        .unwrap();
        let err = ActiveQuiz::from_questions(questions).unwrap_err();
        assert!(err.contains("q_1"));

        let questions: Vec<Question> = serde_json::from_str(
            r#"[
                {"id":"x","type":"SAQ","question":"one"},
                {"id":"x","type":"MCQ","question":"two","options":["a"]}
            ]"#,
        )
        .unwrap();
        assert!(ActiveQuiz::from_questions(questions).is_err());
    }

    #[test]
    fn evaluated_question_accepts_null_options_and_extra_fields() {
        let eq: EvaluatedQuestion = serde_json::from_str(
            r#"{"question_id":"q_3","question":"Why?","type":"SAQ","options":null,
                "user_answer":"","correct_answer":"Because","similarity":null,
                "is_correct":false,"explanation":"close","score":0.4,"verdict":"partial"}"#,
        )
        .unwrap();
        assert!(eq.options.is_none());
        assert_eq!(eq.score, Some(0.4));
        assert_eq!(eq.verdict.as_deref(), Some("partial"));
    }
}
