//! Wire types for the Life Harness API
//!
//! Request and response shapes exchanged with the server. Identifiers are
//! kept as opaque strings; the client never derives meaning from them.
//! Optional request fields use `skip_serializing_if` so that unset values
//! are omitted from the payload rather than sent as null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Token payload returned by the auth endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Token type, typically `"bearer"`
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Credentials payload for register and login
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// An authenticated user, opaque to the client beyond display
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Interview intensity preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Light,
    Balanced,
    Deep,
}

impl Intensity {
    /// Parse an intensity level from a string
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "balanced" => Ok(Self::Balanced),
            "deep" => Ok(Self::Deep),
            other => Err(format!("Unknown intensity: {}", other)),
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Balanced => write!(f, "balanced"),
            Self::Deep => write!(f, "deep"),
        }
    }
}

/// One-per-user demographic and preference record
#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    pub user_id: String,
    #[serde(default)]
    pub year_of_birth: Option<i32>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub primary_language: Option<String>,
    #[serde(default)]
    pub relationship_status: Option<String>,
    #[serde(default)]
    pub has_children: Option<bool>,
    #[serde(default)]
    pub children_count: Option<i32>,
    #[serde(default)]
    pub children_age_brackets: Option<Vec<String>>,
    #[serde(default)]
    pub main_role: Option<String>,
    #[serde(default)]
    pub field_or_industry: Option<String>,
    #[serde(default)]
    pub avoid_topics: Option<Vec<String>>,
    #[serde(default)]
    pub intensity: Option<String>,
    #[serde(default)]
    pub life_snapshot: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile upsert payload; unset fields are left untouched by the server
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_birth: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_age_brackets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_or_industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avoid_topics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<Intensity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub life_snapshot: Option<String>,
}

/// A named interview session
#[derive(Debug, Clone, Deserialize)]
pub struct Thread {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub root_prompt: String,
    #[serde(default)]
    pub persona: Option<String>,
    #[serde(default)]
    pub time_focus: Option<Vec<String>>,
    #[serde(default)]
    pub topic_focus: Option<Vec<String>>,
    pub questions_asked: u32,
    pub questions_since_last_freeform: u32,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// Thread creation payload
#[derive(Debug, Clone, Serialize)]
pub struct ThreadCreate {
    pub title: String,
    pub root_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_focus: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic_focus: Option<Vec<String>>,
}

/// Kind of question the server issued
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
}

/// One selectable option of a multiple-choice question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub text: String,
}

/// Sentinel choice id signalling a free-form "other" answer
pub const OTHER_CHOICE_ID: &str = "OTHER";

/// Server-issued prompt; exists only for the current step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<ChoiceOption>>,
}

/// Client-constructed reply to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choice_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
}

/// Control flag sent with every step request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepControl {
    Continue,
    Stop,
}

/// Payload for `POST /threads/{id}/step`
#[derive(Debug, Clone, Serialize)]
pub struct StepRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<Answer>,
    pub control: StepControl,
}

/// Server response to a step request: terminal, or exactly one question
#[derive(Debug, Clone, Deserialize)]
pub struct StepResponse {
    pub done: bool,
    #[serde(default)]
    pub question: Option<Question>,
}

/// Who may see an entry (or read a generated autobiography)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[serde(rename = "self")]
    SelfOnly,
    Trusted,
    Heirs,
    Public,
}

impl Visibility {
    /// Parse a visibility level from a string
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "self" => Ok(Self::SelfOnly),
            "trusted" => Ok(Self::Trusted),
            "heirs" => Ok(Self::Heirs),
            "public" => Ok(Self::Public),
            other => Err(format!("Unknown visibility: {}", other)),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfOnly => write!(f, "self"),
            Self::Trusted => write!(f, "trusted"),
            Self::Heirs => write!(f, "heirs"),
            Self::Public => write!(f, "public"),
        }
    }
}

/// Release policy attached to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SealType {
    None,
    UntilDate,
    UntilEvent,
    UntilManual,
}

impl SealType {
    /// Parse a seal type from a string
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "until_date" => Ok(Self::UntilDate),
            "until_event" => Ok(Self::UntilEvent),
            "until_manual" => Ok(Self::UntilManual),
            other => Err(format!("Unknown seal type: {}", other)),
        }
    }
}

impl fmt::Display for SealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::UntilDate => write!(f, "until_date"),
            Self::UntilEvent => write!(f, "until_event"),
            Self::UntilManual => write!(f, "until_manual"),
        }
    }
}

/// A persisted memory record
#[derive(Debug, Clone, Deserialize)]
pub struct LifeEntry {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub source_question_id: Option<String>,
    pub time_bucket: String,
    #[serde(default)]
    pub approx_year_start: Option<i32>,
    #[serde(default)]
    pub approx_year_end: Option<i32>,
    pub timeframe_label: String,
    pub headline: String,
    pub raw_text: String,
    pub distilled: String,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub topic_buckets: Option<Vec<String>>,
    pub visibility: Visibility,
    pub seal_type: SealType,
    #[serde(default)]
    pub seal_release_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub seal_event_key: Option<String>,
    #[serde(default)]
    pub seal_audiences_blocked: Option<Vec<String>>,
    #[serde(default)]
    pub emotional_tone: Option<String>,
    #[serde(default)]
    pub people: Option<Vec<String>>,
    #[serde(default)]
    pub locations: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seal patch payload; the only path through which visibility and seal
/// fields change. Unset fields are left untouched by the server.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SealUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_type: Option<SealType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_release_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_event_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seal_audiences_blocked: Option<Vec<String>>,
}

/// Server-side entry list filter; blank dimensions are omitted from the
/// query string entirely, never sent as empty values.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub time_bucket: Option<String>,
    pub topic_bucket: Option<String>,
}

impl EntryFilter {
    /// Query parameters for the set dimensions only
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(time_bucket) = &self.time_bucket {
            params.push(("time_bucket", time_bucket.clone()));
        }
        if let Some(topic_bucket) = &self.topic_bucket {
            params.push(("topic_bucket", topic_bucket.clone()));
        }
        params
    }
}

/// A coverage score for one (time period, topic) combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageCell {
    pub user_id: String,
    pub time_bucket: String,
    pub topic_bucket: String,
    pub score: i64,
}

/// Narrative tone for autobiography generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Light,
    Balanced,
    Deep,
}

impl Tone {
    /// Parse a tone from a string
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "balanced" => Ok(Self::Balanced),
            "deep" => Ok(Self::Deep),
            other => Err(format!("Unknown tone: {}", other)),
        }
    }
}

/// Generation scope: the whole life story, or a bounded range of years
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Scope {
    Full,
    TimeRange { from: i32, to: i32 },
}

/// Payload for `POST /autobiography/generate`
#[derive(Debug, Clone, Serialize)]
pub struct AutobiographyRequest {
    pub audience: Visibility,
    pub date: DateTime<Utc>,
    pub include_placeholders: bool,
    pub scope: Scope,
    pub tone: Tone,
}

/// Generated autobiography artifact
///
/// The outline is kept as loose JSON; in practice it is an array of
/// chapters (`{chapter, title, sections}`) but the server types it
/// loosely, so rendering is defensive.
#[derive(Debug, Clone, Deserialize)]
pub struct Autobiography {
    pub outline: serde_json::Value,
    pub markdown: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_step_request_omits_absent_answer() {
        let request = StepRequest {
            last_answer: None,
            control: StepControl::Continue,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"control": "continue"}));
    }

    #[test]
    fn test_step_request_with_answer_body() {
        let request = StepRequest {
            last_answer: Some(Answer {
                question_id: "q1".to_string(),
                choice_id: None,
                free_text: Some("I studied biology".to_string()),
            }),
            control: StepControl::Continue,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "last_answer": {"question_id": "q1", "free_text": "I studied biology"},
                "control": "continue"
            })
        );
    }

    #[test]
    fn test_step_request_stop_control() {
        let request = StepRequest {
            last_answer: None,
            control: StepControl::Stop,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value, json!({"control": "stop"}));
    }

    #[test]
    fn test_step_response_terminal() {
        let response: StepResponse = serde_json::from_value(json!({"done": true})).unwrap();
        assert!(response.done);
        assert!(response.question.is_none());
    }

    #[test]
    fn test_step_response_with_question() {
        let response: StepResponse = serde_json::from_value(json!({
            "done": false,
            "question": {
                "id": "q1",
                "type": "short_answer",
                "text": "Tell me about college"
            }
        }))
        .unwrap();
        assert!(!response.done);
        let question = response.question.unwrap();
        assert_eq!(question.id, "q1");
        assert_eq!(question.question_type, QuestionType::ShortAnswer);
        assert!(question.options.is_none());
    }

    #[test]
    fn test_question_multiple_choice_options() {
        let question: Question = serde_json::from_value(json!({
            "id": "q2",
            "type": "multiple_choice",
            "text": "Pick one",
            "options": [
                {"id": "a", "text": "First"},
                {"id": "OTHER", "text": "Something else"}
            ]
        }))
        .unwrap();
        assert_eq!(question.question_type, QuestionType::MultipleChoice);
        let options = question.options.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].id, OTHER_CHOICE_ID);
    }

    #[test]
    fn test_entry_filter_query_omits_blank_dimensions() {
        let filter = EntryFilter {
            time_bucket: Some("20s".to_string()),
            topic_bucket: None,
        };
        let params = filter.query();
        assert_eq!(params, vec![("time_bucket", "20s".to_string())]);
    }

    #[test]
    fn test_entry_filter_query_empty_when_unset() {
        let filter = EntryFilter::default();
        assert!(filter.query().is_empty());
    }

    #[test]
    fn test_entry_filter_query_both_dimensions() {
        let filter = EntryFilter {
            time_bucket: Some("30s".to_string()),
            topic_bucket: Some("work_career".to_string()),
        };
        let params = filter.query();
        assert_eq!(params.len(), 2);
        assert_eq!(params[0], ("time_bucket", "30s".to_string()));
        assert_eq!(params[1], ("topic_bucket", "work_career".to_string()));
    }

    #[test]
    fn test_scope_full_serialization() {
        let value = serde_json::to_value(Scope::Full).unwrap();
        assert_eq!(value, json!({"type": "full"}));
    }

    #[test]
    fn test_scope_time_range_serialization() {
        let value = serde_json::to_value(Scope::TimeRange {
            from: 1995,
            to: 2010,
        })
        .unwrap();
        assert_eq!(value, json!({"type": "time_range", "from": 1995, "to": 2010}));
    }

    #[test]
    fn test_visibility_self_wire_value() {
        let value = serde_json::to_value(Visibility::SelfOnly).unwrap();
        assert_eq!(value, json!("self"));
        let parsed: Visibility = serde_json::from_value(json!("self")).unwrap();
        assert_eq!(parsed, Visibility::SelfOnly);
    }

    #[test]
    fn test_visibility_parse_str() {
        assert_eq!(Visibility::parse_str("self").unwrap(), Visibility::SelfOnly);
        assert_eq!(Visibility::parse_str("HEIRS").unwrap(), Visibility::Heirs);
        assert!(Visibility::parse_str("everyone").is_err());
    }

    #[test]
    fn test_seal_type_parse_str() {
        assert_eq!(SealType::parse_str("none").unwrap(), SealType::None);
        assert_eq!(
            SealType::parse_str("until_date").unwrap(),
            SealType::UntilDate
        );
        assert!(SealType::parse_str("forever").is_err());
    }

    #[test]
    fn test_seal_update_omits_unset_fields() {
        let update = SealUpdate {
            visibility: Some(Visibility::Trusted),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"visibility": "trusted"}));
    }

    #[test]
    fn test_thread_create_omits_unset_fields() {
        let create = ThreadCreate {
            title: "College".to_string(),
            root_prompt: "Tell me about college".to_string(),
            persona: None,
            time_focus: None,
            topic_focus: None,
        };
        let value = serde_json::to_value(&create).unwrap();
        assert_eq!(
            value,
            json!({"title": "College", "root_prompt": "Tell me about college"})
        );
    }

    #[test]
    fn test_profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            year_of_birth: Some(1990),
            intensity: Some(Intensity::Deep),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, json!({"year_of_birth": 1990, "intensity": "deep"}));
    }

    #[test]
    fn test_life_entry_deserializes_minimal_record() {
        let entry: LifeEntry = serde_json::from_value(json!({
            "id": "e1",
            "user_id": "u1",
            "time_bucket": "20s",
            "timeframe_label": "Early twenties",
            "headline": "First job",
            "raw_text": "I started working at a lab.",
            "distilled": "Started a lab job.",
            "visibility": "self",
            "seal_type": "none",
            "created_at": "2024-01-02T03:04:05Z",
            "updated_at": "2024-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!(entry.visibility, Visibility::SelfOnly);
        assert_eq!(entry.seal_type, SealType::None);
        assert!(entry.thread_id.is_none());
        assert!(entry.tags.is_none());
    }

    #[test]
    fn test_tone_and_intensity_parse_str() {
        assert_eq!(Tone::parse_str("balanced").unwrap(), Tone::Balanced);
        assert!(Tone::parse_str("loud").is_err());
        assert_eq!(Intensity::parse_str("light").unwrap(), Intensity::Light);
        assert!(Intensity::parse_str("extreme").is_err());
    }
}
