//! Satchel One (Show My Homework) client
//!
//! Read-only access to a student's todo list, assignments and attachments.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use serde_json::{Map, Value};

use crate::credentials::BearerToken;
use crate::define_scaffold;
use crate::error::{ApiError, Result};
use crate::request::{GetRequest, RequestDescriptor};
use crate::scaffold::ObjectScaffold;

pub const BASE_URL: &str = "https://api.satchelone.com/api";

const ACCEPT: &str = "application/smhw.v2021.5+json";
const SITE: &str = "https://www.satchelone.com";

/// Keys removed from a homework and its lesson occurrences
const ASSIGNMENT_NOISE: [&str; 18] = [
    "teacher_id",
    "published_at",
    "created_at",
    "class_year",
    "submission_status",
    "submission_ids",
    "school_id",
    "school_name",
    "school_logo_url",
    "submission_method_id",
    "for_partial_group",
    "partial_group_of_student_ids",
    "source_id",
    "marking_scheme_id",
    "submission_type",
    "community_resource_item_id",
    "bookstore_content_ids",
    "period_id",
];

const ATTACHMENT_NOISE: [&str; 5] = [
    "user_id",
    "preview_url",
    "third_party_provider",
    "third_party_shared_link",
    "is_previewable",
];

/// Base URL and student token
#[derive(Debug, Clone)]
pub struct SmhClient {
    base_url: String,
    token: BearerToken,
}

impl SmhClient {
    pub fn new(token: BearerToken) -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            token,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The service only answers requests that look like its web client
    fn descriptor(&self, path: &str) -> RequestDescriptor {
        RequestDescriptor::new(format!("{}{}", self.base_url, path))
            .header("accept", ACCEPT)
            .header("accept-language", "en-GB,en-US;q=0.9,en;q=0.8")
            .header("authorization", self.token.header_value())
            .header("origin", SITE)
            .header("referer", format!("{}/", SITE))
            .header("x-platform", "web")
    }
}

/// Parse an ISO-8601 date-time, or a bare date taken as midnight UTC
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime);
    }
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| ApiError::parse(format!("invalid timestamp '{}': {}", value, e)))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

fn strip_keys(object: &mut Map<String, Value>, keys: &[&str]) {
    object.retain(|key, _| !keys.contains(&key.as_str()));
}

define_scaffold! {
    /// One entry of the todo list
    pub struct Todo {
        class_task_id: int => "class_task_id",
        class_task_title: probe_str => "class_task_title",
        subject: probe_str => "subject",
        due_on: probe_str => "due_on",
        is_completed: bool => "completed",
    }
}

/// The todo list between two dates, dateless tasks included
#[derive(Debug, Clone, PartialEq)]
pub struct Todos {
    entries: Vec<Todo>,
}

impl Todos {
    /// Accepts the `{"todos": [...]}` envelope or a bare array
    fn from_body(body: &Value) -> Result<Self> {
        let entries = body
            .get("todos")
            .unwrap_or(body)
            .as_array()
            .ok_or_else(|| ApiError::missing_key("response", "todos"))?
            .iter()
            .map(Todo::from_ref)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Todo] {
        &self.entries
    }

    /// Task ids of every entry
    pub fn all_ids(&self) -> Result<Vec<i64>> {
        self.entries.iter().map(Todo::class_task_id).collect()
    }

    pub fn completed(&self) -> Result<Vec<&Todo>> {
        self.filter_completed(true)
    }

    pub fn outstanding(&self) -> Result<Vec<&Todo>> {
        self.filter_completed(false)
    }

    fn filter_completed(&self, completed: bool) -> Result<Vec<&Todo>> {
        let mut found = Vec::new();
        for todo in &self.entries {
            if todo.is_completed()? == completed {
                found.push(todo);
            }
        }
        Ok(found)
    }
}

pub fn todos(client: &SmhClient, from: NaiveDate, to: NaiveDate) -> GetRequest<Todos> {
    GetRequest::with_reshape(
        client
            .descriptor("/todos")
            .query("add_dateless", true)
            .query("from", from.to_string())
            .query("to", to.to_string()),
        Todos::from_body,
    )
}

define_scaffold! {
    /// A homework with its lesson occurrences
    pub struct Assignment {
        id: int => "homework.id",
        teacher: str => "homework.teacher_name",
        title: str => "homework.title",
        subject: str => "homework.subject",
        class_name: str => "homework.class_group_name",
        class_id: int => "homework.class_group_id",
        description: str => "homework.description",
        attachment_ids: list => "homework.attachment_ids",
        web_links: list => "homework.web_links",
        issue_lesson_id: nullable_int => "homework.issued_on_lesson_occurrence_id",
        due_lesson_id: nullable_int => "homework.due_on_lesson_occurrence_id",
        lesson_occurrences: list => "lesson_occurrences",
    }
}

impl Assignment {
    /// Expected effort as a number and its unit, such as `(30, "minutes")`
    pub fn duration(&self) -> Result<(Option<i64>, Option<&str>)> {
        Ok((
            self.get_nullable_int("homework.duration")?,
            self.get_nullable_str("homework.duration_units")?,
        ))
    }

    /// Start of the lesson the work is due in, falling back to `due_on`
    pub fn due_datetime(&self) -> Result<DateTime<FixedOffset>> {
        if let Some(lesson_id) = self.due_lesson_id()? {
            let lesson = self
                .lesson_occurrences()?
                .iter()
                .find(|lesson| lesson.get("id").and_then(Value::as_i64) == Some(lesson_id));
            if let Some(starts_at) = lesson.and_then(|lesson| lesson.get("starts_at")).and_then(Value::as_str) {
                return parse_timestamp(starts_at);
            }
        }
        parse_timestamp(self.get_str("homework.due_on")?)
    }

    pub fn issue_datetime(&self) -> Result<DateTime<FixedOffset>> {
        parse_timestamp(self.get_str("homework.issued_at")?)
    }

    pub fn last_updated_datetime(&self) -> Result<DateTime<FixedOffset>> {
        parse_timestamp(self.get_str("homework.updated_at")?)
    }

    fn from_body(body: &Value) -> Result<Self> {
        let mut body = body.clone();
        let homework = body
            .get_mut("homework")
            .and_then(Value::as_object_mut)
            .ok_or_else(|| ApiError::missing_key("response", "homework"))?;
        strip_keys(homework, &ASSIGNMENT_NOISE);

        if let Some(lessons) = body.get_mut("lesson_occurrences").and_then(Value::as_array_mut) {
            for lesson in lessons.iter_mut().filter_map(Value::as_object_mut) {
                strip_keys(lesson, &ASSIGNMENT_NOISE);
            }
        }
        Self::from_value(body)
    }
}

pub fn assignment(client: &SmhClient, assignment_id: i64) -> GetRequest<Assignment> {
    GetRequest::with_reshape(
        client.descriptor(&format!("/homeworks/{}", assignment_id)),
        Assignment::from_body,
    )
}

define_scaffold! {
    /// A file attached to a homework
    pub struct Attachment {
        id: int => "id",
        content_type: str => "content_type",
        filename: str => "filename",
        /// Size in megabytes
        file_size: float => "file_size",
        /// Direct download link
        file_url: str => "file_url",
    }
}

impl Attachment {
    pub fn creation_datetime(&self) -> Result<DateTime<FixedOffset>> {
        parse_timestamp(self.get_str("created_at")?)
    }

    pub fn last_updated_datetime(&self) -> Result<DateTime<FixedOffset>> {
        parse_timestamp(self.get_str("updated_at")?)
    }

    fn from_body(body: &Value) -> Result<Self> {
        let mut first = body
            .get("attachments")
            .and_then(Value::as_array)
            .and_then(|attachments| attachments.first())
            .and_then(Value::as_object)
            .cloned()
            .ok_or_else(|| ApiError::missing_key("response", "attachments.0"))?;
        strip_keys(&mut first, &ATTACHMENT_NOISE);
        Ok(Self::from_map(first))
    }
}

pub fn attachment(client: &SmhClient, attachment_id: i64) -> GetRequest<Attachment> {
    GetRequest::with_reshape(
        client
            .descriptor("/attachments")
            .query("ids", attachment_id),
        Attachment::from_body,
    )
}
