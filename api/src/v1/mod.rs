use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item as stored by the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: bool,
    pub create_time: DateTime<Utc>,
    /// Set when the task was last marked complete, `None` while incomplete.
    pub complete_time: Option<DateTime<Utc>>,
}

/// Request body for creating and replacing a task.
///
/// Fields other than these are ignored. `status` is only read on update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInput {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: bool,
}

/// Query string accepted by `GET /tasks`; at most one field may be set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskQuery {
    pub status: Option<bool>,
    pub date: Option<NaiveDate>,
    pub keyword: Option<String>,
}
