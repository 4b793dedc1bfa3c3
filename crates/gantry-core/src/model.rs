use crate::{Error, Result};
use chrono::NaiveDate;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskKind {
    #[default]
    Task,
    Milestone,
    Summary,
}

/// A read-only snapshot of one task row as the document model hands it to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub duration_days: i64,
    #[serde(default)]
    pub progress: f64,
    #[serde(default)]
    pub kind: TaskKind,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start,
            end,
            duration_days: (end - start).num_days().max(0),
            progress: 0.0,
            kind: TaskKind::Task,
            parent_id: None,
            color: None,
        }
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_duration_days(mut self, days: i64) -> Self {
        self.duration_days = days;
        self
    }

    pub fn is_milestone(&self) -> bool {
        self.kind == TaskKind::Milestone
    }

    /// The last date the bar covers. Milestones have no meaningful end and collapse onto `start`.
    pub fn effective_end(&self) -> NaiveDate {
        if self.is_milestone() {
            self.start
        } else {
            self.end.max(self.start)
        }
    }
}

/// Boundary check for task snapshots read from files: ids must be present and unique and
/// progress must be a finite percentage.
pub fn validate_tasks(tasks: &[Task]) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for t in tasks {
        if t.id.trim().is_empty() {
            return Err(Error::InvalidTask {
                id: t.id.clone(),
                message: "task id is empty".to_string(),
            });
        }
        if !seen.insert(t.id.as_str()) {
            return Err(Error::InvalidTask {
                id: t.id.clone(),
                message: "duplicate task id".to_string(),
            });
        }
        if !(t.progress.is_finite() && (0.0..=100.0).contains(&t.progress)) {
            return Err(Error::InvalidTask {
                id: t.id.clone(),
                message: format!("progress must be within 0..=100, got {}", t.progress),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_deserializes_with_defaults() {
        let t: Task = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "name": "Design",
            "start": "2025-01-06",
            "end": "2025-01-10",
        }))
        .unwrap();
        assert_eq!(t.kind, TaskKind::Task);
        assert_eq!(t.parent_id, None);
        assert_eq!(t.progress, 0.0);
    }

    #[test]
    fn kind_uses_camel_case_names() {
        let t: Task = serde_json::from_value(serde_json::json!({
            "id": "m1",
            "name": "Launch",
            "start": "2025-02-01",
            "end": "2025-02-01",
            "kind": "milestone",
            "parentId": "p",
        }))
        .unwrap();
        assert!(t.is_milestone());
        assert_eq!(t.parent_id.as_deref(), Some("p"));
    }

    #[test]
    fn validate_tasks_rejects_duplicates_and_bad_progress() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let ok = vec![Task::new("a", "A", d, d), Task::new("b", "B", d, d).with_progress(100.0)];
        assert!(validate_tasks(&ok).is_ok());

        let dup = vec![Task::new("a", "A", d, d), Task::new("a", "B", d, d)];
        assert!(matches!(
            validate_tasks(&dup),
            Err(Error::InvalidTask { ref id, .. }) if id == "a"
        ));

        let bad = vec![Task::new("a", "A", d, d).with_progress(f64::NAN)];
        assert!(validate_tasks(&bad).is_err());
        assert!(validate_tasks(&[Task::new(" ", "A", d, d)]).is_err());
    }
}
