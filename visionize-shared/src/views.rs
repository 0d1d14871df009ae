/// View derivation: board and timeline state computed from a task list
///
/// Pure functions with no I/O. Given the tasks of one project they produce
/// the presentation state each management method needs:
///
/// - [`kanban_board`]: four fixed status columns
/// - [`scrum_board`]: three columns; Cancelled and Reported tasks are
///   dropped entirely (long-standing behavior, kept on purpose)
/// - [`gantt_chart`]: a shared day-grid timeline with one bar per dated task
/// - [`project_progress`]: mean task progress, rounded
///
/// # Example
///
/// ```
/// use visionize_shared::views::{kanban_board, project_progress};
///
/// let board = kanban_board(&[]);
/// assert_eq!(board.len(), 4);
/// assert_eq!(project_progress(&[]), 0);
/// ```

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::models::task::{Task, TaskStatus};

/// Column order of the Kanban board
pub const KANBAN_COLUMNS: [TaskStatus; 4] = [
    TaskStatus::NotStarted,
    TaskStatus::InProgress,
    TaskStatus::Completed,
    TaskStatus::Cancelled,
];

/// Column order of the Scrum board
pub const SCRUM_COLUMNS: [TaskStatus; 3] = [
    TaskStatus::NotStarted,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

/// One column of a board view
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    /// Status this column collects
    pub status: TaskStatus,

    /// Tasks in the column, keeping the input order
    pub tasks: Vec<Task>,
}

/// Groups tasks into the four Kanban columns.
///
/// A task whose status has no column of its own (Reported) lands in
/// Not Started, so every task appears exactly once on the board.
pub fn kanban_board(tasks: &[Task]) -> Vec<BoardColumn> {
    KANBAN_COLUMNS
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: tasks
                .iter()
                .filter(|t| kanban_column_for(t.status) == status)
                .cloned()
                .collect(),
        })
        .collect()
}

/// The Kanban column a status maps to.
fn kanban_column_for(status: TaskStatus) -> TaskStatus {
    match status {
        TaskStatus::InProgress | TaskStatus::Completed | TaskStatus::Cancelled => status,
        TaskStatus::NotStarted | TaskStatus::Reported => TaskStatus::NotStarted,
    }
}

/// Groups tasks into the three Scrum columns.
///
/// Cancelled and Reported tasks match no column and silently disappear from
/// the board. That mirrors how the board has always rendered; changing it
/// would alter what users see.
pub fn scrum_board(tasks: &[Task]) -> Vec<BoardColumn> {
    SCRUM_COLUMNS
        .iter()
        .map(|&status| BoardColumn {
            status,
            tasks: tasks.iter().filter(|t| t.status == status).cloned().collect(),
        })
        .collect()
}

/// A task bar placed on the Gantt timeline
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GanttBar {
    pub task_id: Uuid,
    pub title: String,
    pub status: TaskStatus,
    pub progress: i32,

    /// Days between the task's start and the timeline origin
    pub offset_days: i64,

    /// Inclusive day span of the task
    pub duration_days: i64,
}

/// Derived Gantt timeline
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GanttChart {
    /// First day of the timeline (earliest task start)
    pub origin: NaiveDate,

    /// Total timeline length in days: the inclusive span from the earliest
    /// start to the latest end, plus one pad day
    pub total_days: i64,

    pub bars: Vec<GanttBar>,
}

/// Computes the Gantt timeline for a task list.
///
/// Only tasks with both a parseable start and end date take part; the rest
/// are excluded from the chart entirely, not merely left unplaced. Returns
/// `None` when no task qualifies.
pub fn gantt_chart(tasks: &[Task]) -> Option<GanttChart> {
    let dated: Vec<(&Task, NaiveDate, NaiveDate)> = tasks
        .iter()
        .filter_map(|t| {
            let start = parse_date(t.start_date.as_deref()?)?;
            let end = parse_date(t.end_date.as_deref()?)?;
            Some((t, start, end))
        })
        .collect();

    let origin = dated.iter().map(|(_, s, _)| *s).min()?;
    let max_end = dated.iter().map(|(_, _, e)| *e).max()?;

    let bars = dated
        .into_iter()
        .map(|(t, start, end)| GanttBar {
            task_id: t.id,
            title: t.title.clone(),
            status: t.status,
            progress: t.progress,
            offset_days: (start - origin).num_days(),
            duration_days: (end - start).num_days() + 1,
        })
        .collect();

    Some(GanttChart {
        origin,
        total_days: (max_end - origin).num_days() + 2,
        bars,
    })
}

/// Aggregate project progress: mean of per-task progress rounded to the
/// nearest integer, 0 for an empty task list.
pub fn project_progress(tasks: &[Task]) -> i32 {
    if tasks.is_empty() {
        return 0;
    }
    let sum: i64 = tasks.iter().map(|t| i64::from(t.progress)).sum();
    ((sum as f64) / (tasks.len() as f64)).round() as i32
}

/// Parses the leading `YYYY-MM-DD` of a date string. Accepts full ISO
/// datetimes by ignoring everything past the date part.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.get(..10).unwrap_or(s);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
