//! Task data model: identifiers, the colour palette, and project factories

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Error, Result};

/// Default duration for newly created tasks, in days
pub const DEFAULT_DURATION_DAYS: u32 = 10;

/// Newly created tasks start this many days after the project anchor date
pub const DEFAULT_START_OFFSET_DAYS: u64 = 5;

/// Stable task identifier, assigned at creation and never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T-{:03}", self.0)
    }
}

/// The fixed chart palette
///
/// Bars and milestones are tinted from this closed set; arbitrary colour
/// values are rejected at the parsing boundary so the rendered output
/// stays within the document theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    DarkBlue,
    SteelBlue,
    Teal,
    SlateGrey,
    Charcoal,
}

impl Color {
    /// Every palette entry, in display order
    pub const ALL: [Color; 5] = [
        Color::DarkBlue,
        Color::SteelBlue,
        Color::Teal,
        Color::SlateGrey,
        Color::Charcoal,
    ];

    /// Hex value painted into the SVG output
    pub fn hex(self) -> &'static str {
        match self {
            Color::DarkBlue => "#1B3A6B",
            Color::SteelBlue => "#4A90D9",
            Color::Teal => "#2A7F7F",
            Color::SlateGrey => "#5A6A7A",
            Color::Charcoal => "#3C3C3C",
        }
    }

    /// Human-readable palette name, as shown in the legend
    pub fn label(self) -> &'static str {
        match self {
            Color::DarkBlue => "Dark Blue",
            Color::SteelBlue => "Steel Blue",
            Color::Teal => "Teal",
            Color::SlateGrey => "Slate Grey",
            Color::Charcoal => "Charcoal",
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::DarkBlue
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts palette names case-insensitively, with spaces, dashes or
    /// underscores between words ("Dark Blue", "dark_blue", "dark-blue").
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace(['_', '-'], " ");
        Color::ALL
            .iter()
            .copied()
            .find(|c| c.label().to_lowercase() == wanted)
            .ok_or_else(|| Error::InvalidColor {
                name: s.to_string(),
            })
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A single row of the chart
///
/// `duration_days == 0` marks a milestone: a point event drawn as a
/// diamond on its start date instead of a bar. The end date is always
/// derived from start and duration rather than stored, so the two can
/// never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub start_date: NaiveDate,
    pub duration_days: u32,
    #[serde(default)]
    pub color: Color,
    /// Optional predecessor; drawn as an arrow from its end to this start
    #[serde(default)]
    pub dependency: Option<TaskId>,
}

impl Task {
    /// True when the task is a zero-duration point event
    pub fn is_milestone(&self) -> bool {
        self.duration_days == 0
    }

    /// Exclusive end date: start plus duration, start itself for milestones
    pub fn end_date(&self) -> Result<NaiveDate> {
        if self.is_milestone() {
            return Ok(self.start_date);
        }
        self.start_date
            .checked_add_days(Days::new(u64::from(self.duration_days)))
            .ok_or(Error::InvalidDate { task_id: self.id })
    }
}

/// Preset project sizes offered by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSize {
    QuickWin,
    Small,
    Medium,
    Large,
    Enterprise,
}

impl ProjectSize {
    pub const ALL: [ProjectSize; 5] = [
        ProjectSize::QuickWin,
        ProjectSize::Small,
        ProjectSize::Medium,
        ProjectSize::Large,
        ProjectSize::Enterprise,
    ];

    /// Number of starter tasks the preset seeds
    pub fn task_count(self) -> usize {
        match self {
            ProjectSize::QuickWin => 3,
            ProjectSize::Small => 5,
            ProjectSize::Medium => 10,
            ProjectSize::Large => 15,
            ProjectSize::Enterprise => 20,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectSize::QuickWin => "quick-win",
            ProjectSize::Small => "small",
            ProjectSize::Medium => "medium",
            ProjectSize::Large => "large",
            ProjectSize::Enterprise => "enterprise",
        }
    }
}

impl fmt::Display for ProjectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        ProjectSize::ALL
            .iter()
            .copied()
            .find(|p| p.label() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown project size {s:?} (expected one of: quick-win, small, medium, large, enterprise)"))
    }
}

/// Seed a project with `size.task_count()` default tasks
///
/// Every task starts `DEFAULT_START_OFFSET_DAYS` after `anchor` with the
/// default duration and colour, ready to be edited. Ids count up from 1.
pub fn starter_project(size: ProjectSize, anchor: NaiveDate) -> Vec<Task> {
    let start = anchor
        .checked_add_days(Days::new(DEFAULT_START_OFFSET_DAYS))
        .unwrap_or(anchor);
    (1..=size.task_count() as u32)
        .map(|i| Task {
            id: TaskId(i),
            name: format!("Task {i}"),
            start_date: start,
            duration_days: DEFAULT_DURATION_DAYS,
            color: Color::default(),
            dependency: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn task_id_display_is_zero_padded() {
        assert_eq!(TaskId(1).to_string(), "T-001");
        assert_eq!(TaskId(42).to_string(), "T-042");
        assert_eq!(TaskId(1000).to_string(), "T-1000");
    }

    #[test]
    fn end_date_adds_duration() {
        let task = Task {
            id: TaskId(1),
            name: "Design".into(),
            start_date: date(2024, 1, 1),
            duration_days: 10,
            color: Color::DarkBlue,
            dependency: None,
        };
        assert_eq!(task.end_date().unwrap(), date(2024, 1, 11));
    }

    #[test]
    fn milestone_ends_on_start_date() {
        let task = Task {
            id: TaskId(2),
            name: "Kickoff".into(),
            start_date: date(2024, 3, 15),
            duration_days: 0,
            color: Color::Teal,
            dependency: None,
        };
        assert!(task.is_milestone());
        assert_eq!(task.end_date().unwrap(), date(2024, 3, 15));
    }

    #[test]
    fn end_date_overflow_is_reported() {
        let task = Task {
            id: TaskId(3),
            name: "Forever".into(),
            start_date: NaiveDate::MAX,
            duration_days: 1,
            color: Color::DarkBlue,
            dependency: None,
        };
        assert_eq!(
            task.end_date(),
            Err(Error::InvalidDate { task_id: TaskId(3) })
        );
    }

    #[test]
    fn colour_parsing_accepts_all_palette_names() {
        for colour in Color::ALL {
            assert_eq!(colour.label().parse::<Color>().unwrap(), colour);
        }
        assert_eq!("dark_blue".parse::<Color>().unwrap(), Color::DarkBlue);
        assert_eq!("steel-blue".parse::<Color>().unwrap(), Color::SteelBlue);
        assert_eq!("SLATE GREY".parse::<Color>().unwrap(), Color::SlateGrey);
    }

    #[test]
    fn colour_parsing_rejects_unknown_names() {
        let err = "Hot Pink".parse::<Color>().unwrap_err();
        assert_eq!(
            err,
            Error::InvalidColor {
                name: "Hot Pink".into()
            }
        );
    }

    #[test]
    fn colour_hex_values_are_stable() {
        assert_eq!(Color::DarkBlue.hex(), "#1B3A6B");
        assert_eq!(Color::SteelBlue.hex(), "#4A90D9");
        assert_eq!(Color::Teal.hex(), "#2A7F7F");
        assert_eq!(Color::SlateGrey.hex(), "#5A6A7A");
        assert_eq!(Color::Charcoal.hex(), "#3C3C3C");
    }

    #[test]
    fn task_round_trips_through_json() {
        let task = Task {
            id: TaskId(7),
            name: "QA & Sign-off".into(),
            start_date: date(2024, 2, 5),
            duration_days: 3,
            color: Color::SlateGrey,
            dependency: Some(TaskId(6)),
        };
        let json = serde_json::to_string(&task).unwrap();
        assert!(json.contains("\"Slate Grey\""));
        assert!(json.contains("\"2024-02-05\""));
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, task);
    }

    #[test]
    fn task_json_defaults_colour_and_dependency() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"name":"Build","start_date":"2024-01-08","duration_days":5}"#,
        )
        .unwrap();
        assert_eq!(task.color, Color::DarkBlue);
        assert_eq!(task.dependency, None);
    }

    #[test]
    fn task_json_rejects_unknown_colour() {
        let result: std::result::Result<Task, _> = serde_json::from_str(
            r#"{"id":1,"name":"Build","start_date":"2024-01-08","duration_days":5,"color":"Mauve"}"#,
        );
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Mauve"), "unexpected error: {message}");
    }

    #[test]
    fn starter_project_seeds_preset_counts() {
        let anchor = date(2024, 6, 1);
        for size in ProjectSize::ALL {
            let tasks = starter_project(size, anchor);
            assert_eq!(tasks.len(), size.task_count());
        }
    }

    #[test]
    fn starter_tasks_share_defaults() {
        let tasks = starter_project(ProjectSize::QuickWin, date(2024, 6, 1));
        assert_eq!(tasks[0].id, TaskId(1));
        assert_eq!(tasks[2].id, TaskId(3));
        assert_eq!(tasks[1].name, "Task 2");
        for task in &tasks {
            assert_eq!(task.start_date, date(2024, 6, 6));
            assert_eq!(task.duration_days, DEFAULT_DURATION_DAYS);
            assert_eq!(task.color, Color::DarkBlue);
            assert_eq!(task.dependency, None);
        }
    }

    #[test]
    fn project_size_parses_labels() {
        assert_eq!("quick-win".parse::<ProjectSize>().unwrap(), ProjectSize::QuickWin);
        assert_eq!("Enterprise".parse::<ProjectSize>().unwrap(), ProjectSize::Enterprise);
        assert!("galactic".parse::<ProjectSize>().is_err());
    }
}
