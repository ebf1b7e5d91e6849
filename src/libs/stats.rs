//! Aggregate task statistics.

use super::task::Task;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatistics {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub tasks_created_today: usize,
    pub tasks_completed_today: usize,
}

/// Inclusive UTC day `[00:00:00.000, 23:59:59.999]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBounds {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DayBounds {
    pub fn for_date(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN).and_utc();
        let end = start + Duration::days(1) - Duration::milliseconds(1);
        Self { start, end }
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        *instant >= self.start && *instant <= self.end
    }
}

impl TaskStatistics {
    /// Counts `tasks` relative to the UTC day `date`.
    ///
    /// "Completed today" uses `updated_at`, so a completed task edited today
    /// counts even if it was completed earlier.
    pub fn collect<'a>(tasks: impl IntoIterator<Item = &'a Task>, date: NaiveDate) -> Self {
        let day = DayBounds::for_date(date);
        tasks.into_iter().fold(Self::default(), |mut stats, task| {
            stats.total_tasks += 1;
            if task.completed {
                stats.completed_tasks += 1;
                if day.contains(&task.updated_at) {
                    stats.tasks_completed_today += 1;
                }
            }
            if day.contains(&task.created_at) {
                stats.tasks_created_today += 1;
            }
            stats
        })
    }

    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            return 0.0;
        }
        self.completed_tasks as f64 / self.total_tasks as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn task(created: DateTime<Utc>, updated: DateTime<Utc>, completed: bool) -> Task {
        Task {
            id: format!("t-{}", created.timestamp_millis()),
            user_id: "u".to_string(),
            title: "t".to_string(),
            description: String::new(),
            due_date: None,
            completed,
            order: 0,
            created_at: created,
            updated_at: updated,
        }
    }

    #[test]
    fn day_bounds_are_inclusive() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let day = DayBounds::for_date(date);
        assert!(day.contains(&Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap()));
        assert!(day.contains(&(Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap() + Duration::milliseconds(999))));
        assert!(!day.contains(&Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap()));
        assert!(!day.contains(&(Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap() - Duration::milliseconds(1))));
    }

    #[test]
    fn counts_relative_to_the_requested_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2024, 3, 10, 9, 30, 0).unwrap();

        let tasks = vec![
            task(yesterday, yesterday, true),
            task(yesterday, today, true),
            task(today, today, false),
            task(today, today, true),
        ];

        let stats = TaskStatistics::collect(&tasks, date);
        assert_eq!(
            stats,
            TaskStatistics {
                total_tasks: 4,
                completed_tasks: 3,
                tasks_created_today: 2,
                tasks_completed_today: 2,
            }
        );
        assert_eq!(stats.completion_rate(), 75.0);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(TaskStatistics::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalTasks": 0,
                "completedTasks": 0,
                "tasksCreatedToday": 0,
                "tasksCompletedToday": 0
            })
        );
    }
}
