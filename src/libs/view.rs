use super::profile::UserProfile;
use super::stats::TaskStatistics;
use super::task::Task;
use super::urgent::UrgentTask;
use prettytable::{row, Table};

pub struct View {}

impl View {
    /// Tasks in the given order; `#` is the position `move` expects.
    pub fn tasks(tasks: &[&Task]) {
        Self::tasks_table(tasks).printstd();
    }

    pub fn tasks_table(tasks: &[&Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["#", "ID", "TITLE", "DESCRIPTION", "DUE", "DONE"]);
        for (position, task) in tasks.iter().enumerate() {
            table.add_row(row![
                position,
                task.id,
                task.title,
                task.description,
                task.due_date.map(|date| date.to_string()).unwrap_or_default(),
                if task.completed { "✔" } else { "" }
            ]);
        }
        table
    }

    pub fn statistics(stats: &TaskStatistics) {
        let mut table = Table::new();

        table.add_row(row!["TOTAL", "COMPLETED", "CREATED TODAY", "COMPLETED TODAY", "RATE"]);
        table.add_row(row![
            stats.total_tasks,
            stats.completed_tasks,
            stats.tasks_created_today,
            stats.tasks_completed_today,
            format!("{:.0}%", stats.completion_rate())
        ]);
        table.printstd();
    }

    pub fn profile(profile: &UserProfile) {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "SINCE"]);
        table.add_row(row![
            profile.id,
            profile.display_name,
            profile.created_at.format("%Y-%m-%d")
        ]);
        table.printstd();
    }

    pub fn urgent(task: &UrgentTask) {
        let mut table = Table::new();

        table.add_row(row!["TITLE", "SET AT"]);
        table.add_row(row![task.title, task.updated_at.format("%Y-%m-%d %H:%M")]);
        table.printstd();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn task_rows_follow_the_given_order() {
        let now = Utc::now();
        let make = |id: &str, title: &str| Task {
            id: id.to_string(),
            user_id: "u".to_string(),
            title: title.to_string(),
            description: String::new(),
            due_date: None,
            completed: false,
            order: 0,
            created_at: now,
            updated_at: now,
        };
        let first = make("b", "Second created");
        let second = make("a", "First created");

        let table = View::tasks_table(&[&first, &second]);
        assert_eq!(table.len(), 3);
        let rendered = table.to_string();
        assert!(rendered.find("Second created").unwrap() < rendered.find("First created").unwrap());
    }
}
