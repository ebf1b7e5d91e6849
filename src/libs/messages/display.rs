//! Text of every [`Message`].
//!
//! Keeping all strings in one `match` makes a missing text a compile error
//! and keeps the wording consistent across commands.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskUpdated(title) => format!("Task '{}' updated", title),
            Message::TaskDeleted(title) => format!("Task '{}' deleted", title),
            Message::TaskCompleted(title) => format!("Nice work! '{}' is done", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskNotFound(id) => format!("Task with id {} not found", id),
            Message::TasksHeader(name) => format!("Tasks of {}", name),
            Message::NoTasks => "No tasks yet. Add one with `momentum task add <title>`".to_string(),
            Message::NothingToEdit => "Nothing to change: pass --title, --description, --due or --clear-due".to_string(),
            Message::ConfirmDeleteTask(title) => format!("Delete task '{}'?", title),
            Message::DeleteCancelled => "Delete cancelled".to_string(),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD", value),

            // === ORDER MESSAGES ===
            Message::TasksReordered(count) => format!("Order saved ({} tasks moved)", count),
            Message::OrderUnchanged => "Order unchanged".to_string(),
            Message::ReorderNotSaved(error) => format!(
                "New order shown but not saved: {}. It will revert on the next load",
                error
            ),

            // === STATISTICS MESSAGES ===
            Message::StatisticsHeader(date) => format!("Statistics for {}", date),

            // === PROFILE MESSAGES ===
            Message::Greeting(name) => format!("Hello, {}!", name),
            Message::ProfileMissing => "No profile yet. Set your name with `momentum profile name <name>`".to_string(),
            Message::ProfileSaved(name) => format!("Profile saved, welcome {}", name),
            Message::PromptDisplayName => "What should we call you?".to_string(),

            // === URGENT TASK MESSAGES ===
            Message::UrgentTaskHeader => "Urgent".to_string(),
            Message::UrgentTaskSet(title) => format!("Urgent task set to '{}'", title),
            Message::UrgentTaskCleared => "Urgent task cleared".to_string(),
            Message::NoUrgentTask => "No urgent task".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigModuleBackend => "Storage backend".to_string(),
            Message::ConfigModuleUser => "User".to_string(),
            Message::ConfigModuleSupabase => "Supabase".to_string(),
            Message::ConfigModuleLocal => "Local database".to_string(),
            Message::ConfigSaved(path) => format!("Configuration saved to {}", path),
            Message::ConfigParseError(error) => format!("Failed to parse configuration: {}", error),
            Message::ConfigSaveError(error) => format!("Failed to save configuration: {}", error),
            Message::RemoteConfigMissing => {
                "Backend 'remote' needs supabase.url and supabase.anon_key (or SUPABASE_URL and SUPABASE_ANON_KEY)"
                    .to_string()
            }
            Message::UserIdMissing => {
                "No user id configured. Run `momentum init` or set MOMENTUM_USER_ID".to_string()
            }
            Message::UnknownBackend(value) => format!("Unknown backend '{}', expected remote, local or mock", value),
            Message::BackendSelected(name) => format!("Using {} backend", name),

        };

        write!(f, "{}", text)
    }
}
