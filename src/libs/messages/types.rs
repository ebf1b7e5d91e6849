/// Every line of text the command line prints.
#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskCompleted(String),
    TaskReopened(String),
    TaskNotFound(String),
    TasksHeader(String),
    NoTasks,
    NothingToEdit,
    ConfirmDeleteTask(String),
    DeleteCancelled,
    InvalidDueDate(String),

    // === ORDER MESSAGES ===
    TasksReordered(usize),
    OrderUnchanged,
    ReorderNotSaved(String),

    // === STATISTICS MESSAGES ===
    StatisticsHeader(String),

    // === PROFILE MESSAGES ===
    Greeting(String),
    ProfileMissing,
    ProfileSaved(String),
    PromptDisplayName,

    // === URGENT TASK MESSAGES ===
    UrgentTaskHeader,
    UrgentTaskSet(String),
    UrgentTaskCleared,
    NoUrgentTask,

    // === CONFIGURATION MESSAGES ===
    ConfigModuleBackend,
    ConfigModuleUser,
    ConfigModuleSupabase,
    ConfigModuleLocal,
    ConfigSaved(String),
    ConfigParseError(String),
    ConfigSaveError(String),
    RemoteConfigMissing,
    UserIdMissing,
    UnknownBackend(String),
    BackendSelected(String),
}
