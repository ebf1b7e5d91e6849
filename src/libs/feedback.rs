//! Completion feedback signals.
//!
//! Toggling a task emits one signal: [`Feedback::Success`] when the task was
//! just completed, [`Feedback::Impact`] when it was reopened. The sink decides
//! how to surface it (haptics on a phone, a console line here).

use crate::libs::messages::Message;
use crate::{msg_info, msg_success};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Impact,
}

impl Feedback {
    /// Signal for a task whose completion flag became `completed`.
    pub fn for_completion(completed: bool) -> Self {
        if completed {
            Feedback::Success
        } else {
            Feedback::Impact
        }
    }
}

pub trait FeedbackSink {
    fn notify(&self, feedback: Feedback, title: &str);
}

/// Default sink; records the signal in the log only.
#[derive(Debug, Default)]
pub struct TracingFeedback;

impl FeedbackSink for TracingFeedback {
    fn notify(&self, feedback: Feedback, title: &str) {
        tracing::debug!(?feedback, title, "completion feedback");
    }
}

/// Prints the signal for the command-line user.
#[derive(Debug, Default)]
pub struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn notify(&self, feedback: Feedback, title: &str) {
        match feedback {
            Feedback::Success => msg_success!(Message::TaskCompleted(title.to_string())),
            Feedback::Impact => msg_info!(Message::TaskReopened(title.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_selects_signal() {
        assert_eq!(Feedback::for_completion(true), Feedback::Success);
        assert_eq!(Feedback::for_completion(false), Feedback::Impact);
    }
}
