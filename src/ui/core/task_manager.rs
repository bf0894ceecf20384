use super::actions::Action;
use crate::notify::ValidationError;
use std::collections::HashMap;
use std::future::Future;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<TaskResult>,
    pub description: String,
    pub started_at: std::time::Instant,
}

impl BackgroundTask {
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    Completed,
    Failed(String),
}

/// Runs API calls off the UI loop and reports back through actions
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    /// Spawn a backend operation.
    ///
    /// The resulting action is sent on success; a failure becomes
    /// [`Action::Failed`] so the app can toast it and drop an expired session.
    pub fn spawn_operation<Fut>(&mut self, description: impl Into<String>, operation: Fut) -> TaskId
    where
        Fut: Future<Output = Result<Action, ValidationError>> + Send + 'static,
    {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let description = description.into();
        let action_sender = self.action_sender.clone();
        let desc_for_task = description.clone();

        let handle = tokio::spawn(async move {
            match operation.await {
                Ok(action) => {
                    log::debug!("Task '{}' completed", desc_for_task);
                    let _ = action_sender.send(action);
                    TaskResult::Completed
                }
                Err(e) => {
                    log::warn!("Task '{}' failed: {}", desc_for_task, e);
                    let message = e.to_string();
                    let _ = action_sender.send(Action::Failed(e));
                    TaskResult::Failed(message)
                }
            }
        });

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };

        self.tasks.insert(task_id, task);
        task_id
    }

    /// Drop finished tasks, returning their ids and descriptions
    pub fn cleanup_finished_tasks(&mut self) -> Vec<(TaskId, String)> {
        let finished: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.handle.is_finished())
            .map(|(id, _)| *id)
            .collect();

        finished
            .into_iter()
            .filter_map(|id| self.tasks.remove(&id).map(|task| (id, task.description)))
            .collect()
    }

    /// Description of the oldest running task, for the busy indicator
    pub fn current_description(&self) -> Option<&str> {
        self.tasks
            .values()
            .max_by_key(|task| task.elapsed())
            .map(|task| task.description.as_str())
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
