//! Deferred task queue.
//!
//! Tasks are closures over some context (the element tree, in practice) that
//! cannot run where they are posted, typically because the poster is itself
//! borrowed out of that context. The owner drains the queue once the current
//! operation has finished.
//!
//! The queue is a cheaply cloneable handle; every clone posts into the same
//! queue, so a handle can be captured by signal slots.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

type BoxedTask<C> = Box<dyn FnOnce(&mut C) + Send + 'static>;

struct TaskData<C> {
    id: TaskId,
    task: BoxedTask<C>,
}

/// A shared FIFO of deferred closures over a context `C`.
pub struct TaskQueue<C> {
    tasks: Arc<Mutex<VecDeque<TaskData<C>>>>,
}

impl<C> Clone for TaskQueue<C> {
    fn clone(&self) -> Self {
        Self {
            tasks: self.tasks.clone(),
        }
    }
}

impl<C> Default for TaskQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TaskQueue<C> {
    /// Create a new, empty task queue.
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Post a task to run once the owner drains the queue.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce(&mut C) + Send + 'static,
    {
        let id = next_task_id();
        self.tasks.lock().push_back(TaskData {
            id,
            task: Box::new(task),
        });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&self, id: TaskId) -> bool {
        let mut tasks = self.tasks.lock();
        if let Some(pos) = tasks.iter().position(|t| t.id == id) {
            tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.lock().is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Run the oldest pending task against `context`.
    ///
    /// The lock is released before the task runs, so tasks may post further
    /// tasks. Returns `false` if the queue was empty.
    pub fn run_next(&self, context: &mut C) -> bool {
        let next = self.tasks.lock().pop_front();
        match next {
            Some(task_data) => {
                (task_data.task)(context);
                true
            }
            None => false,
        }
    }

    /// Run tasks until the queue is empty, including any posted meanwhile.
    ///
    /// Returns the number of tasks processed.
    pub fn process_all(&self, context: &mut C) -> usize {
        let mut count = 0;
        while self.run_next(context) {
            count += 1;
        }
        count
    }

    /// Remove every pending task without running it.
    pub fn clear(&self) {
        self.tasks.lock().clear();
    }
}

impl<C> fmt::Debug for TaskQueue<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.tasks.lock().len())
            .finish()
    }
}
