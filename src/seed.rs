//! Demo data for a fresh in-memory store.
//!
//! Nothing persists between runs, so `--seed N` is how a session starts with
//! enough tasks to exercise filtering and list windowing.

use chrono::{Duration, Local, Utc};

use crate::fields::Status;
use crate::store::TaskStore;
use crate::task::{NewTask, TaskId};

const TOPICS: [&str; 8] = [
    "Review pull request",
    "Write release notes",
    "Fix flaky test",
    "Plan sprint",
    "Update dependencies",
    "Triage bug reports",
    "Refactor settings page",
    "Prepare demo",
];

/// Deterministic sample payloads: statuses rotate, due dates spread around today.
pub fn sample_tasks(count: usize) -> Vec<NewTask> {
    let today = Local::now().date_naive();
    (0..count)
        .map(|i| {
            let topic = TOPICS[i % TOPICS.len()];
            NewTask {
                title: format!("{} #{}", topic, i + 1),
                description: format!("{} (sample task {} of {})", topic, i + 1, count),
                status: Status::ALL[i % Status::ALL.len()],
                due_date: today + Duration::days((i % 21) as i64 - 7),
            }
        })
        .collect()
}

/// Replace the store's contents with `count` freshly stamped sample tasks.
pub fn seed_store(store: &mut TaskStore, count: usize) {
    let now = Utc::now();
    let tasks = sample_tasks(count)
        .into_iter()
        .map(|data| data.into_task(TaskId::new(), now))
        .collect();
    store.set_tasks(tasks);
}
