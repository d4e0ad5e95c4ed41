//! Search and filtering over a state snapshot.
//!
//! Matching is a case-insensitive substring test. A blank query matches
//! everything and keeps insertion order.

use crate::fields::TaskStatus;
use crate::project::Project;
use crate::store::AppState;
use crate::task::Task;
use crate::user::User;

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn person_matches(user: Option<&User>, needle: &str) -> bool {
    user.is_some_and(|u| contains(&u.first_name, needle) || contains(&u.last_name, needle))
}

/// Projects whose name, a tag, or the manager's first or last name contains
/// `query`.
pub fn search_projects<'a>(state: &'a AppState, query: &str) -> Vec<&'a Project> {
    if query.trim().is_empty() {
        return state.projects.iter().collect();
    }
    let needle = query.to_lowercase();
    state
        .projects
        .iter()
        .filter(|p| {
            contains(&p.name, &needle)
                || p.tags.iter().any(|tag| contains(tag, &needle))
                || person_matches(state.user(&p.manager_id), &needle)
        })
        .collect()
}

/// Tasks whose name, a tag, the assignee's first or last name, or the
/// project's name contains `query`.
pub fn search_tasks<'a>(state: &'a AppState, query: &str) -> Vec<&'a Task> {
    if query.trim().is_empty() {
        return state.tasks.iter().collect();
    }
    let needle = query.to_lowercase();
    state
        .tasks
        .iter()
        .filter(|t| {
            contains(&t.name, &needle)
                || t.tags.iter().any(|tag| contains(tag, &needle))
                || person_matches(state.user(&t.assignee_id), &needle)
                || state.project(&t.project_id).is_some_and(|p| contains(&p.name, &needle))
        })
        .collect()
}

/// Tasks assigned to `user_id`, narrowed by `query` and then by `status`.
pub fn my_tasks<'a>(
    state: &'a AppState,
    user_id: &str,
    query: &str,
    status: Option<TaskStatus>,
) -> Vec<&'a Task> {
    search_tasks(state, query)
        .into_iter()
        .filter(|t| t.assignee_id == user_id)
        .filter(|t| status.map_or(true, |s| t.status == s))
        .collect()
}
