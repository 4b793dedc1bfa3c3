use crate::model::Task;
use rustc_hash::{FxHashMap, FxHashSet};

/// A task in display order together with its tree depth (roots are depth 0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatTask<'a> {
    pub task: &'a Task,
    pub depth: usize,
}

/// Flattens the parent/child hierarchy into display order with every node expanded.
///
/// Exports ignore the interactive collapse state. Children follow their parent in input order.
/// Tasks whose parent id is unknown are shown as roots; tasks that only reach each other through a
/// parent cycle are appended as roots in input order so every task gets exactly one row.
pub fn flatten_expanded(tasks: &[Task]) -> Vec<FlatTask<'_>> {
    let ids: FxHashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut children: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (idx, t) in tasks.iter().enumerate() {
        match t.parent_id.as_deref() {
            Some(parent) if parent != t.id && ids.contains(parent) => {
                children.entry(parent).or_default().push(idx);
            }
            Some(parent) if parent != t.id => {
                tracing::debug!(task = %t.id, parent, "parent not found; showing task as a root");
                roots.push(idx);
            }
            _ => roots.push(idx),
        }
    }

    let mut out: Vec<FlatTask<'_>> = Vec::with_capacity(tasks.len());
    let mut visited = vec![false; tasks.len()];

    fn walk<'a>(
        start: usize,
        tasks: &'a [Task],
        children: &FxHashMap<&str, Vec<usize>>,
        visited: &mut [bool],
        out: &mut Vec<FlatTask<'a>>,
    ) {
        // Explicit stack: deep hierarchies must not overflow the call stack.
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some((idx, depth)) = stack.pop() {
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            out.push(FlatTask {
                task: &tasks[idx],
                depth,
            });
            if let Some(kids) = children.get(tasks[idx].id.as_str()) {
                for &kid in kids.iter().rev() {
                    if !visited[kid] {
                        stack.push((kid, depth + 1));
                    }
                }
            }
        }
    }

    for root in roots {
        walk(root, tasks, &children, &mut visited, &mut out);
    }

    for idx in 0..tasks.len() {
        if !visited[idx] {
            tracing::debug!(task = %tasks[idx].id, "task is part of a parent cycle; showing it as a root");
            walk(idx, tasks, &children, &mut visited, &mut out);
        }
    }

    out
}
