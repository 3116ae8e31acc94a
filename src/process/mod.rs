use crate::data::snapshot::ProcessSnapshot;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

pub mod signal;
pub mod view;

pub use view::{KillTarget, ProcessView};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Cpu,
    Memory,
    Pid,
    Name,
}

impl SortKey {
    pub fn next(self) -> Self {
        match self {
            SortKey::Cpu => SortKey::Memory,
            SortKey::Memory => SortKey::Pid,
            SortKey::Pid => SortKey::Name,
            SortKey::Name => SortKey::Cpu,
        }
    }

    /// Busiest first for usage columns, alphabetical/numeric otherwise.
    pub fn natural_direction(self) -> SortDirection {
        match self {
            SortKey::Cpu | SortKey::Memory => SortDirection::Descending,
            SortKey::Pid | SortKey::Name => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Orders by `key` in `direction`; equal keys fall back to ascending pid.
pub fn compare(
    a: &ProcessSnapshot,
    b: &ProcessSnapshot,
    key: SortKey,
    direction: SortDirection,
) -> Ordering {
    let by_key = match key {
        SortKey::Cpu => a
            .cpu_percent
            .partial_cmp(&b.cpu_percent)
            .unwrap_or(Ordering::Equal),
        SortKey::Memory => a
            .mem_percent
            .partial_cmp(&b.mem_percent)
            .unwrap_or(Ordering::Equal),
        SortKey::Pid => a.pid.cmp(&b.pid),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    };
    let by_key = match direction {
        SortDirection::Ascending => by_key,
        SortDirection::Descending => by_key.reverse(),
    };
    by_key.then_with(|| a.pid.cmp(&b.pid))
}

/// A process in display order, with its indentation depth in tree mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessRow<'a> {
    pub process: &'a ProcessSnapshot,
    pub depth: usize,
}

pub fn sort_flat(
    processes: &[ProcessSnapshot],
    key: SortKey,
    direction: SortDirection,
) -> Vec<ProcessRow<'_>> {
    let mut ordered: Vec<&ProcessSnapshot> = processes.iter().collect();
    ordered.sort_by(|a, b| compare(a, b, key, direction));
    ordered
        .into_iter()
        .map(|process| ProcessRow { process, depth: 0 })
        .collect()
}

fn is_root(process: &ProcessSnapshot, present: &HashSet<u32>) -> bool {
    process.ppid == 0 || process.ppid == process.pid || !present.contains(&process.ppid)
}

fn walk<'a>(
    start: &'a ProcessSnapshot,
    children: &HashMap<u32, Vec<&'a ProcessSnapshot>>,
    rows: &mut Vec<ProcessRow<'a>>,
    visited: &mut HashSet<u32>,
) {
    let mut stack = vec![(start, 0)];
    while let Some((process, depth)) = stack.pop() {
        if !visited.insert(process.pid) {
            continue;
        }
        rows.push(ProcessRow { process, depth });
        if let Some(kids) = children.get(&process.pid) {
            for kid in kids.iter().rev() {
                stack.push((*kid, depth + 1));
            }
        }
    }
}

/// Parents before children, siblings in sort order.
///
/// Roots are processes whose parent is pid 0, missing from the list, or
/// themselves. Processes only reachable through a parent cycle are emitted
/// afterwards as extra roots, so every process appears exactly once.
pub fn build_tree(
    processes: &[ProcessSnapshot],
    key: SortKey,
    direction: SortDirection,
) -> Vec<ProcessRow<'_>> {
    let present: HashSet<u32> = processes.iter().map(|p| p.pid).collect();
    let mut children: HashMap<u32, Vec<&ProcessSnapshot>> = HashMap::new();
    let mut roots: Vec<&ProcessSnapshot> = Vec::new();

    for process in processes {
        if is_root(process, &present) {
            roots.push(process);
        } else {
            children.entry(process.ppid).or_default().push(process);
        }
    }

    let order = |a: &&ProcessSnapshot, b: &&ProcessSnapshot| compare(a, b, key, direction);
    roots.sort_by(order);
    for siblings in children.values_mut() {
        siblings.sort_by(order);
    }

    let mut rows = Vec::with_capacity(processes.len());
    let mut visited: HashSet<u32> = HashSet::with_capacity(processes.len());

    for &root in &roots {
        walk(root, &children, &mut rows, &mut visited);
    }

    if rows.len() < present.len() {
        let mut stranded: Vec<&ProcessSnapshot> = processes
            .iter()
            .filter(|p| !visited.contains(&p.pid))
            .collect();
        stranded.sort_by(order);
        for process in stranded {
            walk(process, &children, &mut rows, &mut visited);
        }
    }

    rows
}

/// Case-insensitive substring match on name, user or pid.
pub fn matches_filter(process: &ProcessSnapshot, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    process.name.to_lowercase().contains(&needle)
        || process.user.to_lowercase().contains(&needle)
        || process.pid.to_string().contains(&needle)
}

/// Sort (or tree-order) then filter. Tree rows keep their depth, so a
/// matching child shows indented even when its parent is filtered out.
pub fn visible_rows<'a>(processes: &'a [ProcessSnapshot], view: &ProcessView) -> Vec<ProcessRow<'a>> {
    let rows = if view.tree {
        build_tree(processes, view.sort_key, view.sort_direction)
    } else {
        sort_flat(processes, view.sort_key, view.sort_direction)
    };
    let filter = view.active_filter();
    if filter.trim().is_empty() {
        return rows;
    }
    rows.into_iter()
        .filter(|row| matches_filter(row.process, filter))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc(pid: u32, ppid: u32) -> ProcessSnapshot {
        ProcessSnapshot {
            pid,
            ppid,
            name: format!("p{pid}"),
            user: "root".into(),
            ..ProcessSnapshot::default()
        }
    }

    fn pids(rows: &[ProcessRow<'_>]) -> Vec<u32> {
        rows.iter().map(|r| r.process.pid).collect()
    }

    #[test]
    fn tree_roots_and_dfs_order() {
        let processes = vec![proc(1, 0), proc(2, 1), proc(3, 1), proc(4, 99)];
        let rows = build_tree(&processes, SortKey::Cpu, SortDirection::Descending);
        assert_eq!(pids(&rows), vec![1, 2, 3, 4]);
        let depths: Vec<usize> = rows.iter().map(|r| r.depth).collect();
        assert_eq!(depths, vec![0, 1, 1, 0]);
    }

    #[test]
    fn siblings_follow_sort_key() {
        let mut processes = vec![proc(1, 0), proc(2, 1), proc(3, 1)];
        processes[1].cpu_percent = 5.0;
        processes[2].cpu_percent = 40.0;
        let rows = build_tree(&processes, SortKey::Cpu, SortDirection::Descending);
        assert_eq!(pids(&rows), vec![1, 3, 2]);
    }

    #[test]
    fn self_parented_and_cyclic_processes_still_appear() {
        let processes = vec![proc(5, 5), proc(10, 11), proc(11, 10), proc(12, 11)];
        let rows = build_tree(&processes, SortKey::Pid, SortDirection::Ascending);
        assert_eq!(rows.len(), 4);
        assert_eq!(pids(&rows), vec![5, 10, 11, 12]);
        assert_eq!(rows[2].depth, 1);
        assert_eq!(rows[3].depth, 2);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let processes: Vec<_> = (1..=20_000).map(|pid| proc(pid, pid - 1)).collect();
        let rows = build_tree(&processes, SortKey::Pid, SortDirection::Ascending);
        assert_eq!(rows.len(), 20_000);
        assert_eq!(rows.last().map(|r| r.depth), Some(19_999));
    }

    #[test]
    fn flat_sort_breaks_ties_by_pid() {
        let mut processes = vec![proc(30, 0), proc(10, 0), proc(20, 0)];
        processes[0].mem_percent = 1.0;
        let rows = sort_flat(&processes, SortKey::Memory, SortDirection::Descending);
        assert_eq!(pids(&rows), vec![30, 10, 20]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut processes = vec![proc(1, 0), proc(2, 0)];
        processes[0].name = "zsh".into();
        processes[1].name = "Bash".into();
        let rows = sort_flat(&processes, SortKey::Name, SortDirection::Ascending);
        assert_eq!(pids(&rows), vec![2, 1]);
    }

    #[test]
    fn filter_matches_name_user_and_pid() {
        let mut p = proc(4242, 1);
        p.name = "Firefox".into();
        p.user = "alice".into();
        assert!(matches_filter(&p, "fire"));
        assert!(matches_filter(&p, "ALI"));
        assert!(matches_filter(&p, "424"));
        assert!(matches_filter(&p, "  "));
        assert!(!matches_filter(&p, "chrome"));
    }

    #[test]
    fn tree_filter_keeps_depth() {
        let mut processes = vec![proc(1, 0), proc(2, 1)];
        processes[1].name = "worker".into();
        let view = ProcessView {
            tree: true,
            filter: "work".into(),
            ..ProcessView::default()
        };
        let rows = visible_rows(&processes, &view);
        assert_eq!(pids(&rows), vec![2]);
        assert_eq!(rows[0].depth, 1);
    }

    #[test]
    fn sort_key_cycle_and_defaults() {
        assert_eq!(SortKey::Name.next(), SortKey::Cpu);
        assert_eq!(SortKey::Pid.natural_direction(), SortDirection::Ascending);
        assert_eq!(SortKey::Memory.natural_direction(), SortDirection::Descending);
    }
}
