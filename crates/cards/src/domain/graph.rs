//! Dependency graph validation for a generated batch.
//!
//! All functions here are pure: they only look at the batch they are given.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::entities::TaskCard;
use crate::errors::{CardsResult, DependencyViolation};

/// Check that the batch forms a well-formed task DAG.
///
/// Checks run in this order and stop at the first violation:
/// 1. every dependency names a `card_id` present in the batch (input order)
/// 2. no two cards share a `card_id`
/// 3. the graph has no cycles, self-references included
pub fn validate_dependencies(cards: &[TaskCard]) -> CardsResult<()> {
    let all_ids: HashSet<&str> = cards.iter().map(|c| c.card_id.as_str()).collect();

    for card in cards {
        for dep_id in &card.dependencies {
            if !all_ids.contains(dep_id.as_str()) {
                return Err(DependencyViolation::MissingCard {
                    title: card.title.clone(),
                    dep_id: dep_id.clone(),
                }
                .into());
            }
        }
    }

    if let Some(card_id) = first_duplicate(cards) {
        return Err(DependencyViolation::DuplicateCardId {
            card_id: card_id.to_string(),
        }
        .into());
    }

    if let Some(cycle) = find_cycles(cards).into_iter().next() {
        return Err(DependencyViolation::Cycle { cycle }.into());
    }

    Ok(())
}

fn first_duplicate(cards: &[TaskCard]) -> Option<&str> {
    let mut seen = HashSet::new();
    cards
        .iter()
        .map(|c| c.card_id.as_str())
        .find(|id| !seen.insert(*id))
}

/// Find all cycles in the dependency graph.
///
/// Each cycle is returned as the path of ids that closes on itself; a
/// self-referencing card yields a one-element cycle. Dependencies that point
/// outside the batch are ignored.
pub fn find_cycles(cards: &[TaskCard]) -> Vec<Vec<String>> {
    let graph: HashMap<&str, Vec<&str>> = cards
        .iter()
        .map(|c| {
            (
                c.card_id.as_str(),
                c.dependencies.iter().map(String::as_str).collect(),
            )
        })
        .collect();

    let mut cycles = Vec::new();
    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();

    for card in cards {
        if !visited.contains(card.card_id.as_str()) {
            let mut path = Vec::new();
            dfs_cycle(
                &graph,
                card.card_id.as_str(),
                &mut visited,
                &mut rec_stack,
                &mut path,
                &mut cycles,
            );
        }
    }

    cycles
}

fn dfs_cycle<'a>(
    graph: &HashMap<&'a str, Vec<&'a str>>,
    node: &'a str,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
    cycles: &mut Vec<Vec<String>>,
) {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(deps) = graph.get(node) {
        for &dep in deps {
            if !graph.contains_key(dep) {
                continue;
            }
            if !visited.contains(dep) {
                dfs_cycle(graph, dep, visited, rec_stack, path, cycles);
            } else if rec_stack.contains(dep) {
                if let Some(start) = path.iter().position(|&n| n == dep) {
                    let cycle: Vec<String> =
                        path[start..].iter().map(|s| (*s).to_string()).collect();
                    if !cycles.contains(&cycle) {
                        cycles.push(cycle);
                    }
                }
            }
        }
    }

    path.pop();
    rec_stack.remove(node);
}

/// Order card ids so every card comes after its dependencies.
///
/// Ties keep input order. Returns `None` when the graph has a cycle.
pub fn dependency_order(cards: &[TaskCard]) -> Option<Vec<String>> {
    let index: HashMap<&str, usize> = cards
        .iter()
        .enumerate()
        .map(|(i, c)| (c.card_id.as_str(), i))
        .collect();

    let mut pending: Vec<usize> = vec![0; cards.len()];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); cards.len()];

    for (i, card) in cards.iter().enumerate() {
        for dep in &card.dependencies {
            if let Some(&d) = index.get(dep.as_str()) {
                pending[i] += 1;
                dependents[d].push(i);
            }
        }
    }

    let mut ready: VecDeque<usize> = (0..cards.len()).filter(|&i| pending[i] == 0).collect();
    let mut order = Vec::with_capacity(cards.len());

    while let Some(i) = ready.pop_front() {
        order.push(cards[i].card_id.clone());
        for &next in &dependents[i] {
            pending[next] -= 1;
            if pending[next] == 0 {
                ready.push_back(next);
            }
        }
    }

    (order.len() == cards.len()).then_some(order)
}
