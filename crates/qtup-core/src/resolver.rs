//! Dependency closure over an [`Updates`] catalog.

use qtup_schema::{PackageId, Updates};
use std::collections::HashSet;

/// Collects `target` and every identifier it transitively depends on.
///
/// Performs an iterative depth-first traversal with a LIFO work stack:
///
/// 1. Pop an identifier and append it to the result.
/// 2. For each record with that exact name, mark the identifier visited and
///    push every dependency that has not been visited yet.
///
/// The result is not deduplicated. An identifier pushed by two paths before
/// its own record is expanded appears twice, and identifiers with no record
/// in the catalog are never marked visited, so they are appended every time
/// a record pushes them. Unknown identifiers (including `target`) become
/// leaves instead of errors.
///
/// # Example
///
/// ```
/// use qtup_core::{Updates, dependency_closure};
///
/// let updates = Updates::parse(
///     "<Updates><ApplicationName>x</ApplicationName><ApplicationVersion>1</ApplicationVersion>\
///      <PackageUpdate><Name>a</Name><Dependencies>b</Dependencies></PackageUpdate></Updates>",
/// )
/// .unwrap();
///
/// assert_eq!(dependency_closure(&updates, "a"), vec!["a", "b"]);
/// assert_eq!(dependency_closure(&updates, "zzz"), vec!["zzz"]);
/// ```
pub fn dependency_closure(updates: &Updates, target: &str) -> Vec<PackageId> {
    let mut stack = vec![PackageId::new(target)];
    let mut packages = Vec::new();
    let mut visited: HashSet<PackageId> = HashSet::new();

    while let Some(next) = stack.pop() {
        let mut matched = false;
        for entry in updates.find(&next) {
            matched = true;
            visited.insert(next.clone());
            for dep in entry.dependency_ids() {
                if !visited.contains(dep) {
                    stack.push(dep.clone());
                }
            }
        }

        tracing::trace!(package = %next, matched, pending = stack.len(), "closure step");
        packages.push(next);
    }

    tracing::debug!(
        root = %target,
        packages = packages.len(),
        "resolved dependency closure"
    );

    packages
}
