// Reestructura - core/transform.rs
//
// The pipeline's aggregation logic. Pure core layer: operates on loaded
// records, no I/O or UI dependencies.
//
// Operation order matters: the stable chronological sort is what gives
// "first" and "last" their meaning in the consolidation and dedupe steps.
// Records with equal (request, date) keys keep their input order.

use crate::core::model::{BranchSummary, LoanPosition, LoanTable, Record, Report};
use crate::util::constants;
use std::collections::BTreeMap;

/// Run the full transformation over a loaded table.
///
/// Sorts, filters to active records, consolidates per request, summarises
/// per branch, and dedupes the detail rows. Consolidation and dedupe both
/// start from the same filtered-and-sorted set: the former extracts
/// branch/balance pairs, the latter keeps whole rows.
pub fn build_report(table: LoanTable) -> Report {
    let LoanTable {
        headers,
        mut records,
    } = table;

    let total = records.len();
    sort_chronologically(&mut records);
    let active = filter_active(records);

    let positions = consolidate_requests(&active);
    let branches = summarise_branches(&positions);
    let detail = dedupe_latest(active);

    tracing::debug!(
        total,
        active_detail = detail.len(),
        requests = positions.len(),
        branches = branches.len(),
        "Transformation complete"
    );

    Report {
        headers,
        detail,
        branches,
    }
}

/// Stable sort by (request id ascending, restructuring date ascending).
pub fn sort_chronologically(records: &mut [Record]) {
    records.sort_by(|a, b| {
        a.request
            .cmp(&b.request)
            .then_with(|| a.date.cmp(&b.date))
    });
}

/// Keep only records whose status is exactly the active literal. No case
/// folding, no trimming: "vigente" and "VIGENTE " are both inactive.
pub fn filter_active(records: Vec<Record>) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| r.status == constants::ACTIVE_STATUS)
        .collect()
}

/// Collapse each request's run of active records into a single position:
/// branch from the chronologically first record, balance from the
/// chronologically last.
///
/// Requires `active` to be sorted by (request, date); each request then
/// occupies one contiguous run.
pub fn consolidate_requests(active: &[Record]) -> Vec<LoanPosition> {
    let mut positions: Vec<LoanPosition> = Vec::new();

    for record in active {
        if let Some(position) = positions.last_mut() {
            if position.request == record.request {
                // Later record in the same run: the balance follows it, the
                // branch stays pinned to the first record.
                position.balance = record.balance;
                continue;
            }
        }
        positions.push(LoanPosition {
            request: record.request.clone(),
            branch: record.branch.clone(),
            balance: record.balance,
        });
    }

    positions
}

/// Aggregate consolidated positions per branch: distinct-request count and
/// balance total. Output is ordered by branch name ascending.
pub fn summarise_branches(positions: &[LoanPosition]) -> Vec<BranchSummary> {
    let mut by_branch: BTreeMap<&str, (usize, f64)> = BTreeMap::new();

    for position in positions {
        let entry = by_branch.entry(position.branch.as_str()).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += position.balance;
    }

    by_branch
        .into_iter()
        .map(|(branch, (restructure_count, total_balance))| BranchSummary {
            branch: branch.to_string(),
            restructure_count,
            total_balance,
        })
        .collect()
}

/// Deduplicate active records per request id, keeping the chronologically
/// last record of each contiguous run — the full row, not just the extracted
/// columns.
pub fn dedupe_latest(active: Vec<Record>) -> Vec<Record> {
    let mut detail: Vec<Record> = Vec::new();

    for record in active {
        if let Some(last) = detail.last_mut() {
            if last.request == record.request {
                *last = record;
                continue;
            }
        }
        detail.push(record);
    }

    detail
}

// =============================================================================
// Tests
// =============================================================================
