// pipeline.rs
//
// Wires the stages of an address update run together:
// candidates -> lot ids -> GURAS addresses -> link -> cardinality gate ->
// validate -> write back, with rejects collected into the exception report
// at every decision point.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::db::addresses::apply_update;
use crate::db::candidates::load_candidates;
use crate::db::connection::Database;
use crate::db::vocab::load_vocab;
use crate::domain::cardinality::classify;
use crate::domain::linker::link_candidates;
use crate::domain::models::{CandidateRecord, REASON_NOT_ONE_TO_ONE};
use crate::domain::validate::validate;
use crate::errors::AppError;
use crate::resolver::AddressResolver;
use crate::spreadsheets::{export_exceptions_xlsx, ExceptionRow};

/// Final counts for a run. The three outcome buckets partition the distinct
/// candidate address-id set: updated + rejected + unmatched == total.
#[derive(Debug)]
pub struct RunSummary {
    pub total_addresses: usize,
    pub updated: usize,
    pub rejected: usize,
    pub unmatched: usize,
    pub report_path: Option<PathBuf>,
}

pub fn run(
    db: &Database,
    resolver: &dyn AddressResolver,
    config: &Config,
) -> Result<RunSummary, AppError> {
    progress(1, "10% - Loading candidate addresses...");
    let candidates = db.with_conn(|conn| load_candidates(conn))?;
    let total_addresses = distinct_address_ids(&candidates);

    // Distinct lot keys, in a stable order.
    let lot_keys: Vec<String> = candidates
        .iter()
        .map(|c| c.lot_key.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    if lot_keys.is_empty() {
        println!();
        println!("-----------------------------------------");
        println!(" No lots to query address data. Exiting.");
        println!("-----------------------------------------");
        return Ok(RunSummary {
            total_addresses: 0,
            updated: 0,
            rejected: 0,
            unmatched: 0,
            report_path: None,
        });
    }

    progress(3, "30% - Querying prop id service...");
    let lots = resolver.resolve_lot_identifiers(&lot_keys)?;

    progress(4, "40% - Querying GURAS address service...");
    let prop_ids: Vec<i64> = lots
        .iter()
        .map(|l| l.prop_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let addresses = resolver.resolve_addresses(&prop_ids)?;

    progress(5, "50% - Matching GURAS -> GPR data...");
    let linked = link_candidates(&candidates, &lots, &addresses);

    progress(6, "60% - Classifying match cardinality...");
    let partition = classify(linked.matched);
    let mut exceptions: Vec<ExceptionRow> = partition
        .rejected
        .into_iter()
        .map(|row| ExceptionRow {
            reason: REASON_NOT_ONE_TO_ONE,
            row,
        })
        .collect();

    progress(7, "70% - Updating GPR address data...");
    let vocab = db.with_conn(|conn| load_vocab(conn))?;
    eprintln!(
        "Loaded vocabularies: {} road types, {} unit types, {} level types, {} suburbs",
        vocab.road_types.len(),
        vocab.unit_types.len(),
        vocab.level_types.len(),
        vocab.suburbs.len()
    );

    let mut updated = 0;
    db.with_conn(|conn| {
        let tx = conn.transaction()?;
        for row in &partition.accepted {
            let verdict = validate(&row.address, &vocab);
            if verdict.valid {
                apply_update(&tx, row.candidate.address_id, &verdict, &config.actor)?;
                updated += 1;
            } else {
                exceptions.push(ExceptionRow {
                    // validate always supplies a reason for invalid rows
                    reason: verdict.reason.unwrap_or("Invalid"),
                    row: row.clone(),
                });
            }
        }

        progress(8, "80% - Committing updates...");
        // One commit for the whole run; an abort before this point
        // forfeits every pending write.
        tx.commit()?;
        Ok(())
    })?;

    progress(9, "90% - Exporting exceptions report...");
    let rejected = distinct_exception_address_ids(&exceptions);
    let unmatched = distinct_address_ids(&linked.unmatched);
    let report_path =
        export_exceptions_xlsx(&exceptions, &linked.unmatched, Path::new(&config.report_dir))?;

    progress(10, "100% - Done");
    println!();
    println!("-----------------------------------------");
    println!(" Address update process complete!");
    println!("-----------------------------------------");
    println!("   {updated} x Addresses updated");
    println!("   {rejected} x Addresses unable to be updated");
    println!("   {unmatched} x No GURAS records matched");
    println!(
        "        - Exception report generated: {}",
        report_path.display()
    );

    Ok(RunSummary {
        total_addresses,
        updated,
        rejected,
        unmatched,
        report_path: Some(report_path),
    })
}

fn distinct_address_ids(candidates: &[CandidateRecord]) -> usize {
    candidates
        .iter()
        .map(|c| c.address_id)
        .collect::<HashSet<_>>()
        .len()
}

fn distinct_exception_address_ids(exceptions: &[ExceptionRow]) -> usize {
    exceptions
        .iter()
        .map(|e| e.row.candidate.address_id)
        .collect::<HashSet<_>>()
        .len()
}

/// Ten-segment progress line, redrawn in place.
fn progress(step: usize, msg: &str) {
    let done = "■".repeat(step.min(10));
    let togo = " ".repeat(10usize.saturating_sub(step));
    eprint!("[{done}{togo}] {msg}                            \r");
}
