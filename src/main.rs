use crate::config::Config;
use crate::db::connection::{connect_with_fallback, init_db, Database};
use crate::errors::AppError;
use crate::resolver::{ConsolePrompt, EscalationDecision, FailureEscalation, FixedPolicy, GurasClient};

mod config;
mod db;
mod domain;
mod errors;
mod pipeline;
mod resolver;
mod spreadsheets;

#[cfg(test)]
mod tests;

// Exit codes: 0 success, 1 fatal error, 2 aborted by operator.
const EXIT_FATAL: i32 = 1;
const EXIT_ABORTED: i32 = 2;

fn main() {
    let actor = match std::env::args().nth(1) {
        Some(actor) => actor,
        None => {
            eprintln!("usage: gpr_address_update <operator-name>");
            std::process::exit(EXIT_FATAL);
        }
    };

    let config = Config::from_env(actor);
    println!("[START] GPR Address Update process started");

    // Stand up a scratch registry first when asked, mainly for rehearsal
    // runs against a copy of production data.
    if let Ok(schema_path) = std::env::var("GPR_INIT_SCHEMA") {
        let scratch = Database::new(config.primary_db.clone());
        if let Err(e) = init_db(&scratch, &schema_path) {
            eprintln!("❌ Schema bootstrap failed: {e}");
            std::process::exit(EXIT_FATAL);
        }
    }

    let db = match connect_with_fallback(&config.primary_db, &config.secondary_db) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(EXIT_FATAL);
        }
    };

    let escalation: Box<dyn FailureEscalation> = if config.unattended {
        Box::new(FixedPolicy(EscalationDecision::Abort))
    } else {
        Box::new(ConsolePrompt)
    };

    let guras = match GurasClient::new(&config, escalation) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ Failed to build GURAS client: {e}");
            std::process::exit(EXIT_FATAL);
        }
    };

    match pipeline::run(&db, &guras, &config) {
        Ok(summary) => {
            println!(
                "[FINISH] GPR Address Update finished: {} updated, {} exceptions, {} no GURAS record",
                summary.updated, summary.rejected, summary.unmatched
            );
        }
        Err(AppError::Aborted) => {
            println!("GPR Address update process Aborted!!");
            eprintln!("Pending (uncommitted) address updates from this run were forfeited.");
            std::process::exit(EXIT_ABORTED);
        }
        Err(e) => {
            eprintln!("❌ GPR Address update failed: {e}");
            std::process::exit(EXIT_FATAL);
        }
    }
}
