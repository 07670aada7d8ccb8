use std::io::{self, BufRead, Write};

/// What to do after the resolver has run out of automatic options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscalationDecision {
    /// Restart the retry counter from zero and query again.
    Retry,
    /// Give up on the whole run. Updates already committed stay committed;
    /// anything pending since the last commit point is forfeited.
    Abort,
}

/// Policy consulted when a service keeps failing. The interactive
/// implementation suits attended runs; unattended runs plug in a fixed
/// policy instead so nothing ever blocks on stdin.
pub trait FailureEscalation {
    fn on_retries_exhausted(&self, service: &str) -> EscalationDecision;
    fn on_bad_response(&self, service: &str, status: u16) -> EscalationDecision;
}

/// Asks the operator y/n on stdin, re-prompting on anything else.
pub struct ConsolePrompt;

impl ConsolePrompt {
    fn ask(question: &str) -> EscalationDecision {
        let stdin = io::stdin();
        loop {
            println!("\n{question}");
            let _ = io::stdout().flush();

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                // Closed stdin means nobody is attending this run.
                Ok(0) | Err(_) => return EscalationDecision::Abort,
                Ok(_) => {}
            }

            match line.trim() {
                "y" => return EscalationDecision::Retry,
                "n" => return EscalationDecision::Abort,
                _ => println!("Invalid selection. Please enter y or n"),
            }
        }
    }
}

impl FailureEscalation for ConsolePrompt {
    fn on_retries_exhausted(&self, service: &str) -> EscalationDecision {
        Self::ask(&format!(
            "Request to {service} failed 10 times, do you want to try again? y/n"
        ))
    }

    fn on_bad_response(&self, service: &str, status: u16) -> EscalationDecision {
        Self::ask(&format!(
            "Invalid response ({status}) received from {service}, run query again? y/n"
        ))
    }
}

/// Answers every escalation the same way. Used for unattended runs and
/// injected by tests to exercise the abort path deterministically.
pub struct FixedPolicy(pub EscalationDecision);

impl FailureEscalation for FixedPolicy {
    fn on_retries_exhausted(&self, _service: &str) -> EscalationDecision {
        self.0
    }

    fn on_bad_response(&self, _service: &str, _status: u16) -> EscalationDecision {
        self.0
    }
}
