use console::{Term, style};
use std::{env, fmt::Display};

/// Small UI helper:
/// - normal mode: human output to stdout, errors to stderr
/// - `--json` mode: ALL human output to stderr (stdout stays machine-readable JSON)
/// - fancy styling only on a real TTY and when NO_COLOR/CI are not set
#[derive(Debug, Clone)]
pub struct Ui {
    out: Term,
    err: Term,
    fancy: bool,
}

impl Ui {
    pub fn new(json: bool) -> Self {
        // In --json mode, keep stdout clean for JSON and send all human output to stderr.
        let out = if json { Term::stderr() } else { Term::stdout() };
        let err = Term::stderr();

        // Fancy output must only activate when the actual stream used for human output is a TTY.
        let out_is_tty = out.is_term();

        let no_color = env::var_os("NO_COLOR").is_some();
        let in_ci = env::var_os("CI").is_some();

        let fancy = out_is_tty && !no_color && !in_ci;

        Self { out, err, fancy }
    }

    pub fn line(&self, msg: impl Display) {
        let _ = self.out.write_line(&msg.to_string());
    }

    pub fn error(&self, msg: impl Display) {
        let text = msg.to_string();
        if self.fancy {
            let _ = self.err.write_line(&format!("{}", style(text).red()));
        } else {
            let _ = self.err.write_line(&text);
        }
    }

    pub fn heading(&self, msg: impl Display) {
        let text = msg.to_string();
        if self.fancy {
            let _ = self.out.write_line(&format!("{}", style(text).bold()));
        } else {
            let _ = self.out.write_line(&text);
        }
    }

    /// Counts for one replayed trace.
    pub fn summary(&self, visited: usize, eligible: usize, in_loops: usize, mutants: usize) {
        self.line(summary_line(visited, eligible, in_loops, mutants));
    }
}

/// One-line summary of a replay, stable across fancy/plain modes.
pub fn summary_line(visited: usize, eligible: usize, in_loops: usize, mutants: usize) -> String {
    format!(
        "literals: {visited} visited, {eligible} eligible, {in_loops} in loops; mutants: {mutants}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_line_is_stable() {
        assert_eq!(
            summary_line(4, 3, 1, 6),
            "literals: 4 visited, 3 eligible, 1 in loops; mutants: 6"
        );
    }
}
