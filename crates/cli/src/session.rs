// Session controller - the single owner of calculator state.
//
// Every mutation of the expression, result, or history flows through here;
// nothing else holds calculator state. History is persisted after each
// mutation (best-effort; a write failure never breaks the calculation).

use tally_ai_client::{AiClient, MathSolution, RequestSlot};
use tally_engine::{evaluate, InputBuffer, Key};
use tally_history::{HistoryLog, HistoryStore, Origin};

/// A prompt was submitted while another solver request was outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverBusy;

impl std::fmt::Display for SolverBusy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "a solver request is already in flight")
    }
}

pub struct Session {
    input: InputBuffer,
    result: String,
    history: HistoryLog,
    store: HistoryStore,
    slot: RequestSlot,
}

impl Session {
    /// Open a session backed by the given store, loading persisted history.
    pub fn open(store: HistoryStore) -> Self {
        let history = store.load();
        Self {
            input: InputBuffer::new(),
            result: String::new(),
            history,
            store,
            slot: RequestSlot::new(),
        }
    }

    pub fn expression(&self) -> &str {
        self.input.text()
    }

    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn press(&mut self, key: Key) {
        self.input.press(key);
    }

    pub fn delete(&mut self) {
        self.input.delete();
    }

    /// Reset the expression and the displayed result.
    pub fn clear(&mut self) {
        self.input.clear();
        self.result.clear();
    }

    /// Recall a history entry into the editable state.
    pub fn recall(&mut self, expression: &str, result: &str) {
        self.input.set_text(expression);
        self.result = result.to_string();
    }

    /// Evaluate the current expression. No-op on an empty expression.
    /// Both successes and failures are recorded; the expression stays in
    /// place for further editing.
    pub fn calculate(&mut self) -> Option<&str> {
        if self.input.is_empty() {
            return None;
        }
        self.result = evaluate(self.input.text()).into_display();
        self.history
            .record(self.input.text(), &self.result, Origin::Local, None);
        self.persist();
        Some(&self.result)
    }

    /// Submit a natural-language prompt to the solver. Rejected while another
    /// request is outstanding. A transport or parse failure is mapped to the
    /// sentinel solution shape; either way the outcome lands in history with
    /// the AI origin flag.
    pub fn ask(&mut self, client: &AiClient, prompt: &str) -> Result<MathSolution, SolverBusy> {
        let _guard = self.slot.try_begin().ok_or(SolverBusy)?;

        let solution = client.solve(prompt).unwrap_or_else(|_| MathSolution::failure());
        self.result = solution.result.clone();
        self.history.record(
            prompt,
            &solution.result,
            Origin::Ai,
            Some(solution.explanation()),
        );
        self.persist();
        Ok(solution)
    }

    /// True while a solver request is outstanding.
    pub fn solver_busy(&self) -> bool {
        self.slot.is_busy()
    }

    /// Clear all history, on disk too.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.persist();
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.history) {
            eprintln!("warning: could not save history: {}", e);
        }
    }
}
