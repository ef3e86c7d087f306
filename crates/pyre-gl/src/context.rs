//! [`GlContext`]: backend plus the process-wide active-program flag.

use crate::api::{GlApi, ProgramId};

/// Owns a [`GlApi`] backend together with the "currently active program"
/// flag.
///
/// The flag starts at `None`, is updated on every
/// [`use_program`](Self::use_program), and is never torn down; the
/// context is created at
/// startup and lives for the process. Routing activation through the
/// context makes redundant `use_program` calls cheap, which is a
/// performance characteristic only — callers must not depend on the exact
/// backend call count for correctness.
pub struct GlContext<A: GlApi> {
    /// The backend. Raw operations other than program activation go
    /// straight through this field.
    pub api: A,
    active_program: Option<ProgramId>,
}

impl<A: GlApi> GlContext<A> {
    /// Wrap a backend with no program active.
    pub fn new(api: A) -> Self {
        Self {
            api,
            active_program: None,
        }
    }

    /// Activate `program` unless it is already active.
    pub fn use_program(&mut self, program: ProgramId) {
        if self.active_program != Some(program) {
            self.api.use_program(program);
            self.active_program = Some(program);
        }
    }

    /// The program last activated through this context, if any.
    pub fn active_program(&self) -> Option<ProgramId> {
        self.active_program
    }
}
