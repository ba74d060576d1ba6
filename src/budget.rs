/// A global cap on emissions, shared by every source walked in one
/// invocation.
///
/// The budget knows nothing about what it counts. The engine is its only
/// caller: it checks [`available`](Budget::available) before popping the
/// stack and before every emission, and calls [`consume`](Budget::consume)
/// once per emission. It is never reset mid-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Budget {
    /// No cap. Always available, never decremented.
    #[default]
    Unbounded,

    /// At most `n` more emissions.
    Remaining(usize),
}

impl Budget {
    /// Seed from an optional `max_files` setting. Zero means "no limit",
    /// matching how the command line treats a non-positive cap.
    pub fn from_max_files(max_files: Option<usize>) -> Self {
        match max_files {
            Some(n) if n > 0 => Self::Remaining(n),
            _ => Self::Unbounded,
        }
    }

    pub fn available(&self) -> bool {
        !self.spent()
    }

    pub fn spent(&self) -> bool {
        matches!(self, Self::Remaining(0))
    }

    /// Record one emission. Floors at zero.
    pub fn consume(&mut self) {
        if let Self::Remaining(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    /// Remaining emissions, or `None` when unbounded.
    pub fn remaining(&self) -> Option<usize> {
        match self {
            Self::Unbounded => None,
            Self::Remaining(n) => Some(*n),
        }
    }
}
