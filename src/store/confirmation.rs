//! Proof that a destructive operation was confirmed by the caller

/// Obtained by the view layer (dialog, CLI prompt, `--yes` flag) and handed
/// to [`EntityStore::delete`](super::EntityStore::delete). The store never
/// prompts on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    _private: (),
}

impl Confirmation {
    /// The caller already has the user's consent
    pub fn granted() -> Self {
        Self { _private: () }
    }

    /// Run a confirmation callback; `None` when it declines
    pub fn ask<F>(prompt: F) -> Option<Self>
    where
        F: FnOnce() -> bool,
    {
        prompt().then(Self::granted)
    }
}
