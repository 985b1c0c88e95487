use soroban_sdk::{symbol_short, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const LOCKED: Symbol = symbol_short!("LOCKED");

// ── Guard ────────────────────────────────────────────────────────────────────

/// Scoped reentrancy lock held for the duration of one contract operation.
///
/// The flag lives in the calling contract's instance storage, so it is
/// per contract instance. Acquire it with [`ReentrancyGuard::enter`] at the
/// top of an entry point and keep the returned value alive until the
/// operation is finished; the flag is cleared when the guard is dropped,
/// including on early `?` returns.
pub struct ReentrancyGuard {
    env: Env,
}

impl ReentrancyGuard {
    /// Takes the lock.
    ///
    /// Returns `None` if another operation on this contract instance already
    /// holds it.
    pub fn enter(env: &Env) -> Option<Self> {
        if is_locked(env) {
            return None;
        }
        env.storage().instance().set(&LOCKED, &true);
        Some(Self { env: env.clone() })
    }
}

impl Drop for ReentrancyGuard {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&LOCKED);
    }
}

/// Returns `true` while some operation holds the lock.
pub fn is_locked(env: &Env) -> bool {
    env.storage().instance().get(&LOCKED).unwrap_or(false)
}
