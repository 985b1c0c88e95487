use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const TIER_PREFIX: Symbol = symbol_short!("ADM_TIER");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Admin Tier Enum ──────────────────────────────────────────────────────────

/// Admin hierarchy gating the ledger's administrative entry points.
///
/// - `OperatorAdmin` – may pause and resume ledger operations.
/// - `ContractAdmin` – may also change the reward rate and rescue stray
///                     tokens.
/// - `SuperAdmin`    – may also promote and demote other admins.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AdminTier {
    OperatorAdmin = 1,
    ContractAdmin = 2,
    SuperAdmin = 3,
}

impl AdminTier {
    pub fn rank(&self) -> u32 {
        match self {
            AdminTier::OperatorAdmin => 1,
            AdminTier::ContractAdmin => 2,
            AdminTier::SuperAdmin => 3,
        }
    }

    /// Returns true if this tier grants everything `min_tier` grants.
    pub fn has_at_least(&self, min_tier: &AdminTier) -> bool {
        self.rank() >= min_tier.rank()
    }
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn tier_key(admin: &Address) -> (Symbol, Address) {
    (TIER_PREFIX, admin.clone())
}

fn bump(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Tier Assignment ──────────────────────────────────────────────────────────

/// Assigns `tier` to `admin` unconditionally.
/// Callers must have checked the actor's own rights first.
pub fn set_admin_tier(env: &Env, admin: &Address, tier: AdminTier) {
    let key = tier_key(admin);
    env.storage().persistent().set(&key, &tier);
    bump(env, &key);
}

pub fn get_admin_tier(env: &Env, admin: &Address) -> Option<AdminTier> {
    let key = tier_key(admin);
    let tier: Option<AdminTier> = env.storage().persistent().get(&key);
    if tier.is_some() {
        bump(env, &key);
    }
    tier
}

pub fn remove_admin_tier(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&tier_key(admin));
}

/// Returns `false` if `caller` holds no tier or a tier below `min_tier`.
pub fn require_tier(env: &Env, caller: &Address, min_tier: &AdminTier) -> bool {
    match get_admin_tier(env, caller) {
        Some(tier) => tier.has_at_least(min_tier),
        None => false,
    }
}

// ── Promote / Demote ─────────────────────────────────────────────────────────

/// Assigns `tier` to `target` on behalf of `caller`.
///
/// Returns `false` without touching storage unless `caller` is a
/// `SuperAdmin`. The caller must already have passed `require_auth()`.
pub fn promote_admin(env: &Env, caller: &Address, target: &Address, tier: AdminTier) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    set_admin_tier(env, target, tier);
    true
}

/// Strips every tier from `target` on behalf of `caller`.
///
/// Same authorization rule as [`promote_admin`].
pub fn demote_admin(env: &Env, caller: &Address, target: &Address) -> bool {
    if !require_tier(env, caller, &AdminTier::SuperAdmin) {
        return false;
    }
    remove_admin_tier(env, target);
    true
}
