//! Randomized names for detached node sessions.

use rand::Rng;

/// Prefix for background node sessions.
pub const SESSION_PREFIX: &str = "nexus";
/// Prefix for background node sessions started with a thread cap.
pub const CAPPED_SESSION_PREFIX: &str = "nexus-prover";

/// `<prefix>-<NNN>` with a 3-digit random suffix.
pub fn random_session_name<R: Rng + ?Sized>(rng: &mut R, thread_capped: bool) -> String {
    let prefix = if thread_capped {
        CAPPED_SESSION_PREFIX
    } else {
        SESSION_PREFIX
    };
    format!("{prefix}-{}", rng.gen_range(100..=999))
}
