pub mod adjust;
pub mod calculator;
pub mod del;
pub mod edit;
pub mod export;
pub mod legacy;
pub mod ledger;
pub mod log;
pub mod punch;
pub mod session;

use crate::db::store::KeyValueStore;
use crate::ui::messages::warning;

/// Audit writes never abort the operation that triggered them.
pub(crate) fn audit_quietly<S>(store: &mut S, operation: &str, target: &str, message: &str)
where
    S: KeyValueStore + ?Sized,
{
    if let Err(e) = store.audit(operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}
