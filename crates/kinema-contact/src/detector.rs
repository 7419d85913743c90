//! Contact generation interface.

use kinema_model::{Model, State};
use kinema_types::KinemaResult;

use crate::contact::Contacts;

/// Trait for contact generation strategies.
///
/// A detector appends records to `contacts`; callers clear the buffer
/// between steps.
pub trait ContactDetector: Send + Sync {
    /// Generate contacts for the current state.
    fn detect(&self, model: &Model, state: &State, contacts: &mut Contacts) -> KinemaResult<()>;

    /// Returns the detector name for logging.
    fn name(&self) -> &str;
}
