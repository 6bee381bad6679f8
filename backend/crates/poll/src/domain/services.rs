//! Domain Services
//!
//! Decoding of the conditional store round trips. The store evaluates every
//! condition and the conditional write inside one statement and reports
//! what it saw as flags; these functions turn the flags into the outcome,
//! always checking conditions in the same order.

use crate::error::{PollError, PollResult};

/// Flags reported by the single vote admission round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VoteAdmission {
    pub poll_exists: bool,
    /// Poll exists and `expires_at > now`
    pub poll_active: bool,
    /// Option exists and belongs to the poll
    pub option_valid: bool,
    pub inserted: bool,
}

impl VoteAdmission {
    /// Poll vanished between snapshot and insert (concurrent delete)
    pub const POLL_GONE: Self = Self {
        poll_exists: false,
        poll_active: false,
        option_valid: false,
        inserted: false,
    };
}

/// Precedence: existence, then expiry, then option membership.
pub fn admit_vote(admission: VoteAdmission) -> PollResult<()> {
    match admission {
        VoteAdmission {
            poll_exists: false, ..
        } => Err(PollError::PollNotFound),
        VoteAdmission {
            poll_active: false, ..
        } => Err(PollError::PollExpired),
        VoteAdmission {
            option_valid: false,
            ..
        } => Err(PollError::InvalidOption),
        VoteAdmission {
            inserted: false, ..
        } => Err(PollError::Internal(
            "vote passed every check but was not inserted".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Flags reported by the single ownership-checked delete round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PollDeletion {
    pub poll_exists: bool,
    pub is_owner: bool,
    pub deleted: bool,
}

/// Precedence: existence, then ownership.
///
/// Existing + owned + not deleted means another delete removed the row
/// after our snapshot; that is reported as not found, never as success.
pub fn resolve_deletion(deletion: PollDeletion) -> PollResult<()> {
    match deletion {
        PollDeletion {
            poll_exists: false, ..
        } => Err(PollError::PollNotFound),
        PollDeletion {
            is_owner: false, ..
        } => Err(PollError::NotOwner),
        PollDeletion { deleted: false, .. } => Err(PollError::PollNotFound),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admission(poll_exists: bool, poll_active: bool, option_valid: bool) -> VoteAdmission {
        VoteAdmission {
            poll_exists,
            poll_active,
            option_valid,
            inserted: poll_exists && poll_active && option_valid,
        }
    }

    #[test]
    fn test_admit_vote_accepts_when_all_hold() {
        assert!(admit_vote(admission(true, true, true)).is_ok());
    }

    #[test]
    fn test_admit_vote_precedence_over_every_combination() {
        for exists in [false, true] {
            for active in [false, true] {
                for valid in [false, true] {
                    let result = admit_vote(admission(exists, active && exists, valid));
                    match (exists, active, valid) {
                        (false, _, _) => assert!(matches!(result, Err(PollError::PollNotFound))),
                        (true, false, _) => assert!(matches!(result, Err(PollError::PollExpired))),
                        (true, true, false) => {
                            assert!(matches!(result, Err(PollError::InvalidOption)))
                        }
                        (true, true, true) => assert!(result.is_ok()),
                    }
                }
            }
        }
    }

    #[test]
    fn test_admit_vote_not_inserted_is_internal() {
        let flags = VoteAdmission {
            poll_exists: true,
            poll_active: true,
            option_valid: true,
            inserted: false,
        };
        assert!(matches!(admit_vote(flags), Err(PollError::Internal(_))));
    }

    #[test]
    fn test_poll_gone_reads_as_not_found() {
        assert!(matches!(
            admit_vote(VoteAdmission::POLL_GONE),
            Err(PollError::PollNotFound)
        ));
    }

    #[test]
    fn test_resolve_deletion() {
        let missing = PollDeletion::default();
        assert!(matches!(resolve_deletion(missing), Err(PollError::PollNotFound)));

        let foreign = PollDeletion {
            poll_exists: true,
            is_owner: false,
            deleted: false,
        };
        assert!(matches!(resolve_deletion(foreign), Err(PollError::NotOwner)));

        let raced = PollDeletion {
            poll_exists: true,
            is_owner: true,
            deleted: false,
        };
        assert!(matches!(resolve_deletion(raced), Err(PollError::PollNotFound)));

        let done = PollDeletion {
            poll_exists: true,
            is_owner: true,
            deleted: true,
        };
        assert!(resolve_deletion(done).is_ok());
    }
}
