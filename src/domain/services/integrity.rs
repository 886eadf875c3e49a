use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{ClubRepository, EventRepository, MemberRepository};
use crate::error::AppError;

/// A reference from a record to the parent it claims to belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum ParentRef {
    Club(i64),
    Member(String),
    Events(Vec<i64>),
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentRef::Club(id) => write!(f, "club {}", id),
            ParentRef::Member(key) => write!(f, "member {}", key),
            ParentRef::Events(ids) => write!(f, "events {:?}", ids),
        }
    }
}

/// Write-time foreign key checks.
///
/// Checks read current state and do not lock: two concurrent writers can
/// both pass. Only the storage keys themselves are hard constraints.
pub struct IntegrityChecker {
    clubs: Arc<dyn ClubRepository>,
    members: Arc<dyn MemberRepository>,
    events: Arc<dyn EventRepository>,
}

impl IntegrityChecker {
    pub fn new(
        clubs: Arc<dyn ClubRepository>,
        members: Arc<dyn MemberRepository>,
        events: Arc<dyn EventRepository>,
    ) -> Self {
        Self { clubs, members, events }
    }

    pub async fn assert_parent_exists(&self, parent: &ParentRef) -> Result<(), AppError> {
        let exists = match parent {
            ParentRef::Club(id) => self.clubs.find_by_id(*id).await?.is_some(),
            ParentRef::Member(key) => self.members.find_by_id(key).await?.is_some(),
            ParentRef::Events(ids) => {
                let missing = self.events.find_missing(ids).await?;
                if !missing.is_empty() {
                    warn!("Rejected reference to unknown events {:?}", missing);
                    return Err(AppError::NotFound(format!("Events not found: {:?}", missing)));
                }
                true
            }
        };

        if !exists {
            debug!("Parent lookup failed for {}", parent);
            return Err(AppError::NotFound(format!("Referenced {} not found", parent)));
        }
        Ok(())
    }

    /// Fails when the student is already enrolled in any club.
    pub async fn assert_no_cross_club_membership(
        &self,
        ma_so_hoc_sinh: &str,
        target_club: i64,
    ) -> Result<(), AppError> {
        let Some(existing) = self.members.find_by_id(ma_so_hoc_sinh).await? else {
            return Ok(());
        };

        if existing.club != target_club {
            return Err(AppError::Conflict(format!(
                "Student {} already belongs to club {}",
                ma_so_hoc_sinh, existing.club
            )));
        }

        Err(AppError::Conflict(format!(
            "Student {} is already a member of club {}",
            ma_so_hoc_sinh, target_club
        )))
    }
}
