//! Deferred settlement of a registration.
//!
//! A submission stays pending for a fixed delay and then settles with a
//! receipt, unless it is cancelled first. Callers pass the current instant
//! in, so the pending and settled states can be observed deterministically.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use log::{debug, info};
use serde::Serialize;

use crate::{
    domain::id::SubmissionId,
    onboard::{ArtistForm, ValidationErrors},
};

pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub submission_id: String,
    pub name: String,
    pub submitted_at: DateTime<Local>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SubmissionState {
    Pending { remaining_ms: u64 },
    Submitted(Receipt),
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Submission {
    pub id: SubmissionId,
    pub form: ArtistForm,
    requested_at: DateTime<Local>,
    started: Instant,
    delay: Duration,
    cancelled_at: Option<Instant>,
}

impl Submission {
    /// validates the form and starts the deferred submission at `now`
    pub fn start(form: ArtistForm, delay: Duration, now: Instant) -> Result<Self, ValidationErrors> {
        form.validate()?;

        let requested_at = Local::now();
        let id = Self::derive_id(&form, requested_at);
        info!("Registration {} for {} pending", id, form.name);

        Ok(Self {
            id,
            form,
            requested_at,
            started: now,
            delay,
            cancelled_at: None,
        })
    }

    fn derive_id(form: &ArtistForm, at: DateTime<Local>) -> SubmissionId {
        let at = at.to_rfc3339();
        let parts = [form.name.as_str(), form.bio.as_str()]
            .into_iter()
            .chain(form.category.as_slice().iter().map(String::as_str))
            .chain(form.languages.as_slice().iter().map(String::as_str))
            .chain([form.fee_range.as_str(), form.location.as_str()])
            .chain(form.profile_image.as_deref())
            .chain([at.as_str()]);
        SubmissionId::from_parts(parts)
    }

    pub fn deadline(&self) -> Instant {
        self.started + self.delay
    }

    pub fn state(&self, now: Instant) -> SubmissionState {
        if self.cancelled_at.is_some() {
            return SubmissionState::Cancelled;
        }

        match self.deadline().checked_duration_since(now) {
            Some(remaining) if !remaining.is_zero() => SubmissionState::Pending {
                remaining_ms: u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
            },
            _ => SubmissionState::Submitted(self.receipt()),
        }
    }

    fn receipt(&self) -> Receipt {
        let delay = chrono::Duration::from_std(self.delay).unwrap_or(chrono::Duration::zero());
        Receipt {
            submission_id: self.id.to_hex(),
            name: self.form.name.clone(),
            submitted_at: self.requested_at + delay,
        }
    }

    /// Cancels a pending submission. Returns false when it had already settled.
    pub fn cancel(&mut self, now: Instant) -> bool {
        match self.state(now) {
            SubmissionState::Pending { .. } => {
                debug!("Registration {} cancelled", self.id);
                self.cancelled_at = Some(now);
                true
            }
            SubmissionState::Cancelled => true,
            SubmissionState::Submitted(_) => false,
        }
    }

    /// True once the submission reached a final state at least `retention` before `now`.
    pub fn is_expired(&self, now: Instant, retention: Duration) -> bool {
        let finished = self.cancelled_at.unwrap_or_else(|| self.deadline());
        now.checked_duration_since(finished).is_some_and(|since| since >= retention)
    }

    /// blocks the current thread until the submission settles
    pub fn wait(&self) -> SubmissionState {
        let now = Instant::now();
        if let Some(remaining) = self.deadline().checked_duration_since(now) {
            std::thread::sleep(remaining);
        }
        self.state(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::onboard::{FormField, valid_form};

    const DELAY: Duration = Duration::from_millis(2000);

    #[test]
    fn test_pending_before_deadline() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let submission = Submission::start(valid_form(), DELAY, t0)?;

        assert_eq!(
            submission.state(t0),
            SubmissionState::Pending { remaining_ms: 2000 }
        );
        assert_eq!(
            submission.state(t0 + Duration::from_millis(1500)),
            SubmissionState::Pending { remaining_ms: 500 }
        );

        Ok(())
    }

    #[test]
    fn test_settles_at_deadline() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let submission = Submission::start(valid_form(), DELAY, t0)?;

        match submission.state(t0 + DELAY) {
            SubmissionState::Submitted(receipt) => {
                assert_eq!(receipt.name, "Kavya Rathore");
                assert_eq!(receipt.submission_id, submission.id.to_hex());
            }
            other => panic!("expected submitted, got {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn test_cancel_while_pending() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let mut submission = Submission::start(valid_form(), DELAY, t0)?;

        assert!(submission.cancel(t0 + Duration::from_millis(10)));
        assert_eq!(submission.state(t0 + DELAY), SubmissionState::Cancelled);

        Ok(())
    }

    #[test]
    fn test_cancel_after_settle_is_noop() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let mut submission = Submission::start(valid_form(), DELAY, t0)?;
        let later = t0 + DELAY + Duration::from_millis(1);

        assert!(!submission.cancel(later));
        assert!(matches!(
            submission.state(later),
            SubmissionState::Submitted(_)
        ));

        Ok(())
    }

    #[test]
    fn test_expires_after_retention() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let retention = Duration::from_secs(60);
        let submission = Submission::start(valid_form(), DELAY, t0)?;

        assert!(!submission.is_expired(t0, retention));
        assert!(!submission.is_expired(t0 + DELAY, retention));
        assert!(submission.is_expired(t0 + DELAY + retention, retention));

        Ok(())
    }

    #[test]
    fn test_cancelled_expires_from_cancel_time() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let retention = Duration::from_secs(1);
        let mut submission = Submission::start(valid_form(), Duration::from_secs(3600), t0)?;

        submission.cancel(t0);
        assert!(submission.is_expired(t0 + retention, retention));

        Ok(())
    }

    #[test]
    fn test_invalid_form_is_not_started() {
        let form = ArtistForm {
            fee_range: String::new(),
            ..valid_form()
        };
        let errors = Submission::start(form, DELAY, Instant::now()).unwrap_err();
        assert_eq!(
            errors.message_for(FormField::FeeRange),
            Some("Fee range is required")
        );
    }

    #[test]
    fn test_zero_delay_settles_immediately() -> anyhow::Result<()> {
        let t0 = Instant::now();
        let submission = Submission::start(valid_form(), Duration::ZERO, t0)?;
        assert!(matches!(submission.wait(), SubmissionState::Submitted(_)));
        Ok(())
    }

    #[test]
    fn test_id_depends_on_form_and_time() -> anyhow::Result<()> {
        let at = Local::now();
        let other_at = at + chrono::Duration::seconds(1);
        let form = valid_form();
        let renamed = ArtistForm {
            name: "Kavya R.".to_string(),
            ..valid_form()
        };

        let id = Submission::derive_id(&form, at);
        assert_eq!(id, Submission::derive_id(&valid_form(), at));
        assert_ne!(id, Submission::derive_id(&renamed, at));
        assert_ne!(id, Submission::derive_id(&form, other_at));

        Ok(())
    }

    #[test]
    fn test_state_serializes_with_tag() -> anyhow::Result<()> {
        let value = serde_json::to_value(SubmissionState::Pending { remaining_ms: 5 })?;
        assert_eq!(value["state"], "pending");
        assert_eq!(value["remaining_ms"], 5);
        Ok(())
    }
}
