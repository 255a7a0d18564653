use crate::core::reconciler;
use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::db::sessions::SessionUpdate;
use crate::errors::{AppError, AppResult};
use crate::models::{Session, SessionField};

/// Where an interactive edit currently stands.
///
/// `Idle → FieldSelected → AwaitingConfirmation → (commit | cancel) → Idle`.
/// Only `confirm()` writes to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum EditState {
    Idle,
    FieldSelected {
        id: i64,
        field: SessionField,
    },
    AwaitingConfirmation {
        before: Session,
        update: SessionUpdate,
        preview: Session,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    Committed(Session),
    Cancelled,
}

/// Drives one edit at a time against a store.
pub struct FieldEditor<'a> {
    pool: &'a mut DbPool,
    state: EditState,
}

impl<'a> FieldEditor<'a> {
    pub fn new(pool: &'a mut DbPool) -> Self {
        Self {
            pool,
            state: EditState::Idle,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Pick the session and field to edit. Returns the session as stored.
    pub fn select(&mut self, id: i64, field: SessionField) -> AppResult<Session> {
        if self.state != EditState::Idle {
            return Err(AppError::InvalidState(
                "an edit is already in progress".into(),
            ));
        }

        let session = self.pool.get_session(id)?;
        self.state = EditState::FieldSelected { id, field };
        Ok(session)
    }

    /// Offer a new raw value. On success the editor waits for confirmation and
    /// the returned preview shows the session as it would be stored. On a parse
    /// or validation failure the field stays selected so another value can be
    /// offered.
    pub fn propose(&mut self, raw: &str) -> AppResult<Session> {
        let (id, field) = match &self.state {
            EditState::FieldSelected { id, field } => (*id, *field),
            _ => {
                return Err(AppError::InvalidState(
                    "no field selected for editing".into(),
                ));
            }
        };

        let (before, update) = reconciler::prepare(&*self.pool, id, field, raw)?;
        let preview = update.apply_to(&before);
        self.state = EditState::AwaitingConfirmation {
            before,
            update,
            preview: preview.clone(),
        };

        Ok(preview)
    }

    /// Write the pending update. The editor returns to `Idle` whether or not
    /// the write succeeds; a failed write leaves the stored session unchanged.
    pub fn confirm(&mut self) -> AppResult<EditOutcome> {
        let state = std::mem::replace(&mut self.state, EditState::Idle);
        let (before, update) = match state {
            EditState::AwaitingConfirmation { before, update, .. } => (before, update),
            other => {
                self.state = other;
                return Err(AppError::InvalidState(
                    "nothing to confirm".into(),
                ));
            }
        };

        let committed = EditLogic::commit(&mut *self.pool, &before, &update)?;
        Ok(EditOutcome::Committed(committed))
    }

    /// Drop any pending value without touching the store.
    pub fn cancel(&mut self) -> EditOutcome {
        self.state = EditState::Idle;
        EditOutcome::Cancelled
    }
}

/// High-level business logic for the `edit` command.
pub struct EditLogic;

impl EditLogic {
    /// Reconcile and write a single-field edit in one go.
    pub fn apply(pool: &mut DbPool, id: i64, field: SessionField, raw: &str) -> AppResult<Session> {
        let (before, update) = reconciler::prepare(pool, id, field, raw)?;
        Self::commit(pool, &before, &update)
    }

    fn commit(pool: &mut DbPool, before: &Session, update: &SessionUpdate) -> AppResult<Session> {
        pool.update_field(before.id, update)?;
        let after = pool.get_session(before.id)?;

        ttlog_soft(
            &pool.conn,
            "edit",
            &format!("session {}", before.id),
            &describe_change(before, &after, update.field()),
        );

        Ok(after)
    }
}

/// Display form of one field, as shown in edit previews and the audit log.
pub fn field_value(s: &Session, field: SessionField) -> String {
    match field {
        SessionField::Title => s.title.clone(),
        SessionField::Description => s.description.clone(),
        SessionField::StartTime => s.start_str(),
        SessionField::EndTime => s.end_str(),
        SessionField::HourlyRate => format!("{:.2}", s.hourly_rate),
    }
}

fn describe_change(before: &Session, after: &Session, field: SessionField) -> String {
    let mut msg = format!(
        "{}: '{}' → '{}'",
        field.label(),
        field_value(before, field),
        field_value(after, field)
    );
    if field.affects_derived() {
        msg.push_str(&format!(
            " (duration {}s → {}s, earnings {:.2} → {:.2})",
            before.duration_secs, after.duration_secs, before.earnings, after.earnings
        ));
    }
    msg
}
