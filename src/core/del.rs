use crate::db::log::ttlog_soft;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::Session;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one session by id and return what was removed.
    /// A missing id fails with `NotFound`, also on a repeated delete.
    pub fn apply(pool: &mut DbPool, id: i64) -> AppResult<Session> {
        let session = pool.get_session(id)?;
        pool.delete_session(id)?;

        ttlog_soft(
            &pool.conn,
            "del",
            &format!("session {}", id),
            &format!(
                "'{}' {} → {} ({})",
                session.title,
                session.start_str(),
                session.end_str(),
                session.external_id
            ),
        );

        Ok(session)
    }
}
