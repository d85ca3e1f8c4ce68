//! Timeslot repository contracts and SQLite implementation.
//!
//! # Invariants
//! - Timeslot ids double as within-day order for timetables. Writes of
//!   `HH:MM-HH:MM` descriptions are rejected when they would break that
//!   order (see `model::timeslot::ensure_chronological`).

use crate::model::timeslot::{ensure_chronological, NewTimeslot, Timeslot, TimeslotId};
use crate::repo::{ensure_connection_ready, write_failed, RepoError, RepoResult};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for timeslots.
pub trait TimeslotRepository {
    fn add(&self, timeslot: &NewTimeslot) -> RepoResult<TimeslotId>;
    fn get_by_id(&self, id: TimeslotId) -> RepoResult<Timeslot>;
    /// All timeslots ordered by description.
    fn get_all(&self) -> RepoResult<Vec<Timeslot>>;
    fn update(&self, timeslot: &Timeslot) -> RepoResult<()>;
    fn delete(&self, id: TimeslotId) -> RepoResult<()>;
}

/// SQLite-backed timeslot repository.
pub struct SqliteTimeslotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTimeslotRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &["timeslots"])?;
        Ok(Self { conn })
    }

    fn all_by_id(&self) -> RepoResult<Vec<Timeslot>> {
        let mut stmt = self.conn.prepare(
            "SELECT timeslot_id, timeslot_description
             FROM timeslots
             ORDER BY timeslot_id ASC;",
        )?;
        let timeslots = stmt
            .query_map([], map_timeslot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(timeslots)
    }
}

impl TimeslotRepository for SqliteTimeslotRepository<'_> {
    fn add(&self, timeslot: &NewTimeslot) -> RepoResult<TimeslotId> {
        timeslot.validate()?;
        // New rows always get the highest id.
        ensure_chronological(&timeslot.description, &self.all_by_id()?, &[])?;

        self.conn
            .execute(
                "INSERT INTO timeslots (timeslot_description) VALUES (?1);",
                [timeslot.description.as_str()],
            )
            .map_err(|err| write_failed("timeslot_add", err))?;

        let id = self.conn.last_insert_rowid();
        debug!("event=timeslot_add module=repo status=ok timeslot_id={id}");
        Ok(id)
    }

    fn get_by_id(&self, id: TimeslotId) -> RepoResult<Timeslot> {
        self.conn
            .query_row(
                "SELECT timeslot_id, timeslot_description
                 FROM timeslots
                 WHERE timeslot_id = ?1;",
                [id],
                map_timeslot,
            )
            .optional()?
            .ok_or_else(|| RepoError::not_found("timeslot", id))
    }

    fn get_all(&self) -> RepoResult<Vec<Timeslot>> {
        let mut stmt = self.conn.prepare(
            "SELECT timeslot_id, timeslot_description
             FROM timeslots
             ORDER BY timeslot_description ASC, timeslot_id ASC;",
        )?;
        let timeslots = stmt
            .query_map([], map_timeslot)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(timeslots)
    }

    fn update(&self, timeslot: &Timeslot) -> RepoResult<()> {
        timeslot.validate()?;
        self.get_by_id(timeslot.id)?;
        let (earlier, later): (Vec<Timeslot>, Vec<Timeslot>) = self
            .all_by_id()?
            .into_iter()
            .filter(|other| other.id != timeslot.id)
            .partition(|other| other.id < timeslot.id);
        ensure_chronological(&timeslot.description, &earlier, &later)?;

        let changed = self
            .conn
            .execute(
                "UPDATE timeslots SET timeslot_description = ?1 WHERE timeslot_id = ?2;",
                params![timeslot.description.as_str(), timeslot.id],
            )
            .map_err(|err| write_failed("timeslot_update", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("timeslot", timeslot.id));
        }

        debug!(
            "event=timeslot_update module=repo status=ok timeslot_id={}",
            timeslot.id
        );
        Ok(())
    }

    fn delete(&self, id: TimeslotId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM timeslots WHERE timeslot_id = ?1;", [id])
            .map_err(|err| write_failed("timeslot_delete", err))?;

        if changed == 0 {
            return Err(RepoError::not_found("timeslot", id));
        }

        debug!("event=timeslot_delete module=repo status=ok timeslot_id={id}");
        Ok(())
    }
}

fn map_timeslot(row: &Row<'_>) -> rusqlite::Result<Timeslot> {
    Ok(Timeslot {
        id: row.get("timeslot_id")?,
        description: row.get("timeslot_description")?,
    })
}
