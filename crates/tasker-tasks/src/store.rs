use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::Connection;
use tasker_scheduler::{format_date, next_date, parse_date};
use tracing::{debug, info, instrument};

use crate::db::init_db;
use crate::error::{Result, TaskError};
use crate::types::{Task, TaskDraft};

/// Thread-safe store for the `scheduler` task table.
///
/// Wraps a single SQLite connection in a `Mutex`; a single-user scheduler
/// never needs more than one writer.
pub struct TaskStore {
    db: Mutex<Connection>,
}

impl TaskStore {
    /// Wrap an open connection, creating the schema if needed.
    pub fn new(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| TaskError::LockPoisoned)
    }

    /// Insert an already-validated task and return its new id.
    #[instrument(skip(self, draft), fields(title = %draft.title))]
    pub fn add(&self, draft: &TaskDraft) -> Result<String> {
        let db = self.conn()?;
        db.execute(
            "INSERT INTO scheduler (date, title, comment, repeat) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![draft.date, draft.title, draft.comment, draft.repeat],
        )?;
        let id = db.last_insert_rowid().to_string();
        info!(task_id = %id, date = %draft.date, "task added");
        Ok(id)
    }

    /// Fetch a task by id.
    #[instrument(skip(self))]
    pub fn get(&self, id: &str) -> Result<Task> {
        let db = self.conn()?;
        fetch(&db, id)
    }

    /// Overwrite every field of an existing task.
    #[instrument(skip(self, task), fields(task_id = %task.id))]
    pub fn update(&self, task: &Task) -> Result<()> {
        let db = self.conn()?;
        write(&db, task)?;
        info!(task_id = %task.id, date = %task.date, "task updated");
        Ok(())
    }

    /// Permanently delete a task.
    #[instrument(skip(self))]
    pub fn remove(&self, id: &str) -> Result<()> {
        let db = self.conn()?;
        delete(&db, id)?;
        info!(task_id = %id, "task removed");
        Ok(())
    }

    /// Mark a task done.
    ///
    /// One-off tasks are deleted and `None` is returned. A recurring task is
    /// moved to its next occurrence after the current due date, which is
    /// returned. The read and the write share one transaction under the
    /// connection lock.
    #[instrument(skip(self))]
    pub fn complete(&self, id: &str) -> Result<Option<String>> {
        let mut db = self.conn()?;
        let tx = db.transaction()?;
        let mut task = fetch(&tx, id)?;

        if !task.is_recurring() {
            delete(&tx, id)?;
            tx.commit()?;
            info!(task_id = %id, "one-off task completed and removed");
            return Ok(None);
        }

        let due = parse_date(&task.date)?;
        let Some(next) = next_date(due, &task.date, &task.repeat)? else {
            return Ok(None);
        };
        debug!(task_id = %id, from = %task.date, to = %next, "rescheduling recurring task");
        task.date = next.clone();
        write(&tx, &task)?;
        tx.commit()?;
        info!(task_id = %id, date = %next, "recurring task rescheduled");
        Ok(Some(next))
    }

    /// List tasks in due-date order, at most `limit` of them.
    ///
    /// `search` is either a `DD.MM.YYYY` date (exact match on the due date)
    /// or text matched as a substring of the title or comment.
    #[instrument(skip(self))]
    pub fn list(&self, search: Option<&str>, limit: u32) -> Result<Vec<Task>> {
        let db = self.conn()?;
        let search = search.map(str::trim).filter(|s| !s.is_empty());

        let tasks = match search {
            None => {
                let mut stmt = db.prepare(
                    "SELECT id, date, title, comment, repeat FROM scheduler
                     ORDER BY date, id LIMIT ?1",
                )?;
                let rows = stmt.query_map([limit], row_to_task)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()?
            }
            Some(text) => match NaiveDate::parse_from_str(text, "%d.%m.%Y") {
                Ok(date) => {
                    let mut stmt = db.prepare(
                        "SELECT id, date, title, comment, repeat FROM scheduler
                         WHERE date = ?1 ORDER BY date, id LIMIT ?2",
                    )?;
                    let rows = stmt.query_map(rusqlite::params![format_date(date), limit], row_to_task)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
                Err(_) => {
                    let pattern = format!("%{}%", escape_like(text));
                    let mut stmt = db.prepare(
                        "SELECT id, date, title, comment, repeat FROM scheduler
                         WHERE title LIKE ?1 ESCAPE '\\' OR comment LIKE ?1 ESCAPE '\\'
                         ORDER BY date, id LIMIT ?2",
                    )?;
                    let rows = stmt.query_map(rusqlite::params![pattern, limit], row_to_task)?;
                    rows.collect::<rusqlite::Result<Vec<_>>>()?
                }
            },
        };
        Ok(tasks)
    }
}

fn fetch(conn: &Connection, id: &str) -> Result<Task> {
    let rowid = parse_id(id)?;
    match conn.query_row(
        "SELECT id, date, title, comment, repeat FROM scheduler WHERE id = ?1",
        [rowid],
        row_to_task,
    ) {
        Ok(task) => Ok(task),
        Err(rusqlite::Error::QueryReturnedNoRows) => Err(TaskError::NotFound { id: id.to_string() }),
        Err(e) => Err(TaskError::Database(e)),
    }
}

fn write(conn: &Connection, task: &Task) -> Result<()> {
    let rowid = parse_id(&task.id)?;
    let rows_changed = conn.execute(
        "UPDATE scheduler SET date = ?1, title = ?2, comment = ?3, repeat = ?4 WHERE id = ?5",
        rusqlite::params![task.date, task.title, task.comment, task.repeat, rowid],
    )?;
    if rows_changed == 0 {
        return Err(TaskError::NotFound { id: task.id.clone() });
    }
    Ok(())
}

fn delete(conn: &Connection, id: &str) -> Result<()> {
    let rowid = parse_id(id)?;
    let rows_changed = conn.execute("DELETE FROM scheduler WHERE id = ?1", [rowid])?;
    if rows_changed == 0 {
        return Err(TaskError::NotFound { id: id.to_string() });
    }
    Ok(())
}

fn parse_id(id: &str) -> Result<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| TaskError::Validation(format!("invalid task id {id:?}")))
}

/// Escape `%`, `_` and the escape character itself for a `LIKE … ESCAPE '\'` pattern.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Map a SQLite row to a `Task`.
fn row_to_task(row: &rusqlite::Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get::<_, i64>(0)?.to_string(),
        date: row.get(1)?,
        title: row.get(2)?,
        comment: row.get(3)?,
        repeat: row.get(4)?,
    })
}
