use super::{AgendaStore, SlotUpdate, StoreError, StoreResult};
use crate::week::{
    AvailabilitySlot, DEFAULT_STATUS, DEFAULT_TEMPLATE_STAFF, Mission, WeekDay, default_time_slots,
};
use rusqlite::{Connection, params};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

/// File-backed agenda store. The schema is created on open; every
/// operation locks the single connection for its duration.
pub struct SqliteAgendaStore {
    connection: Mutex<Connection>,
    template_staff: String,
}

impl SqliteAgendaStore {
    pub fn new<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::with_template_staff(path, DEFAULT_TEMPLATE_STAFF)
    }

    /// Opens a store whose schedule seeding copies time ranges from the
    /// given template staff member instead of the default one.
    pub fn with_template_staff<P: AsRef<Path>>(path: P, template_staff: &str) -> StoreResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
            template_staff: template_staff.to_string(),
        })
    }

    fn initialize_schema(connection: &Connection) -> StoreResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS disciplinas (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS funcionarios (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                disciplina TEXT
            );
            CREATE TABLE IF NOT EXISTS disponibilidade (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                dia TEXT NOT NULL,
                hora TEXT NOT NULL,
                atividade TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS missoes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                nome TEXT NOT NULL,
                missao TEXT NOT NULL,
                concluida BOOLEAN NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn template_time_ranges(tx: &rusqlite::Transaction, template_staff: &str) -> StoreResult<Vec<String>> {
        let mut stmt = tx.prepare(
            "SELECT hora FROM disponibilidade WHERE nome = ?1 ORDER BY id LIMIT 15",
        )?;
        let rows = stmt.query_map(params![template_staff], |row| row.get::<_, String>(0))?;
        let mut ranges = Vec::new();
        for range in rows {
            ranges.push(range?);
        }
        if ranges.is_empty() {
            ranges = default_time_slots();
        }
        Ok(ranges)
    }
}

impl AgendaStore for SqliteAgendaStore {
    fn add_subject(&self, name: &str) -> StoreResult<()> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "INSERT OR IGNORE INTO disciplinas (nome) VALUES (?1)",
            params![name],
        )?;
        Ok(())
    }

    fn list_subjects(&self) -> StoreResult<Vec<String>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare("SELECT nome FROM disciplinas ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut subjects = Vec::new();
        for subject in rows {
            subjects.push(subject?);
        }
        Ok(subjects)
    }

    fn add_staff(&self, name: &str, subject: &str) -> StoreResult<()> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO funcionarios (nome, disciplina) VALUES (?1, ?2)",
            params![name, subject],
        )?;

        let ranges = Self::template_time_ranges(&tx, &self.template_staff)?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO disponibilidade (nome, dia, hora, atividade) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for day in WeekDay::ALL {
                for range in &ranges {
                    stmt.execute(params![name, day.as_str(), range, DEFAULT_STATUS])?;
                }
            }
        }

        // Placeholder row so the staff member exists in the mission table;
        // empty text keeps it out of every listing.
        tx.execute(
            "INSERT INTO missoes (nome, missao, concluida) VALUES (?1, '', 0)",
            params![name],
        )?;

        tx.commit()?;
        Ok(())
    }

    fn list_staff_by_subject(&self, subject: &str) -> StoreResult<Vec<String>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt =
            conn.prepare("SELECT nome FROM funcionarios WHERE disciplina = ?1 ORDER BY id")?;
        let rows = stmt.query_map(params![subject], |row| row.get::<_, String>(0))?;
        let mut staff = Vec::new();
        for name in rows {
            staff.push(name?);
        }
        Ok(staff)
    }

    fn get_availability(&self, staff: &str) -> StoreResult<Vec<AvailabilitySlot>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, dia, hora, atividade FROM disponibilidade WHERE nome = ?1 ORDER BY id",
        )?;
        let rows = stmt.query_map(params![staff], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut slots = Vec::new();
        for row in rows {
            let (id, day, time_range, status) = row?;
            let day = WeekDay::from_str(&day).map_err(|err| StoreError::UnknownDay(err.0))?;
            slots.push(AvailabilitySlot {
                id,
                staff: staff.to_string(),
                day,
                time_range,
                status,
            });
        }
        Ok(slots)
    }

    fn set_availability(&self, staff: &str, updates: &[SlotUpdate]) -> StoreResult<()> {
        let mut conn = self.connection.lock().expect("sqlite mutex poisoned");
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "UPDATE disponibilidade SET atividade = ?1 \
                 WHERE nome = ?2 AND dia = ?3 AND hora = ?4",
            )?;
            for update in updates {
                stmt.execute(params![
                    update.status,
                    staff,
                    update.day.as_str(),
                    update.time_range
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn add_mission(&self, staff: &str, text: &str) -> StoreResult<i64> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        conn.execute(
            "INSERT INTO missoes (nome, missao, concluida) VALUES (?1, ?2, 0)",
            params![staff, text],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn pending_missions(&self, staff: &str) -> StoreResult<Vec<Mission>> {
        self.missions_where(staff, false)
    }

    fn completed_missions(&self, staff: &str) -> StoreResult<Vec<Mission>> {
        self.missions_where(staff, true)
    }

    fn complete_mission(&self, id: i64) -> StoreResult<bool> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let changed = conn.execute("UPDATE missoes SET concluida = 1 WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn delete_mission(&self, id: i64) -> StoreResult<bool> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let changed = conn.execute("DELETE FROM missoes WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}

impl SqliteAgendaStore {
    fn missions_where(&self, staff: &str, completed: bool) -> StoreResult<Vec<Mission>> {
        let conn = self.connection.lock().expect("sqlite mutex poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, missao FROM missoes \
             WHERE nome = ?1 AND concluida = ?2 AND missao != '' ORDER BY id",
        )?;
        let rows = stmt.query_map(params![staff, completed], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut missions = Vec::new();
        for row in rows {
            let (id, text) = row?;
            missions.push(Mission {
                id,
                staff: staff.to_string(),
                text,
                completed,
            });
        }
        Ok(missions)
    }
}
