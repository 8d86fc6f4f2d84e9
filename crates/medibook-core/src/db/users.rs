//! User account and counter database operations.

use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbResult};
use crate::models::{Role, User};

const SELECT_USER: &str = r#"
    SELECT id, aid, full_name, email, phone, role, qr_code_url, created_at
    FROM users
"#;

impl Database {
    /// Increment a named counter and return its new value.
    ///
    /// A missing counter starts at 1. Read and increment happen in one
    /// statement, so concurrent callers never observe the same value.
    pub fn next_counter_value(&self, name: &str) -> DbResult<u64> {
        let value: i64 = self.conn.query_row(
            r#"
            INSERT INTO counters (name, value) VALUES (?1, 1)
            ON CONFLICT(name) DO UPDATE SET value = value + 1
            RETURNING value
            "#,
            [name],
            |row| row.get(0),
        )?;
        Ok(value as u64)
    }

    /// Insert a new user.
    pub fn insert_user(&self, user: &User) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO users (
                id, aid, full_name, email, phone, role, qr_code_url, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                user.id,
                user.aid,
                user.full_name,
                user.email,
                user.phone,
                user.role.as_str(),
                user.qr_code_url,
                user.created_at,
            ],
        )?;
        Ok(())
    }

    /// Get a user by ID.
    pub fn get_user(&self, id: &str) -> DbResult<Option<User>> {
        let sql = format!("{} WHERE id = ?", SELECT_USER);
        self.conn
            .query_row(&sql, [id], user_from_row)
            .optional()
            .map_err(Into::into)
    }

    /// Get a user by AID.
    pub fn get_user_by_aid(&self, aid: &str) -> DbResult<Option<User>> {
        let sql = format!("{} WHERE aid = ?", SELECT_USER);
        self.conn
            .query_row(&sql, [aid], user_from_row)
            .optional()
            .map_err(Into::into)
    }
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    let role: String = row.get(5)?;
    Ok(User {
        id: row.get(0)?,
        aid: row.get(1)?,
        full_name: row.get(2)?,
        email: row.get(3)?,
        phone: row.get(4)?,
        role: Role::from_str(&role).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                Type::Text,
                format!("unexpected role '{}'", role).into(),
            )
        })?,
        qr_code_url: row.get(6)?,
        created_at: row.get(7)?,
    })
}
