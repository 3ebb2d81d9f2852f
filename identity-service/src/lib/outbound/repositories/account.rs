use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use sqlx::PgPool;

use crate::account::errors::AccountError;
use crate::account::models::Account;
use crate::account::models::AccountId;
use crate::account::models::ProfileUpdate;
use crate::account::models::Role;
use crate::account::ports::IdentityStore;

/// Table and column names backing one role's accounts.
#[derive(Debug, PartialEq, Eq)]
struct TableLayout {
    table: &'static str,
    identifier_column: &'static str,
    /// `None` for tables without a birth date column
    birth_date_column: Option<&'static str>,
}

const ADMINS: TableLayout = TableLayout {
    table: "users",
    identifier_column: "username",
    birth_date_column: None,
};

const STUDENTS: TableLayout = TableLayout {
    table: "students",
    identifier_column: "student_id",
    birth_date_column: Some("birth_date"),
};

const TEACHERS: TableLayout = TableLayout {
    table: "teachers",
    identifier_column: "teacher_id",
    birth_date_column: Some("birth_date"),
};

impl TableLayout {
    fn select_where(&self, column: &str) -> String {
        format!(
            r#"
            SELECT id::text AS id, {identifier}::text AS identifier, name, password,
                   {birth_date} AS birth_date, image
            FROM {table}
            WHERE {column}::text = $1
            LIMIT 1
            "#,
            identifier = self.identifier_column,
            birth_date = self.birth_date_column.unwrap_or("NULL::date"),
            table = self.table,
            column = column,
        )
    }

    fn update_profile(&self) -> String {
        format!(
            r#"
            UPDATE {table}
            SET name = $2, image = COALESCE($3, image), password = COALESCE($4, password)
            WHERE id::text = $1
            "#,
            table = self.table,
        )
    }

    fn update_password(&self) -> String {
        format!(
            "UPDATE {table} SET password = $2 WHERE id::text = $1",
            table = self.table,
        )
    }
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: String,
    identifier: String,
    name: String,
    password: Option<String>,
    birth_date: Option<NaiveDate>,
    image: Option<String>,
}

impl AccountRow {
    fn into_account(self, role: Role) -> Account {
        Account {
            id: AccountId::new(self.id),
            identifier: self.identifier,
            name: self.name,
            role,
            password: self.password,
            birth_date: self.birth_date,
            avatar: self.image,
        }
    }
}

/// Postgres-backed identity store for one role's table.
pub struct PostgresIdentityStore {
    pool: PgPool,
    role: Role,
    layout: &'static TableLayout,
}

impl PostgresIdentityStore {
    /// Administrative accounts, keyed by `users.username`.
    pub fn admins(pool: PgPool) -> Self {
        Self {
            pool,
            role: Role::Admin,
            layout: &ADMINS,
        }
    }

    /// Student accounts, keyed by `students.student_id`.
    pub fn students(pool: PgPool) -> Self {
        Self {
            pool,
            role: Role::Student,
            layout: &STUDENTS,
        }
    }

    /// Teacher accounts, keyed by `teachers.teacher_id`.
    pub fn teachers(pool: PgPool) -> Self {
        Self {
            pool,
            role: Role::Teacher,
            layout: &TEACHERS,
        }
    }

    async fn find_where(&self, column: &str, value: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(&self.layout.select_where(column))
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::StoreUnavailable {
                role: self.role,
                reason: e.to_string(),
            })?;

        Ok(row.map(|r| r.into_account(self.role)))
    }
}

#[async_trait]
impl IdentityStore for PostgresIdentityStore {
    fn role(&self) -> Role {
        self.role
    }

    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>, AccountError> {
        self.find_where(self.layout.identifier_column, identifier)
            .await
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        self.find_where("id", id.as_str()).await
    }

    async fn update_profile(
        &self,
        id: &AccountId,
        update: &ProfileUpdate,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(&self.layout.update_profile())
            .bind(id.as_str())
            .bind(&update.name)
            .bind(update.avatar.as_deref())
            .bind(update.password_hash.as_deref())
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::ProfileWriteFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }

    async fn update_password(
        &self,
        id: &AccountId,
        password_hash: &str,
    ) -> Result<(), AccountError> {
        let result = sqlx::query(&self.layout.update_password())
            .bind(id.as_str())
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(|e| AccountError::ProfileWriteFailed(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
