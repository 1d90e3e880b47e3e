//! Members repository for database operations

use rust_decimal::Decimal;
use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{AppError, AppResult},
    models::member::{CreateMember, Member, MemberRow, MemberSummary},
    repository::like_pattern,
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get member by ID
    pub async fn get_by_id(&self, id: i64) -> AppResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))?;
        Ok(Member::try_from(row)?)
    }

    /// Get member by ID inside an open transaction, before moving their debt
    pub async fn get_for_update(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>("SELECT * FROM members WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))?;
        Ok(Member::try_from(row)?)
    }

    /// Check if a membership code is already taken (optionally excluding a member)
    pub async fn member_id_exists(
        &self,
        conn: &mut SqliteConnection,
        member_id: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let exists: bool = if let Some(id) = exclude_id {
            sqlx::query_scalar(
                "SELECT EXISTS(SELECT 1 FROM members WHERE member_id = ? AND id != ?)",
            )
            .bind(member_id)
            .bind(id)
            .fetch_one(&mut *conn)
            .await?
        } else {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM members WHERE member_id = ?)")
                .bind(member_id)
                .fetch_one(&mut *conn)
                .await?
        };
        Ok(exists)
    }

    /// List all members
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let rows = sqlx::query_as::<_, MemberRow>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        let members = rows
            .into_iter()
            .map(Member::try_from)
            .collect::<Result<Vec<_>, sqlx::Error>>()?;
        Ok(members)
    }

    /// Insert a new member with a clean slate
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        member: &CreateMember,
    ) -> AppResult<Member> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            INSERT INTO members (name, email, member_id, outstanding_debt)
            VALUES (?, ?, ?, '0')
            RETURNING *
            "#,
        )
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.member_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| {
            AppError::from(e).map_unique_violation("A member with this member ID already exists")
        })?;
        Ok(Member::try_from(row)?)
    }

    /// Persist an edited member profile.
    ///
    /// Outstanding debt is never written here; it only moves through
    /// the transaction engine.
    pub async fn update_profile(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        name: &str,
        email: &str,
        member_id: &str,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE members SET name = ?, email = ?, member_id = ? WHERE id = ?")
            .bind(name)
            .bind(email)
            .bind(member_id)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| {
                AppError::from(e)
                    .map_unique_violation("A member with this member ID already exists")
            })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }
        Ok(())
    }

    /// Write a member's new debt balance
    pub async fn update_debt(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        outstanding_debt: Decimal,
    ) -> AppResult<()> {
        let result = sqlx::query("UPDATE members SET outstanding_debt = ? WHERE id = ?")
            .bind(outstanding_debt.to_string())
            .bind(id)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }
        Ok(())
    }

    /// Delete a member; their transactions go with them
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Member with id {} not found", id)));
        }
        Ok(())
    }

    /// Case-insensitive contains search over one member field.
    ///
    /// An unrecognised field matches nothing rather than erroring.
    pub async fn search(&self, field: &str, query: &str) -> AppResult<Vec<MemberSummary>> {
        let sql = match field {
            "name" => {
                "SELECT id, name, email, member_id FROM members \
                 WHERE name LIKE ? ESCAPE '\\' ORDER BY id"
            }
            "email" => {
                "SELECT id, name, email, member_id FROM members \
                 WHERE email LIKE ? ESCAPE '\\' ORDER BY id"
            }
            "member_id" => {
                "SELECT id, name, email, member_id FROM members \
                 WHERE member_id LIKE ? ESCAPE '\\' ORDER BY id"
            }
            _ => return Ok(Vec::new()),
        };

        let members = sqlx::query_as::<_, MemberSummary>(sql)
            .bind(like_pattern(query))
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }
}
