//! Members repository for database operations

use sqlx::{Pool, Sqlite, SqliteConnection};

use crate::{
    error::{on_unique_violation, AppError, AppResult},
    models::member::{Member, UpdateMember},
};

#[derive(Clone)]
pub struct MembersRepository {
    pool: Pool<Sqlite>,
}

impl MembersRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Get member by name
    pub async fn get_by_name(&self, name: &str) -> AppResult<Member> {
        let mut conn = self.pool.acquire().await?;
        Self::find(&mut conn, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))
    }

    /// Look a member up on an existing connection or transaction
    pub async fn find(conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT name, email, age FROM members WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(member)
    }

    /// List all members ordered by name
    pub async fn list(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT name, email, age FROM members ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    /// Insert a new member. Name and email must both be unused.
    pub async fn create(&self, member: &Member) -> AppResult<Member> {
        sqlx::query("INSERT INTO members (name, email, age) VALUES (?, ?, ?)")
            .bind(&member.name)
            .bind(&member.email)
            .bind(member.age)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                on_unique_violation(e, || {
                    AppError::Conflict("A member with this name or email already exists".to_string())
                })
            })?;

        Ok(member.clone())
    }

    /// Apply the fields present in `update`, leaving the others as they are
    pub async fn update(&self, name: &str, update: &UpdateMember) -> AppResult<Member> {
        let mut tx = self.pool.begin().await?;

        let mut sets = Vec::new();
        if update.email.is_some() {
            sets.push("email = ?");
        }
        if update.age.is_some() {
            sets.push("age = ?");
        }

        if !sets.is_empty() {
            let query = format!("UPDATE members SET {} WHERE name = ?", sets.join(", "));
            let mut builder = sqlx::query(&query);
            if let Some(ref email) = update.email {
                builder = builder.bind(email);
            }
            if let Some(age) = update.age {
                builder = builder.bind(age);
            }

            let result = builder
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    on_unique_violation(e, || AppError::Conflict("Email already in use".to_string()))
                })?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Member not found".to_string()));
            }
        }

        let member = Self::find(&mut tx, name)
            .await?
            .ok_or_else(|| AppError::NotFound("Member not found".to_string()))?;

        tx.commit().await?;
        Ok(member)
    }

    /// Delete a member unless they still hold borrowed books
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            DELETE FROM members
            WHERE name = ?
              AND NOT EXISTS (SELECT 1 FROM borrows WHERE borrows.name = ?)
            "#,
        )
        .bind(name)
        .bind(name)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            if Self::find(&mut tx, name).await?.is_none() {
                return Err(AppError::NotFound("Member not found".to_string()));
            }
            return Err(AppError::ActiveBorrows(
                "Member has borrowed books that must be returned first".to_string(),
            ));
        }

        tx.commit().await?;
        Ok(())
    }
}
