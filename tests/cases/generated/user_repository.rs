// @generated by entity-codegen from `crate::db::User`. Do not edit.

/// Data access for [`crate::db::User`].
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: sqlx::PgPool,
}
impl UserRepository {
    /// Table as referenced in SQL.
    pub const TABLE: &'static str = "\"user\"";
    /// Table definition.
    pub const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS \"user\" (\n    id BIGINT PRIMARY KEY,\n    name TEXT NOT NULL,\n    age INTEGER NOT NULL\n)";
    /// Insert one row.
    pub const INSERT_SQL: &'static str = "INSERT INTO \"user\" (id, name, age) VALUES ($1, $2, $3)";
    /// Select one row by identifier.
    pub const SELECT_BY_ID_SQL: &'static str = "SELECT id, name, age FROM \"user\" WHERE id = $1";
    /// Update one row by identifier.
    pub const UPDATE_SQL: &'static str = "UPDATE \"user\" SET name = $1, age = $2 WHERE id = $3";
    /// Delete one row by identifier.
    pub const DELETE_SQL: &'static str = "DELETE FROM \"user\" WHERE id = $1";
    /// Select every row.
    pub const SELECT_ALL_SQL: &'static str = "SELECT id, name, age FROM \"user\" ORDER BY id";
    /// Repository over `pool`.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
    /// Underlying pool.
    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
    /// Build an entity from a result row.
    pub fn map_row(row: &sqlx::postgres::PgRow) -> Result<crate::db::User, sqlx::Error> {
        use sqlx::Row as _;
        Ok(crate::db::User {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            age: row.try_get("age")?,
        })
    }
    /// Bind the parameters of `INSERT_SQL`.
    pub fn bind_insert<'q>(
        query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
        entity: &'q crate::db::User,
    ) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
        query.bind(&entity.id).bind(&entity.name).bind(&entity.age)
    }
    /// Bind the parameters of `UPDATE_SQL`.
    pub fn bind_update<'q>(
        query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
        entity: &'q crate::db::User,
    ) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
        query.bind(&entity.name).bind(&entity.age).bind(&entity.id)
    }
    /// Create the table if it does not exist.
    pub async fn init_table(&self) -> Result<(), sqlx::Error> {
        sqlx::query(Self::CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
    /// Insert `entity`.
    pub async fn create(&self, entity: &crate::db::User) -> Result<(), sqlx::Error> {
        Self::bind_insert(sqlx::query(Self::INSERT_SQL), entity)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
    /// Fetch the entity with identifier `id`.
    pub async fn find_by_id(
        &self,
        id: &i64,
    ) -> Result<Option<crate::db::User>, sqlx::Error> {
        let row = sqlx::query(Self::SELECT_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }
    /// Update the row of `entity`. Returns `false` when no row matched.
    pub async fn update(&self, entity: &crate::db::User) -> Result<bool, sqlx::Error> {
        let result = Self::bind_update(sqlx::query(Self::UPDATE_SQL), entity)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
    /// Delete the row with identifier `id`. Returns `false` when no row matched.
    pub async fn delete(&self, id: &i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(Self::DELETE_SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
    /// Fetch every row.
    pub async fn list(&self) -> Result<Vec<crate::db::User>, sqlx::Error> {
        let rows = sqlx::query(Self::SELECT_ALL_SQL).fetch_all(&self.pool).await?;
        rows.iter().map(Self::map_row).collect()
    }
}
