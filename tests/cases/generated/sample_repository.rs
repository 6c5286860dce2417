// @generated by entity-codegen from `crate::db::Sample`. Do not edit.

/// Data access for [`crate::db::Sample`].
#[derive(Debug, Clone)]
pub struct SampleRepository {
    pool: sqlx::PgPool,
}
impl SampleRepository {
    /// Table as referenced in SQL.
    pub const TABLE: &'static str = "samples";
    /// Table definition.
    pub const CREATE_TABLE_SQL: &'static str = "CREATE TABLE IF NOT EXISTS samples (\n    id UUID PRIMARY KEY,\n    owner BIGINT NOT NULL REFERENCES \"user\" (id),\n    \"offset\" SMALLINT NOT NULL,\n    level SMALLINT NOT NULL,\n    ceiling INTEGER,\n    count BIGINT NOT NULL,\n    grade TEXT NOT NULL,\n    backup TEXT,\n    label TEXT NOT NULL,\n    tag TEXT NOT NULL,\n    note TEXT,\n    created TIMESTAMPTZ NOT NULL,\n    payload JSONB NOT NULL,\n    active BOOLEAN NOT NULL,\n    UNIQUE (level, label)\n)";
    /// Insert one row.
    pub const INSERT_SQL: &'static str = "INSERT INTO samples (id, owner, \"offset\", level, ceiling, count, grade, backup, label, tag, note, created, payload, active) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)";
    /// Select one row by identifier.
    pub const SELECT_BY_ID_SQL: &'static str = "SELECT id, owner, \"offset\", level, ceiling, count, grade, backup, label, tag, note, created, payload, active FROM samples WHERE id = $1";
    /// Update one row by identifier.
    pub const UPDATE_SQL: &'static str = "UPDATE samples SET owner = $1, \"offset\" = $2, level = $3, ceiling = $4, count = $5, grade = $6, backup = $7, label = $8, tag = $9, note = $10, created = $11, payload = $12, active = $13 WHERE id = $14";
    /// Delete one row by identifier.
    pub const DELETE_SQL: &'static str = "DELETE FROM samples WHERE id = $1";
    /// Select every row.
    pub const SELECT_ALL_SQL: &'static str = "SELECT id, owner, \"offset\", level, ceiling, count, grade, backup, label, tag, note, created, payload, active FROM samples ORDER BY id";
    /// Repository over `pool`.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
    /// Underlying pool.
    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
    /// Build an entity from a result row.
    pub fn map_row(
        row: &sqlx::postgres::PgRow,
    ) -> Result<crate::db::Sample, sqlx::Error> {
        use sqlx::Row as _;
        Ok(crate::db::Sample {
            id: row.try_get("id")?,
            owner: row.try_get("owner")?,
            offset: <i8>::try_from(row.try_get::<i16, _>("offset")?)
                .map_err(|err| sqlx::Error::ColumnDecode {
                    index: "offset".to_owned(),
                    source: Box::new(err),
                })?,
            level: <u8>::try_from(row.try_get::<i16, _>("level")?)
                .map_err(|err| sqlx::Error::ColumnDecode {
                    index: "level".to_owned(),
                    source: Box::new(err),
                })?,
            ceiling: row
                .try_get::<Option<i32>, _>("ceiling")?
                .map(<u16>::try_from)
                .transpose()
                .map_err(|err| sqlx::Error::ColumnDecode {
                    index: "ceiling".to_owned(),
                    source: Box::new(err),
                })?,
            count: <u32>::try_from(row.try_get::<i64, _>("count")?)
                .map_err(|err| sqlx::Error::ColumnDecode {
                    index: "count".to_owned(),
                    source: Box::new(err),
                })?,
            grade: Self::decode_char("grade", row.try_get::<String, _>("grade")?)?,
            backup: row
                .try_get::<Option<String>, _>("backup")?
                .map(|value| Self::decode_char("backup", value))
                .transpose()?,
            label: row.try_get::<String, _>("label")?.into(),
            tag: row.try_get::<String, _>("tag")?.into(),
            note: row.try_get::<Option<String>, _>("note")?.map(Into::into),
            created: row.try_get("created")?,
            payload: row.try_get("payload")?,
            active: row.try_get("active")?,
            cache: Default::default(),
        })
    }
    /// Bind the parameters of `INSERT_SQL`.
    pub fn bind_insert<'q>(
        query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
        entity: &'q crate::db::Sample,
    ) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
        query
            .bind(&entity.id)
            .bind(&entity.owner)
            .bind(<i16>::from(*&entity.offset))
            .bind(<i16>::from(*&entity.level))
            .bind((*&entity.ceiling).map(<i32>::from))
            .bind(<i64>::from(*&entity.count))
            .bind((*&entity.grade).to_string())
            .bind((*&entity.backup).map(|value| value.to_string()))
            .bind(&**&entity.label)
            .bind(&**&entity.tag)
            .bind((&entity.note).as_deref())
            .bind(&entity.created)
            .bind(&entity.payload)
            .bind(&entity.active)
    }
    /// Bind the parameters of `UPDATE_SQL`.
    pub fn bind_update<'q>(
        query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
        entity: &'q crate::db::Sample,
    ) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
        query
            .bind(&entity.owner)
            .bind(<i16>::from(*&entity.offset))
            .bind(<i16>::from(*&entity.level))
            .bind((*&entity.ceiling).map(<i32>::from))
            .bind(<i64>::from(*&entity.count))
            .bind((*&entity.grade).to_string())
            .bind((*&entity.backup).map(|value| value.to_string()))
            .bind(&**&entity.label)
            .bind(&**&entity.tag)
            .bind((&entity.note).as_deref())
            .bind(&entity.created)
            .bind(&entity.payload)
            .bind(&entity.active)
            .bind(&entity.id)
    }
    /// Create the table if it does not exist.
    pub async fn init_table(&self) -> Result<(), sqlx::Error> {
        sqlx::query(Self::CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
    /// Insert `entity`.
    pub async fn create(&self, entity: &crate::db::Sample) -> Result<(), sqlx::Error> {
        Self::bind_insert(sqlx::query(Self::INSERT_SQL), entity)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
    /// Fetch the entity with identifier `id`.
    pub async fn find_by_id(
        &self,
        id: &sqlx::types::Uuid,
    ) -> Result<Option<crate::db::Sample>, sqlx::Error> {
        let row = sqlx::query(Self::SELECT_BY_ID_SQL)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(Self::map_row).transpose()
    }
    /// Update the row of `entity`. Returns `false` when no row matched.
    pub async fn update(&self, entity: &crate::db::Sample) -> Result<bool, sqlx::Error> {
        let result = Self::bind_update(sqlx::query(Self::UPDATE_SQL), entity)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
    /// Delete the row with identifier `id`. Returns `false` when no row matched.
    pub async fn delete(&self, id: &sqlx::types::Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(Self::DELETE_SQL).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
    /// Fetch every row.
    pub async fn list(&self) -> Result<Vec<crate::db::Sample>, sqlx::Error> {
        let rows = sqlx::query(Self::SELECT_ALL_SQL).fetch_all(&self.pool).await?;
        rows.iter().map(Self::map_row).collect()
    }
    fn decode_char(column: &str, value: String) -> Result<char, sqlx::Error> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => {
                Err(sqlx::Error::ColumnDecode {
                    index: column.to_owned(),
                    source: format!("expected exactly one character, found {value:?}")
                        .into(),
                })
            }
        }
    }
}
