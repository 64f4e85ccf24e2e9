//! MySQL implementation of the DocumentStore trait.
//!
//! Every document is one row of the documents table:
//! `(collection, id, data JSON)`. Filters, ordering and keyset cursors are
//! expressed on `JSON_EXTRACT(data, <path>)` and assembled with
//! `sqlx::QueryBuilder`.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::mysql::{MySqlDatabaseError, MySqlRow};
use sqlx::types::Json;
use sqlx::{MySql, MySqlConnection, MySqlPool, QueryBuilder, Row};

use hm_core::domain::value_objects::{Document, Fields, StoreQuery};
use hm_core::errors::StoreError;
use hm_core::repositories::DocumentStore;
use hm_shared::types::SortOrder;

use super::json_codec::{document_from_json, field_path, field_to_json, fields_to_json};
use crate::InfrastructureError;

/// MySQL implementation of DocumentStore
#[derive(Clone)]
pub struct MySqlDocumentStore {
    /// Database connection pool
    pool: MySqlPool,
    /// Name of the documents table
    table: String,
}

impl MySqlDocumentStore {
    /// Create a store over `table`
    ///
    /// The table name is interpolated into SQL, so only ASCII letters,
    /// digits and underscores are accepted.
    pub fn new(pool: MySqlPool, table: impl Into<String>) -> Result<Self, InfrastructureError> {
        let table = table.into();
        if !is_valid_table_name(&table) {
            return Err(InfrastructureError::Config(format!(
                "Invalid documents table name '{}'",
                table
            )));
        }
        Ok(Self { pool, table })
    }

    /// Create the documents table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                collection VARCHAR(128) NOT NULL,
                id VARCHAR(128) CHARACTER SET utf8mb4 COLLATE utf8mb4_bin NOT NULL,
                data JSON NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
            self.table
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        tracing::info!(table = %self.table, "Documents table ready");
        Ok(())
    }

    fn row_to_document(row: &MySqlRow) -> Result<Document, StoreError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| StoreError::decode(format!("Failed to get id: {}", e)))?;
        let Json(data): Json<Value> = row
            .try_get("data")
            .map_err(|e| StoreError::decode(format!("Failed to get data of {}: {}", id, e)))?;
        document_from_json(id, data)
    }

    /// Read a document and lock its row for the rest of the transaction
    async fn lock_document(
        &self,
        conn: &mut MySqlConnection,
        collection: &str,
        id: &str,
    ) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT id, data FROM {} WHERE collection = ? AND id = ? FOR UPDATE",
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn write_data(
        &self,
        conn: &mut MySqlConnection,
        collection: &str,
        document: &Document,
    ) -> Result<(), StoreError> {
        let sql = format!(
            "UPDATE {} SET data = CAST(? AS JSON) WHERE collection = ? AND id = ?",
            self.table
        );
        sqlx::query(&sql)
            .bind(fields_to_json(&document.fields).to_string())
            .bind(collection)
            .bind(&document.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;
        Ok(())
    }

    async fn insert_row(
        &self,
        conn: &mut MySqlConnection,
        collection: &str,
        document: &Document,
    ) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (collection, id, data) VALUES (?, ?, CAST(? AS JSON))",
            self.table
        );
        sqlx::query(&sql)
            .bind(collection)
            .bind(&document.id)
            .bind(fields_to_json(&document.fields).to_string())
            .execute(&mut *conn)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    StoreError::conflict(collection, &document.id)
                }
                other => map_sqlx_error(collection, other),
            })?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MySqlDocumentStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        let mut builder = build_select(&self.table, query)?;
        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(&query.collection, e))?;

        rows.iter().map(Self::row_to_document).collect()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let sql = format!(
            "SELECT id, data FROM {} WHERE collection = ? AND id = ?",
            self.table
        );
        let row = sqlx::query(&sql)
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        row.as_ref().map(Self::row_to_document).transpose()
    }

    async fn insert(&self, collection: &str, document: Document) -> Result<Document, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;
        self.insert_row(&mut conn, collection, &document).await?;
        Ok(document)
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        let mut document = self
            .lock_document(&mut tx, collection, id)
            .await?
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        document.merge(fields);
        self.write_data(&mut tx, collection, &document).await?;

        tx.commit().await.map_err(|e| map_sqlx_error(collection, e))?;
        Ok(document)
    }

    async fn upsert(
        &self,
        collection: &str,
        id: &str,
        fields: Fields,
    ) -> Result<Document, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        let document = match self.lock_document(&mut tx, collection, id).await? {
            Some(mut existing) => {
                existing.merge(fields);
                self.write_data(&mut tx, collection, &existing).await?;
                existing
            }
            None => {
                let created = Document::with_fields(id, fields);
                self.insert_row(&mut tx, collection, &created).await?;
                created
            }
        };

        tx.commit().await.map_err(|e| map_sqlx_error(collection, e))?;
        Ok(document)
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE collection = ? AND id = ?", self.table);
        let result = sqlx::query(&sql)
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(collection, e))?;

        Ok(result.rows_affected() > 0)
    }

    fn backend_name(&self) -> &'static str {
        "mysql"
    }
}

/// Build the SELECT for a sorted, filtered, cursor-resumed scan
pub(crate) fn build_select(
    table: &str,
    query: &StoreQuery,
) -> Result<QueryBuilder<'static, MySql>, StoreError> {
    let sort_path = field_path(&query.sort.field)?;
    let direction = query.sort.order.to_string();

    let mut builder = QueryBuilder::<MySql>::new("SELECT id, data FROM ");
    builder.push(table);
    builder.push(" WHERE collection = ");
    builder.push_bind(query.collection.clone());

    builder.push(" AND JSON_EXTRACT(data, ");
    builder.push_bind(sort_path.clone());
    builder.push(") IS NOT NULL");

    if let Some(filter) = &query.filter {
        builder.push(" AND JSON_EXTRACT(data, ");
        builder.push_bind(field_path(&filter.field)?);
        builder.push(") = CAST(");
        builder.push_bind(field_to_json(&filter.value).to_string());
        builder.push(" AS JSON)");
    }

    if let Some(cursor) = &query.start_after {
        let op = match query.sort.order {
            SortOrder::Asc => ">",
            SortOrder::Desc => "<",
        };
        let key = field_to_json(&cursor.last_sort_key).to_string();

        builder.push(" AND (JSON_EXTRACT(data, ");
        builder.push_bind(sort_path.clone());
        builder.push(format!(") {} CAST(", op));
        builder.push_bind(key.clone());
        builder.push(" AS JSON) OR (JSON_EXTRACT(data, ");
        builder.push_bind(sort_path.clone());
        builder.push(") = CAST(");
        builder.push_bind(key);
        builder.push(format!(" AS JSON) AND id {} ", op));
        builder.push_bind(cursor.last_id.clone());
        builder.push("))");
    }

    builder.push(" ORDER BY JSON_EXTRACT(data, ");
    builder.push_bind(sort_path);
    builder.push(format!(") {}, id {}", direction, direction));

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ");
        builder.push_bind(i64::from(limit));
    }

    Ok(builder)
}

/// Map a SQLx error onto the store error kinds
pub(crate) fn map_sqlx_error(collection: &str, error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db) => {
            let number = db
                .try_downcast_ref::<MySqlDatabaseError>()
                .map(MySqlDatabaseError::number);
            match number {
                // access denied for user, table or column
                Some(1044 | 1045 | 1142 | 1143) => StoreError::PermissionDenied {
                    message: db.message().to_string(),
                },
                // table doesn't exist
                Some(1146) => StoreError::CollectionNotFound {
                    collection: collection.to_string(),
                },
                _ => StoreError::invalid_query(db.message()),
            }
        }
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::TypeNotFound { .. } => StoreError::decode(error.to_string()),
        _ => StoreError::unavailable(error.to_string()),
    }
}

fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 64
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
