use async_trait::async_trait;
use cobalt_dns_application::ports::{RecordLookup, RecordStore};
use cobalt_dns_domain::{DomainError, RecordClass, RecordDraft, RecordType, StoredRecord, Zone};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, error, instrument};

const RECORD_COLUMNS: &str =
    "id, zone_id, name, record_type, class, ttl, rdata, created_at, updated_at";

/// Persistent record store over MySQL. Zone deletion is a tombstone;
/// the hot-path lookup joins the zone row so records of deleted zones
/// stop resolving without a cascade.
pub struct MySqlRecordStore {
    pool: MySqlPool,
}

impl MySqlRecordStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn row_to_record(row: &MySqlRow) -> Result<StoredRecord, DomainError> {
    let type_str: String = row.get("record_type");
    let class_str: String = row.get("class");
    Ok(StoredRecord {
        id: row.get("id"),
        zone_id: row.get("zone_id"),
        name: row.get("name"),
        record_type: type_str.parse().map_err(DomainError::InvalidRecordType)?,
        class: class_str.parse().map_err(DomainError::InvalidRecordClass)?,
        ttl: row.get("ttl"),
        rdata: row.get("rdata"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

fn row_to_zone(row: &MySqlRow) -> Zone {
    Zone {
        id: row.get("id"),
        owner: row.get("owner"),
        name: row.get("name"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        deleted_at: row.get("deleted_at"),
    }
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    #[instrument(skip(self))]
    async fn lookup_record(
        &self,
        name: &str,
        rtype: RecordType,
        class: RecordClass,
    ) -> Result<RecordLookup, DomainError> {
        let row = sqlx::query(
            "SELECT r.id, r.zone_id, r.name, r.record_type, r.class, r.ttl, r.rdata,
                    r.created_at, r.updated_at
             FROM zone_records r
             INNER JOIN zones z ON z.id = r.zone_id
             WHERE LOWER(r.name) = ? AND r.record_type = ? AND r.class = ?
               AND z.deleted_at IS NULL",
        )
        .bind(name.to_lowercase())
        .bind(rtype.to_string())
        .bind(class.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, name, "record lookup failed");
            DomainError::DatabaseError(e.to_string())
        })?;

        let record = row.as_ref().map(row_to_record).transpose()?;
        debug!(name, found = record.is_some(), "store lookup");
        Ok(RecordLookup::miss(record))
    }

    async fn create_zone(&self, owner: &str, name: &str) -> Result<Zone, DomainError> {
        let result = sqlx::query(
            "INSERT INTO zones (owner, name, created_at, updated_at) VALUES (?, ?, NOW(), NOW())",
        )
        .bind(owner)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return DomainError::ZoneAlreadyExists(name.to_string());
            }
            error!(error = %e, name, "failed to create zone");
            DomainError::DatabaseError(e.to_string())
        })?;

        let id = result.last_insert_id() as i64;
        self.get_zone(id)
            .await?
            .ok_or_else(|| DomainError::DatabaseError("created zone vanished".to_string()))
    }

    async fn get_zone(&self, id: i64) -> Result<Option<Zone>, DomainError> {
        let row = sqlx::query(
            "SELECT id, owner, name, created_at, updated_at, deleted_at
             FROM zones WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, id, "failed to fetch zone");
            DomainError::DatabaseError(e.to_string())
        })?;
        Ok(row.as_ref().map(row_to_zone))
    }

    async fn list_zones(&self, owner: Option<&str>) -> Result<Vec<Zone>, DomainError> {
        let rows = match owner {
            Some(owner) => {
                sqlx::query(
                    "SELECT id, owner, name, created_at, updated_at, deleted_at
                     FROM zones WHERE owner = ? AND deleted_at IS NULL ORDER BY name",
                )
                .bind(owner)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query(
                    "SELECT id, owner, name, created_at, updated_at, deleted_at
                     FROM zones WHERE deleted_at IS NULL ORDER BY name",
                )
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| {
            error!(error = %e, "failed to list zones");
            DomainError::DatabaseError(e.to_string())
        })?;
        Ok(rows.iter().map(row_to_zone).collect())
    }

    async fn delete_zone(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE zones SET deleted_at = NOW(), updated_at = NOW()
             WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, id, "failed to delete zone");
            DomainError::DatabaseError(e.to_string())
        })?;
        if result.rows_affected() == 0 {
            return Err(DomainError::ZoneNotFound(id));
        }
        Ok(())
    }

    async fn list_records(&self, zone_id: i64) -> Result<Vec<StoredRecord>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM zone_records WHERE zone_id = ? ORDER BY name, record_type"
        ))
        .bind(zone_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, zone_id, "failed to list records");
            DomainError::DatabaseError(e.to_string())
        })?;
        rows.iter().map(row_to_record).collect()
    }

    async fn get_record(&self, id: i64) -> Result<Option<StoredRecord>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM zone_records WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, id, "failed to fetch record");
            DomainError::DatabaseError(e.to_string())
        })?;
        row.as_ref().map(row_to_record).transpose()
    }

    async fn create_record(&self, draft: &RecordDraft) -> Result<StoredRecord, DomainError> {
        if self.get_zone(draft.zone_id).await?.is_none() {
            return Err(DomainError::ZoneNotFound(draft.zone_id));
        }

        let result = sqlx::query(
            "INSERT INTO zone_records (zone_id, name, record_type, class, ttl, rdata, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, NOW(), NOW())",
        )
        .bind(draft.zone_id)
        .bind(&draft.name)
        .bind(draft.record_type.to_string())
        .bind(draft.class.to_string())
        .bind(draft.ttl)
        .bind(&draft.rdata)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return DomainError::DuplicateRecord;
            }
            error!(error = %e, name = %draft.name, "failed to create record");
            DomainError::DatabaseError(e.to_string())
        })?;

        let id = result.last_insert_id() as i64;
        self.get_record(id)
            .await?
            .ok_or_else(|| DomainError::DatabaseError("created record vanished".to_string()))
    }

    async fn update_record(
        &self,
        id: i64,
        draft: &RecordDraft,
    ) -> Result<StoredRecord, DomainError> {
        let result = sqlx::query(
            "UPDATE zone_records
             SET zone_id = ?, name = ?, record_type = ?, class = ?, ttl = ?, rdata = ?,
                 updated_at = NOW()
             WHERE id = ?",
        )
        .bind(draft.zone_id)
        .bind(&draft.name)
        .bind(draft.record_type.to_string())
        .bind(draft.class.to_string())
        .bind(draft.ttl)
        .bind(&draft.rdata)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                return DomainError::DuplicateRecord;
            }
            error!(error = %e, id, "failed to update record");
            DomainError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::RecordNotFound(id));
        }
        self.get_record(id)
            .await?
            .ok_or(DomainError::RecordNotFound(id))
    }

    async fn delete_record(&self, id: i64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM zone_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, id, "failed to delete record");
                DomainError::DatabaseError(e.to_string())
            })?;
        if result.rows_affected() == 0 {
            return Err(DomainError::RecordNotFound(id));
        }
        Ok(())
    }
}
