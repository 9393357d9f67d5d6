//! SQLite persistence for imported product rows.

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::{debug, info, warn};

use crate::error::{FacturiError, Result};
use crate::models::product::{ProductRow, StoredProduct};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS produse (
        ID INTEGER PRIMARY KEY AUTOINCREMENT,
        IDPRODUCER TEXT,
        BARCODE TEXT,
        ROPRODUCTNAME TEXT,
        QUANTITYINBOX TEXT,
        ORDERPRICE TEXT,
        TOTAL TEXT
    );
"#;

const INSERT_ROW: &str = "INSERT INTO produse \
    (IDPRODUCER, BARCODE, ROPRODUCTNAME, QUANTITYINBOX, ORDERPRICE, TOTAL) \
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const SELECT_ALL: &str = "SELECT ID, IDPRODUCER, BARCODE, ROPRODUCTNAME, QUANTITYINBOX, ORDERPRICE, TOTAL \
    FROM produse ORDER BY IDPRODUCER DESC";

/// Outcome of a batch insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertReport {
    /// Rows written.
    pub inserted: usize,
    /// Rows that failed and were skipped.
    pub failed: usize,
}

/// Product table backed by a SQLite database.
pub struct ProductStore {
    conn: Connection,
}

impl ProductStore {
    /// Open (or create) the database file and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        debug!("Opened database {}", path.display());
        Self::from_connection(conn)
    }

    /// In-memory store.
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.create_table()?;
        Ok(store)
    }

    /// Create the `produse` table if it does not exist.
    pub fn create_table(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_TABLE)?;
        Ok(())
    }

    /// Insert one row and return its id.
    pub fn insert(&self, row: &ProductRow) -> Result<i64> {
        self.conn.execute(
            INSERT_ROW,
            params![
                row.producer_id,
                row.barcode,
                row.product_name,
                row.quantity_in_box,
                row.order_price,
                row.total,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert rows one by one. A failing row is logged and skipped.
    pub fn insert_rows<'a, I>(&self, rows: I) -> InsertReport
    where
        I: IntoIterator<Item = &'a ProductRow>,
    {
        let mut report = InsertReport::default();

        for row in rows {
            match self.insert(row) {
                Ok(_) => report.inserted += 1,
                Err(e) => {
                    warn!("Failed to insert row with barcode {}: {}", row.barcode, e);
                    report.failed += 1;
                }
            }
        }

        info!("Inserted {} rows ({} failed)", report.inserted, report.failed);
        report
    }

    /// All stored rows, highest producer id first.
    pub fn load_all(&self) -> Result<Vec<StoredProduct>> {
        let mut stmt = self.conn.prepare(SELECT_ALL)?;
        let rows = stmt
            .query_map([], |r| {
                Ok(StoredProduct {
                    id: r.get(0)?,
                    row: ProductRow {
                        producer_id: r.get::<_, Option<String>>(1)?.unwrap_or_default(),
                        barcode: r.get::<_, Option<String>>(2)?.unwrap_or_default(),
                        product_name: r.get::<_, Option<String>>(3)?.unwrap_or_default(),
                        quantity_in_box: r.get::<_, Option<String>>(4)?.unwrap_or_default(),
                        order_price: r.get::<_, Option<String>>(5)?.unwrap_or_default(),
                        total: r.get::<_, Option<String>>(6)?.unwrap_or_default(),
                    },
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Number of stored rows.
    pub fn count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM produse", [], |r| r.get(0))?;
        Ok(n as usize)
    }

    /// Delete every row. Returns the number of deleted rows.
    pub fn delete_all(&self) -> Result<usize> {
        let deleted = self.conn.execute("DELETE FROM produse", [])?;
        info!("Deleted {} rows", deleted);
        Ok(deleted)
    }

    /// Delete every row if `given` matches the configured password.
    pub fn delete_all_guarded(&self, expected: &str, given: &str) -> Result<usize> {
        if expected != given {
            warn!("Refusing to clear table: wrong password");
            return Err(FacturiError::AccessDenied);
        }
        self.delete_all()
    }

    /// Names of the tables in the database.
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")?;
        let names = stmt
            .query_map([], |r| r.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(names)
    }
}
