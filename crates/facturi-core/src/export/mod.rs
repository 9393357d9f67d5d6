//! XLSX export with one worksheet per invoice.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook};
use tracing::{debug, info};

use crate::error::{ExportError, Result};
use crate::models::product::{ParsedInvoice, PRODUCT_COLUMNS};

/// Longest worksheet name Excel accepts.
const MAX_SHEET_NAME: usize = 31;

/// Extra characters added to the widest cell of a column.
const COLUMN_PADDING: usize = 2;

/// Writes parsed invoices to workbooks in an export directory.
#[derive(Debug, Clone)]
pub struct WorkbookExporter {
    export_dir: PathBuf,
}

impl WorkbookExporter {
    /// Create an exporter writing into `export_dir`.
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    /// Workbook path for a source document: `<export_dir>/<stem>.xlsx`.
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("facturi");
        self.export_dir.join(format!("{}.xlsx", stem))
    }

    /// Export the invoices of `source` and return the workbook path.
    pub fn export(&self, source: &Path, invoices: &[ParsedInvoice]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.export_dir)?;
        let path = self.output_path(source);
        write_workbook(&path, invoices)?;
        info!("Workbook saved to {}", path.display());
        Ok(path)
    }
}

/// Write invoices to a workbook at `path`.
pub fn write_workbook(path: &Path, invoices: &[ParsedInvoice]) -> Result<()> {
    if invoices.is_empty() {
        return Err(ExportError::Empty.into());
    }

    let mut workbook = Workbook::new();
    let border = Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::Black);

    for (invoice, name) in invoices.iter().zip(sheet_names(invoices)) {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&name)?;

        let mut widths: Vec<usize> = PRODUCT_COLUMNS.iter().map(|h| h.chars().count()).collect();

        for (col, header) in PRODUCT_COLUMNS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *header, &border)?;
        }

        for (i, row) in invoice.rows.iter().enumerate() {
            let row_num = (i + 1) as u32;
            for (col, value) in row.fields().iter().enumerate() {
                worksheet.write_string_with_format(row_num, col as u16, *value, &border)?;
                widths[col] = widths[col].max(value.chars().count());
            }
        }

        for (col, width) in widths.iter().enumerate() {
            worksheet.set_column_width(col as u16, (width + COLUMN_PADDING) as f64)?;
        }

        debug!("Sheet '{}': {} rows", name, invoice.rows.len());
    }

    workbook.save(path)?;
    Ok(())
}

/// Worksheet names for the invoices: valid, at most 31 characters, unique.
pub fn sheet_names(invoices: &[ParsedInvoice]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();

    invoices
        .iter()
        .enumerate()
        .map(|(i, invoice)| {
            let base = sanitize_sheet_name(&invoice.sheet_title(i + 1));
            let mut name = base.clone();
            let mut n = 2;
            while used.contains(&name.to_lowercase()) {
                let suffix = format!(" ({})", n);
                let keep = MAX_SHEET_NAME - suffix.chars().count();
                name = format!("{}{}", base.chars().take(keep).collect::<String>(), suffix);
                n += 1;
            }
            used.insert(name.to_lowercase());
            name
        })
        .collect()
}

fn sanitize_sheet_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim_matches('\'').to_string();

    if cleaned.is_empty() {
        "Factura".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::{InvoiceBlock, ProductRow};
    use pretty_assertions::assert_eq;
    use std::io::Read;

    fn invoice(number: Option<&str>, rows: usize) -> ParsedInvoice {
        ParsedInvoice {
            block: InvoiceBlock {
                number: number.map(str::to_string),
                lines: vec![],
            },
            rows: (0..rows)
                .map(|i| ProductRow {
                    producer_id: i.to_string(),
                    barcode: "4840001234567".to_string(),
                    product_name: "Сок яблочный 1л".to_string(),
                    quantity_in_box: "12.000".to_string(),
                    order_price: "$1.500".to_string(),
                    total: "$18.000".to_string(),
                })
                .collect(),
        }
    }

    fn read_part(path: &Path, part: &str) -> String {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(part).unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_sheet_names() {
        let invoices = vec![
            invoice(Some("101"), 1),
            invoice(None, 1),
            invoice(Some("101"), 1),
            invoice(Some("1234567890123456789012345678"), 0),
        ];

        let names = sheet_names(&invoices);
        assert_eq!(names[0], "Заявка № 101");
        assert_eq!(names[1], "Factura 2");
        assert_eq!(names[2], "Заявка № 101 (2)");
        assert_eq!(names[3].chars().count(), MAX_SHEET_NAME);
        assert!(names[3].starts_with("Заявка № 12345"));
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("a/b:c"), "a_b_c");
        assert_eq!(sanitize_sheet_name("'quoted'"), "quoted");
        assert_eq!(sanitize_sheet_name("''"), "Factura");
    }

    #[test]
    fn test_output_path() {
        let exporter = WorkbookExporter::new("/tmp/out");
        assert_eq!(
            exporter.output_path(Path::new("/docs/order 15.docx")),
            PathBuf::from("/tmp/out/order 15.xlsx")
        );
    }

    #[test]
    fn test_export_one_sheet_per_invoice() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = WorkbookExporter::new(dir.path().join("xls"));
        let invoices = vec![invoice(Some("7"), 2), invoice(None, 1)];

        let path = exporter.export(Path::new("order.docx"), &invoices).unwrap();
        assert_eq!(path, dir.path().join("xls").join("order.xlsx"));
        assert!(path.exists());

        let workbook_xml = read_part(&path, "xl/workbook.xml");
        assert!(workbook_xml.contains(r#"name="Заявка № 7""#));
        assert!(workbook_xml.contains(r#"name="Factura 2""#));

        let shared = read_part(&path, "xl/sharedStrings.xml");
        for header in PRODUCT_COLUMNS {
            assert!(shared.contains(header));
        }
        assert!(shared.contains("Сок яблочный 1л"));

        let first_sheet = read_part(&path, "xl/worksheets/sheet1.xml");
        assert!(first_sheet.contains("<cols>"));
    }

    #[test]
    fn test_column_widths_and_borders() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("widths.xlsx");
        let mut invoices = vec![invoice(Some("7"), 1)];
        invoices[0].rows[0].product_name = "Сок яблочный нектар 1л".to_string();

        write_workbook(&path, &invoices).unwrap();
        let sheet = read_part(&path, "xl/worksheets/sheet1.xml");

        // widest cell in column C is the 22-character product name
        let col = regex::Regex::new(r#"<col min="3" max="3" width="([0-9.]+)""#).unwrap();
        let width: f64 = col.captures(&sheet).unwrap()[1].parse().unwrap();
        assert_eq!(width.floor(), 24.0);

        // column A keeps the header width
        let col = regex::Regex::new(r#"<col min="1" max="1" width="([0-9.]+)""#).unwrap();
        let width: f64 = col.captures(&sheet).unwrap()[1].parse().unwrap();
        assert_eq!(width.floor(), 12.0);

        let styles = read_part(&path, "xl/styles.xml");
        assert!(styles.contains(r#"style="thin""#));
        let xfs = regex::Regex::new(r"(?s)<cellXfs[^>]*>(.*?)</cellXfs>").unwrap();
        let xfs = xfs.captures(&styles).unwrap()[1].to_string();
        let xf_list: Vec<&str> = xfs.split("<xf ").skip(1).collect();

        for cell in ["A1", "F1", "C2", "F2"] {
            let pattern = regex::Regex::new(&format!(r#"<c r="{}" s="(\d+)""#, cell)).unwrap();
            let index: usize = pattern.captures(&sheet).unwrap()[1].parse().unwrap();
            assert!(xf_list[index].contains(r#"borderId="1""#), "cell {} has no border", cell);
        }
    }

    #[test]
    fn test_export_empty_fails() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = WorkbookExporter::new(dir.path());
        let err = exporter.export(Path::new("order.docx"), &[]).unwrap_err();
        assert!(matches!(err, crate::FacturiError::Export(ExportError::Empty)));
    }
}
