//! Table rendering shared by the commands.

use console::{pad_str, style, Alignment};

use facturi_core::models::product::PRODUCT_COLUMNS;
use facturi_core::{ExtractionResult, StoredProduct};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned table
    Text,
    /// JSON output
    Json,
    /// CSV output
    Csv,
}

/// Render rows of cells as an aligned text table.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| console::measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(console::measure_text_width(cell));
            }
        }
    }

    let line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_str(cell, *w, Alignment::Left, None).into_owned())
            .collect();
        padded.join("  ").trim_end().to_string()
    };

    let separators: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let separators: Vec<&str> = separators.iter().map(String::as_str).collect();

    let mut output = String::new();
    output.push_str(&line(headers));
    output.push('\n');
    output.push_str(&line(&separators));
    output.push('\n');
    for row in rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        output.push_str(&line(&cells));
        output.push('\n');
    }
    output
}

/// Preview of a parsed document, one section per invoice.
pub fn format_preview(result: &ExtractionResult) -> String {
    let mut output = String::new();

    for (i, invoice) in result.invoices.iter().enumerate() {
        output.push_str(&format!(
            "{} {} ({} rows)\n",
            style("▸").cyan(),
            style(invoice.sheet_title(i + 1)).bold(),
            invoice.rows.len()
        ));

        if invoice.rows.is_empty() {
            output.push('\n');
            continue;
        }

        let rows: Vec<Vec<String>> = invoice
            .rows
            .iter()
            .map(|r| r.fields().iter().map(|f| f.to_string()).collect())
            .collect();
        output.push_str(&render_table(&PRODUCT_COLUMNS, &rows));
        output.push('\n');
    }

    output
}

/// Format stored products in the requested format.
pub fn format_products(products: &[StoredProduct], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(products)?),
        OutputFormat::Csv => format_products_csv(products),
        OutputFormat::Text => Ok(format_products_text(products)),
    }
}

fn format_products_csv(products: &[StoredProduct]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["ID"];
    header.extend(PRODUCT_COLUMNS);
    wtr.write_record(&header)?;

    for product in products {
        let id = product.id.to_string();
        let mut record = vec![id.as_str()];
        record.extend(product.row.fields());
        wtr.write_record(&record)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_products_text(products: &[StoredProduct]) -> String {
    if products.is_empty() {
        return "No imported rows.\n".to_string();
    }

    let mut header = vec!["ID"];
    header.extend(PRODUCT_COLUMNS);

    let rows: Vec<Vec<String>> = products
        .iter()
        .map(|p| {
            std::iter::once(p.id.to_string())
                .chain(p.row.fields().iter().map(|f| f.to_string()))
                .collect()
        })
        .collect();

    render_table(&header, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use facturi_core::ProductRow;

    fn product(id: i64, name: &str) -> StoredProduct {
        StoredProduct {
            id,
            row: ProductRow {
                producer_id: "345".to_string(),
                barcode: "4840001234567".to_string(),
                product_name: name.to_string(),
                quantity_in_box: "12.000".to_string(),
                order_price: "$1.500".to_string(),
                total: "$18.000".to_string(),
            },
        }
    }

    #[test]
    fn test_render_table_aligns_unicode() {
        let table = render_table(
            &["A", "B"],
            &[vec!["Сок".to_string(), "1".to_string()], vec!["x".to_string(), "2".to_string()]],
        );
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "A    B");
        assert_eq!(lines[1], "---  -");
        assert_eq!(lines[2], "Сок  1");
        assert_eq!(lines[3], "x    2");
    }

    #[test]
    fn test_format_products_csv() {
        let csv = format_products(&[product(1, "Сок, яблочный")], OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("ID,IDPRODUCER,BARCODE,ROPRODUCTNAME,QUANTITYINBOX,ORDERPRICE,TOTAL")
        );
        assert_eq!(
            lines.next(),
            Some("1,345,4840001234567,\"Сок, яблочный\",12.000,$1.500,$18.000")
        );
    }

    #[test]
    fn test_format_products_json() {
        let json = format_products(&[product(3, "Вода")], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], 3);
        assert_eq!(value[0]["product_name"], "Вода");
    }

    #[test]
    fn test_format_products_text_empty() {
        assert_eq!(
            format_products(&[], OutputFormat::Text).unwrap(),
            "No imported rows.\n"
        );
    }
}
