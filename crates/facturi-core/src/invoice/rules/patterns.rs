//! Common regex patterns for invoice table extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Invoice table row: ordinal, producer id, barcode, name, quantity, price, total
    pub static ref PRODUCT_ROW: Regex = Regex::new(
        r"^\s*(\d+)\.\s+(\d+)\s+(\d+)\s+(.+?)\s+(\d+\.\d{3})\s+(\d+\.\d{3})\s+(\d+\.\d{3})\s*$"
    ).unwrap();

    // Invoice number on a marker line
    pub static ref INVOICE_NUMBER: Regex = Regex::new(
        r"Заявка\s*№\s*(\d+)"
    ).unwrap();

    // USD rate on the central bank rate page
    pub static ref USD_RATE: Regex = Regex::new(
        r"(?i)USD.*?(\d+\.\d+)"
    ).unwrap();
}
