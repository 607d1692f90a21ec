/// JSON-file-backed workbook provider.
pub mod workbook;

pub use workbook::JsonWorkbook;
