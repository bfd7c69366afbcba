// Adapters layer: concrete implementations for external systems (spreadsheet attachments, storage).

pub mod spreadsheet;
