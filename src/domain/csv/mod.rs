// ============================================================
// CSV DOMAIN LAYER
// ============================================================
// Records produced by the CSV scanner
// No I/O, no async, no external dependencies

mod raw_record;

pub use raw_record::RawRecord;
