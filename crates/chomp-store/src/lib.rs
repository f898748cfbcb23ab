pub mod fitnotes;
pub mod json_store;

pub use fitnotes::FitnotesImport;
pub use json_store::JsonRecordStore;
