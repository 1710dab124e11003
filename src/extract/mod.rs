//! Record extraction module
//!
//! Pulls the item array out of a JSON response body. This is the "what
//! counts as an item" half of the pagination contract for API sources:
//! the fetch loop hands each page body to a `RecordPath` and accumulates
//! whatever comes back.

mod records;

pub use records::RecordPath;
