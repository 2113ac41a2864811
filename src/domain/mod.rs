//! Domain models and types for anonbench.
//!
//! The domain layer provides:
//! - **Scalar values** ([`FieldValue`])
//! - **Tabular data** ([`Dataset`], [`Record`])
//! - **Validated sizes** ([`DatasetSize`])
//! - **Error types** ([`BenchError`]) and the [`Result`] alias
//!
//! # Shape invariants
//!
//! Every record in a dataset carries exactly the dataset's columns:
//!
//! ```rust
//! use anonbench::domain::{Dataset, Record};
//!
//! let ds = Dataset::from_records(vec![
//!     Record::new().with("name", "Ann").with("age", 30i64),
//!     Record::new().with("name", "Bob").with("age", 41i64),
//! ])?;
//! assert_eq!(ds.len(), 2);
//!
//! let bad = Dataset::from_records(vec![
//!     Record::new().with("name", "Ann"),
//!     Record::new().with("age", 41i64),
//! ]);
//! assert!(bad.is_err());
//! # Ok::<(), anonbench::domain::BenchError>(())
//! ```

pub mod dataset;
pub mod errors;
pub mod result;
pub mod size;
pub mod value;

pub use dataset::{Dataset, Record};
pub use errors::BenchError;
pub use result::Result;
pub use size::DatasetSize;
pub use value::FieldValue;
