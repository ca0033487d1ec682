//! In-memory exam registry: student import, test enrollment, grading, and
//! graded listings.
//!
//! # Examples
//!
//! ```
//! use examreg::{
//!     core::registry::ExamRegistry,
//!     record::ExamResult,
//!     types::SortBy,
//! };
//!
//! let mut exams = ExamRegistry::new();
//! exams
//!     .import_str("123456:Smith John:cardA, cardB\n")
//!     .expect("import");
//!
//! exams.register("cardA", "T1").expect("register");
//! assert!(exams.register("cardA", "T1").is_err());
//!
//! let seq = exams.assess(123456, "T1", 50).expect("assess");
//! assert_eq!(seq, 0);
//!
//! assert_eq!(
//!     exams.list_test("T1", SortBy::Grade),
//!     vec![ExamResult::new("Smith John", 123456, "T1", 50)]
//! );
//! assert!(exams.list_missing("T1").is_empty());
//! ```
//!
//! Configuration can be loaded from JSON:
//! ```
//! use examreg::{config::RegistryConfig, core::registry::ExamRegistry};
//!
//! let cfg = RegistryConfig::from_json_str(r#"{ "skip_blank_lines": false }"#).expect("config");
//! let mut exams = ExamRegistry::with_config(cfg);
//! assert!(exams.import_str("1:Ada:c1\n\n2:Bob:c2\n").is_err());
//! assert_eq!(exams.directory().student_count(), 0);
//! ```
#![deny(missing_docs)]

/// Registry configuration.
pub mod config;
/// Core in-memory directory, tests, and registry.
pub mod core;
/// Student, card, enrollment, and result records.
pub mod record;
/// Shared primitive types and enums.
pub mod types;
