//! Core domain logic for coursebook.
//! This crate is the single source of truth for people, courses, payroll,
//! and grading invariants.

pub mod logging;
pub mod model;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::capability::{Gradable, InvalidAverageError, InvalidPaymentError, Payable};
pub use model::course::{Course, CourseError, CourseId, PersonLookup, RosterChange};
pub use model::money::format_currency;
pub use model::person::{
    GradeOutcome, HourlyFaculty, Person, PersonId, PersonRole, PersonValidationError,
    SalariedFaculty, Student, MAX_GRADE, MIN_GRADE,
};
pub use service::command::{execute, Command, CommandError, CommandOutcome};
pub use service::registry::{
    AverageEntry, AverageReport, PaymentEntry, PaymentReport, Registry, RegistryError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
