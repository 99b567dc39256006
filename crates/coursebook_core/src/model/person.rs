//! Person domain model.
//!
//! # Responsibility
//! - Define the shared identity record for every registered person.
//! - Define the closed set of person variants and their capability impls.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another person.
//! - `name` and `identifier` are never blank.
//! - A student's grades are always within `0..=10`.
//! - Pay-related fields are not validated until `compute_pay()`.

use crate::model::capability::{Gradable, InvalidAverageError, InvalidPaymentError, Payable};
use crate::model::money::format_currency;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable internal identity of a person.
///
/// Roster membership and course assignments are keyed by this, not by the
/// user-facing `identifier`, which may be reassigned or duplicated.
pub type PersonId = Uuid;

/// Lowest accepted grade (inclusive).
pub const MIN_GRADE: f64 = 0.0;
/// Highest accepted grade (inclusive).
pub const MAX_GRADE: f64 = 10.0;

/// Validation errors for person identity fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersonValidationError {
    BlankName,
    BlankIdentifier,
    NilUuid,
    /// Stored grade at `index` is outside `MIN_GRADE..=MAX_GRADE`.
    GradeOutOfRange { index: usize },
}

impl Display for PersonValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "person name must not be blank"),
            Self::BlankIdentifier => write!(f, "person identifier must not be blank"),
            Self::NilUuid => write!(f, "person uuid must not be nil"),
            Self::GradeOutOfRange { index } => write!(
                f,
                "grade at position {index} must be between {MIN_GRADE} and {MAX_GRADE}"
            ),
        }
    }
}

impl Error for PersonValidationError {}

/// Faculty member paid a fixed monthly salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalariedFaculty {
    pub monthly_salary: f64,
}

impl Payable for SalariedFaculty {
    fn compute_pay(&self) -> Result<f64, InvalidPaymentError> {
        if self.monthly_salary > 0.0 {
            Ok(self.monthly_salary)
        } else {
            Err(InvalidPaymentError::NonPositiveSalary(self.monthly_salary))
        }
    }
}

/// Faculty member paid per hour worked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyFaculty {
    pub hours_worked: i32,
    pub hourly_rate: f64,
}

impl Payable for HourlyFaculty {
    fn compute_pay(&self) -> Result<f64, InvalidPaymentError> {
        let total = f64::from(self.hours_worked) * self.hourly_rate;
        if total > 0.0 {
            Ok(total)
        } else {
            Err(InvalidPaymentError::NonPositiveTotal(total))
        }
    }
}

/// Result of a grade submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradeOutcome {
    /// Grade was in range and appended.
    Added(f64),
    /// Grade was out of range; history unchanged.
    Rejected(f64),
}

impl GradeOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}

impl Display for GradeOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added(grade) => write!(f, "Grade {grade} added successfully."),
            Self::Rejected(_) => write!(
                f,
                "Invalid grade. It must be between {MIN_GRADE} and {MAX_GRADE}."
            ),
        }
    }
}

#[derive(Deserialize)]
struct StudentRecord {
    grades: Vec<f64>,
}

/// Enrolled student with an ordered grade history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StudentRecord")]
pub struct Student {
    grades: Vec<f64>,
}

impl TryFrom<StudentRecord> for Student {
    type Error = PersonValidationError;

    fn try_from(record: StudentRecord) -> Result<Self, Self::Error> {
        if let Some(index) = record.grades.iter().position(|grade| !is_valid_grade(*grade)) {
            return Err(PersonValidationError::GradeOutOfRange { index });
        }
        Ok(Self {
            grades: record.grades,
        })
    }
}

impl Student {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `grade` when it lies within `MIN_GRADE..=MAX_GRADE`.
    ///
    /// Out-of-range input (including NaN) is reported, not raised.
    pub fn add_grade(&mut self, grade: f64) -> GradeOutcome {
        if is_valid_grade(grade) {
            self.grades.push(grade);
            GradeOutcome::Added(grade)
        } else {
            GradeOutcome::Rejected(grade)
        }
    }

    /// Grades in insertion order, duplicates included.
    pub fn grades(&self) -> &[f64] {
        &self.grades
    }
}

impl Gradable for Student {
    fn compute_average(&self) -> Result<f64, InvalidAverageError> {
        if self.grades.is_empty() {
            return Err(InvalidAverageError);
        }
        let sum: f64 = self.grades.iter().sum();
        Ok(sum / self.grades.len() as f64)
    }
}

/// Closed set of person variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PersonRole {
    SalariedFaculty(SalariedFaculty),
    HourlyFaculty(HourlyFaculty),
    Student(Student),
}

impl PersonRole {
    /// Human-readable variant label used in descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::SalariedFaculty(_) => "Salaried Faculty",
            Self::HourlyFaculty(_) => "Hourly Faculty",
            Self::Student(_) => "Student",
        }
    }
}

#[derive(Deserialize)]
struct PersonRecord {
    uuid: PersonId,
    name: String,
    identifier: String,
    #[serde(flatten)]
    role: PersonRole,
}

/// Registered person: shared identity plus one variant payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PersonRecord")]
pub struct Person {
    uuid: PersonId,
    name: String,
    identifier: String,
    #[serde(flatten)]
    role: PersonRole,
}

impl TryFrom<PersonRecord> for Person {
    type Error = PersonValidationError;

    fn try_from(record: PersonRecord) -> Result<Self, Self::Error> {
        Self::with_id(record.uuid, record.name, record.identifier, record.role)
    }
}

impl Person {
    /// Creates a person with a generated stable ID.
    ///
    /// # Errors
    /// - Returns an error when `name` or `identifier` is blank.
    pub fn new(
        name: impl Into<String>,
        identifier: impl Into<String>,
        role: PersonRole,
    ) -> Result<Self, PersonValidationError> {
        Self::with_id(Uuid::new_v4(), name, identifier, role)
    }

    /// Creates a person with a caller-provided stable ID.
    ///
    /// # Errors
    /// - Returns an error when `uuid` is nil or a text field is blank.
    pub fn with_id(
        uuid: PersonId,
        name: impl Into<String>,
        identifier: impl Into<String>,
        role: PersonRole,
    ) -> Result<Self, PersonValidationError> {
        if uuid.is_nil() {
            return Err(PersonValidationError::NilUuid);
        }
        let name = name.into();
        let identifier = identifier.into();
        validate_name(&name)?;
        validate_identifier(&identifier)?;

        Ok(Self {
            uuid,
            name,
            identifier,
            role,
        })
    }

    /// Salaried faculty. Non-positive salaries are stored as given.
    pub fn salaried_faculty(
        name: impl Into<String>,
        identifier: impl Into<String>,
        monthly_salary: f64,
    ) -> Result<Self, PersonValidationError> {
        Self::new(
            name,
            identifier,
            PersonRole::SalariedFaculty(SalariedFaculty { monthly_salary }),
        )
    }

    /// Hourly faculty. Pay inputs are checked only when pay is computed.
    pub fn hourly_faculty(
        name: impl Into<String>,
        identifier: impl Into<String>,
        hours_worked: i32,
        hourly_rate: f64,
    ) -> Result<Self, PersonValidationError> {
        Self::new(
            name,
            identifier,
            PersonRole::HourlyFaculty(HourlyFaculty {
                hours_worked,
                hourly_rate,
            }),
        )
    }

    /// Student with an empty grade history.
    pub fn student(
        name: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Result<Self, PersonValidationError> {
        Self::new(name, identifier, PersonRole::Student(Student::new()))
    }

    pub fn uuid(&self) -> PersonId {
        self.uuid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn role(&self) -> &PersonRole {
        &self.role
    }

    /// Renames this person.
    ///
    /// # Errors
    /// - Returns `BlankName` and keeps the old name when `name` is blank.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), PersonValidationError> {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Reassigns the user-facing identifier. Uniqueness is not enforced.
    ///
    /// # Errors
    /// - Returns `BlankIdentifier` and keeps the old value when blank.
    pub fn set_identifier(
        &mut self,
        identifier: impl Into<String>,
    ) -> Result<(), PersonValidationError> {
        let identifier = identifier.into();
        validate_identifier(&identifier)?;
        self.identifier = identifier;
        Ok(())
    }

    /// Case-insensitive exact match against the user-facing identifier.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.identifier.to_lowercase() == identifier.to_lowercase()
    }

    pub fn is_faculty(&self) -> bool {
        matches!(
            self.role,
            PersonRole::SalariedFaculty(_) | PersonRole::HourlyFaculty(_)
        )
    }

    pub fn is_student(&self) -> bool {
        matches!(self.role, PersonRole::Student(_))
    }

    /// Returns the payment capability when this variant has one.
    pub fn as_payable(&self) -> Option<&dyn Payable> {
        match &self.role {
            PersonRole::SalariedFaculty(faculty) => Some(faculty),
            PersonRole::HourlyFaculty(faculty) => Some(faculty),
            PersonRole::Student(_) => None,
        }
    }

    /// Returns the grading capability when this variant has one.
    pub fn as_gradable(&self) -> Option<&dyn Gradable> {
        match &self.role {
            PersonRole::Student(student) => Some(student),
            PersonRole::SalariedFaculty(_) | PersonRole::HourlyFaculty(_) => None,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match &self.role {
            PersonRole::Student(student) => Some(student),
            _ => None,
        }
    }

    pub fn as_student_mut(&mut self) -> Option<&mut Student> {
        match &mut self.role {
            PersonRole::Student(student) => Some(student),
            _ => None,
        }
    }

    /// Updates the stored salary. Returns `false` for non-salaried variants.
    pub fn set_monthly_salary(&mut self, monthly_salary: f64) -> bool {
        match &mut self.role {
            PersonRole::SalariedFaculty(faculty) => {
                faculty.monthly_salary = monthly_salary;
                true
            }
            _ => false,
        }
    }

    /// Updates hours worked. Returns `false` for non-hourly variants.
    pub fn set_hours_worked(&mut self, hours_worked: i32) -> bool {
        match &mut self.role {
            PersonRole::HourlyFaculty(faculty) => {
                faculty.hours_worked = hours_worked;
                true
            }
            _ => false,
        }
    }

    /// Updates the hourly rate. Returns `false` for non-hourly variants.
    pub fn set_hourly_rate(&mut self, hourly_rate: f64) -> bool {
        match &mut self.role {
            PersonRole::HourlyFaculty(faculty) => {
                faculty.hourly_rate = hourly_rate;
                true
            }
            _ => false,
        }
    }

    /// Variant-specific human-readable summary.
    ///
    /// For students the average is included when available; an empty grade
    /// history renders an explanatory line instead of failing.
    pub fn describe(&self) -> String {
        let header = format!(
            "{} - ID: {}, Name: {}",
            self.role.label(),
            self.identifier,
            self.name
        );
        match &self.role {
            PersonRole::SalariedFaculty(faculty) => format!(
                "{header}, Monthly Salary: {}",
                format_currency(faculty.monthly_salary)
            ),
            PersonRole::HourlyFaculty(faculty) => format!(
                "{header}, Hours: {}, Rate/Hour: {}",
                faculty.hours_worked,
                format_currency(faculty.hourly_rate)
            ),
            PersonRole::Student(student) => {
                let average = match student.compute_average() {
                    Ok(average) => format!("Average: {average:.2}"),
                    Err(err) => format!("Error: student {} has {err}", self.name),
                };
                format!("{header}, Grades: {:?}\n{average}", student.grades())
            }
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ID: {}, Name: {}", self.identifier, self.name)
    }
}

fn is_valid_grade(grade: f64) -> bool {
    (MIN_GRADE..=MAX_GRADE).contains(&grade)
}

fn validate_name(name: &str) -> Result<(), PersonValidationError> {
    if name.trim().is_empty() {
        return Err(PersonValidationError::BlankName);
    }
    Ok(())
}

fn validate_identifier(identifier: &str) -> Result<(), PersonValidationError> {
    if identifier.trim().is_empty() {
        return Err(PersonValidationError::BlankIdentifier);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        GradeOutcome, HourlyFaculty, Person, PersonValidationError, SalariedFaculty, Student,
    };
    use crate::model::capability::{Gradable, InvalidAverageError, InvalidPaymentError, Payable};

    #[test]
    fn salaried_pay_is_the_stored_salary() {
        let faculty = SalariedFaculty {
            monthly_salary: 1500.0,
        };
        assert_eq!(faculty.compute_pay(), Ok(1500.0));
    }

    #[test]
    fn salaried_pay_rejects_zero_and_negative_salary() {
        for salary in [0.0, -0.01, -1500.0] {
            let faculty = SalariedFaculty {
                monthly_salary: salary,
            };
            assert_eq!(
                faculty.compute_pay(),
                Err(InvalidPaymentError::NonPositiveSalary(salary))
            );
        }
    }

    #[test]
    fn hourly_pay_is_hours_times_rate() {
        let faculty = HourlyFaculty {
            hours_worked: 10,
            hourly_rate: 20.0,
        };
        assert_eq!(faculty.compute_pay(), Ok(200.0));
    }

    #[test]
    fn hourly_pay_rejects_non_positive_product() {
        for (hours, rate) in [(0, 20.0), (10, 0.0), (-3, 20.0), (4, -1.5)] {
            let faculty = HourlyFaculty {
                hours_worked: hours,
                hourly_rate: rate,
            };
            let err = faculty.compute_pay().expect_err("non-positive pay must fail");
            assert_eq!(err.amount(), f64::from(hours) * rate);
        }
    }

    #[test]
    fn negative_hours_and_negative_rate_yield_positive_pay() {
        let faculty = HourlyFaculty {
            hours_worked: -2,
            hourly_rate: -10.0,
        };
        assert_eq!(faculty.compute_pay(), Ok(20.0));
    }

    #[test]
    fn add_grade_accepts_bounds_and_rejects_outside() {
        let mut student = Student::new();
        assert_eq!(student.add_grade(0.0), GradeOutcome::Added(0.0));
        assert_eq!(student.add_grade(10.0), GradeOutcome::Added(10.0));
        assert_eq!(student.add_grade(10.01), GradeOutcome::Rejected(10.01));
        assert_eq!(student.add_grade(-0.5), GradeOutcome::Rejected(-0.5));
        assert!(!student.add_grade(f64::NAN).is_added());
        assert_eq!(student.grades(), &[0.0, 10.0]);
    }

    #[test]
    fn average_of_known_grades() {
        let mut student = Student::new();
        for grade in [8.0, 6.0, 10.0] {
            student.add_grade(grade);
        }
        assert_eq!(student.compute_average(), Ok(8.0));
    }

    #[test]
    fn average_without_grades_fails() {
        assert_eq!(Student::new().compute_average(), Err(InvalidAverageError));
    }

    #[test]
    fn constructors_reject_blank_identity_fields() {
        assert_eq!(
            Person::student("  ", "S1").unwrap_err(),
            PersonValidationError::BlankName
        );
        assert_eq!(
            Person::salaried_faculty("Ana", "\t", 10.0).unwrap_err(),
            PersonValidationError::BlankIdentifier
        );
    }

    #[test]
    fn setters_keep_old_value_on_rejection() {
        let mut person = Person::student("Max", "S1").expect("valid student");
        assert!(person.set_name("").is_err());
        assert_eq!(person.name(), "Max");

        person.set_identifier("S9").expect("valid identifier");
        assert_eq!(person.identifier(), "S9");
    }

    #[test]
    fn capability_views_follow_variant() {
        let faculty = Person::hourly_faculty("Leo", "P2", 10, 20.0).expect("valid faculty");
        let student = Person::student("Max", "S1").expect("valid student");

        assert!(faculty.as_payable().is_some());
        assert!(faculty.as_gradable().is_none());
        assert!(student.as_payable().is_none());
        assert!(student.as_gradable().is_some());
        assert!(faculty.is_faculty() && !faculty.is_student());
    }

    #[test]
    fn variant_setters_only_touch_matching_variant() {
        let mut faculty = Person::salaried_faculty("Ana", "P1", 1500.0).expect("valid faculty");
        assert!(faculty.set_monthly_salary(-1.0));
        assert!(!faculty.set_hours_worked(3));
        assert!(faculty
            .as_payable()
            .expect("payable")
            .compute_pay()
            .is_err());
    }

    #[test]
    fn describe_renders_variant_details() {
        let ana = Person::salaried_faculty("Ana", "P1", 1500.0).expect("valid faculty");
        assert_eq!(
            ana.describe(),
            "Salaried Faculty - ID: P1, Name: Ana, Monthly Salary: $1,500.00"
        );

        let leo = Person::hourly_faculty("Leo", "P2", 10, 20.0).expect("valid faculty");
        assert_eq!(
            leo.describe(),
            "Hourly Faculty - ID: P2, Name: Leo, Hours: 10, Rate/Hour: $20.00"
        );
    }

    #[test]
    fn describe_student_substitutes_missing_average() {
        let mut max = Person::student("Max", "S1").expect("valid student");
        let text = max.describe();
        assert!(text.contains("Grades: []"), "unexpected text: {text}");
        assert!(text.ends_with("Error: student Max has no grades recorded"));

        max.as_student_mut().expect("student").add_grade(7.5);
        assert!(max.describe().ends_with("Average: 7.50"));
    }
}
