//! In-memory registry of people and courses.
//!
//! # Responsibility
//! - Own every `Person` and `Course` for the process lifetime.
//! - Orchestrate bulk operations (listing, payroll, averages, lookups).
//! - Resolve handle-based roster and grade edits against owned entities.
//!
//! # Invariants
//! - People and courses keep insertion order; nothing is ever deleted.
//! - Identifier uniqueness is not enforced; lookups return the first match.
//! - Bulk operations never abort on a per-person failure.

use crate::model::capability::{InvalidAverageError, InvalidPaymentError};
use crate::model::course::{Course, CourseError, CourseId, PersonLookup, RosterChange};
use crate::model::money::format_currency;
use crate::model::person::{GradeOutcome, Person, PersonId};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from handle-based registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// No faculty member is registered yet.
    NoFaculty,
    /// Person handle does not resolve.
    PersonNotFound(PersonId),
    /// Course handle does not resolve.
    CourseNotFound(CourseId),
    /// Person exists but is not a student.
    NotAStudent(PersonId),
    /// Course-level validation failure.
    Course(CourseError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoFaculty => write!(
                f,
                "at least one faculty member must be registered before creating a course"
            ),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::CourseNotFound(id) => write!(f, "course not found: {id}"),
            Self::NotAStudent(id) => write!(f, "person is not a student: {id}"),
            Self::Course(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Course(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CourseError> for RegistryError {
    fn from(value: CourseError) -> Self {
        match value {
            CourseError::NotAStudent(id) => Self::NotAStudent(id),
            other => Self::Course(other),
        }
    }
}

/// Payment result for one payable person.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentEntry {
    pub person: PersonId,
    pub name: String,
    pub result: Result<f64, InvalidPaymentError>,
}

/// Outcome of `Registry::process_payments`, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentReport {
    pub entries: Vec<PaymentEntry>,
}

impl PaymentReport {
    /// True when no registered person is payable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all successful payments.
    pub fn total_paid(&self) -> f64 {
        self.entries
            .iter()
            .filter_map(|entry| entry.result.ok())
            .sum()
    }

    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result.is_err())
            .count()
    }
}

impl Display for PaymentReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No faculty registered to process payments.");
        }
        let lines = self
            .entries
            .iter()
            .map(|entry| match entry.result {
                Ok(amount) => format!("Payment for {}: {}", entry.name, format_currency(amount)),
                Err(err) => format!("Payment error for {}: {err}", entry.name),
            })
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Average result for one gradable person.
#[derive(Debug, Clone, PartialEq)]
pub struct AverageEntry {
    pub person: PersonId,
    pub name: String,
    pub result: Result<f64, InvalidAverageError>,
}

/// Outcome of `Registry::process_averages`, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageReport {
    pub entries: Vec<AverageEntry>,
}

impl AverageReport {
    /// True when no registered person is gradable.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.result.is_err())
            .count()
    }
}

impl Display for AverageReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No students registered to process averages.");
        }
        let lines = self
            .entries
            .iter()
            .map(|entry| match entry.result {
                Ok(average) => format!("Average for {}: {average:.2}", entry.name),
                Err(err) => format!("Average error: student {} has {err}", entry.name),
            })
            .collect::<Vec<_>>();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Owner of all people and courses for one session.
#[derive(Debug, Default)]
pub struct Registry {
    people: Vec<Person>,
    courses: Vec<Course>,
}

impl PersonLookup for Registry {
    fn person(&self, id: PersonId) -> Option<&Person> {
        self.people.as_slice().person(id)
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `person`. Duplicate identifiers are accepted.
    pub fn register_person(&mut self, person: Person) -> PersonId {
        let id = person.uuid();
        info!(
            "event=person_register module=registry status=ok kind={} total={}",
            person.role().label(),
            self.people.len() + 1
        );
        self.people.push(person);
        id
    }

    /// Appends `course`. Instructor reuse across courses is accepted.
    pub fn register_course(&mut self, course: Course) -> CourseId {
        let id = course.uuid();
        info!(
            "event=course_register module=registry status=ok total={}",
            self.courses.len() + 1
        );
        self.courses.push(course);
        id
    }

    /// Builds and registers a course taught by a registered faculty member.
    ///
    /// # Errors
    /// - `NoFaculty` when no faculty member is registered.
    /// - `PersonNotFound` when `instructor` does not resolve.
    /// - `Course(..)` when the course itself is invalid.
    pub fn create_course(
        &mut self,
        title: impl Into<String>,
        instructor: PersonId,
    ) -> Result<CourseId, RegistryError> {
        if !self.people.iter().any(Person::is_faculty) {
            return Err(RegistryError::NoFaculty);
        }
        let instructor = self
            .person(instructor)
            .ok_or(RegistryError::PersonNotFound(instructor))?;
        let course = Course::new(title, instructor)?;
        Ok(self.register_course(course))
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn person_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.people.iter_mut().find(|person| person.uuid() == id)
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.uuid() == id)
    }

    /// Descriptions of every person, in registration order.
    pub fn list_people(&self) -> Vec<String> {
        self.people.iter().map(Person::describe).collect()
    }

    /// Descriptions of every course, in registration order.
    pub fn list_courses(&self) -> Vec<String> {
        self.courses
            .iter()
            .map(|course| course.describe(self))
            .collect()
    }

    /// Computes pay for every payable person; failures are collected.
    pub fn process_payments(&self) -> PaymentReport {
        let entries = self
            .people
            .iter()
            .filter_map(|person| {
                let payable = person.as_payable()?;
                let result = payable.compute_pay();
                if let Err(err) = &result {
                    warn!(
                        "event=payment_compute module=registry status=error error={}",
                        err
                    );
                }
                Some(PaymentEntry {
                    person: person.uuid(),
                    name: person.name().to_string(),
                    result,
                })
            })
            .collect::<Vec<_>>();

        let report = PaymentReport { entries };
        info!(
            "event=payments_process module=registry status=ok count={} failures={}",
            report.entries.len(),
            report.failure_count()
        );
        report
    }

    /// Computes the average for every gradable person; failures are collected.
    pub fn process_averages(&self) -> AverageReport {
        let entries = self
            .people
            .iter()
            .filter_map(|person| {
                let gradable = person.as_gradable()?;
                Some(AverageEntry {
                    person: person.uuid(),
                    name: person.name().to_string(),
                    result: gradable.compute_average(),
                })
            })
            .collect::<Vec<_>>();

        let report = AverageReport { entries };
        info!(
            "event=averages_process module=registry status=ok count={} failures={}",
            report.entries.len(),
            report.failure_count()
        );
        report
    }

    /// First person whose identifier equals `identifier`, ignoring case.
    pub fn find_person_by_id(&self, identifier: &str) -> Option<&Person> {
        let found = self
            .people
            .iter()
            .find(|person| person.matches_identifier(identifier));
        debug!(
            "event=person_find module=registry status={}",
            if found.is_some() { "ok" } else { "not_found" }
        );
        found
    }

    /// First course whose title contains `needle`, ignoring case.
    pub fn find_course_by_title(&self, needle: &str) -> Option<&Course> {
        let found = self
            .courses
            .iter()
            .find(|course| course.title_contains(needle));
        debug!(
            "event=course_find module=registry status={}",
            if found.is_some() { "ok" } else { "not_found" }
        );
        found
    }

    /// Faculty members in registration order.
    pub fn faculty_members(&self) -> Vec<&Person> {
        self.people.iter().filter(|person| person.is_faculty()).collect()
    }

    /// Students in registration order.
    pub fn students(&self) -> Vec<&Person> {
        self.people.iter().filter(|person| person.is_student()).collect()
    }

    /// Enrolls a registered student in a registered course.
    ///
    /// # Errors
    /// - `CourseNotFound` / `PersonNotFound` for unresolved handles.
    /// - `NotAStudent` when `student` is a faculty member.
    pub fn enroll_student(
        &mut self,
        course: CourseId,
        student: PersonId,
    ) -> Result<RosterChange, RegistryError> {
        let person = self
            .people
            .iter()
            .find(|person| person.uuid() == student)
            .ok_or(RegistryError::PersonNotFound(student))?;
        let course = self
            .courses
            .iter_mut()
            .find(|entry| entry.uuid() == course)
            .ok_or(RegistryError::CourseNotFound(course))?;
        Ok(course.add_student(person)?)
    }

    /// Withdraws a student from a course. Missing enrollment is a notice.
    ///
    /// # Errors
    /// - `CourseNotFound` / `PersonNotFound` for unresolved handles.
    pub fn withdraw_student(
        &mut self,
        course: CourseId,
        student: PersonId,
    ) -> Result<RosterChange, RegistryError> {
        let person = self
            .people
            .iter()
            .find(|person| person.uuid() == student)
            .ok_or(RegistryError::PersonNotFound(student))?;
        let course = self
            .courses
            .iter_mut()
            .find(|entry| entry.uuid() == course)
            .ok_or(RegistryError::CourseNotFound(course))?;
        Ok(course.remove_student(person))
    }

    /// Records a grade for a registered student.
    ///
    /// # Errors
    /// - `PersonNotFound` for an unresolved handle.
    /// - `NotAStudent` when the person is a faculty member.
    pub fn add_grade(
        &mut self,
        student: PersonId,
        grade: f64,
    ) -> Result<GradeOutcome, RegistryError> {
        let person = self
            .person_mut(student)
            .ok_or(RegistryError::PersonNotFound(student))?;
        let record = person
            .as_student_mut()
            .ok_or(RegistryError::NotAStudent(student))?;

        let outcome = record.add_grade(grade);
        if !outcome.is_added() {
            warn!("event=grade_add module=registry status=rejected");
        }
        Ok(outcome)
    }
}
