//! Course domain model.
//!
//! # Responsibility
//! - Group one faculty instructor and a roster of students.
//! - Keep roster membership unique while preserving enrollment order.
//!
//! # Invariants
//! - `instructor` refers to a faculty person at creation time.
//! - `roster` holds only student IDs and never contains duplicates.
//! - Courses reference people by `PersonId`; they never own them.

use crate::model::person::{Person, PersonId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable internal identity of a course.
pub type CourseId = Uuid;

/// Resolves person handles held by courses.
pub trait PersonLookup {
    fn person(&self, id: PersonId) -> Option<&Person>;
}

impl PersonLookup for [Person] {
    fn person(&self, id: PersonId) -> Option<&Person> {
        self.iter().find(|person| person.uuid() == id)
    }
}

/// Errors from course construction and roster edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    BlankTitle,
    InstructorNotFaculty(PersonId),
    NotAStudent(PersonId),
    DuplicateRosterEntry(PersonId),
}

impl Display for CourseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "course title must not be blank"),
            Self::InstructorNotFaculty(id) => {
                write!(f, "course instructor must be a faculty member: {id}")
            }
            Self::NotAStudent(id) => write!(f, "only students can join a roster: {id}"),
            Self::DuplicateRosterEntry(id) => {
                write!(f, "student appears more than once in roster: {id}")
            }
        }
    }
}

impl Error for CourseError {}

/// Roster edit result. Duplicates and misses are notices, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterChange {
    Added { student: String, course: String },
    AlreadyEnrolled,
    Removed { student: String, course: String },
    NotEnrolled,
}

impl RosterChange {
    /// Whether the roster was modified.
    pub fn changed(&self) -> bool {
        matches!(self, Self::Added { .. } | Self::Removed { .. })
    }
}

impl Display for RosterChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Added { student, course } => {
                write!(f, "Student {student} added to course {course}")
            }
            Self::AlreadyEnrolled => write!(f, "The student is already registered in the course."),
            Self::Removed { student, course } => {
                write!(f, "Student {student} removed from course {course}")
            }
            Self::NotEnrolled => write!(f, "The student is not registered in the course."),
        }
    }
}

#[derive(Deserialize)]
struct CourseRecord {
    uuid: CourseId,
    title: String,
    instructor: PersonId,
    roster: Vec<PersonId>,
}

/// Academic course with one instructor and an ordered roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CourseRecord")]
pub struct Course {
    uuid: CourseId,
    title: String,
    instructor: PersonId,
    roster: Vec<PersonId>,
}

impl TryFrom<CourseRecord> for Course {
    type Error = CourseError;

    // Instructor variant is not checked here; only its ID is stored.
    fn try_from(record: CourseRecord) -> Result<Self, Self::Error> {
        if record.title.trim().is_empty() {
            return Err(CourseError::BlankTitle);
        }
        let mut seen = HashSet::with_capacity(record.roster.len());
        if let Some(duplicate) = record.roster.iter().find(|id| !seen.insert(**id)) {
            return Err(CourseError::DuplicateRosterEntry(*duplicate));
        }

        Ok(Self {
            uuid: record.uuid,
            title: record.title,
            instructor: record.instructor,
            roster: record.roster,
        })
    }
}

impl Course {
    /// Creates a course taught by `instructor`.
    ///
    /// # Errors
    /// - `BlankTitle` when `title` is blank.
    /// - `InstructorNotFaculty` when `instructor` is a student.
    pub fn new(title: impl Into<String>, instructor: &Person) -> Result<Self, CourseError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::BlankTitle);
        }
        if !instructor.is_faculty() {
            return Err(CourseError::InstructorNotFaculty(instructor.uuid()));
        }

        Ok(Self {
            uuid: Uuid::new_v4(),
            title,
            instructor: instructor.uuid(),
            roster: Vec::new(),
        })
    }

    pub fn uuid(&self) -> CourseId {
        self.uuid
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn instructor(&self) -> PersonId {
        self.instructor
    }

    /// Enrolled student IDs in enrollment order.
    pub fn roster(&self) -> &[PersonId] {
        &self.roster
    }

    pub fn contains(&self, student: PersonId) -> bool {
        self.roster.contains(&student)
    }

    /// Enrolls `student` unless already present.
    ///
    /// # Errors
    /// - `NotAStudent` when `student` is a faculty member.
    pub fn add_student(&mut self, student: &Person) -> Result<RosterChange, CourseError> {
        if !student.is_student() {
            return Err(CourseError::NotAStudent(student.uuid()));
        }
        if self.contains(student.uuid()) {
            return Ok(RosterChange::AlreadyEnrolled);
        }

        self.roster.push(student.uuid());
        Ok(RosterChange::Added {
            student: student.name().to_string(),
            course: self.title.clone(),
        })
    }

    /// Withdraws `student` when enrolled.
    pub fn remove_student(&mut self, student: &Person) -> RosterChange {
        let Some(position) = self.roster.iter().position(|id| *id == student.uuid()) else {
            return RosterChange::NotEnrolled;
        };

        self.roster.remove(position);
        RosterChange::Removed {
            student: student.name().to_string(),
            course: self.title.clone(),
        }
    }

    /// Case-insensitive substring match on the title.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(&needle.to_lowercase())
    }

    /// Renders title, instructor, roster size, and student names.
    ///
    /// Handles that no longer resolve render as `<unknown>`.
    pub fn describe<L: PersonLookup + ?Sized>(&self, people: &L) -> String {
        let name_of = |id: PersonId| {
            people
                .person(id)
                .map(|person| person.name().to_string())
                .unwrap_or_else(|| "<unknown>".to_string())
        };

        let mut lines = vec![
            "=== COURSE INFORMATION ===".to_string(),
            format!("Course: {}", self.title),
            format!("Instructor: {}", name_of(self.instructor)),
            format!("Number of students: {}", self.roster.len()),
        ];
        if !self.roster.is_empty() {
            lines.push("Enrolled students:".to_string());
            lines.extend(self.roster.iter().map(|id| format!("  - {}", name_of(*id))));
        }
        lines.join("\n")
    }
}
