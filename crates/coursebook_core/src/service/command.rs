//! Line-command entry points for console collaborators.
//!
//! # Responsibility
//! - Parse one whitespace-separated command line into a typed `Command`.
//! - Validate numeric input before it reaches the domain model.
//! - Execute commands against a `Registry` and render the result as text.
//!
//! # Invariants
//! - Selections are 1-based positions into the current faculty, student,
//!   or course listing.
//! - No command failure is fatal; every error renders as a notice.

use crate::model::course::CourseId;
use crate::model::person::{Person, PersonId, PersonValidationError};
use crate::service::registry::{Registry, RegistryError};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const USAGE: &str = "Commands:
  salaried <name> <id> <monthly-salary>
  hourly <name> <id> <hours> <rate>
  student <name> <id>
  course <instructor#> <title...>
  enroll <course#> <student#>
  withdraw <course#> <student#>
  grade <student#> <grade>
  people | courses | pay | averages
  find-person <id>
  find-course <text...>
  help | quit";

/// One parsed collaborator action.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    RegisterSalaried {
        name: String,
        identifier: String,
        monthly_salary: f64,
    },
    RegisterHourly {
        name: String,
        identifier: String,
        hours_worked: i32,
        hourly_rate: f64,
    },
    RegisterStudent {
        name: String,
        identifier: String,
    },
    CreateCourse {
        instructor: usize,
        title: String,
    },
    EnrollStudent {
        course: usize,
        student: usize,
    },
    WithdrawStudent {
        course: usize,
        student: usize,
    },
    AddGrade {
        student: usize,
        grade: f64,
    },
    ListPeople,
    ListCourses,
    ProcessPayments,
    ProcessAverages,
    FindPerson {
        identifier: String,
    },
    FindCourse {
        needle: String,
    },
    Help,
    Quit,
}

/// Command parse/execution errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Blank input line.
    Empty,
    /// Verb is not recognized.
    UnknownCommand(String),
    /// Required positional argument is missing.
    MissingArgument(&'static str),
    /// Extra word after the last expected argument.
    UnexpectedArgument(String),
    /// Numeric field failed to parse.
    InvalidValue(String),
    /// Selection is outside the listing.
    InvalidSelection(usize),
    /// No courses registered yet.
    NoCourses,
    /// No students registered yet.
    NoStudents,
    /// Person identity validation failure.
    Person(PersonValidationError),
    /// Registry-level failure.
    Registry(RegistryError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Error: no command given."),
            Self::UnknownCommand(verb) => {
                write!(f, "Invalid option `{verb}`. Type `help` for commands.")
            }
            Self::MissingArgument(name) => write!(f, "Error: missing argument <{name}>."),
            Self::UnexpectedArgument(word) => {
                write!(f, "Error: unexpected argument `{word}`; names and IDs are single words.")
            }
            Self::InvalidValue(_) => write!(f, "Error: enter a valid value."),
            Self::InvalidSelection(_) => write!(f, "Invalid selection."),
            Self::NoCourses => write!(f, "Error: no courses registered."),
            Self::NoStudents => write!(f, "Error: no students registered."),
            Self::Person(err) => write!(f, "Error: {err}."),
            Self::Registry(err) => write!(f, "Error: {err}."),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Person(err) => Some(err),
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PersonValidationError> for CommandError {
    fn from(value: PersonValidationError) -> Self {
        Self::Person(value)
    }
}

impl From<RegistryError> for CommandError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Text to show the user.
    Output(String),
    /// The session should end.
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        Self::parse(line)
    }
}

impl Command {
    /// Parses one command line.
    ///
    /// # Errors
    /// - `Empty`, `UnknownCommand`, `MissingArgument`, `UnexpectedArgument`,
    ///   or `InvalidValue`.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut tokens = line.split_whitespace();
        let verb = tokens.next().ok_or(CommandError::Empty)?.to_lowercase();

        let command = match verb.as_str() {
            "salaried" => Self::RegisterSalaried {
                name: arg(&mut tokens, "name")?.to_string(),
                identifier: arg(&mut tokens, "id")?.to_string(),
                monthly_salary: parse_amount(arg(&mut tokens, "monthly-salary")?)?,
            },
            "hourly" => Self::RegisterHourly {
                name: arg(&mut tokens, "name")?.to_string(),
                identifier: arg(&mut tokens, "id")?.to_string(),
                hours_worked: parse_number(arg(&mut tokens, "hours")?)?,
                hourly_rate: parse_amount(arg(&mut tokens, "rate")?)?,
            },
            "student" => Self::RegisterStudent {
                name: arg(&mut tokens, "name")?.to_string(),
                identifier: arg(&mut tokens, "id")?.to_string(),
            },
            "course" => {
                let instructor = parse_number(arg(&mut tokens, "instructor#")?)?;
                let title = rest(&mut tokens);
                if title.is_empty() {
                    return Err(CommandError::MissingArgument("title"));
                }
                Self::CreateCourse { instructor, title }
            }
            "enroll" => Self::EnrollStudent {
                course: parse_number(arg(&mut tokens, "course#")?)?,
                student: parse_number(arg(&mut tokens, "student#")?)?,
            },
            "withdraw" => Self::WithdrawStudent {
                course: parse_number(arg(&mut tokens, "course#")?)?,
                student: parse_number(arg(&mut tokens, "student#")?)?,
            },
            "grade" => Self::AddGrade {
                student: parse_number(arg(&mut tokens, "student#")?)?,
                grade: parse_amount(arg(&mut tokens, "grade")?)?,
            },
            "people" => Self::ListPeople,
            "courses" => Self::ListCourses,
            "pay" => Self::ProcessPayments,
            "averages" => Self::ProcessAverages,
            "find-person" => Self::FindPerson {
                identifier: arg(&mut tokens, "id")?.to_string(),
            },
            "find-course" => Self::FindCourse {
                needle: rest(&mut tokens),
            },
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };
        if let Some(extra) = tokens.next() {
            return Err(CommandError::UnexpectedArgument(extra.to_string()));
        }
        Ok(command)
    }
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse::<T>()
        .map_err(|_| CommandError::InvalidValue(raw.to_string()))
}

/// Like `parse_number`, but `inf` and `NaN` are rejected too.
fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    let value: f64 = parse_number(raw)?;
    if !value.is_finite() {
        return Err(CommandError::InvalidValue(raw.to_string()));
    }
    Ok(value)
}

fn arg<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, CommandError> {
    tokens.next().ok_or(CommandError::MissingArgument(name))
}

fn rest<'a>(tokens: &mut impl Iterator<Item = &'a str>) -> String {
    tokens.collect::<Vec<_>>().join(" ")
}

/// Picks the 1-based `selection` from `items`.
fn select<T: Copy>(items: &[T], selection: usize) -> Result<T, CommandError> {
    selection
        .checked_sub(1)
        .and_then(|index| items.get(index).copied())
        .ok_or(CommandError::InvalidSelection(selection))
}

fn student_ids(registry: &Registry) -> Vec<PersonId> {
    registry.students().iter().map(|person| person.uuid()).collect()
}

fn course_ids(registry: &Registry) -> Vec<CourseId> {
    registry.courses().iter().map(|course| course.uuid()).collect()
}

fn roster_target(
    registry: &Registry,
    course: usize,
    student: usize,
) -> Result<(CourseId, PersonId), CommandError> {
    let courses = course_ids(registry);
    if courses.is_empty() {
        return Err(CommandError::NoCourses);
    }
    let students = student_ids(registry);
    if students.is_empty() {
        return Err(CommandError::NoStudents);
    }
    Ok((select(&courses, course)?, select(&students, student)?))
}

fn register(registry: &mut Registry, person: Person) -> CommandOutcome {
    let line = format!("Person registered: {}", person.name());
    registry.register_person(person);
    CommandOutcome::Output(line)
}

fn listing(header: &str, lines: Vec<String>, empty: &str) -> CommandOutcome {
    let body = if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    };
    CommandOutcome::Output(format!("=== {header} ===\n{body}"))
}

/// Executes `command` against `registry`.
///
/// # Errors
/// - Selection, validation, and handle-resolution failures. Domain soft
///   outcomes (rejected grade, duplicate enrollment, failed pay) are
///   rendered into `CommandOutcome::Output` instead.
pub fn execute(registry: &mut Registry, command: Command) -> Result<CommandOutcome, CommandError> {
    debug!("event=command_execute module=command status=start");

    let outcome = match command {
        Command::RegisterSalaried {
            name,
            identifier,
            monthly_salary,
        } => register(
            registry,
            Person::salaried_faculty(name, identifier, monthly_salary)?,
        ),
        Command::RegisterHourly {
            name,
            identifier,
            hours_worked,
            hourly_rate,
        } => register(
            registry,
            Person::hourly_faculty(name, identifier, hours_worked, hourly_rate)?,
        ),
        Command::RegisterStudent { name, identifier } => {
            register(registry, Person::student(name, identifier)?)
        }
        Command::CreateCourse { instructor, title } => {
            let faculty = registry
                .faculty_members()
                .iter()
                .map(|person| person.uuid())
                .collect::<Vec<_>>();
            if faculty.is_empty() {
                return Err(RegistryError::NoFaculty.into());
            }
            let instructor = select(&faculty, instructor)?;
            let line = format!("Course registered: {title}");
            registry.create_course(title, instructor)?;
            CommandOutcome::Output(line)
        }
        Command::EnrollStudent { course, student } => {
            let (course, student) = roster_target(registry, course, student)?;
            CommandOutcome::Output(registry.enroll_student(course, student)?.to_string())
        }
        Command::WithdrawStudent { course, student } => {
            let (course, student) = roster_target(registry, course, student)?;
            CommandOutcome::Output(registry.withdraw_student(course, student)?.to_string())
        }
        Command::AddGrade { student, grade } => {
            let students = student_ids(registry);
            if students.is_empty() {
                return Err(CommandError::NoStudents);
            }
            let student = select(&students, student)?;
            CommandOutcome::Output(registry.add_grade(student, grade)?.to_string())
        }
        Command::ListPeople => listing("PEOPLE", registry.list_people(), "No people registered."),
        Command::ListCourses => {
            listing("COURSES", registry.list_courses(), "No courses registered.")
        }
        Command::ProcessPayments => CommandOutcome::Output(format!(
            "=== PAYMENT PROCESSING ===\n{}",
            registry.process_payments()
        )),
        Command::ProcessAverages => CommandOutcome::Output(format!(
            "=== AVERAGE PROCESSING ===\n{}",
            registry.process_averages()
        )),
        Command::FindPerson { identifier } => {
            CommandOutcome::Output(match registry.find_person_by_id(&identifier) {
                Some(person) => format!("Person found:\n{}", person.describe()),
                None => format!("No person found with ID: {identifier}"),
            })
        }
        Command::FindCourse { needle } => {
            CommandOutcome::Output(match registry.find_course_by_title(&needle) {
                Some(course) => course.describe(&*registry),
                None => format!("No course found containing: '{needle}'"),
            })
        }
        Command::Help => CommandOutcome::Output(USAGE.to_string()),
        Command::Quit => CommandOutcome::Quit,
    };
    Ok(outcome)
}
