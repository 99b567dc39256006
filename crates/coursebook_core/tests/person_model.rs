use coursebook_core::{
    Course, CourseError, Gradable, GradeOutcome, InvalidAverageError, InvalidPaymentError,
    Payable, Person, PersonRole, PersonValidationError,
};
use uuid::Uuid;

#[test]
fn salaried_pay_matches_salary_only_when_positive() {
    for salary in [0.01, 1.0, 1500.0, 98_765.43] {
        let person = Person::salaried_faculty("Ana", "P1", salary).unwrap();
        assert_eq!(person.as_payable().unwrap().compute_pay(), Ok(salary));
    }
    for salary in [0.0, -0.01, -2000.0] {
        let person = Person::salaried_faculty("Ana", "P1", salary).unwrap();
        assert_eq!(
            person.as_payable().unwrap().compute_pay(),
            Err(InvalidPaymentError::NonPositiveSalary(salary))
        );
    }
}

#[test]
fn hourly_pay_is_exact_product_when_positive() {
    let cases = [(10, 20.0, true), (1, 0.5, true), (0, 50.0, false), (8, -3.0, false)];
    for (hours, rate, valid) in cases {
        let person = Person::hourly_faculty("Leo", "P2", hours, rate).unwrap();
        let result = person.as_payable().unwrap().compute_pay();
        let expected = f64::from(hours) * rate;
        if valid {
            assert_eq!(result, Ok(expected));
        } else {
            assert_eq!(result, Err(InvalidPaymentError::NonPositiveTotal(expected)));
        }
    }
}

#[test]
fn add_grade_grows_history_by_one_only_when_in_range() {
    let mut person = Person::student("Max", "S1").unwrap();
    let student = person.as_student_mut().unwrap();

    for (grade, accepted) in [(5.0, true), (10.5, false), (0.0, true), (-1.0, false), (5.0, true)] {
        let before = student.grades().len();
        let outcome = student.add_grade(grade);
        assert_eq!(outcome.is_added(), accepted);
        assert_eq!(student.grades().len(), before + usize::from(accepted));
    }
    assert_eq!(student.grades(), &[5.0, 0.0, 5.0]);
}

#[test]
fn average_fails_without_grades_and_matches_mean_otherwise() {
    let mut person = Person::student("Max", "S1").unwrap();
    assert_eq!(
        person.as_gradable().unwrap().compute_average(),
        Err(InvalidAverageError)
    );

    let student = person.as_student_mut().unwrap();
    for grade in [8.0, 6.0, 10.0] {
        assert_eq!(student.add_grade(grade), GradeOutcome::Added(grade));
    }
    assert_eq!(student.compute_average(), Ok(8.0));
}

#[test]
fn person_serialization_uses_expected_wire_fields() {
    let person_id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
    let person = Person::with_id(
        person_id,
        "Leo",
        "P2",
        PersonRole::HourlyFaculty(coursebook_core::HourlyFaculty {
            hours_worked: 10,
            hourly_rate: 20.0,
        }),
    )
    .unwrap();

    let json = serde_json::to_value(&person).unwrap();
    assert_eq!(json["uuid"], person_id.to_string());
    assert_eq!(json["kind"], "hourly_faculty");
    assert_eq!(json["name"], "Leo");
    assert_eq!(json["identifier"], "P2");
    assert_eq!(json["hours_worked"], 10);
    assert_eq!(json["hourly_rate"], 20.0);

    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, person);
}

#[test]
fn deserialize_rejects_blank_identifier() {
    let value = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "name": "Max",
        "identifier": "  ",
        "kind": "student",
        "grades": []
    });

    let err = serde_json::from_value::<Person>(value).unwrap_err();
    assert!(
        err.to_string().contains("identifier must not be blank"),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_rejects_out_of_range_grades() {
    let value = serde_json::json!({
        "uuid": "11111111-2222-4333-8444-555555555555",
        "name": "Max",
        "identifier": "S1",
        "kind": "student",
        "grades": [7.0, 42.0, -3.0]
    });

    let err = serde_json::from_value::<Person>(value).unwrap_err();
    assert!(
        err.to_string()
            .contains("grade at position 1 must be between 0 and 10"),
        "unexpected error: {err}"
    );
}

#[test]
fn student_roundtrip_keeps_valid_grades() {
    let mut person = Person::student("Max", "S1").unwrap();
    for grade in [0.0, 8.5, 10.0] {
        person.as_student_mut().unwrap().add_grade(grade);
    }

    let json = serde_json::to_value(&person).unwrap();
    let decoded: Person = serde_json::from_value(json).unwrap();
    assert_eq!(decoded.as_student().unwrap().grades(), &[0.0, 8.5, 10.0]);
}

#[test]
fn deserialize_course_rejects_blank_title() {
    let value = serde_json::json!({
        "uuid": "aaaaaaaa-2222-4333-8444-555555555555",
        "title": "  ",
        "instructor": "11111111-2222-4333-8444-555555555555",
        "roster": []
    });

    let err = serde_json::from_value::<Course>(value).unwrap_err();
    assert!(
        err.to_string().contains(&CourseError::BlankTitle.to_string()),
        "unexpected error: {err}"
    );
}

#[test]
fn deserialize_course_rejects_duplicate_roster_entries() {
    let student = "22222222-2222-4333-8444-555555555555";
    let value = serde_json::json!({
        "uuid": "aaaaaaaa-2222-4333-8444-555555555555",
        "title": "Algebra",
        "instructor": "11111111-2222-4333-8444-555555555555",
        "roster": [student, student]
    });

    let err = serde_json::from_value::<Course>(value).unwrap_err();
    assert!(
        err.to_string().contains("more than once in roster"),
        "unexpected error: {err}"
    );
}

#[test]
fn course_roundtrip_preserves_roster_order() {
    let ana = Person::salaried_faculty("Ana", "P1", 1500.0).unwrap();
    let max = Person::student("Max", "S1").unwrap();
    let zoe = Person::student("Zoe", "S2").unwrap();
    let mut course = Course::new("Algebra", &ana).unwrap();
    course.add_student(&zoe).unwrap();
    course.add_student(&max).unwrap();

    let json = serde_json::to_value(&course).unwrap();
    let decoded: Course = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, course);
    assert_eq!(decoded.roster(), &[zoe.uuid(), max.uuid()]);
}

#[test]
fn with_id_rejects_nil_uuid() {
    let err = Person::with_id(Uuid::nil(), "Max", "S1", PersonRole::Student(Default::default()))
        .unwrap_err();
    assert_eq!(err, PersonValidationError::NilUuid);
}
