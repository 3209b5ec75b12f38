//! Unit tests for the gradebook crate
//! Use cases run against the in-memory store; HTTP tests drive the router.

#[cfg(test)]
mod fixtures {
    use std::sync::Arc;

    use crate::application::*;
    use crate::domain::entity::{Grade, Registration};
    use crate::infra::memory::InMemoryGradebookRepository;

    pub type Repo = Arc<InMemoryGradebookRepository>;

    pub fn repo() -> Repo {
        Arc::new(InMemoryGradebookRepository::new())
    }

    pub async fn student(repo: &Repo, id: i64) {
        ManageStudentUseCase::new(repo.clone())
            .create(CreateStudentInput {
                id,
                first_name: format!("First{}", id),
                last_name: format!("Last{}", id),
                username: format!("student{}", id),
                email: format!("student{}@ucl.ac.uk", id),
            })
            .await
            .unwrap();
    }

    pub async fn module(repo: &Repo, code: &str) {
        ManageModuleUseCase::new(repo.clone())
            .create(CreateModuleInput {
                code: code.to_string(),
                name: "Software Engineering".to_string(),
                mnc: false,
            })
            .await
            .unwrap();
    }

    pub async fn register(repo: &Repo, student_id: i64, code: &str) -> Registration {
        RegisterStudentUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(RegisterStudentInput {
                student_id,
                module_code: code.to_string(),
            })
            .await
            .unwrap()
    }

    pub async fn grade(repo: &Repo, student_id: i64, code: &str, score: i32) -> Grade {
        AddGradeUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(AddGradeInput {
                student_id,
                module_code: code.to_string(),
                score,
            })
            .await
            .unwrap()
    }
}

#[cfg(test)]
mod use_case_tests {
    use super::fixtures::{self, grade, module, register, repo, student};
    use crate::application::*;
    use crate::domain::repository::{GradeRepository, ModuleRepository};
    use crate::domain::services::GradeBand;
    use crate::domain::value_object::ModuleCode;
    use crate::error::GradebookError;
    use kernel::id::{GradeId, StudentId};

    fn code(value: &str) -> ModuleCode {
        ModuleCode::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_grade_keeps_single_latest_grade() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;

        let first = grade(&repo, 1, "COMP0010", 50).await;
        let second = grade(&repo, 1, "COMP0010", 80).await;
        assert_ne!(first.id(), second.id());

        let grades = GradeRepository::list(&*repo).await.unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].score().value(), 80);

        let stored = GradeRepository::find_by_module_and_student(
            &*repo,
            &code("COMP0010"),
            StudentId::new(1),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(stored.id(), second.id());

        let average = ComputeAverageUseCase::new(repo.clone())
            .execute(StudentId::new(1))
            .await
            .unwrap();
        assert_eq!(average, 80.0);
    }

    #[tokio::test]
    async fn test_register_twice_conflicts() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;

        let result = RegisterStudentUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(RegisterStudentInput {
                student_id: 1,
                module_code: "COMP0010".to_string(),
            })
            .await;
        assert!(matches!(result, Err(GradebookError::AlreadyRegistered)));
    }

    #[tokio::test]
    async fn test_register_missing_entities_not_found() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        let use_case = RegisterStudentUseCase::new(repo.clone(), repo.clone(), repo.clone());

        let result = use_case
            .execute(RegisterStudentInput {
                student_id: 99,
                module_code: "COMP0010".to_string(),
            })
            .await;
        assert!(matches!(result, Err(GradebookError::StudentNotFound(_))));

        let result = use_case
            .execute(RegisterStudentInput {
                student_id: 1,
                module_code: "NOPE".to_string(),
            })
            .await;
        assert!(matches!(result, Err(GradebookError::ModuleNotFound(_))));
    }

    #[tokio::test]
    async fn test_grade_without_registration_not_acceptable() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;

        let result = AddGradeUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(AddGradeInput {
                student_id: 1,
                module_code: "COMP0010".to_string(),
                score: 70,
            })
            .await;
        let err = result.unwrap_err();
        assert!(matches!(err, GradebookError::NotRegistered));
        assert_eq!(err.status_code().as_u16(), 406);
        assert!(GradeRepository::list(&*repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_grade_out_of_range_rejected() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;

        let use_case = AddGradeUseCase::new(repo.clone(), repo.clone(), repo.clone());
        for score in [-1, 101] {
            let result = use_case
                .execute(AddGradeInput {
                    student_id: 1,
                    module_code: "COMP0010".to_string(),
                    score,
                })
                .await;
            assert!(matches!(result, Err(GradebookError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_grade_missing_student_not_found() {
        let repo = repo();
        module(&repo, "COMP0010").await;

        let result = AddGradeUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(AddGradeInput {
                student_id: 5,
                module_code: "COMP0010".to_string(),
                score: 70,
            })
            .await;
        assert!(matches!(result, Err(GradebookError::StudentNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_grade_twice_not_found() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;
        let grade = grade(&repo, 1, "COMP0010", 65).await;
        let grade_id = grade.id().unwrap();

        let use_case = DeleteGradeUseCase::new(repo.clone());
        use_case.execute(grade_id).await.unwrap();
        let result = use_case.execute(grade_id).await;
        assert!(matches!(result, Err(GradebookError::GradeNotFound(_))));

        let result = ListGradesUseCase::new(repo.clone())
            .get(GradeId::new(12345))
            .await;
        assert!(matches!(result, Err(GradebookError::GradeNotFound(_))));
    }

    #[tokio::test]
    async fn test_module_details_statistics() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        let scores = [35, 45, 55, 65, 75];
        for (i, score) in scores.iter().enumerate() {
            let id = i as i64 + 1;
            student(&repo, id).await;
            register(&repo, id, "COMP0010").await;
            grade(&repo, id, "COMP0010", *score).await;
        }
        // Registered but ungraded
        student(&repo, 6).await;
        register(&repo, 6, "COMP0010").await;

        let output = ModuleDetailsUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute("COMP0010".to_string())
            .await
            .unwrap();

        assert_eq!(output.students.len(), 6);
        assert_eq!(output.statistics.total_grades(), 5);
        assert_eq!(output.statistics.average(), Some(55.0));
        for band in GradeBand::ALL {
            assert_eq!(output.statistics.distribution().count(band), 1);
        }
    }

    #[tokio::test]
    async fn test_module_details_without_grades_has_no_average() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;

        let output = ModuleDetailsUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute("COMP0010".to_string())
            .await
            .unwrap();
        assert_eq!(output.students.len(), 1);
        assert_eq!(output.statistics.total_grades(), 0);
        assert_eq!(output.statistics.average(), None);

        let result = ModuleDetailsUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute("MISSING".to_string())
            .await;
        assert!(matches!(result, Err(GradebookError::ModuleNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_registration_removes_only_matching_grade() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        module(&repo, "COMP0020").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;
        register(&repo, 1, "COMP0020").await;
        grade(&repo, 1, "COMP0010", 60).await;

        // No grade for COMP0020: the COMP0010 grade must survive
        DeleteRegistrationUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(StudentId::new(1), "COMP0020".to_string())
            .await
            .unwrap();

        let details = StudentDetailsUseCase::new(repo.clone())
            .execute(StudentId::new(1))
            .await
            .unwrap();
        assert_eq!(details.student.registrations().len(), 1);
        assert_eq!(details.student.grades().len(), 1);
        assert!(details.student.grades()[0].module().is(&code("COMP0010")));

        DeleteRegistrationUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(StudentId::new(1), "COMP0010".to_string())
            .await
            .unwrap();
        let details = StudentDetailsUseCase::new(repo.clone())
            .execute(StudentId::new(1))
            .await
            .unwrap();
        assert!(details.student.registrations().is_empty());
        assert!(details.student.grades().is_empty());
    }

    #[tokio::test]
    async fn test_delete_registration_twice_not_found() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;

        let use_case = DeleteRegistrationUseCase::new(repo.clone(), repo.clone(), repo.clone());
        use_case
            .execute(StudentId::new(1), "COMP0010".to_string())
            .await
            .unwrap();
        let result = use_case
            .execute(StudentId::new(1), "COMP0010".to_string())
            .await;
        assert!(matches!(
            result,
            Err(GradebookError::RegistrationNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_student_cascades() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        student(&repo, 2).await;
        register(&repo, 1, "COMP0010").await;
        register(&repo, 2, "COMP0010").await;
        grade(&repo, 1, "COMP0010", 40).await;
        grade(&repo, 2, "COMP0010", 90).await;

        let use_case = ManageStudentUseCase::new(repo.clone());
        use_case.delete(StudentId::new(1)).await.unwrap();

        let grades = GradeRepository::list(&*repo).await.unwrap();
        assert_eq!(grades.len(), 1);
        assert_eq!(grades[0].student_id(), StudentId::new(2));

        let output = ModuleDetailsUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute("COMP0010".to_string())
            .await
            .unwrap();
        assert_eq!(output.students.len(), 1);

        let result = use_case.delete(StudentId::new(1)).await;
        assert!(matches!(result, Err(GradebookError::StudentNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_referenced_module_conflicts() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0010").await;

        let use_case = ManageModuleUseCase::new(repo.clone());
        let err = use_case.delete("COMP0010".to_string()).await.unwrap_err();
        assert!(matches!(err, GradebookError::ModuleInUse(_)));
        assert_eq!(err.status_code().as_u16(), 409);

        DeleteRegistrationUseCase::new(repo.clone(), repo.clone(), repo.clone())
            .execute(StudentId::new(1), "COMP0010".to_string())
            .await
            .unwrap();
        use_case.delete("COMP0010".to_string()).await.unwrap();
        assert!(
            ModuleRepository::find_by_code(&*repo, &code("COMP0010"))
                .await
                .unwrap()
                .is_none()
        );

        let result = use_case.delete("COMP0010".to_string()).await;
        assert!(matches!(result, Err(GradebookError::ModuleNotFound(_))));
    }

    #[tokio::test]
    async fn test_create_student_duplicates_conflict() {
        let repo = repo();
        student(&repo, 1).await;
        let use_case = ManageStudentUseCase::new(repo.clone());

        let same_id = use_case
            .create(CreateStudentInput {
                id: 1,
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                username: "ghopper".to_string(),
                email: "grace@ucl.ac.uk".to_string(),
            })
            .await;
        assert!(matches!(same_id, Err(GradebookError::StudentExists(_))));

        let same_username = use_case
            .create(CreateStudentInput {
                id: 2,
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                username: "student1".to_string(),
                email: "grace@ucl.ac.uk".to_string(),
            })
            .await;
        assert!(matches!(same_username, Err(GradebookError::UsernameTaken)));

        let same_email = use_case
            .create(CreateStudentInput {
                id: 2,
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
                username: "ghopper".to_string(),
                email: "STUDENT1@ucl.ac.uk".to_string(),
            })
            .await;
        assert!(matches!(same_email, Err(GradebookError::EmailTaken)));

        let blank = use_case
            .create(CreateStudentInput {
                id: 3,
                first_name: "  ".to_string(),
                last_name: "Hopper".to_string(),
                username: "ghopper".to_string(),
                email: "grace@ucl.ac.uk".to_string(),
            })
            .await;
        assert!(matches!(blank, Err(GradebookError::Validation(_))));
    }

    #[tokio::test]
    async fn test_student_id_is_any_integer() {
        let repo = repo();
        let use_case = ManageStudentUseCase::new(repo.clone());

        for (id, username) in [(0, "zero"), (-7, "negative")] {
            let created = use_case
                .create(CreateStudentInput {
                    id,
                    first_name: "Alan".to_string(),
                    last_name: "Turing".to_string(),
                    username: username.to_string(),
                    email: format!("{}@ucl.ac.uk", username),
                })
                .await
                .unwrap();
            assert_eq!(created.id(), StudentId::new(id));
            assert_eq!(use_case.get(StudentId::new(id)).await.unwrap().username, username);
        }
    }

    #[tokio::test]
    async fn test_create_module_duplicate_conflicts() {
        let repo = repo();
        fixtures::module(&repo, "COMP0010").await;

        let result = ManageModuleUseCase::new(repo.clone())
            .create(CreateModuleInput {
                code: " COMP0010 ".to_string(),
                name: "Again".to_string(),
                mnc: true,
            })
            .await;
        assert!(matches!(result, Err(GradebookError::ModuleExists(_))));
    }

    #[tokio::test]
    async fn test_student_details_lists_registered_modules() {
        let repo = repo();
        module(&repo, "COMP0010").await;
        module(&repo, "COMP0020").await;
        student(&repo, 1).await;
        register(&repo, 1, "COMP0020").await;
        register(&repo, 1, "COMP0010").await;

        let details = StudentDetailsUseCase::new(repo.clone())
            .execute(StudentId::new(1))
            .await
            .unwrap();
        let codes: Vec<&str> = details
            .student
            .registered_modules()
            .iter()
            .map(|m| m.code.as_str())
            .collect();
        assert_eq!(codes, vec!["COMP0020", "COMP0010"]);

        let result = StudentDetailsUseCase::new(repo.clone())
            .execute(StudentId::new(2))
            .await;
        assert!(matches!(result, Err(GradebookError::StudentNotFound(_))));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::error::ERROR_MESSAGE_HEADER;
    use crate::infra::memory::InMemoryGradebookRepository;
    use crate::presentation::router::gradebook_router_generic;

    fn app() -> Router {
        gradebook_router_generic(InMemoryGradebookRepository::new())
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let (status, _, body) = send_raw(app, method, uri, body).await;
        (status, body)
    }

    async fn send_raw(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, axum::http::HeaderMap, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, body)
    }

    async fn seed(app: &Router) {
        let (status, _) = send(
            app,
            "POST",
            "/modules",
            Some(json!({"code": "COMP0010", "name": "SWE", "mnc": false})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            app,
            "POST",
            "/students",
            Some(json!({
                "id": 1,
                "firstName": "Ada",
                "lastName": "Lovelace",
                "username": "alovelace",
                "email": "ada@ucl.ac.uk"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_grading_flow_over_http() {
        let app = app();
        seed(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/students/studentDetail/register",
            Some(json!({"student_id": "1", "module_code": "COMP0010"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["module"]["code"], "COMP0010");
        assert_eq!(body["studentId"], 1);

        let (status, body) = send(
            &app,
            "POST",
            "/grades/addGrade",
            Some(json!({"student_id": "1", "module_code": "COMP0010", "score": "50"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 50);

        let (status, _) = send(
            &app,
            "POST",
            "/students/studentDetail/addGrade",
            Some(json!({"student_id": 1, "module_code": "COMP0010", "score": 80})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", "/grades", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["score"], 80);

        let (status, body) = send(&app, "GET", "/students/studentDetail/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["student"]["username"], "alovelace");
        assert_eq!(body["registeredModules"][0]["code"], "COMP0010");
        assert_eq!(body["grades"][0]["score"], 80);

        let (status, body) =
            send(&app, "GET", "/students/studentDetail/computeAverage/1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["average"], 80.0);

        let (status, body) = send(&app, "GET", "/modules/moduleDetails/COMP0010", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalGrades"], 1);
        assert_eq!(body["average"], 80.0);
        assert_eq!(body["pieChart"]["70-100"], 1);
        assert_eq!(body["pieChart"]["0-40"], 0);
        assert_eq!(body["students"][0]["id"], 1);
        assert_eq!(body["module"]["name"], "SWE");
    }

    #[tokio::test]
    async fn test_duplicate_registration_sets_error_message_header() {
        let app = app();
        seed(&app).await;
        let request = json!({"student_id": 1, "module_code": "COMP0010"});

        let (status, _) = send(
            &app,
            "POST",
            "/students/studentDetail/register",
            Some(request.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, headers, body) = send_raw(
            &app,
            "POST",
            "/students/studentDetail/register",
            Some(request),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            headers
                .get(ERROR_MESSAGE_HEADER)
                .and_then(|v| v.to_str().ok()),
            Some("Student is already registered for this module")
        );
        assert_eq!(body["status"], 409);
    }

    #[tokio::test]
    async fn test_unregistered_grade_is_not_acceptable() {
        let app = app();
        seed(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/grades/addGrade",
            Some(json!({"student_id": 1, "module_code": "COMP0010", "score": 70})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_ACCEPTABLE);
        assert_eq!(body["status"], 406);
    }

    #[tokio::test]
    async fn test_missing_entities_not_found() {
        let app = app();
        seed(&app).await;

        for uri in [
            "/grades/42",
            "/modules/NOPE",
            "/modules/moduleDetails/NOPE",
            "/students/99",
            "/students/studentDetail/99",
            "/students/studentDetail/computeAverage/99",
        ] {
            let (status, _) = send(&app, "GET", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "GET {}", uri);
        }

        for uri in [
            "/grades/42",
            "/modules/NOPE",
            "/students/99",
            "/students/studentDetail/registrations/1/COMP0010",
            "/students/studentDetail/registrations/99/COMP0010",
        ] {
            let (status, _) = send(&app, "DELETE", uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "DELETE {}", uri);
        }
    }

    #[tokio::test]
    async fn test_delete_endpoints_return_ok() {
        let app = app();
        seed(&app).await;
        send(
            &app,
            "POST",
            "/students/studentDetail/register",
            Some(json!({"student_id": 1, "module_code": "COMP0010"})),
        )
        .await;
        let (_, grade) = send(
            &app,
            "POST",
            "/grades/addGrade",
            Some(json!({"student_id": 1, "module_code": "COMP0010", "score": 55})),
        )
        .await;
        let grade_uri = format!("/grades/{}", grade["id"]);

        let (status, _) = send(&app, "GET", &grade_uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", &grade_uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", &grade_uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/modules/COMP0010", None).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "DELETE",
            "/students/studentDetail/registrations/1/COMP0010",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "DELETE", "/students/1", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, "DELETE", "/students/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "DELETE", "/modules/COMP0010", None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&app, "DELETE", "/modules/COMP0010", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Module COMP0010 not found");

        let (_, students) = send(&app, "GET", "/students", None).await;
        assert_eq!(students.as_array().map(Vec::len), Some(0));
        let (_, modules) = send(&app, "GET", "/modules", None).await;
        assert_eq!(modules.as_array().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_invalid_create_requests_rejected() {
        let app = app();
        seed(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/modules",
            Some(json!({"code": "COMP 0010", "name": "SWE"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);

        let (status, _) = send(
            &app,
            "POST",
            "/modules",
            Some(json!({"code": "COMP0010", "name": "SWE"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            "POST",
            "/students",
            Some(json!({
                "id": 2,
                "firstName": "Grace",
                "lastName": "Hopper",
                "username": "ghopper",
                "email": "not-an-email"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use kernel::id::{GradeId, StudentId};

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(GradebookError, StatusCode)> = vec![
            (
                GradebookError::StudentNotFound(StudentId::new(1)),
                StatusCode::NOT_FOUND,
            ),
            (
                GradebookError::ModuleNotFound("COMP0010".into()),
                StatusCode::NOT_FOUND,
            ),
            (
                GradebookError::GradeNotFound(GradeId::new(1)),
                StatusCode::NOT_FOUND,
            ),
            (
                GradebookError::RegistrationNotFound {
                    student_id: StudentId::new(1),
                    module_code: "COMP0010".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (GradebookError::AlreadyRegistered, StatusCode::CONFLICT),
            (GradebookError::NotRegistered, StatusCode::NOT_ACCEPTABLE),
            (
                GradebookError::ModuleInUse("COMP0010".into()),
                StatusCode::CONFLICT,
            ),
            (GradebookError::UsernameTaken, StatusCode::CONFLICT),
            (
                GradebookError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                GradebookError::Database(sqlx::Error::RowNotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                GradebookError::Database(sqlx::Error::PoolTimedOut),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                GradebookError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }

    #[test]
    fn test_internal_details_hidden() {
        let app_error = GradebookError::Internal("connection string leaked".into()).into_app_error();
        assert!(!app_error.message().contains("leaked"));
    }

    #[test]
    fn test_database_error_keeps_source_for_logs() {
        use std::error::Error;

        let app_error = GradebookError::Database(sqlx::Error::PoolTimedOut).into_app_error();
        assert_eq!(app_error.status_code(), 503);
        assert_eq!(app_error.message(), "Database connection pool exhausted");
        assert!(app_error.source().is_some());
    }

    #[test]
    fn test_only_duplicate_registration_sets_header() {
        let response = GradebookError::AlreadyRegistered.into_response();
        assert!(response.headers().contains_key(ERROR_MESSAGE_HEADER));

        let response = GradebookError::NotRegistered.into_response();
        assert!(!response.headers().contains_key(ERROR_MESSAGE_HEADER));
    }
}
