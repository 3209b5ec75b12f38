//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::{GradeId, StudentId};

use crate::application::{
    AddGradeInput, AddGradeUseCase, ComputeAverageUseCase, CreateModuleInput, CreateStudentInput,
    DeleteGradeUseCase, DeleteRegistrationUseCase, ListGradesUseCase, ManageModuleUseCase,
    ManageStudentUseCase, ModuleDetailsUseCase, RegisterStudentInput, RegisterStudentUseCase,
    StudentDetailsUseCase,
};
use crate::domain::repository::GradebookStore;
use crate::error::GradebookResult;
use crate::presentation::dto::{
    AddGradeRequest, AverageResponse, CreateModuleRequest, CreateStudentRequest, GradeResponse,
    ModuleDetailsResponse, ModuleResponse, RegisterRequest, RegistrationResponse,
    StudentDetailsResponse, StudentResponse,
};

/// Shared state for gradebook handlers
#[derive(Clone)]
pub struct GradebookAppState<R>
where
    R: GradebookStore,
{
    pub repo: Arc<R>,
}

// ============================================================================
// Grades
// ============================================================================

/// POST /grades/addGrade
/// POST /students/studentDetail/addGrade
pub async fn add_grade<R>(
    State(state): State<GradebookAppState<R>>,
    Json(req): Json<AddGradeRequest>,
) -> GradebookResult<Json<GradeResponse>>
where
    R: GradebookStore,
{
    let use_case =
        AddGradeUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    let grade = use_case
        .execute(AddGradeInput {
            student_id: req.student_id,
            module_code: req.module_code,
            score: req.score,
        })
        .await?;

    Ok(Json(GradeResponse::from(&grade)))
}

/// GET /grades
pub async fn list_grades<R>(
    State(state): State<GradebookAppState<R>>,
) -> GradebookResult<Json<Vec<GradeResponse>>>
where
    R: GradebookStore,
{
    let grades = ListGradesUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(grades.iter().map(GradeResponse::from).collect()))
}

/// GET /grades/{id}
pub async fn get_grade<R>(
    State(state): State<GradebookAppState<R>>,
    Path(id): Path<i64>,
) -> GradebookResult<Json<GradeResponse>>
where
    R: GradebookStore,
{
    let grade = ListGradesUseCase::new(state.repo.clone())
        .get(GradeId::new(id))
        .await?;
    Ok(Json(GradeResponse::from(&grade)))
}

/// DELETE /grades/{id}
pub async fn delete_grade<R>(
    State(state): State<GradebookAppState<R>>,
    Path(id): Path<i64>,
) -> GradebookResult<StatusCode>
where
    R: GradebookStore,
{
    DeleteGradeUseCase::new(state.repo.clone())
        .execute(GradeId::new(id))
        .await?;
    Ok(StatusCode::OK)
}

// ============================================================================
// Modules
// ============================================================================

/// POST /modules
pub async fn create_module<R>(
    State(state): State<GradebookAppState<R>>,
    Json(req): Json<CreateModuleRequest>,
) -> GradebookResult<(StatusCode, Json<ModuleResponse>)>
where
    R: GradebookStore,
{
    let module = ManageModuleUseCase::new(state.repo.clone())
        .create(CreateModuleInput {
            code: req.code,
            name: req.name,
            mnc: req.mnc,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(ModuleResponse::from(&module))))
}

/// GET /modules
pub async fn list_modules<R>(
    State(state): State<GradebookAppState<R>>,
) -> GradebookResult<Json<Vec<ModuleResponse>>>
where
    R: GradebookStore,
{
    let modules = ManageModuleUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(modules.iter().map(ModuleResponse::from).collect()))
}

/// GET /modules/{code}
pub async fn get_module<R>(
    State(state): State<GradebookAppState<R>>,
    Path(code): Path<String>,
) -> GradebookResult<Json<ModuleResponse>>
where
    R: GradebookStore,
{
    let module = ManageModuleUseCase::new(state.repo.clone()).get(code).await?;
    Ok(Json(ModuleResponse::from(&module)))
}

/// DELETE /modules/{code}
pub async fn delete_module<R>(
    State(state): State<GradebookAppState<R>>,
    Path(code): Path<String>,
) -> GradebookResult<StatusCode>
where
    R: GradebookStore,
{
    ManageModuleUseCase::new(state.repo.clone())
        .delete(code)
        .await?;
    Ok(StatusCode::OK)
}

/// GET /modules/moduleDetails/{moduleCode}
pub async fn module_details<R>(
    State(state): State<GradebookAppState<R>>,
    Path(module_code): Path<String>,
) -> GradebookResult<Json<ModuleDetailsResponse>>
where
    R: GradebookStore,
{
    let use_case =
        ModuleDetailsUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    let output = use_case.execute(module_code).await?;

    Ok(Json(ModuleDetailsResponse {
        students: output.students.iter().map(StudentResponse::from).collect(),
        total_grades: output.statistics.total_grades(),
        average: output.statistics.average(),
        pie_chart: output.statistics.into_distribution(),
        module: ModuleResponse::from(&output.module),
    }))
}

// ============================================================================
// Students
// ============================================================================

/// POST /students
pub async fn create_student<R>(
    State(state): State<GradebookAppState<R>>,
    Json(req): Json<CreateStudentRequest>,
) -> GradebookResult<(StatusCode, Json<StudentResponse>)>
where
    R: GradebookStore,
{
    let student = ManageStudentUseCase::new(state.repo.clone())
        .create(CreateStudentInput {
            id: req.id,
            first_name: req.first_name,
            last_name: req.last_name,
            username: req.username,
            email: req.email,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(StudentResponse::from(&student))))
}

/// GET /students
pub async fn list_students<R>(
    State(state): State<GradebookAppState<R>>,
) -> GradebookResult<Json<Vec<StudentResponse>>>
where
    R: GradebookStore,
{
    let students = ManageStudentUseCase::new(state.repo.clone()).list().await?;
    Ok(Json(students.iter().map(StudentResponse::from).collect()))
}

/// GET /students/{id}
pub async fn get_student<R>(
    State(state): State<GradebookAppState<R>>,
    Path(id): Path<i64>,
) -> GradebookResult<Json<StudentResponse>>
where
    R: GradebookStore,
{
    let student = ManageStudentUseCase::new(state.repo.clone())
        .get(StudentId::new(id))
        .await?;
    Ok(Json(StudentResponse::from(&student)))
}

/// DELETE /students/{id}
pub async fn delete_student<R>(
    State(state): State<GradebookAppState<R>>,
    Path(id): Path<i64>,
) -> GradebookResult<StatusCode>
where
    R: GradebookStore,
{
    ManageStudentUseCase::new(state.repo.clone())
        .delete(StudentId::new(id))
        .await?;
    Ok(StatusCode::OK)
}

/// GET /students/studentDetail/{id}
pub async fn student_details<R>(
    State(state): State<GradebookAppState<R>>,
    Path(id): Path<i64>,
) -> GradebookResult<Json<StudentDetailsResponse>>
where
    R: GradebookStore,
{
    let output = StudentDetailsUseCase::new(state.repo.clone())
        .execute(StudentId::new(id))
        .await?;
    let student = &output.student;

    Ok(Json(StudentDetailsResponse {
        student: StudentResponse::from(student),
        registered_modules: student
            .registered_modules()
            .into_iter()
            .map(ModuleResponse::from)
            .collect(),
        grades: student.grades().iter().map(GradeResponse::from).collect(),
    }))
}

/// POST /students/studentDetail/register
pub async fn register_student<R>(
    State(state): State<GradebookAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> GradebookResult<Json<RegistrationResponse>>
where
    R: GradebookStore,
{
    let use_case =
        RegisterStudentUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    let registration = use_case
        .execute(RegisterStudentInput {
            student_id: req.student_id,
            module_code: req.module_code,
        })
        .await?;

    Ok(Json(RegistrationResponse::from(&registration)))
}

/// GET /students/studentDetail/computeAverage/{id}
pub async fn compute_average<R>(
    State(state): State<GradebookAppState<R>>,
    Path(id): Path<i64>,
) -> GradebookResult<Json<AverageResponse>>
where
    R: GradebookStore,
{
    let average = ComputeAverageUseCase::new(state.repo.clone())
        .execute(StudentId::new(id))
        .await?;
    Ok(Json(AverageResponse { average }))
}

/// DELETE /students/studentDetail/registrations/{studentId}/{moduleCode}
pub async fn delete_registration<R>(
    State(state): State<GradebookAppState<R>>,
    Path((student_id, module_code)): Path<(i64, String)>,
) -> GradebookResult<StatusCode>
where
    R: GradebookStore,
{
    let use_case =
        DeleteRegistrationUseCase::new(state.repo.clone(), state.repo.clone(), state.repo.clone());

    use_case
        .execute(StudentId::new(student_id), module_code)
        .await?;

    Ok(StatusCode::OK)
}
