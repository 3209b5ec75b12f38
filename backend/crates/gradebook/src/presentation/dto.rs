//! API DTOs (Data Transfer Objects)

use kernel::id::{GradeId, RegistrationId, StudentId};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Grade, Module, Registration, Student};
use crate::domain::services::GradeDistribution;

// ============================================================================
// Requests
// ============================================================================

/// Request for POST /grades/addGrade and /students/studentDetail/addGrade
///
/// The web front end posts every field as a string.
#[derive(Debug, Clone, Deserialize)]
pub struct AddGradeRequest {
    #[serde(alias = "studentId", deserialize_with = "lenient_i64")]
    pub student_id: i64,
    #[serde(alias = "moduleCode")]
    pub module_code: String,
    #[serde(deserialize_with = "lenient_i32")]
    pub score: i32,
}

/// Request for POST /students/studentDetail/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    #[serde(alias = "studentId", deserialize_with = "lenient_i64")]
    pub student_id: i64,
    #[serde(alias = "moduleCode")]
    pub module_code: String,
}

/// Request for POST /students
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    #[serde(deserialize_with = "lenient_i64")]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

/// Request for POST /modules
#[derive(Debug, Clone, Deserialize)]
pub struct CreateModuleRequest {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub mnc: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(i64),
    Text(String),
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid integer: {:?}", s))),
    }
}

fn lenient_i32<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_i64(deserializer)?;
    i32::try_from(value).map_err(|_| de::Error::custom(format!("integer out of range: {}", value)))
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResponse {
    pub code: String,
    pub name: String,
    pub mnc: bool,
}

impl From<&Module> for ModuleResponse {
    fn from(module: &Module) -> Self {
        Self {
            code: module.code.to_string(),
            name: module.name.clone(),
            mnc: module.mnc,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            username: student.username.clone(),
            email: student.email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub id: Option<RegistrationId>,
    pub student_id: StudentId,
    pub module: ModuleResponse,
}

impl From<&Registration> for RegistrationResponse {
    fn from(registration: &Registration) -> Self {
        Self {
            id: registration.id(),
            student_id: registration.student_id(),
            module: registration.module().into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResponse {
    pub id: Option<GradeId>,
    pub student_id: StudentId,
    pub module: ModuleResponse,
    pub score: i32,
}

impl From<&Grade> for GradeResponse {
    fn from(grade: &Grade) -> Self {
        Self {
            id: grade.id(),
            student_id: grade.student_id(),
            module: grade.module().into(),
            score: grade.score().value(),
        }
    }
}

/// Response for GET /modules/moduleDetails/{moduleCode}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDetailsResponse {
    pub students: Vec<StudentResponse>,
    pub total_grades: u32,
    /// `null` when no registered student is graded
    pub average: Option<f64>,
    pub pie_chart: GradeDistribution,
    pub module: ModuleResponse,
}

/// Response for GET /students/studentDetail/{id}
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetailsResponse {
    pub student: StudentResponse,
    pub registered_modules: Vec<ModuleResponse>,
    pub grades: Vec<GradeResponse>,
}

/// Response for GET /students/studentDetail/computeAverage/{id}
#[derive(Debug, Clone, Serialize)]
pub struct AverageResponse {
    pub average: f64,
}
