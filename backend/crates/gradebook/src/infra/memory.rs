//! In-Memory Repository Implementation
//!
//! Mirrors the PostgreSQL schema constraints: unique (student, module)
//! pairs, unique usernames and emails, and restricted module deletion.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use kernel::id::{GradeId, RegistrationId, StudentId};

use crate::domain::entity::{Grade, Module, Registration, Student};
use crate::domain::repository::{
    GradeReplacement, GradeRepository, ModuleRepository, RegistrationRepository,
    StudentRepository,
};
use crate::domain::value_object::{Email, ModuleCode, Score};
use crate::error::{GradebookError, GradebookResult};

#[derive(Debug, Clone)]
struct StudentRecord {
    first_name: String,
    last_name: String,
    username: String,
    email: Email,
}

#[derive(Debug, Clone)]
struct RegistrationRecord {
    student_id: StudentId,
    module_code: ModuleCode,
}

#[derive(Debug, Clone)]
struct GradeRecord {
    student_id: StudentId,
    module_code: ModuleCode,
    score: Score,
}

#[derive(Debug, Default)]
struct MemoryState {
    students: BTreeMap<StudentId, StudentRecord>,
    modules: BTreeMap<ModuleCode, Module>,
    registrations: BTreeMap<RegistrationId, RegistrationRecord>,
    grades: BTreeMap<GradeId, GradeRecord>,
    last_registration_id: i64,
    last_grade_id: i64,
}

impl MemoryState {
    fn module(&self, code: &ModuleCode) -> GradebookResult<Module> {
        self.modules
            .get(code)
            .cloned()
            .ok_or_else(|| GradebookError::Internal(format!("Dangling module reference {}", code)))
    }

    fn registration(&self, id: RegistrationId, record: &RegistrationRecord) -> GradebookResult<Registration> {
        Ok(Registration::restore(
            id,
            record.student_id,
            self.module(&record.module_code)?,
        ))
    }

    fn grade(&self, id: GradeId, record: &GradeRecord) -> GradebookResult<Grade> {
        Ok(Grade::restore(
            id,
            record.student_id,
            self.module(&record.module_code)?,
            record.score,
        ))
    }

    fn student(&self, id: StudentId, record: &StudentRecord) -> GradebookResult<Student> {
        let registrations = self
            .registrations
            .iter()
            .filter(|(_, r)| r.student_id == id)
            .map(|(rid, r)| self.registration(*rid, r))
            .collect::<GradebookResult<Vec<_>>>()?;
        let grades = self
            .grades
            .iter()
            .filter(|(_, g)| g.student_id == id)
            .map(|(gid, g)| self.grade(*gid, g))
            .collect::<GradebookResult<Vec<_>>>()?;

        Ok(Student::new(
            id,
            record.first_name.clone(),
            record.last_name.clone(),
            record.username.clone(),
            record.email.clone(),
        )
        .restore(registrations, grades))
    }

    fn grade_for(&self, student_id: StudentId, code: &ModuleCode) -> Option<GradeId> {
        self.grades
            .iter()
            .find(|(_, g)| g.student_id == student_id && &g.module_code == code)
            .map(|(id, _)| *id)
    }
}

/// Process-local gradebook store
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGradebookRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryGradebookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> GradebookResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| GradebookError::Internal("In-memory store poisoned".to_string()))
    }
}

// ============================================================================
// Student Repository Implementation
// ============================================================================

impl StudentRepository for InMemoryGradebookRepository {
    async fn create(&self, student: &Student) -> GradebookResult<()> {
        let mut state = self.lock()?;
        let id = student.id();
        if state.students.contains_key(&id) {
            return Err(GradebookError::StudentExists(id));
        }
        if state.students.values().any(|s| s.username == student.username) {
            return Err(GradebookError::UsernameTaken);
        }
        if state.students.values().any(|s| s.email == student.email) {
            return Err(GradebookError::EmailTaken);
        }
        state.students.insert(
            id,
            StudentRecord {
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                username: student.username.clone(),
                email: student.email.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, student_id: StudentId) -> GradebookResult<Option<Student>> {
        let state = self.lock()?;
        state
            .students
            .get(&student_id)
            .map(|record| state.student(student_id, record))
            .transpose()
    }

    async fn list(&self) -> GradebookResult<Vec<Student>> {
        let state = self.lock()?;
        state
            .students
            .iter()
            .map(|(id, record)| state.student(*id, record))
            .collect()
    }

    async fn exists_by_id(&self, student_id: StudentId) -> GradebookResult<bool> {
        Ok(self.lock()?.students.contains_key(&student_id))
    }

    async fn exists_by_username(&self, username: &str) -> GradebookResult<bool> {
        Ok(self
            .lock()?
            .students
            .values()
            .any(|s| s.username == username))
    }

    async fn exists_by_email(&self, email: &Email) -> GradebookResult<bool> {
        Ok(self.lock()?.students.values().any(|s| &s.email == email))
    }

    async fn delete(&self, student_id: StudentId) -> GradebookResult<bool> {
        let mut state = self.lock()?;
        if state.students.remove(&student_id).is_none() {
            return Ok(false);
        }
        state.grades.retain(|_, g| g.student_id != student_id);
        state.registrations.retain(|_, r| r.student_id != student_id);
        Ok(true)
    }
}

// ============================================================================
// Module Repository Implementation
// ============================================================================

impl ModuleRepository for InMemoryGradebookRepository {
    async fn create(&self, module: &Module) -> GradebookResult<()> {
        let mut state = self.lock()?;
        if state.modules.contains_key(&module.code) {
            return Err(GradebookError::ModuleExists(module.code.to_string()));
        }
        state.modules.insert(module.code.clone(), module.clone());
        Ok(())
    }

    async fn find_by_code(&self, code: &ModuleCode) -> GradebookResult<Option<Module>> {
        Ok(self.lock()?.modules.get(code).cloned())
    }

    async fn list(&self) -> GradebookResult<Vec<Module>> {
        Ok(self.lock()?.modules.values().cloned().collect())
    }

    async fn is_referenced(&self, code: &ModuleCode) -> GradebookResult<bool> {
        let state = self.lock()?;
        Ok(state.registrations.values().any(|r| &r.module_code == code)
            || state.grades.values().any(|g| &g.module_code == code))
    }

    async fn delete(&self, code: &ModuleCode) -> GradebookResult<bool> {
        let mut state = self.lock()?;
        let referenced = state.registrations.values().any(|r| &r.module_code == code)
            || state.grades.values().any(|g| &g.module_code == code);
        if referenced {
            return Err(GradebookError::ModuleInUse(code.to_string()));
        }
        Ok(state.modules.remove(code).is_some())
    }
}

// ============================================================================
// Registration Repository Implementation
// ============================================================================

impl RegistrationRepository for InMemoryGradebookRepository {
    async fn create(&self, registration: &Registration) -> GradebookResult<Registration> {
        let mut state = self.lock()?;
        let student_id = registration.student_id();
        let code = &registration.module().code;

        if !state.students.contains_key(&student_id) {
            return Err(GradebookError::StudentNotFound(student_id));
        }
        if !state.modules.contains_key(code) {
            return Err(GradebookError::ModuleNotFound(code.to_string()));
        }
        if state
            .registrations
            .values()
            .any(|r| r.student_id == student_id && &r.module_code == code)
        {
            return Err(GradebookError::AlreadyRegistered);
        }

        state.last_registration_id += 1;
        let id = RegistrationId::new(state.last_registration_id);
        state.registrations.insert(
            id,
            RegistrationRecord {
                student_id,
                module_code: code.clone(),
            },
        );

        Ok(registration.clone().with_id(id))
    }

    async fn find_by_module_and_student(
        &self,
        code: &ModuleCode,
        student_id: StudentId,
    ) -> GradebookResult<Option<Registration>> {
        let state = self.lock()?;
        state
            .registrations
            .iter()
            .find(|(_, r)| r.student_id == student_id && &r.module_code == code)
            .map(|(id, r)| state.registration(*id, r))
            .transpose()
    }

    async fn find_by_module(&self, code: &ModuleCode) -> GradebookResult<Vec<Registration>> {
        let state = self.lock()?;
        state
            .registrations
            .iter()
            .filter(|(_, r)| &r.module_code == code)
            .map(|(id, r)| state.registration(*id, r))
            .collect()
    }

    async fn withdraw(
        &self,
        registration_id: RegistrationId,
        grade_id: Option<GradeId>,
    ) -> GradebookResult<()> {
        let mut state = self.lock()?;
        if let Some(grade_id) = grade_id {
            state.grades.remove(&grade_id);
        }
        state.registrations.remove(&registration_id);
        Ok(())
    }
}

// ============================================================================
// Grade Repository Implementation
// ============================================================================

impl GradeRepository for InMemoryGradebookRepository {
    async fn find_by_id(&self, grade_id: GradeId) -> GradebookResult<Option<Grade>> {
        let state = self.lock()?;
        state
            .grades
            .get(&grade_id)
            .map(|g| state.grade(grade_id, g))
            .transpose()
    }

    async fn find_by_module_and_student(
        &self,
        code: &ModuleCode,
        student_id: StudentId,
    ) -> GradebookResult<Option<Grade>> {
        let state = self.lock()?;
        state
            .grade_for(student_id, code)
            .and_then(|id| state.grades.get(&id).map(|g| state.grade(id, g)))
            .transpose()
    }

    async fn list(&self) -> GradebookResult<Vec<Grade>> {
        let state = self.lock()?;
        state
            .grades
            .iter()
            .map(|(id, g)| state.grade(*id, g))
            .collect()
    }

    async fn replace(&self, grade: &Grade) -> GradebookResult<GradeReplacement> {
        let mut state = self.lock()?;
        let student_id = grade.student_id();
        let code = grade.module().code.clone();

        if !state.students.contains_key(&student_id) {
            return Err(GradebookError::StudentNotFound(student_id));
        }
        if !state.modules.contains_key(&code) {
            return Err(GradebookError::ModuleNotFound(code.to_string()));
        }

        let replaced = state.grade_for(student_id, &code);
        if let Some(old) = replaced {
            state.grades.remove(&old);
        }

        state.last_grade_id += 1;
        let id = GradeId::new(state.last_grade_id);
        state.grades.insert(
            id,
            GradeRecord {
                student_id,
                module_code: code,
                score: grade.score(),
            },
        );

        Ok(GradeReplacement {
            grade: grade.clone().with_id(id),
            replaced,
        })
    }

    async fn delete(&self, grade_id: GradeId) -> GradebookResult<bool> {
        Ok(self.lock()?.grades.remove(&grade_id).is_some())
    }
}
