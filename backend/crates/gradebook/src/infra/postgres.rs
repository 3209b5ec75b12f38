//! PostgreSQL Repository Implementation

use std::collections::HashMap;

use kernel::id::{GradeId, RegistrationId, StudentId};
use sqlx::PgPool;

use crate::domain::entity::{Grade, Module, Registration, Student};
use crate::domain::repository::{
    GradeReplacement, GradeRepository, ModuleRepository, RegistrationRepository,
    StudentRepository,
};
use crate::domain::value_object::{Email, ModuleCode, Score};
use crate::error::GradebookResult;

/// PostgreSQL-backed gradebook repository
#[derive(Clone)]
pub struct PgGradebookRepository {
    pool: PgPool,
}

impl PgGradebookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Registrations and grades for the given students, grouped by owner
    async fn load_children(
        &self,
        student_ids: &[i64],
    ) -> GradebookResult<HashMap<i64, (Vec<Registration>, Vec<Grade>)>> {
        let registrations = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT
                r.registration_id,
                r.student_id,
                m.module_code,
                m.module_name,
                m.mnc
            FROM registrations r
            JOIN modules m ON m.module_code = r.module_code
            WHERE r.student_id = ANY($1)
            ORDER BY r.registration_id
            "#,
        )
        .bind(student_ids)
        .fetch_all(&self.pool)
        .await?;

        let grades = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT
                g.grade_id,
                g.student_id,
                m.module_code,
                m.module_name,
                m.mnc,
                g.score
            FROM grades g
            JOIN modules m ON m.module_code = g.module_code
            WHERE g.student_id = ANY($1)
            ORDER BY g.grade_id
            "#,
        )
        .bind(student_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut children: HashMap<i64, (Vec<Registration>, Vec<Grade>)> = HashMap::new();
        for row in registrations {
            children
                .entry(row.student_id)
                .or_default()
                .0
                .push(row.into_registration());
        }
        for row in grades {
            children
                .entry(row.student_id)
                .or_default()
                .1
                .push(row.into_grade());
        }

        Ok(children)
    }
}

// ============================================================================
// Student Repository Implementation
// ============================================================================

impl StudentRepository for PgGradebookRepository {
    async fn create(&self, student: &Student) -> GradebookResult<()> {
        sqlx::query(
            r#"
            INSERT INTO students (
                student_id,
                first_name,
                last_name,
                username,
                email
            ) VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(student.id().get())
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.username)
        .bind(student.email.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, student_id: StudentId) -> GradebookResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT
                student_id,
                first_name,
                last_name,
                username,
                email
            FROM students
            WHERE student_id = $1
            "#,
        )
        .bind(student_id.get())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let (registrations, grades) = self
            .load_children(&[row.student_id])
            .await?
            .remove(&row.student_id)
            .unwrap_or_default();

        Ok(Some(row.into_student().restore(registrations, grades)))
    }

    async fn list(&self) -> GradebookResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT
                student_id,
                first_name,
                last_name,
                username,
                email
            FROM students
            ORDER BY student_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<i64> = rows.iter().map(|r| r.student_id).collect();
        let mut children = self.load_children(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let (registrations, grades) =
                    children.remove(&row.student_id).unwrap_or_default();
                row.into_student().restore(registrations, grades)
            })
            .collect())
    }

    async fn exists_by_id(&self, student_id: StudentId) -> GradebookResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE student_id = $1)",
        )
        .bind(student_id.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_username(&self, username: &str) -> GradebookResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &Email) -> GradebookResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM students WHERE email = $1)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn delete(&self, student_id: StudentId) -> GradebookResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM grades WHERE student_id = $1")
            .bind(student_id.get())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM registrations WHERE student_id = $1")
            .bind(student_id.get())
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM students WHERE student_id = $1")
            .bind(student_id.get())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        Ok(deleted > 0)
    }
}

// ============================================================================
// Module Repository Implementation
// ============================================================================

impl ModuleRepository for PgGradebookRepository {
    async fn create(&self, module: &Module) -> GradebookResult<()> {
        sqlx::query(
            r#"
            INSERT INTO modules (
                module_code,
                module_name,
                mnc
            ) VALUES ($1, $2, $3)
            "#,
        )
        .bind(module.code.as_str())
        .bind(&module.name)
        .bind(module.mnc)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_code(&self, code: &ModuleCode) -> GradebookResult<Option<Module>> {
        let row = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT
                module_code,
                module_name,
                mnc
            FROM modules
            WHERE module_code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ModuleRow::into_module))
    }

    async fn list(&self) -> GradebookResult<Vec<Module>> {
        let rows = sqlx::query_as::<_, ModuleRow>(
            r#"
            SELECT
                module_code,
                module_name,
                mnc
            FROM modules
            ORDER BY module_code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ModuleRow::into_module).collect())
    }

    async fn is_referenced(&self, code: &ModuleCode) -> GradebookResult<bool> {
        let referenced = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT
                EXISTS(SELECT 1 FROM registrations WHERE module_code = $1)
                OR EXISTS(SELECT 1 FROM grades WHERE module_code = $1)
            "#,
        )
        .bind(code.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(referenced)
    }

    async fn delete(&self, code: &ModuleCode) -> GradebookResult<bool> {
        // Foreign keys reject the delete while references remain
        let deleted = sqlx::query("DELETE FROM modules WHERE module_code = $1")
            .bind(code.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Registration Repository Implementation
// ============================================================================

impl RegistrationRepository for PgGradebookRepository {
    async fn create(&self, registration: &Registration) -> GradebookResult<Registration> {
        let registration_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO registrations (
                student_id,
                module_code
            ) VALUES ($1, $2)
            RETURNING registration_id
            "#,
        )
        .bind(registration.student_id().get())
        .bind(registration.module().code.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(registration
            .clone()
            .with_id(RegistrationId::new(registration_id)))
    }

    async fn find_by_module_and_student(
        &self,
        code: &ModuleCode,
        student_id: StudentId,
    ) -> GradebookResult<Option<Registration>> {
        let row = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT
                r.registration_id,
                r.student_id,
                m.module_code,
                m.module_name,
                m.mnc
            FROM registrations r
            JOIN modules m ON m.module_code = r.module_code
            WHERE r.module_code = $1 AND r.student_id = $2
            "#,
        )
        .bind(code.as_str())
        .bind(student_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RegistrationRow::into_registration))
    }

    async fn find_by_module(&self, code: &ModuleCode) -> GradebookResult<Vec<Registration>> {
        let rows = sqlx::query_as::<_, RegistrationRow>(
            r#"
            SELECT
                r.registration_id,
                r.student_id,
                m.module_code,
                m.module_name,
                m.mnc
            FROM registrations r
            JOIN modules m ON m.module_code = r.module_code
            WHERE r.module_code = $1
            ORDER BY r.registration_id
            "#,
        )
        .bind(code.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(RegistrationRow::into_registration)
            .collect())
    }

    async fn withdraw(
        &self,
        registration_id: RegistrationId,
        grade_id: Option<GradeId>,
    ) -> GradebookResult<()> {
        let mut tx = self.pool.begin().await?;

        if let Some(grade_id) = grade_id {
            sqlx::query("DELETE FROM grades WHERE grade_id = $1")
                .bind(grade_id.get())
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM registrations WHERE registration_id = $1")
            .bind(registration_id.get())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

// ============================================================================
// Grade Repository Implementation
// ============================================================================

impl GradeRepository for PgGradebookRepository {
    async fn find_by_id(&self, grade_id: GradeId) -> GradebookResult<Option<Grade>> {
        let row = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT
                g.grade_id,
                g.student_id,
                m.module_code,
                m.module_name,
                m.mnc,
                g.score
            FROM grades g
            JOIN modules m ON m.module_code = g.module_code
            WHERE g.grade_id = $1
            "#,
        )
        .bind(grade_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GradeRow::into_grade))
    }

    async fn find_by_module_and_student(
        &self,
        code: &ModuleCode,
        student_id: StudentId,
    ) -> GradebookResult<Option<Grade>> {
        let row = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT
                g.grade_id,
                g.student_id,
                m.module_code,
                m.module_name,
                m.mnc,
                g.score
            FROM grades g
            JOIN modules m ON m.module_code = g.module_code
            WHERE g.module_code = $1 AND g.student_id = $2
            "#,
        )
        .bind(code.as_str())
        .bind(student_id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(GradeRow::into_grade))
    }

    async fn list(&self) -> GradebookResult<Vec<Grade>> {
        let rows = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT
                g.grade_id,
                g.student_id,
                m.module_code,
                m.module_name,
                m.mnc,
                g.score
            FROM grades g
            JOIN modules m ON m.module_code = g.module_code
            ORDER BY g.grade_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GradeRow::into_grade).collect())
    }

    async fn replace(&self, grade: &Grade) -> GradebookResult<GradeReplacement> {
        let mut tx = self.pool.begin().await?;

        let replaced = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM grades
            WHERE student_id = $1 AND module_code = $2
            RETURNING grade_id
            "#,
        )
        .bind(grade.student_id().get())
        .bind(grade.module().code.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let grade_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO grades (
                student_id,
                module_code,
                score
            ) VALUES ($1, $2, $3)
            RETURNING grade_id
            "#,
        )
        .bind(grade.student_id().get())
        .bind(grade.module().code.as_str())
        .bind(grade.score().value())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(GradeReplacement {
            grade: grade.clone().with_id(GradeId::new(grade_id)),
            replaced: replaced.map(GradeId::new),
        })
    }

    async fn delete(&self, grade_id: GradeId) -> GradebookResult<bool> {
        let deleted = sqlx::query("DELETE FROM grades WHERE grade_id = $1")
            .bind(grade_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct StudentRow {
    student_id: i64,
    first_name: String,
    last_name: String,
    username: String,
    email: String,
}

impl StudentRow {
    fn into_student(self) -> Student {
        Student::new(
            StudentId::new(self.student_id),
            self.first_name,
            self.last_name,
            self.username,
            Email::from_db(self.email),
        )
    }
}

#[derive(sqlx::FromRow)]
struct ModuleRow {
    module_code: String,
    module_name: String,
    mnc: bool,
}

impl ModuleRow {
    fn into_module(self) -> Module {
        Module::new(ModuleCode::from_db(self.module_code), self.module_name, self.mnc)
    }
}

#[derive(sqlx::FromRow)]
struct RegistrationRow {
    registration_id: i64,
    student_id: i64,
    module_code: String,
    module_name: String,
    mnc: bool,
}

impl RegistrationRow {
    fn into_registration(self) -> Registration {
        Registration::restore(
            RegistrationId::new(self.registration_id),
            StudentId::new(self.student_id),
            Module::new(ModuleCode::from_db(self.module_code), self.module_name, self.mnc),
        )
    }
}

#[derive(sqlx::FromRow)]
struct GradeRow {
    grade_id: i64,
    student_id: i64,
    module_code: String,
    module_name: String,
    mnc: bool,
    score: i32,
}

impl GradeRow {
    fn into_grade(self) -> Grade {
        Grade::restore(
            GradeId::new(self.grade_id),
            StudentId::new(self.student_id),
            Module::new(ModuleCode::from_db(self.module_code), self.module_name, self.mnc),
            Score::from_db(self.score),
        )
    }
}
