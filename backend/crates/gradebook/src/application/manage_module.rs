//! Manage Module Use Case
//!
//! Create, read and delete modules.

use std::sync::Arc;

use crate::domain::entity::Module;
use crate::domain::repository::ModuleRepository;
use crate::domain::value_object::ModuleCode;
use crate::error::{GradebookError, GradebookResult};

/// Maximum module name length
const MODULE_NAME_MAX_LENGTH: usize = 255;

/// Create module input
pub struct CreateModuleInput {
    pub code: String,
    pub name: String,
    pub mnc: bool,
}

pub struct ManageModuleUseCase<M>
where
    M: ModuleRepository,
{
    module_repo: Arc<M>,
}

impl<M> ManageModuleUseCase<M>
where
    M: ModuleRepository,
{
    pub fn new(module_repo: Arc<M>) -> Self {
        Self { module_repo }
    }

    pub async fn create(&self, input: CreateModuleInput) -> GradebookResult<Module> {
        let code = ModuleCode::new(input.code)?;
        let name = input.name.trim();
        if name.is_empty() {
            return Err(GradebookError::Validation(
                "Module name cannot be empty".to_string(),
            ));
        }
        if name.chars().count() > MODULE_NAME_MAX_LENGTH {
            return Err(GradebookError::Validation(format!(
                "Module name must be at most {} characters",
                MODULE_NAME_MAX_LENGTH
            )));
        }

        if self.module_repo.find_by_code(&code).await?.is_some() {
            return Err(GradebookError::ModuleExists(code.to_string()));
        }

        let module = Module::new(code, name, input.mnc);
        self.module_repo.create(&module).await?;

        tracing::info!(module_code = %module.code, mnc = module.mnc, "Module created");

        Ok(module)
    }

    pub async fn list(&self) -> GradebookResult<Vec<Module>> {
        self.module_repo.list().await
    }

    pub async fn get(&self, module_code: String) -> GradebookResult<Module> {
        let code = ModuleCode::new(module_code.clone())
            .map_err(|_| GradebookError::ModuleNotFound(module_code))?;
        self.module_repo
            .find_by_code(&code)
            .await?
            .ok_or_else(|| GradebookError::ModuleNotFound(code.to_string()))
    }

    /// Modules still referenced by registrations or grades are kept
    pub async fn delete(&self, module_code: String) -> GradebookResult<()> {
        let module = self.get(module_code).await?;

        if self.module_repo.is_referenced(&module.code).await? {
            return Err(GradebookError::ModuleInUse(module.code.to_string()));
        }

        if !self.module_repo.delete(&module.code).await? {
            return Err(GradebookError::ModuleNotFound(module.code.to_string()));
        }

        tracing::info!(module_code = %module.code, "Module deleted");

        Ok(())
    }
}
