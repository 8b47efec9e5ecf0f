//! Operation Facade - the seven Things3 operations.
//!
//! Queries: render, execute, decode. Mutations: render, execute, discard
//! output. A mutation succeeds whenever the interpreter exits zero, whether
//! or not any to-do carried the given title.

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::decode::decode_records;
use crate::error::Result;
use crate::executor::{BridgeConfig, OsaScriptExecutor, ScriptExecutor};
use crate::records::{AreaRecord, ProjectRecord, SelectedTodoRecord, TaskRecord};
use crate::script::{self, Script};

/// The automation bridge.
#[derive(Debug, Clone)]
pub struct ThingsBridge<E = OsaScriptExecutor> {
    executor: E,
    application: String,
}

impl Default for ThingsBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ThingsBridge {
    /// Create a bridge with default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(BridgeConfig::default())
    }

    /// Create with custom configuration.
    #[must_use]
    pub fn with_config(config: BridgeConfig) -> Self {
        Self {
            executor: OsaScriptExecutor::from_config(&config),
            application: config.application,
        }
    }
}

impl<E: ScriptExecutor> ThingsBridge<E> {
    /// Create around any executor.
    #[must_use]
    pub fn with_executor(executor: E, application: &str) -> Self {
        Self {
            executor,
            application: application.to_string(),
        }
    }

    /// The executor in use.
    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Scripting name of the targeted application.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// To-dos in the Inbox, in app order.
    ///
    /// # Errors
    /// [`BridgeError::Execution`](crate::BridgeError::Execution) when the
    /// script fails, [`BridgeError::Decode`](crate::BridgeError::Decode)
    /// when its output is not a record array.
    pub fn get_inbox_tasks(&self) -> Result<Vec<TaskRecord>> {
        self.query("inbox", &script::render_query_inbox_in(&self.application))
    }

    /// To-dos in Today, each with a `start_date`.
    ///
    /// # Errors
    /// Same as [`Self::get_inbox_tasks`].
    pub fn get_todays_tasks(&self) -> Result<Vec<TaskRecord>> {
        self.query("today", &script::render_query_today_in(&self.application))
    }

    /// All projects.
    ///
    /// # Errors
    /// Same as [`Self::get_inbox_tasks`].
    pub fn get_projects(&self) -> Result<Vec<ProjectRecord>> {
        self.query(
            "projects",
            &script::render_query_projects_in(&self.application),
        )
    }

    /// All areas.
    ///
    /// # Errors
    /// Same as [`Self::get_inbox_tasks`].
    pub fn get_areas(&self) -> Result<Vec<AreaRecord>> {
        self.query("areas", &script::render_query_areas_in(&self.application))
    }

    /// To-dos selected in the app window.
    ///
    /// # Errors
    /// Same as [`Self::get_inbox_tasks`].
    pub fn get_current_selected_todos(&self) -> Result<Vec<SelectedTodoRecord>> {
        self.query(
            "selected",
            &script::render_query_selected_in(&self.application),
        )
    }

    /// Move every to-do titled `task_title` into `project_title`.
    ///
    /// All to-dos sharing the title are moved; none matching is not an error.
    ///
    /// # Errors
    /// [`BridgeError::Execution`](crate::BridgeError::Execution) when the
    /// script fails, e.g. the project does not exist.
    pub fn assign_project(&self, task_title: &str, project_title: &str) -> Result<()> {
        self.mutate(
            "assign_project",
            &script::render_assign_project_in(&self.application, task_title, project_title),
        )
    }

    /// Move every to-do titled `task_title` into `area_title`.
    ///
    /// # Errors
    /// Same as [`Self::assign_project`].
    pub fn assign_area(&self, task_title: &str, area_title: &str) -> Result<()> {
        self.mutate(
            "assign_area",
            &script::render_assign_area_in(&self.application, task_title, area_title),
        )
    }

    /// Replace the tags of every to-do titled `task_title`.
    ///
    /// # Errors
    /// Same as [`Self::assign_project`].
    pub fn set_tags<S: AsRef<str>>(&self, task_title: &str, tags: &[S]) -> Result<()> {
        self.mutate(
            "set_tags",
            &script::render_set_tags_in(&self.application, task_title, tags),
        )
    }

    fn query<T: DeserializeOwned>(&self, operation: &str, script: &Script) -> Result<Vec<T>> {
        let output = self.executor.execute(script)?;
        let records: Vec<T> = decode_records(&output)?;
        debug!(operation, records = records.len(), "query decoded");
        Ok(records)
    }

    fn mutate(&self, operation: &str, script: &Script) -> Result<()> {
        self.executor.execute(script)?;
        let task = script.args.first().map_or("", String::as_str);
        info!(operation, task, "mutation applied");
        Ok(())
    }
}
