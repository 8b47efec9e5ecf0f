//! Script Renderer - JavaScript for Automation sources for Things3.
//!
//! Caller-supplied text (task, project and area titles, tags) never becomes
//! part of a script source. It travels as interpreter arguments and the
//! script reads it from `argv`. The only literals spliced into a source are
//! produced here and pass through [`quote_literal`].
//!
//! Query scripts collect plain objects and serialize them with
//! `JSON.stringify`, so an empty collection renders `[]`.

use std::fmt::Write as _;

/// Default scripting name of the host application.
pub const DEFAULT_APPLICATION: &str = "Things3";

/// A rendered script plus the arguments handed to its `run(argv)` handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// JavaScript for Automation source.
    pub source: String,
    /// Positional arguments, passed to the interpreter after the source.
    pub args: Vec<String>,
}

impl Script {
    fn new(source: String) -> Self {
        Self {
            source,
            args: vec![],
        }
    }

    #[must_use]
    fn arg(mut self, value: impl Into<String>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// Quote `value` as a JavaScript string literal.
///
/// JSON string syntax is a subset of JavaScript's, except that U+2028 and
/// U+2029 end a line in older engines, so those are escaped too.
#[must_use]
pub fn quote_literal(value: &str) -> String {
    let encoded = serde_json::Value::String(value.to_owned()).to_string();
    encoded
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029")
}

/// Native collection a query iterates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// To-dos of a built-in list ("Inbox", "Today", ...).
    List(String),
    /// Every project.
    Projects,
    /// Every area.
    Areas,
    /// To-dos selected in the frontmost window.
    SelectedToDos,
}

impl Collection {
    fn expression(&self) -> String {
        match self {
            Self::List(name) => format!("app.lists.byName({}).toDos()", quote_literal(name)),
            Self::Projects => "app.projects()".to_string(),
            Self::Areas => "app.areas()".to_string(),
            Self::SelectedToDos => "app.selectedToDos()".to_string(),
        }
    }
}

/// A record field and how it is read from an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// `name`; required, a failure aborts the script.
    Title,
    /// `notes`.
    Notes,
    /// `dueDate`.
    DueDate,
    /// `startDate`; not every host version exposes it.
    StartDate,
    /// `activationDate`, shown as "When" in the app.
    When,
    /// `tagNames`, already comma-joined by the host.
    Tags,
}

impl Field {
    /// Key used in the emitted record.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Notes => "notes",
            Self::DueDate => "due_date",
            Self::StartDate => "start_date",
            Self::When => "when",
            Self::Tags => "tags",
        }
    }

    fn accessor(self) -> String {
        let property = match self {
            Self::Title => return "String(item.name())".to_string(),
            Self::Notes => "notes",
            Self::DueDate => "dueDate",
            Self::StartDate => "startDate",
            Self::When => "activationDate",
            Self::Tags => "tagNames",
        };
        format!("text(() => item.{property}())")
    }
}

const TASK_FIELDS: &[Field] = &[
    Field::Title,
    Field::Notes,
    Field::DueDate,
    Field::Tags,
    Field::When,
];

const TODAY_FIELDS: &[Field] = &[
    Field::Title,
    Field::Notes,
    Field::DueDate,
    Field::StartDate,
    Field::Tags,
    Field::When,
];

/// Builder for query scripts: one collection, an ordered field list.
#[derive(Debug, Clone)]
pub struct QueryScript {
    application: String,
    collection: Collection,
    fields: Vec<Field>,
}

impl QueryScript {
    /// Start a query over `collection` in the default application.
    #[must_use]
    pub fn new(collection: Collection) -> Self {
        Self {
            application: DEFAULT_APPLICATION.to_string(),
            collection,
            fields: vec![],
        }
    }

    /// Target a differently named application.
    #[must_use]
    pub fn application(mut self, name: &str) -> Self {
        self.application = name.to_string();
        self
    }

    /// Add fields to each emitted record, in order.
    #[must_use]
    pub fn fields(mut self, fields: &[Field]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }

    /// Render the script.
    #[must_use]
    pub fn build(self) -> Script {
        let mut source = String::new();
        source.push_str("function run(argv) {\n");
        let _ = writeln!(
            source,
            "  const app = Application({});",
            quote_literal(&self.application)
        );
        source.push_str(TEXT_HELPER);
        let _ = writeln!(source, "  const items = {};", self.collection.expression());
        source.push_str("  return JSON.stringify(items.map((item) => ({\n");
        for field in &self.fields {
            let _ = writeln!(
                source,
                "    {}: {},",
                quote_literal(field.key()),
                field.accessor()
            );
        }
        source.push_str("  })));\n}\n");
        Script::new(source)
    }
}

/// Reads an optional property; missing values and unsupported properties
/// both become "".
const TEXT_HELPER: &str = "  const text = (read) => {
    try {
      const value = read();
      return value === null || value === undefined ? \"\" : String(value);
    } catch (error) {
      return \"\";
    }
  };
";

/// Render a mutation over every to-do named `argv[0]`.
fn mutation(application: &str, prelude: &str, assignment: &str) -> String {
    format!(
        "function run(argv) {{
  const app = Application({app});
  const taskTitle = argv[0];
{prelude}  const matches = app.toDos.whose({{ name: taskTitle }})();
  matches.forEach((todo) => {{
    {assignment}
  }});
}}
",
        app = quote_literal(application),
    )
}

/// To-dos in the Inbox list.
#[must_use]
pub fn render_query_inbox() -> Script {
    render_query_inbox_in(DEFAULT_APPLICATION)
}

/// [`render_query_inbox`] against a named application.
#[must_use]
pub fn render_query_inbox_in(application: &str) -> Script {
    QueryScript::new(Collection::List("Inbox".to_string()))
        .application(application)
        .fields(TASK_FIELDS)
        .build()
}

/// To-dos in the Today list, including `start_date`.
#[must_use]
pub fn render_query_today() -> Script {
    render_query_today_in(DEFAULT_APPLICATION)
}

/// [`render_query_today`] against a named application.
#[must_use]
pub fn render_query_today_in(application: &str) -> Script {
    QueryScript::new(Collection::List("Today".to_string()))
        .application(application)
        .fields(TODAY_FIELDS)
        .build()
}

/// All projects.
#[must_use]
pub fn render_query_projects() -> Script {
    render_query_projects_in(DEFAULT_APPLICATION)
}

/// [`render_query_projects`] against a named application.
#[must_use]
pub fn render_query_projects_in(application: &str) -> Script {
    QueryScript::new(Collection::Projects)
        .application(application)
        .fields(&[Field::Title, Field::Notes])
        .build()
}

/// All areas.
#[must_use]
pub fn render_query_areas() -> Script {
    render_query_areas_in(DEFAULT_APPLICATION)
}

/// [`render_query_areas`] against a named application.
#[must_use]
pub fn render_query_areas_in(application: &str) -> Script {
    QueryScript::new(Collection::Areas)
        .application(application)
        .fields(&[Field::Title])
        .build()
}

/// To-dos selected in the app window.
#[must_use]
pub fn render_query_selected() -> Script {
    render_query_selected_in(DEFAULT_APPLICATION)
}

/// [`render_query_selected`] against a named application.
#[must_use]
pub fn render_query_selected_in(application: &str) -> Script {
    QueryScript::new(Collection::SelectedToDos)
        .application(application)
        .fields(&[Field::Title, Field::Notes])
        .build()
}

/// Move every to-do titled `task_title` into project `project_title`.
#[must_use]
pub fn render_assign_project(task_title: &str, project_title: &str) -> Script {
    render_assign_project_in(DEFAULT_APPLICATION, task_title, project_title)
}

/// [`render_assign_project`] against a named application.
#[must_use]
pub fn render_assign_project_in(application: &str, task_title: &str, project_title: &str) -> Script {
    Script::new(mutation(
        application,
        "  const project = app.projects.byName(argv[1]);\n",
        "todo.project = project;",
    ))
    .arg(task_title)
    .arg(project_title)
}

/// Move every to-do titled `task_title` into area `area_title`.
#[must_use]
pub fn render_assign_area(task_title: &str, area_title: &str) -> Script {
    render_assign_area_in(DEFAULT_APPLICATION, task_title, area_title)
}

/// [`render_assign_area`] against a named application.
#[must_use]
pub fn render_assign_area_in(application: &str, task_title: &str, area_title: &str) -> Script {
    Script::new(mutation(
        application,
        "  const area = app.areas.byName(argv[1]);\n",
        "todo.area = area;",
    ))
    .arg(task_title)
    .arg(area_title)
}

/// Replace the tags of every to-do titled `task_title`.
///
/// Tags arrive as separate arguments and are joined with
/// [`TAG_SEPARATOR`](crate::TAG_SEPARATOR) inside the script. An
/// empty list clears the tags.
#[must_use]
pub fn render_set_tags<S: AsRef<str>>(task_title: &str, tags: &[S]) -> Script {
    render_set_tags_in(DEFAULT_APPLICATION, task_title, tags)
}

/// [`render_set_tags`] against a named application.
#[must_use]
pub fn render_set_tags_in<S: AsRef<str>>(application: &str, task_title: &str, tags: &[S]) -> Script {
    let prelude = format!(
        "  const tagText = argv.slice(1).join({});\n",
        quote_literal(crate::records::TAG_SEPARATOR)
    );
    tags.iter().fold(
        Script::new(mutation(application, &prelude, "todo.tagNames = tagText;")).arg(task_title),
        |script, tag| script.arg(tag.as_ref()),
    )
}
