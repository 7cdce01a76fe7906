use std::fmt::Display;

/// The four recognized command shapes, in matching order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    CreateTable,
    Insert,
    Select,
    Delete,
}

impl Display for CommandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            CommandKind::CreateTable => "create table",
            CommandKind::Insert => "insert",
            CommandKind::Select => "select",
            CommandKind::Delete => "delete",
        })
    }
}

/// A matched statement with its operands captured verbatim
///
/// List operands are raw blobs such as `"id number, name string"`; splitting
/// them is left to the planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// create table <name> (<definitions>)
    CreateTable { table_name: String, columns: String },
    /// insert into <name> (<columns>) values (<values>)
    Insert {
        table_name: String,
        columns: String,
        values: String,
    },
    /// select <columns> from <name> [where <clause>]
    Select {
        columns: String,
        table_name: String,
        where_clause: Option<String>,
    },
    /// delete from <name> [where <clause>]
    Delete {
        table_name: String,
        where_clause: Option<String>,
    },
}

impl Statement {
    pub fn kind(&self) -> CommandKind {
        match self {
            Statement::CreateTable { .. } => CommandKind::CreateTable,
            Statement::Insert { .. } => CommandKind::Insert,
            Statement::Select { .. } => CommandKind::Select,
            Statement::Delete { .. } => CommandKind::Delete,
        }
    }

    pub fn table_name(&self) -> &str {
        match self {
            Statement::CreateTable { table_name, .. }
            | Statement::Insert { table_name, .. }
            | Statement::Select { table_name, .. }
            | Statement::Delete { table_name, .. } => table_name.as_str(),
        }
    }

    /// Captured operands in the order they appear in the statement,
    /// None marks an omitted where clause
    pub fn operands(&self) -> Vec<Option<&str>> {
        match self {
            Statement::CreateTable {
                table_name,
                columns,
            } => vec![Some(table_name.as_str()), Some(columns.as_str())],
            Statement::Insert {
                table_name,
                columns,
                values,
            } => vec![
                Some(table_name.as_str()),
                Some(columns.as_str()),
                Some(values.as_str()),
            ],
            Statement::Select {
                columns,
                table_name,
                where_clause,
            } => vec![
                Some(columns.as_str()),
                Some(table_name.as_str()),
                where_clause.as_deref(),
            ],
            Statement::Delete {
                table_name,
                where_clause,
            } => vec![Some(table_name.as_str()), where_clause.as_deref()],
        }
    }
}
