use crate::{
    error::{Error, Result},
    sql::{
        parser::ast,
        plan::{Filter, Node, Plan},
        schema::{Column, Table},
        types::Row,
    },
};

/// Separator between items of a column, definition or value list
const LIST_SEPARATOR: &str = ", ";
/// Separator between the column and the value of a where clause
const FILTER_SEPARATOR: &str = " = ";

/// Query planner - splits the captured blobs of a statement into plan nodes
#[derive(Debug, Default)]
pub struct Planner {
    strict: bool,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects inserts whose column and value counts differ
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Builds an execution plan from a matched statement
    pub fn build(&self, stmt: ast::Statement) -> Result<Plan> {
        Ok(Plan(self.build_statement(stmt)?))
    }

    pub fn build_statement(&self, stmt: ast::Statement) -> Result<Node> {
        Ok(match stmt {
            ast::Statement::CreateTable {
                table_name,
                columns,
            } => {
                let mut schema = Table::new(table_name);
                for definition in split_list(&columns) {
                    // "id number" -> (id, number); extra pieces are dropped
                    let mut pieces = definition.trim().split(' ');
                    let name = pieces.next().unwrap_or_default();
                    schema.add_column(Column {
                        name: name.to_string(),
                        datatype: pieces.next().map(str::to_string),
                    });
                }
                Node::CreateTable { schema }
            }
            ast::Statement::Insert {
                table_name,
                columns,
                values,
            } => {
                let columns = split_list(&columns);
                let values = split_list(&values);
                if self.strict && columns.len() != values.len() {
                    return Err(Error::ColumnMismatch {
                        columns: columns.len(),
                        values: values.len(),
                    });
                }

                // column i takes value i, a missing value is stored as absent
                let mut row = Row::new();
                for (i, column) in columns.iter().enumerate() {
                    row.set(*column, values.get(i).map(|v| v.to_string()));
                }
                Node::Insert { table_name, row }
            }
            ast::Statement::Select {
                columns,
                table_name,
                where_clause,
            } => Node::Select {
                table_name,
                columns: split_list(&columns)
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                filter: where_clause.as_deref().map(build_filter),
            },
            ast::Statement::Delete {
                table_name,
                where_clause,
            } => Node::Delete {
                table_name,
                filter: where_clause.as_deref().map(build_filter),
            },
        })
    }
}

fn split_list(blob: &str) -> Vec<&str> {
    blob.split(LIST_SEPARATOR).collect()
}

/// "id = 1" -> Filter { id, 1 }; only the first two pieces count
fn build_filter(clause: &str) -> Filter {
    let mut pieces = clause.split(FILTER_SEPARATOR);
    Filter {
        column: pieces.next().unwrap_or_default().to_string(),
        value: pieces.next().map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::Planner;
    use crate::{
        error::{Error, Result},
        sql::{
            parser::Parser,
            plan::{Filter, Node},
            schema::Column,
        },
    };

    fn plan(sql: &str) -> Result<Node> {
        let stmt = Parser::new(sql)
            .parse()
            .ok_or_else(|| Error::Syntax(sql.to_string()))?;
        Planner::new().build_statement(stmt)
    }

    #[test]
    fn test_plan_create_table() -> Result<()> {
        let node = plan("create table author (id number, name string, id text, flag)")?;
        let Node::CreateTable { schema } = node else {
            panic!("expected create table node");
        };
        assert_eq!(schema.name, "author");
        assert_eq!(
            schema.columns,
            vec![
                Column {
                    name: "id".to_string(),
                    datatype: Some("text".to_string()),
                },
                Column {
                    name: "name".to_string(),
                    datatype: Some("string".to_string()),
                },
                Column {
                    name: "flag".to_string(),
                    datatype: None,
                },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_plan_insert_permissive() -> Result<()> {
        let Node::Insert { row, .. } = plan("insert into author (id, name, age) values (1, Ann)")?
        else {
            panic!("expected insert node");
        };
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name", "age"]);
        assert_eq!(row.get("name"), Some("Ann"));
        assert!(row.contains("age"));
        assert_eq!(row.get("age"), None);

        let Node::Insert { row, .. } = plan("insert into author (id) values (1, Ann, 30)")? else {
            panic!("expected insert node");
        };
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("id"), Some("1"));
        Ok(())
    }

    #[test]
    fn test_plan_insert_strict() -> Result<()> {
        let stmt = Parser::new("insert into author (id, name) values (1)")
            .parse()
            .ok_or_else(|| Error::Internal("no match".into()))?;
        assert_eq!(
            Planner::new().strict(true).build_statement(stmt),
            Err(Error::ColumnMismatch {
                columns: 2,
                values: 1
            })
        );
        Ok(())
    }

    #[test]
    fn test_plan_filters() -> Result<()> {
        let node = plan("select name, age from author where id = 1")?;
        assert_eq!(
            node,
            Node::Select {
                table_name: "author".to_string(),
                columns: vec!["name".to_string(), "age".to_string()],
                filter: Some(Filter {
                    column: "id".to_string(),
                    value: Some("1".to_string()),
                }),
            }
        );

        let node = plan("delete from author where a = b = c")?;
        assert_eq!(
            node,
            Node::Delete {
                table_name: "author".to_string(),
                filter: Some(Filter {
                    column: "a".to_string(),
                    value: Some("b".to_string()),
                }),
            }
        );

        let node = plan("delete from author where id=1")?;
        assert_eq!(
            node,
            Node::Delete {
                table_name: "author".to_string(),
                filter: Some(Filter {
                    column: "id=1".to_string(),
                    value: None,
                }),
            }
        );
        Ok(())
    }
}
