use crate::sql::parser::{ast::Statement, scanner::Scanner};

pub mod ast;
mod scanner;

/// Characters no statement may contain, statements are single lines
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

const INSERT_VALUES: &str = ") values (";
const SELECT_FROM: &str = " from ";
const WHERE: &str = " where ";

/// Statement parser - matches one input line against the four command shapes
///
/// Shapes are tried in order (create, insert, select, delete) and the first
/// match wins. Keywords are lowercase and literal, table names are runs of
/// lowercase letters, and everything inside parentheses or after `where` is
/// captured verbatim.
pub struct Parser<'a> {
    input: &'a str,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Parser { input }
    }

    /// Returns the matched statement, or None when no shape matches
    pub fn parse(&self) -> Option<Statement> {
        if self.input.contains(LINE_TERMINATORS) {
            return None;
        }
        self.parse_create_table()
            .or_else(|| self.parse_insert())
            .or_else(|| self.parse_select())
            .or_else(|| self.parse_delete())
    }

    /// create table <name> (<definitions>)
    fn parse_create_table(&self) -> Option<Statement> {
        let mut s = Scanner::new(self.input);
        s.literal("create table ")?;
        let table_name = s.name()?;
        s.literal(" (")?;
        let columns = non_empty(s.rest().strip_suffix(')')?)?;
        Some(Statement::CreateTable {
            table_name: table_name.to_string(),
            columns: columns.to_string(),
        })
    }

    /// insert into <name> (<columns>) values (<values>)
    fn parse_insert(&self) -> Option<Statement> {
        let mut s = Scanner::new(self.input);
        s.literal("insert into ")?;
        let table_name = s.name()?;
        s.literal(" (")?;
        let body = s.rest().strip_suffix(')')?;

        // Column list is greedy: try the last separator first
        body.rmatch_indices(INSERT_VALUES).find_map(|(i, _)| {
            let columns = non_empty(&body[..i])?;
            let values = non_empty(&body[i + INSERT_VALUES.len()..])?;
            Some(Statement::Insert {
                table_name: table_name.to_string(),
                columns: columns.to_string(),
                values: values.to_string(),
            })
        })
    }

    /// select <columns> from <name> [where <clause>]
    fn parse_select(&self) -> Option<Statement> {
        let mut s = Scanner::new(self.input);
        s.literal("select ")?;
        let body = s.rest();

        body.rmatch_indices(SELECT_FROM).find_map(|(i, _)| {
            let columns = non_empty(&body[..i])?;
            let mut s = Scanner::new(&body[i + SELECT_FROM.len()..]);
            let table_name = s.name()?;
            let where_clause = match_where(s.rest())?;
            Some(Statement::Select {
                columns: columns.to_string(),
                table_name: table_name.to_string(),
                where_clause,
            })
        })
    }

    /// delete from <name> [where <clause>]
    fn parse_delete(&self) -> Option<Statement> {
        let mut s = Scanner::new(self.input);
        s.literal("delete from ")?;
        let table_name = s.name()?;
        let where_clause = match_where(s.rest())?;
        Some(Statement::Delete {
            table_name: table_name.to_string(),
            where_clause,
        })
    }
}

fn non_empty(blob: &str) -> Option<&str> {
    (!blob.is_empty()).then_some(blob)
}

/// Matches the tail after a table name
///
/// `Some(None)` when the statement ends there, `Some(Some(clause))` for a
/// where clause, and None when anything else follows.
fn match_where(tail: &str) -> Option<Option<String>> {
    if tail.is_empty() {
        return Some(None);
    }
    let clause = non_empty(tail.strip_prefix(WHERE)?)?;
    Some(Some(clause.to_string()))
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::sql::parser::ast::{CommandKind, Statement};

    #[test]
    fn test_parser_create_table() {
        let stmt = Parser::new("create table author (id number, name string, age number)").parse();
        assert_eq!(
            stmt,
            Some(Statement::CreateTable {
                table_name: "author".to_string(),
                columns: "id number, name string, age number".to_string(),
            })
        );

        // the blob runs to the final parenthesis
        let stmt = Parser::new("create table t (a (b), c)").parse();
        assert_eq!(
            stmt,
            Some(Statement::CreateTable {
                table_name: "t".to_string(),
                columns: "a (b), c".to_string(),
            })
        );

        assert_eq!(Parser::new("create table author ()").parse(), None);
        assert_eq!(Parser::new("create table Author (id number)").parse(), None);
        assert_eq!(Parser::new("create table author2 (id number)").parse(), None);
        assert_eq!(Parser::new("CREATE TABLE author (id number)").parse(), None);
        assert_eq!(Parser::new("create table author (id number);").parse(), None);
    }

    #[test]
    fn test_parser_insert() {
        let stmt = Parser::new("insert into author (id, name, age) values (1, Douglas Crockford, 62)")
            .parse();
        assert_eq!(
            stmt,
            Some(Statement::Insert {
                table_name: "author".to_string(),
                columns: "id, name, age".to_string(),
                values: "1, Douglas Crockford, 62".to_string(),
            })
        );

        // greedy column capture takes the last separator that leaves values
        let stmt = Parser::new("insert into t (a) values (b) values (c)").parse();
        assert_eq!(
            stmt,
            Some(Statement::Insert {
                table_name: "t".to_string(),
                columns: "a) values (b".to_string(),
                values: "c".to_string(),
            })
        );
        let stmt = Parser::new("insert into t (a) values (b) values ()").parse();
        assert_eq!(
            stmt,
            Some(Statement::Insert {
                table_name: "t".to_string(),
                columns: "a".to_string(),
                values: "b) values (".to_string(),
            })
        );

        assert_eq!(Parser::new("insert into t () values (1)").parse(), None);
        assert_eq!(Parser::new("insert into t (a) values ()").parse(), None);
        assert_eq!(Parser::new("insert into t values (1)").parse(), None);
    }

    #[test]
    fn test_parser_select() {
        let stmt = Parser::new("select name, age from author").parse();
        assert_eq!(
            stmt,
            Some(Statement::Select {
                columns: "name, age".to_string(),
                table_name: "author".to_string(),
                where_clause: None,
            })
        );

        let stmt = Parser::new("select name, age from author where id = 1").parse();
        assert_eq!(
            stmt,
            Some(Statement::Select {
                columns: "name, age".to_string(),
                table_name: "author".to_string(),
                where_clause: Some("id = 1".to_string()),
            })
        );

        assert_eq!(Parser::new("select name from author ").parse(), None);
        assert_eq!(Parser::new("select name from author where ").parse(), None);
        assert_eq!(Parser::new("select  from author").parse(), None);
        assert_eq!(Parser::new("select name from author\nwhere id = 1").parse(), None);
    }

    #[test]
    fn test_parser_delete() {
        let stmt = Parser::new("delete from author where id = 2").parse();
        assert_eq!(
            stmt,
            Some(Statement::Delete {
                table_name: "author".to_string(),
                where_clause: Some("id = 2".to_string()),
            })
        );
        assert_eq!(stmt.map(|s| s.kind()), Some(CommandKind::Delete));

        let stmt = Parser::new("delete from author").parse();
        assert_eq!(
            stmt,
            Some(Statement::Delete {
                table_name: "author".to_string(),
                where_clause: None,
            })
        );
        assert_eq!(Parser::new("delete author").parse(), None);
    }

    #[test]
    fn test_parser_no_match() {
        assert_eq!(Parser::new("not a real statement").parse(), None);
        assert_eq!(Parser::new("").parse(), None);
        assert_eq!(Parser::new("drop table author").parse(), None);
    }

    #[test]
    fn test_statement_operands() {
        let stmt = Parser::new("select name from author").parse().unwrap();
        assert_eq!(stmt.operands(), vec![Some("name"), Some("author"), None]);
        assert_eq!(stmt.table_name(), "author");

        let stmt = Parser::new("insert into author (id) values (1)").parse().unwrap();
        assert_eq!(stmt.kind(), CommandKind::Insert);
        assert_eq!(stmt.operands(), vec![Some("author"), Some("id"), Some("1")]);
    }
}
