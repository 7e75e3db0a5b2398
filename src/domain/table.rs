use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use regex::Regex;

use crate::domain::sql_dialect::SqlDialectKind;

static TABLE_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("table name pattern is valid")
});

/// Name of the two-column target table, optionally schema-qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName(String);

impl TableName {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(anyhow!("Table name must not be empty"));
        }
        if !TABLE_NAME_PATTERN.is_match(trimmed) {
            return Err(anyhow!(
                "Table name must be an identifier like `test_table` or `public.test_table`: {trimmed}"
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn create_if_absent_sql(&self, dialect: SqlDialectKind) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (id SERIAL PRIMARY KEY, name {});",
            self.0,
            dialect.text_type()
        )
    }

    pub fn select_rows_sql(&self) -> String {
        format!("SELECT id, name FROM {} ORDER BY id;", self.0)
    }

    pub fn count_rows_sql(&self) -> String {
        format!("SELECT count(*) FROM {};", self.0)
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::sql_dialect::SqlDialectKind;

    use super::TableName;

    #[test]
    fn accepts_plain_and_schema_qualified_names() {
        assert_eq!(
            TableName::parse(" test_table ")
                .expect("plain name should parse")
                .as_str(),
            "test_table"
        );
        assert_eq!(
            TableName::parse("public.users_2")
                .expect("qualified name should parse")
                .as_str(),
            "public.users_2"
        );
    }

    #[test]
    fn rejects_names_that_would_inject_sql() {
        for raw in ["", "1table", "users; DROP TABLE users", "a.b.c", "name-with-dash"] {
            assert!(TableName::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn create_statement_uses_dialect_text_type() {
        let table = TableName::parse("test_table").expect("name should parse");
        assert_eq!(
            table.create_if_absent_sql(SqlDialectKind::CockroachDb),
            "CREATE TABLE IF NOT EXISTS test_table (id SERIAL PRIMARY KEY, name STRING);"
        );
        assert_eq!(
            table.create_if_absent_sql(SqlDialectKind::PostgreSql),
            "CREATE TABLE IF NOT EXISTS test_table (id SERIAL PRIMARY KEY, name TEXT);"
        );
    }
}
