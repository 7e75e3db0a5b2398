use std::str::FromStr;

use anyhow::{Result, anyhow};

/// Wire-compatible engines the loader can target. They differ only in DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SqlDialectKind {
    #[default]
    CockroachDb,
    PostgreSql,
}

impl SqlDialectKind {
    pub const ALL: [SqlDialectKind; 2] = [SqlDialectKind::CockroachDb, SqlDialectKind::PostgreSql];

    pub fn as_str(self) -> &'static str {
        match self {
            SqlDialectKind::CockroachDb => "cockroach",
            SqlDialectKind::PostgreSql => "postgres",
        }
    }

    pub fn text_type(self) -> &'static str {
        match self {
            SqlDialectKind::CockroachDb => "STRING",
            SqlDialectKind::PostgreSql => "TEXT",
        }
    }
}

impl std::fmt::Display for SqlDialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SqlDialectKind {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cockroach" | "cockroachdb" | "crdb" => Ok(SqlDialectKind::CockroachDb),
            "postgres" | "postgresql" => Ok(SqlDialectKind::PostgreSql),
            _ => Err(anyhow!(
                "Unsupported dialect: {value}. Available values: cockroach,postgres"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SqlDialectKind;

    #[test]
    fn parses_aliases_case_insensitively() {
        assert_eq!(
            " CRDB ".parse::<SqlDialectKind>().expect("alias should parse"),
            SqlDialectKind::CockroachDb
        );
        assert_eq!(
            "PostgreSQL".parse::<SqlDialectKind>().expect("alias should parse"),
            SqlDialectKind::PostgreSql
        );
    }

    #[test]
    fn rejects_unknown_dialect() {
        let error = "oracle"
            .parse::<SqlDialectKind>()
            .expect_err("unknown dialect should be rejected");
        assert!(error.to_string().contains("Unsupported dialect: oracle"));
    }
}
