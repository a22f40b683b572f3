//! Relational schema bootstrap.
//!
//! All sixteen tables live in the `app` schema with a fixed, hardcoded
//! layout per entity shape. Every statement is `IF NOT EXISTS` so the
//! initializer is safe to run on every process start and before every
//! migration run.

/// Schema all relational tables live in.
pub const SCHEMA: &str = "app";

/// Vehicle-scoped document tables: `id` identity, `vehicleId` FK, `data` JSON.
pub const SCOPED_TABLES: [&str; 11] = [
    "collisionrecords",
    "upgraderecords",
    "servicerecords",
    "gasrecords",
    "notes",
    "odometerrecords",
    "reminderrecords",
    "planrecords",
    "planrecordtemplates",
    "supplyrecords",
    "taxrecords",
];

/// Tables whose `id` is a generated identity (everything except the
/// externally-keyed config table and the composite-key join table).
pub fn identity_tables() -> Vec<&'static str> {
    let mut tables = vec!["vehicles"];
    tables.extend(SCOPED_TABLES);
    tables.push("userrecords");
    tables.push("tokenrecords");
    tables
}

/// DDL for the full relational schema, in creation order.
pub fn postgres_schema_statements() -> Vec<String> {
    let mut stmts = vec![format!("CREATE SCHEMA IF NOT EXISTS {SCHEMA}")];

    stmts.push(format!(
        "CREATE TABLE IF NOT EXISTS {SCHEMA}.vehicles \
         (id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, data jsonb NOT NULL)"
    ));

    for table in SCOPED_TABLES {
        stmts.push(format!(
            "CREATE TABLE IF NOT EXISTS {SCHEMA}.{table} \
             (id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, \
              vehicleId INT NOT NULL, data jsonb NOT NULL)"
        ));
    }

    stmts.push(format!(
        "CREATE TABLE IF NOT EXISTS {SCHEMA}.userrecords \
         (id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, \
          username TEXT NOT NULL, emailaddress TEXT NOT NULL, \
          password TEXT NOT NULL, isadmin BOOLEAN)"
    ));
    stmts.push(format!(
        "CREATE TABLE IF NOT EXISTS {SCHEMA}.tokenrecords \
         (id INT GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY, \
          body TEXT NOT NULL, emailaddress TEXT NOT NULL)"
    ));
    stmts.push(format!(
        "CREATE TABLE IF NOT EXISTS {SCHEMA}.userconfigrecords \
         (id INT PRIMARY KEY, data jsonb NOT NULL)"
    ));
    stmts.push(format!(
        "CREATE TABLE IF NOT EXISTS {SCHEMA}.useraccessrecords \
         (userId INT, vehicleId INT, PRIMARY KEY(userId, vehicleId))"
    ));

    stmts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_all_sixteen_tables_plus_schema() {
        let stmts = postgres_schema_statements();
        assert_eq!(stmts.len(), 17);
        assert!(stmts[0].starts_with("CREATE SCHEMA IF NOT EXISTS"));
    }

    #[test]
    fn every_statement_is_idempotent() {
        for stmt in postgres_schema_statements() {
            assert!(stmt.contains("IF NOT EXISTS"), "not idempotent: {stmt}");
        }
    }

    #[test]
    fn scoped_tables_carry_the_foreign_key_column() {
        for stmt in postgres_schema_statements() {
            if SCOPED_TABLES.iter().any(|t| stmt.contains(t)) {
                assert!(stmt.contains("vehicleId INT NOT NULL"), "missing FK: {stmt}");
            }
        }
    }

    #[test]
    fn join_table_has_composite_key_and_no_identity() {
        let stmt = postgres_schema_statements()
            .into_iter()
            .find(|s| s.contains("useraccessrecords"))
            .unwrap();
        assert!(stmt.contains("PRIMARY KEY(userId, vehicleId)"));
        assert!(!stmt.contains("IDENTITY"));
    }

    #[test]
    fn config_table_identity_is_externally_supplied() {
        let stmt = postgres_schema_statements()
            .into_iter()
            .find(|s| s.contains("userconfigrecords"))
            .unwrap();
        assert!(!stmt.contains("IDENTITY"));
    }

    #[test]
    fn identity_tables_exclude_config_and_join() {
        let tables = identity_tables();
        assert_eq!(tables.len(), 14);
        assert!(!tables.contains(&"userconfigrecords"));
        assert!(!tables.contains(&"useraccessrecords"));
    }
}
