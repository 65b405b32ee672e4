use log::debug;

/// Reserved words that may not be used verbatim as column identifiers.
const SQL_KEYWORDS: [&str; 23] = ["SELECT", "FROM", "WHERE", "TABLE", "INSERT", "DELETE",
                                  "UPDATE", "CREATE", "DROP", "ALTER", "JOIN", "ORDER",
                                  "GROUP", "HAVING", "AND", "OR", "NOT", "NULL", "IN",
                                  "AS", "BY", "ON", "SET"];

/// Makes a raw column name safe to use as an SQL identifier.
///
/// A name starting with a digit gets a leading underscore, a name that is a
/// reserved word gets a trailing underscore, and the result is uppercased.
/// The same adjusted name is used in both the `CREATE TABLE` and the
/// `INSERT` statements.
#[must_use]
pub fn adjust_col_name(name: &str) -> String {
    let mut adjusted = name.to_uppercase();
    if adjusted.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        adjusted.insert(0, '_');
    }
    if SQL_KEYWORDS.contains(&adjusted.as_str()) {
        adjusted.push('_');
    }
    adjusted
}

/// Infers a column type from the column's values.
///
/// `DATE` when every present value is `yyyy-mm-dd`, `NUMBER` when every
/// present value is an integer or decimal, otherwise `VARCHAR2(255)`.
/// Missing values do not constrain the type.
#[must_use]
pub fn infer_type(values: &[Option<String>]) -> &'static str {
    let mut is_date = true;
    let mut is_number = true;

    for value in values.iter().flatten() {
        if !is_date_like(value) {
            is_date = false;
        }
        if !is_integer_like(value) && !is_decimal_like(value) {
            is_number = false;
        }
    }

    if is_date {
        "DATE"
    } else if is_number {
        "NUMBER"
    } else {
        "VARCHAR2(255)"
    }
}

/// `\d{4}-\d{2}-\d{2}`
fn is_date_like(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
    && bytes[4] == b'-'
    && bytes[7] == b'-'
    && [0, 1, 2, 3, 5, 6, 8, 9].iter().all(|&i| bytes[i].is_ascii_digit())
}

/// `-?\d+`
fn is_integer_like(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?\d*\.\d+`
fn is_decimal_like(value: &str) -> bool {
    let rest = value.strip_prefix('-').unwrap_or(value);
    let Some((whole, frac)) = rest.split_once('.') else {
        return false;
    };
    whole.bytes().all(|b| b.is_ascii_digit())
    && !frac.is_empty()
    && frac.bytes().all(|b| b.is_ascii_digit())
}

/// Escapes a value for use inside a single-quoted SQL string literal.
#[must_use]
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}

/// Builds a `CREATE TABLE` statement (without the trailing semicolon).
///
/// One column definition per header, with the inferred type, `NOT NULL`
/// when no cell in the column is missing, and a primary-key constraint on
/// `pk_column` (a raw header name, adjusted the same way the columns are).
#[must_use]
pub fn generate_create_table(headers: &[String],
                             rows: &[Vec<Option<String>>],
                             table_name: &str,
                             pk_column: &str)
                             -> String {
    let table_name = table_name.to_uppercase();

    let mut column_defs = Vec::with_capacity(headers.len());
    for (index, header) in headers.iter().enumerate() {
        let values: Vec<Option<String>> =
            rows.iter().map(|row| row[index].clone()).collect();
        let ty = infer_type(&values);
        let not_null = if values.iter().any(Option::is_none) {
            ""
        } else {
            " NOT NULL"
        };
        column_defs.push(format!("  {} {ty}{not_null}", adjust_col_name(header)));
    }

    debug!("generated DDL for {table_name} with {} column(s)", headers.len());
    format!("CREATE TABLE {table_name} (\n{},\n  CONSTRAINT PK_{table_name} PRIMARY KEY ({})\n)",
            column_defs.join(",\n"),
            adjust_col_name(pk_column))
}

/// Builds one `INSERT` statement per data row.
///
/// Present values are single-quoted with `'` doubled; missing values are
/// emitted as the `NULL` keyword.
#[must_use]
pub fn generate_insert_statements(headers: &[String],
                                  rows: &[Vec<Option<String>>],
                                  table_name: &str)
                                  -> Vec<String> {
    let columns: Vec<String> = headers.iter().map(|h| adjust_col_name(h)).collect();

    rows.iter()
        .map(|row| {
            let values: Vec<String> =
                row.iter()
                   .map(|cell| match cell {
                       Some(v) => format!("'{}'", escape_sql(v)),
                       None => "NULL".to_string(),
                   })
                   .collect();
            format!("INSERT INTO {table_name} ({}) VALUES ({});",
                    columns.join(", "),
                    values.join(", "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn cells(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn column_names_are_adjusted() {
        assert_eq!(adjust_col_name("name"), "NAME");
        assert_eq!(adjust_col_name("3rd_place"), "_3RD_PLACE");
        assert_eq!(adjust_col_name("select"), "SELECT_");
        assert_eq!(adjust_col_name("order"), "ORDER_");
    }

    #[test]
    fn types_are_inferred_per_column() {
        assert_eq!(infer_type(&cells(&[Some("1"), Some("-2"), None])), "NUMBER");
        assert_eq!(infer_type(&cells(&[Some("1.5"), Some("-.5")])), "NUMBER");
        assert_eq!(infer_type(&cells(&[Some("2024-07-29"), None])), "DATE");
        assert_eq!(infer_type(&cells(&[Some("2024-7-29")])), "VARCHAR2(255)");
        assert_eq!(infer_type(&cells(&[Some("1"), Some("x")])), "VARCHAR2(255)");
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_sql("o'clock"), "o''clock");
    }

    #[test]
    fn create_table_lists_columns_and_the_pk_constraint() {
        let headers = vec!["id".to_string(), "name".to_string(), "born".to_string()];
        let rows = vec![cells(&[Some("1"), Some("ada"), Some("1815-12-10")]),
                        cells(&[Some("2"), None, Some("1906-12-09")])];
        let ddl = generate_create_table(&headers, &rows, "generated_table", "id");
        assert_eq!(ddl,
                   "CREATE TABLE GENERATED_TABLE (\n  \
                      ID NUMBER NOT NULL,\n  \
                      NAME VARCHAR2(255),\n  \
                      BORN DATE NOT NULL,\n  \
                      CONSTRAINT PK_GENERATED_TABLE PRIMARY KEY (ID)\n)");
    }

    #[test]
    fn inserts_quote_values_and_keep_nulls_bare() {
        let headers = vec!["id".to_string(), "name".to_string()];
        let rows = vec![cells(&[Some("1"), Some("o'clock")]),
                        cells(&[Some("2"), None])];
        let statements = generate_insert_statements(&headers, &rows, "GENERATED_TABLE");
        assert_eq!(statements,
                   vec!["INSERT INTO GENERATED_TABLE (ID, NAME) VALUES ('1', 'o''clock');",
                        "INSERT INTO GENERATED_TABLE (ID, NAME) VALUES ('2', NULL);"]);
    }
}
