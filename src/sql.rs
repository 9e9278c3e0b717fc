/// A generated upsert, ready to prepare. `params[i]` is the named
/// placeholder bound to `columns[i]` of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertStatement {
    pub sql: String,
    pub params: Vec<String>,
}

/// Quote an identifier for embedding in SQL, doubling any embedded quote
/// character so untrusted table/column names cannot break out.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Columns prefixed `ID_` (any case) are primary/foreign keys: writable on
/// insert, never touched by the conflict-update clause.
pub fn is_key_column(column: &str) -> bool {
    column.len() >= 3 && column[..3].eq_ignore_ascii_case("id_")
}

/// Build `INSERT INTO <table> (...) VALUES (...)` with an
/// `ON CONFLICT DO UPDATE SET ...` clause covering every non-key column.
/// When no column is eligible for update the clause is omitted entirely.
/// Pure: identical input yields byte-identical SQL.
pub fn build_upsert(table: &str, columns: &[String]) -> UpsertStatement {
    // Placeholders are keyed by column index, not name: two column names
    // may collapse to the same legal placeholder token, and a shared name
    // would silently bind one value into both slots.
    let params: Vec<String> = (0..columns.len()).map(|i| format!(":p{}", i)).collect();

    let col_list: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let mut sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        col_list.join(", "),
        params.join(", "),
    );

    let updates: Vec<String> = columns
        .iter()
        .filter(|c| !is_key_column(c.as_str()))
        .map(|c| {
            let q = quote_ident(c);
            format!("{} = excluded.{}", q, q)
        })
        .collect();

    if !updates.is_empty() {
        sql.push_str(" ON CONFLICT DO UPDATE SET ");
        sql.push_str(&updates.join(", "));
    }

    UpsertStatement { sql, params }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn key_column_detection() {
        assert!(is_key_column("ID_Person"));
        assert!(is_key_column("id_person"));
        assert!(is_key_column("Id_X"));
        assert!(!is_key_column("Name"));
        assert!(!is_key_column("Identity"));
        assert!(!is_key_column("ID"));
    }

    #[test]
    fn quoting_escapes_embedded_quotes() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn key_columns_inserted_but_not_updated() {
        let stmt = build_upsert("person", &cols(&["ID_Person", "Name", "Age"]));
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"person\" (\"ID_Person\", \"Name\", \"Age\") \
             VALUES (:p0, :p1, :p2) \
             ON CONFLICT DO UPDATE SET \"Name\" = excluded.\"Name\", \"Age\" = excluded.\"Age\""
        );
        assert_eq!(stmt.params, vec![":p0", ":p1", ":p2"]);
    }

    #[test]
    fn all_key_columns_means_plain_insert() {
        let stmt = build_upsert("link", &cols(&["ID_A", "ID_B"]));
        assert_eq!(
            stmt.sql,
            "INSERT INTO \"link\" (\"ID_A\", \"ID_B\") VALUES (:p0, :p1)"
        );
    }

    #[test]
    fn deterministic() {
        let columns = cols(&["ID_X", "A", "B"]);
        assert_eq!(build_upsert("t", &columns), build_upsert("t", &columns));
    }

    #[test]
    fn punctuation_variants_get_distinct_placeholders() {
        // `a.b` and `a-b` are both legal XML names; their placeholders
        // must not collapse into one bind slot.
        let stmt = build_upsert("t", &cols(&["a.b", "a-b"]));
        assert_eq!(stmt.params, vec![":p0", ":p1"]);
        assert!(stmt.sql.contains("(\"a.b\", \"a-b\") VALUES (:p0, :p1)"));
    }
}
