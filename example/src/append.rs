use bytes::BytesMut;
use pgvalue::{F, Ints, Q, Quote, Result, Strings, ValueAppender, types::Json};

pub fn main() -> Result<()> {
    let ids = Ints::from(vec![1, 2, 3]);
    let names: Strings = ["foo", "it's"].into_iter().map(String::from).collect();

    let mut sql = BytesMut::from("SELECT ");
    F::from_static("users.*").append_value(&mut sql, Quote::Literal)?;
    sql.extend_from_slice(b" FROM ");
    F::from_static("users").append_value(&mut sql, Quote::Literal)?;
    sql.extend_from_slice(b" WHERE id IN (");
    ids.append_value(&mut sql, Quote::Raw)?;
    sql.extend_from_slice(b") AND name = ANY(ARRAY[");
    names.append_value(&mut sql, Quote::Raw)?;
    sql.extend_from_slice(b"]) AND meta @> ");
    Json(["admin"]).append_value(&mut sql, Quote::Literal)?;
    sql.extend_from_slice(b"::jsonb AND ");
    Q::from_static("deleted_at IS NULL").append_value(&mut sql, Quote::Literal)?;

    tracing::info!(sql = %String::from_utf8_lossy(&sql), "query");

    assert_eq!(
        &sql[..],
        &br#"SELECT "users".* FROM "users" WHERE id IN (1,2,3) AND name = ANY(ARRAY['foo','it''s']) AND meta @> '["admin"]'::jsonb AND deleted_at IS NULL"#[..],
    );

    // empty collection writes nothing
    let mut sql = BytesMut::from("SELECT 1");
    Ints::new().append_value(&mut sql, Quote::Raw)?;
    assert_eq!(&sql[..], b"SELECT 1");

    Ok(())
}
