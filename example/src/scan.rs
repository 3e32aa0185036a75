use pgvalue::{IntSet, Ints, Result, Strings, scan, scan_rows, types::Json};
use serde::Deserialize;
use time::PrimitiveDateTime;

use crate::wire::{data_row, description};

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
struct Meta {
    tags: Vec<String>,
}

pub fn main() -> Result<()> {
    // SELECT id FROM users
    let desc = description(&[("id", 20)])?;
    let bodies = ["3", "1", "3", "2"].map(|id| data_row(&[Some(id)]));

    let mut ints = Ints::new();
    desc.scan_data_rows(&mut ints, bodies.clone())?;
    assert_eq!(&ints[..], [3, 1, 3, 2]);

    let mut set = IntSet::new();
    desc.scan_data_rows(&mut set, bodies)?;
    assert_eq!(set.len(), 3);

    // SELECT name FROM users
    let desc = description(&[("name", 25)])?;
    let rows = ["foo", "it's"]
        .map(|name| desc.row(data_row(&[Some(name)])))
        .into_iter()
        .collect::<Result<Vec<_>, _>>()?;

    let mut names = Strings::new();
    scan_rows(&mut names, rows)?;
    assert_eq!(&names[..], ["foo", "it's"]);

    tracing::info!(?ints, ?set, ?names, "collections");

    // SELECT id, name, meta, created_at, deleted_at FROM users LIMIT 1
    let desc = description(&[("id", 20), ("name", 25), ("meta", 3802), ("created_at", 1114), ("deleted_at", 1114)])?;
    let row = desc.row(data_row(&[
        Some("420"),
        Some("Foo"),
        Some(r#"{"tags":["admin"]}"#),
        Some("2025-04-01 13:45:09.123"),
        None,
    ]))?;

    tracing::info!(?row, "row");

    let mut id = 0i64;
    let mut name = String::new();
    let mut meta = Json(Meta::default());
    let mut created_at = time::macros::datetime!(2000-01-01 0:00);
    let mut deleted_at: Option<PrimitiveDateTime> = None;
    row.scan(&mut scan!(id, name, meta, created_at, deleted_at))?;

    assert_eq!(id, 420);
    assert_eq!(name, "Foo");
    assert_eq!(meta.0.tags, ["admin"]);
    assert_eq!(created_at, time::macros::datetime!(2025-04-01 13:45:09.123));
    assert!(deleted_at.is_none());

    assert_eq!(row.try_get::<_, String>("name")?, "Foo");

    Ok(())
}
