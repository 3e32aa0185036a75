//! Message bodies as a server would send them.
use bytes::{BufMut, Bytes, BytesMut};
use pgvalue::{Result, RowDescription, row::Oid};

pub fn description(fields: &[(&str, Oid)]) -> Result<RowDescription> {
    let mut b = BytesMut::new();
    b.put_i16(fields.len() as i16);
    for (name, oid) in fields {
        b.put_slice(name.as_bytes());
        b.put_u8(b'\0');
        b.put_u32(0);
        b.put_i16(0);
        b.put_u32(*oid);
        b.put_i16(-1);
        b.put_i32(-1);
        b.put_i16(0);
    }
    Ok(RowDescription::parse(b.freeze())?)
}

pub fn data_row(values: &[Option<&str>]) -> Bytes {
    let mut b = BytesMut::new();
    b.put_i16(values.len() as i16);
    for value in values {
        match value {
            Some(value) => {
                b.put_i32(value.len() as i32);
                b.put_slice(value.as_bytes());
            },
            None => b.put_i32(-1),
        }
    }
    b.freeze()
}
