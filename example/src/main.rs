use tracing::trace_span;
use tracing_subscriber::{
    EnvFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use pgvalue::Result;

mod wire;
mod scan;
mod append;

fn main() -> Result<()> {
    tracing_subscriber::Registry::default()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    trace_span!("scan").in_scope(scan::main)?;
    trace_span!("append").in_scope(append::main)?;

    Ok(())
}
