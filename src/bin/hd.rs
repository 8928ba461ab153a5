use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use hd_rs::{
    bench::Timer, diag::Result, input::args, inspect::Node, mapped::Mapped, stream::Stream,
};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hd_rs=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = args()?;
    let mapped = Mapped::open(&args.path)?;
    let node = Node::new(&mapped);

    let stdout = io::stdout();
    let mut out = Stream::new(stdout.lock());
    if args.json {
        writeln!(out, "{}", node.to_json()?)?;
    } else {
        let _timer = Timer::new(format!("dump {}", mapped.path().display()));
        node.dump(&mut out)?;
    }

    out.flush()?;
    Ok(())
}
