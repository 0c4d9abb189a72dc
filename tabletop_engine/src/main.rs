use anyhow::Result;

mod cli;
mod replay;
mod runtime;
mod trace;

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::parse()?;
    runtime::execute(args)
}
