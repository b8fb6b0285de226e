use anyhow::Result;
use lansend_cli::run_cli;

fn main() -> Result<()> {
    run_cli()
}
