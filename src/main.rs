//! rubocop: resolve command-line, `.rubocop` and `RUBOCOP_OPTS` options

use anyhow::Result;

fn main() -> Result<()> {
    rubocop_options::cli::run()
}
