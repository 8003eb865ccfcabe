use clap::Parser;
use opsboard_cli::{CliArgs, OpsboardCli};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();

    let result = match OpsboardCli::from_args("opsboard", &args) {
        Ok(cli) => cli.run(args).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
