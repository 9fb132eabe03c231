mod cli;

use clap::Parser;
use cli::args::{Args, Command};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    match args.command.execute().await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            std::process::exit(0);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
