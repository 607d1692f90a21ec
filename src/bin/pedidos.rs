use std::error::Error;

use pedidos::apps::run_cli;

fn main() -> Result<(), Box<dyn Error>> {
    run_cli(std::env::args().skip(1))
}
