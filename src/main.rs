use clap::Parser;

use shorturl::config::{Args, StaticConfig, get_config, init_config};
use shorturl::runtime::run_server;
use shorturl::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.generate_config {
        println!("{}", StaticConfig::generate_sample_config());
        return Ok(());
    }

    dotenvy::dotenv().ok();

    if let Err(e) = init_config(args.config.as_deref()) {
        eprintln!("{}", e.format_colored());
        std::process::exit(1);
    }
    let config = get_config();

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            std::process::exit(1);
        }
    };

    run_server(&config).await
}
