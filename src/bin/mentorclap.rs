use mentorclap::listing::catalog::Catalog;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = mentorclap::log::logging_initialize() {
        eprintln!("logging initialize failed: {}", e.description());
        std::process::exit(1);
    }

    let (bind, page_size) = match mentorclap::conf::clap().read() {
        Ok(clap) => (clap.web.bind_addr(), clap.listing.page_size),
        Err(e) => {
            error!("config lock poisoned: {}", e);
            std::process::exit(1);
        },
    };

    info!("mentorclap {} starting, page size {}", mentorclap::VERSION, page_size);
    if let Err(e) = mentorclap::web::serve(&bind, Catalog::mock(page_size)).await {
        error!("list api stopped: {}", e.description());
        std::process::exit(1);
    }
}
