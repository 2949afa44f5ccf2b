use std::io;
use std::sync::Arc;

use micro_h1::config::Config;
use micro_h1::logger::Logger;
use micro_h1::server::Server;
use micro_h1::{handlers, Router};

fn main() -> io::Result<()> {
    let config = Config::from_env();
    let logger = Arc::new(Logger::new(config.log_level));

    let mut router = Router::new(Arc::clone(&logger));
    handlers::routes(&mut router);

    let server = Server::new(config, logger, router);
    async_global_executor::block_on(server.listen())
}
