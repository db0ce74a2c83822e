use actix_web::web::Data;
use actix_web::{App, HttpServer};
use rusty_handicap::args;
use rusty_handicap::controller::{self, db_prefill::db_prefill};
use rusty_handicap::logging;
use rusty_handicap::storage::Storage;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = args::args_checks();
    logging::init(args.log_level)?;

    let storage = args.open_storage()?;
    log::info!("storage {:?} opened ({})", args.db_type, args.db_name);

    if let Some(seed) = &args.seed_json {
        db_prefill(seed, storage.as_ref()).await?;
    }

    let storage: Data<dyn Storage> = Data::from(storage);
    let bind = (args.bind.clone(), args.port);
    log::info!("listening on {}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(storage.clone())
            .configure(controller::configure)
    })
    .bind(bind)?
    .run()
    .await?;
    Ok(())
}
