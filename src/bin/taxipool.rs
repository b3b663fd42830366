//! this tool reverse-geocodes NYC TLC taxi trip files against the city taxi
//! zone layer, filters them to a fixed set of carpool corridors, and reports
//! the consolidation potential per corridor as weekly time-interval buckets.
use clap::Parser;
use taxipool::app::TaxipoolApp;

fn main() {
    env_logger::init();
    let args = TaxipoolApp::parse();
    match args.op.run() {
        Ok(_) => {}
        Err(e) => log::error!("{e}"),
    }
}
