use super::TaxipoolOperation;
use clap::Parser;

/// command line tool for estimating carpool consolidation potential along a
/// fixed set of NYC taxi corridors
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct TaxipoolApp {
    #[command(subcommand)]
    pub op: TaxipoolOperation,
}
