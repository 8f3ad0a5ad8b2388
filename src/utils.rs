//! Utils

use clap::Parser;

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
pub struct DemoCheckoutArgs {
    /// Number of catalog items to add to the cart
    #[clap(short, long)]
    pub n: Option<usize>,

    /// Fixture set to use for the catalog
    #[clap(short, long, default_value = "supplements")]
    pub fixture: String,

    /// Optional storefront configuration file
    #[clap(short, long)]
    pub config: Option<String>,
}
