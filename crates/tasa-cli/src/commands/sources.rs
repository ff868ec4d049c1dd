use serde::Serialize;

use tasa_core::{EndpointConfig, SourceId};

use crate::cli::{Cli, SourcesArgs};
use crate::error::CliError;

use super::sources_config;

#[derive(Debug, Serialize)]
pub struct SourceListing {
    pub id: SourceId,
    pub label: String,
    pub url: String,
    pub extractor: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<Box<SourceListing>>,
}

impl SourceListing {
    fn new(endpoint: &EndpointConfig, verbose: bool) -> Self {
        Self {
            id: endpoint.source,
            label: endpoint.label.clone(),
            url: endpoint.url.clone(),
            extractor: endpoint.extractor.kind(),
            rule: verbose.then(|| endpoint.extractor.rule()),
            fallback: None,
        }
    }
}

pub fn run(cli: &Cli, args: &SourcesArgs) -> Result<Vec<SourceListing>, CliError> {
    let config = sources_config(cli)?;

    let listings = config
        .endpoints()
        .into_iter()
        .map(|endpoint| {
            let mut listing = SourceListing::new(endpoint, args.verbose);
            listing.fallback = config
                .fallback_for(endpoint.source)
                .map(|fallback| Box::new(SourceListing::new(fallback, args.verbose)));
            listing
        })
        .collect();

    Ok(listings)
}
