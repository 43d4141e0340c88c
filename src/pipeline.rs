//! Login, extraction and averaging composed into one run.

use tracing::info;

use crate::analyzers::aggregate::aggregate;
use crate::analyzers::scale::GradeScale;
use crate::analyzers::types::AverageResult;
use crate::credentials::CredentialPair;
use crate::errors::Result;
use crate::extract::{CellLayout, extract_records};
use crate::fetch::HttpClient;
use crate::parser::Document;
use crate::portal::Portal;

/// Logs in once, decodes the course rows and averages them.
///
/// Any failure ends the run; there are no retries and no partial averages.
pub async fn fetch_and_compute<C: HttpClient>(
    portal: &Portal<C>,
    credentials: &CredentialPair,
    scale: &GradeScale,
) -> Result<AverageResult> {
    let doc = portal.authenticate(credentials).await?;
    compute_from_document(&doc, &portal.config().layout, scale)
}

/// The offline half of [`fetch_and_compute`], for a page already in hand.
pub fn compute_from_document(
    doc: &Document,
    layout: &CellLayout,
    scale: &GradeScale,
) -> Result<AverageResult> {
    let records = extract_records(doc, layout)?;
    let result = aggregate(&records, scale)?;
    info!(records = records.len(), %result, "Average computed");
    Ok(result)
}
