use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Search;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Fetch, Extract, Resolve }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::Fetch => "fetch",
        Phase::Extract => "extract",
        Phase::Resolve => "resolve",
    }}
    fn span(&self) -> Span { match self {
        Phase::Fetch => info_span!("fetch"),
        Phase::Extract => info_span!("extract"),
        Phase::Resolve => info_span!("resolve"),
    }}
}

impl OpMarker for Search {
    const NAME: &'static str = "search";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("search") }
}
