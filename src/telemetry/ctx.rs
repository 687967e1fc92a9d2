use std::marker::PhantomData;
use std::time::Instant;

use anyhow::Result;
use serde::Serialize;
use tracing::{debug, info, warn, Span};

use crate::output::{self, types::Meta};

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = O::root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span {
        debug!(op = %self.op_name(), phase = ph.name(), "phase");
        ph.span()
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{}", msg); }
    }

    /// Print the op's JSON envelope on stdout.
    pub fn result<T: Serialize>(&self, result: &T, started: Instant) -> Result<()> {
        let meta = Meta { duration_ms: Some(started.elapsed().as_millis()) };
        output::emit_result(self.op_name(), result, Some(meta))
    }
}

impl LogCtx<crate::telemetry::ops::search::Search> {
    pub fn found(&self, query: &str, total: usize, dropped: usize) {
        if self.json { info!(op = %self.op_name(), query, total, dropped, "search_results"); }
        else { info!("🔍 {} result(s) for {:?} ({} dropped with unusable links)", total, query, dropped); }
    }
}

impl LogCtx<crate::telemetry::ops::detail::Detail> {
    pub fn extracted(&self, url: &str, has_download: bool, content_chars: usize) {
        if self.json { info!(op = %self.op_name(), url, has_download, content_chars, "detail_extracted"); }
        else { info!("📄 {} — download={} content_chars={}", url, has_download, content_chars); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
