pub mod config;
pub mod ctx;
pub mod ops;

use std::marker::PhantomData;

use ctx::LogCtx;

pub fn search() -> LogCtx<ops::search::Search> { LogCtx { json: config::logs_are_json(), _marker: PhantomData } }
pub fn detail() -> LogCtx<ops::detail::Detail> { LogCtx { json: config::logs_are_json(), _marker: PhantomData } }
pub fn serve() -> LogCtx<ops::serve::Serve> { LogCtx { json: config::logs_are_json(), _marker: PhantomData } }
