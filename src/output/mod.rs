pub mod config;
pub mod presenter;
pub mod types;

use anyhow::Result;
use serde::Serialize;

use config::OutputConfig;
use presenter::Emitter;
use types::{Envelope, Meta};

pub fn emit_result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<()> {
    let env = Envelope::result(op, result, meta)?;
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}
