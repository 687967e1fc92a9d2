use std::io::{self, Write};

use super::config::OutputConfig;
use super::types::Envelope;

pub struct Emitter {
    pretty: bool,
}

impl Emitter {
    pub fn new(cfg: OutputConfig) -> Self {
        Emitter { pretty: cfg.pretty }
    }

    pub fn write(&self, env: &Envelope, w: &mut dyn Write) -> io::Result<()> {
        if self.pretty { serde_json::to_writer_pretty(&mut *w, env).map_err(to_io)? } else { serde_json::to_writer(&mut *w, env).map_err(to_io)? }
        writeln!(w)
    }

    pub fn emit(&self, env: &Envelope) -> io::Result<()> {
        let mut out = io::stdout().lock();
        self.write(env, &mut out)?;
        out.flush()
    }
}

fn to_io(e: serde_json::Error) -> io::Error { io::Error::new(io::ErrorKind::Other, e) }

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::types::Envelope;

    #[test]
    fn compact_is_single_line() {
        let env = Envelope::result("search", &vec!["a", "b"], None).unwrap();
        let mut buf = Vec::new();
        Emitter::new(OutputConfig { pretty: false }).write(&env, &mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s.lines().count(), 1);
        assert!(s.ends_with('\n'));
    }

    #[test]
    fn pretty_spans_lines() {
        let env = Envelope::result("search", &vec!["a", "b"], None).unwrap();
        let mut buf = Vec::new();
        Emitter::new(OutputConfig { pretty: true }).write(&env, &mut buf).unwrap();
        assert!(String::from_utf8(buf).unwrap().lines().count() > 1);
    }
}
