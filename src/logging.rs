use slog::{Drain, Logger, Never, OwnedKVList, Record};

/// Minimal stdout drain, in the spirit of the framework's own
/// `SimpleLogger`: a fixed `"{level} [{module}] {body}"` line, no
/// dependency on a terminal-formatting crate.
pub struct PlainDrain;

impl Drain for PlainDrain {
    type Ok = ();
    type Err = Never;

    fn log(&self, record: &Record, _values: &OwnedKVList) -> Result<(), Never> {
        println!(
            "{} [{}] {}",
            record.level(),
            record.module(),
            record.msg()
        );
        Ok(())
    }
}

pub fn root_logger() -> Logger {
    Logger::root(PlainDrain.fuse(), slog::o!())
}
