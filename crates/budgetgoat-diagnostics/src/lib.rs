// NOTE: Diagnostics Design Rationale
//
// Why an in-process ring buffer (not log files)?
// - Diagnostics must be collectable even when the filesystem is the thing
//   that is failing; the buffer has no dependencies beyond the allocator
// - A bounded buffer caps memory: appending past capacity evicts the
//   oldest entries first (strict FIFO), deterministically
//
// Why never-throw?
// - A reporting path that can itself fail turns one bug into two; every
//   public operation returns a value and swallows its own faults
//
// Why fire-and-forget remote forwarding?
// - The logging call must never wait on network I/O; entries are handed
//   to a detached worker over a channel and a delivery failure is echoed
//   to the console only, leaving the local buffer untouched

mod config;
mod logger;
mod sink;

pub use budgetgoat_types::{LogEntry, LogLevel, LoggerSession};
pub use config::LoggerConfig;
pub use logger::DiagnosticsLogger;
pub use sink::{ConsoleSink, RemoteSink, SinkError, StderrConsole};
