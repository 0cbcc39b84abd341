// NOTE: Storage Accessor Rationale
//
// Why never-throw (errors captured, not propagated)?
// - A preference read/write failure must never take down the caller;
//   the worst acceptable outcome is falling back to the default value
// - Callers observe failure through the captured error string and decide
//   whether to surface it
//
// Why optimistic writes (in-memory value updated even when the backend
// write fails)?
// - The caller's view of "current value" always reflects the requested
//   write, so the UI never snaps back while the backend is unhealthy
// - The durability gap is deliberate and documented at `Setting::save`;
//   a failed write is not retried automatically
//
// Why last-write-wins (no coordination between racing saves)?
// - One user, one device, one process: the later save is the intended one

mod backend;
mod error;
mod fs;
mod setting;

pub use backend::{MemoryBackend, StorageBackend};
pub use error::{Error, Result};
pub use fs::FileBackend;
pub use setting::{LoadState, Setting};
