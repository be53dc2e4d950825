//! Run orchestration.
//!
//! Sequences device collection, app collection, and emission into one
//! document, tracking an explicit state machine:
//!
//! ```text
//! Init → CollectingDevice → CollectingApps → Emitting → Done | Failed
//! ```
//!
//! Device-collection failure is fatal (the document requires a device
//! block). Per-app failures are absorbed inside the collector and never
//! fail a run. Any unrecovered sink failure during emission is fatal and
//! the document is abandoned; nothing asserts the partial output is valid
//! JSON.

use crate::collect::{apps, device, AppRecord, DeviceRecord};
use crate::config::Config;
use crate::emit::JsonEmitter;
use crate::index::PackageIndex;
use crate::platform::BuildConstants;
use crate::walk::Walker;
use al_common::{Record, Result, Value};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// Extension carried by scratch deployments of the binary.
const SCRATCH_EXT: &str = "bin";

/// Orchestrator run states. `Done` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    CollectingDevice,
    CollectingApps,
    Emitting,
    Done,
    Failed,
}

/// The run orchestrator. Owns the top-level document for the duration of
/// one run; nothing here outlives the process.
pub struct Orchestrator<'a> {
    index: &'a dyn PackageIndex,
    platform: &'a dyn BuildConstants,
    walker: Walker,
    state: RunState,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        index: &'a dyn PackageIndex,
        platform: &'a dyn BuildConstants,
        walker: Walker,
    ) -> Self {
        Orchestrator {
            index,
            platform,
            walker,
            state: RunState::Init,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute one full run, writing the document to `sink`.
    pub fn run<W: Write>(&mut self, sink: W) -> Result<()> {
        self.state = RunState::CollectingDevice;
        let device = match device::collect(self.platform, &self.walker) {
            Ok(device) => device,
            Err(err) => {
                self.state = RunState::Failed;
                return Err(err);
            }
        };

        self.state = RunState::CollectingApps;
        let records = match apps::collect(self.index) {
            Ok(records) => records,
            Err(err) => {
                self.state = RunState::Failed;
                return Err(err);
            }
        };

        self.state = RunState::Emitting;
        match self.emit_document(sink, &device, &records) {
            Ok(()) => {
                self.state = RunState::Done;
                debug!(apps = records.len(), "document emitted");
                Ok(())
            }
            Err(err) => {
                self.state = RunState::Failed;
                Err(err)
            }
        }
    }

    fn emit_document<W: Write>(
        &self,
        sink: W,
        device: &DeviceRecord,
        records: &[AppRecord],
    ) -> Result<()> {
        // The apps block is keyed by package name. A duplicate name in the
        // index collapses last-write-wins, keeping the first key position.
        let mut apps_block = Record::new();
        for record in records {
            if !apps_block.insert(record.pkg.clone(), record.to_value()) {
                warn!(pkg = %record.pkg, "duplicate package name in index, keeping last record");
            }
        }

        let mut json = JsonEmitter::new(sink);
        json.begin_object()?;
        json.name("device")?;
        json.value(&device.to_value())?;
        json.name("apps")?;
        json.value(&Value::Record(apps_block))?;
        json.end_object()?;
        json.finish()
    }
}

/// Delete the running artifact if it was deployed to the scratch location.
///
/// Mirrors how the tool is used in practice: pushed to scratch storage,
/// executed once, and expected to leave nothing behind. Only fires when
/// the executable lives under `config.scratch_dir` with the scratch
/// extension; failures are logged and ignored, and never affect the run.
pub fn cleanup_scratch_binary(config: &Config) {
    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(err) => {
            debug!(error = %err, "cannot resolve current executable, skipping cleanup");
            return;
        }
    };
    if !is_scratch_artifact(&exe, &config.scratch_dir) {
        return;
    }
    match std::fs::remove_file(&exe) {
        Ok(()) => debug!(path = %exe.display(), "removed scratch artifact"),
        Err(err) => debug!(path = %exe.display(), error = %err, "scratch cleanup failed"),
    }
}

fn is_scratch_artifact(exe: &Path, scratch_dir: &Path) -> bool {
    exe.starts_with(scratch_dir) && exe.extension().is_some_and(|ext| ext == SCRATCH_EXT)
}
