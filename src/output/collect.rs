//! Rebuild the workload model from a record stream
//!
//! [`SpecCollector`] is a [`RecordSink`] that assembles a [`WorkloadSpec`]
//! instead of writing text. Records arriving out of grammar order, and counts
//! that disagree with the records following them, are rejected with
//! [`std::io::ErrorKind::InvalidData`].

use super::{Record, RecordSink};
use crate::workload::tables::SizeLabel;
use crate::workload::{Phase, ThreadGroup, Topology, WorkloadSpec};
use std::io;

/// Sink that collects records into a [`WorkloadSpec`]
#[derive(Debug, Default)]
pub struct SpecCollector {
    topology: Topology,
    special_count: Option<usize>,
    general_count: Option<usize>,
    phase_count: Option<usize>,
    phases: Vec<Phase>,
    /// Thread count announced for the last phase
    thread_count: usize,
    /// Device count announced for the thread whose size has not arrived yet
    pending_ndev: Option<usize>,
    /// Device count announced for the last thread
    ndev: usize,
}

impl SpecCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished workload
    ///
    /// Fails when the stream ended before every announced phase, thread and
    /// device arrived.
    pub fn into_spec(self) -> io::Result<WorkloadSpec> {
        let phase_count = self
            .phase_count
            .ok_or_else(|| out_of_order("stream ended before the phase count"))?;
        self.close_phase()?;
        check_count("phases", phase_count, self.phases.len())?;

        Ok(WorkloadSpec {
            topology: self.topology,
            phases: self.phases,
        })
    }

    fn begin_thread(&mut self, size: SizeLabel) -> io::Result<()> {
        let ndev = self
            .pending_ndev
            .take()
            .ok_or_else(|| out_of_order("block size without a device count"))?;
        let phase = self
            .phases
            .last_mut()
            .ok_or_else(|| out_of_order("thread outside of a phase"))?;
        phase.threads.push(ThreadGroup {
            size,
            devices: Vec::with_capacity(ndev),
        });
        self.ndev = ndev;
        Ok(())
    }

    /// Check that the last thread received all announced devices
    fn close_thread(&self) -> io::Result<()> {
        if self.pending_ndev.is_some() {
            return Err(out_of_order("device count without a block size"));
        }
        match self.phases.last().and_then(|p| p.threads.last()) {
            Some(thread) => check_count("devices", self.ndev, thread.devices.len()),
            None => Ok(()),
        }
    }

    /// Check that the last phase received all announced threads
    fn close_phase(&self) -> io::Result<()> {
        self.close_thread()?;
        match self.phases.last() {
            Some(phase) => check_count("threads", self.thread_count, phase.threads.len()),
            None => Ok(()),
        }
    }
}

impl RecordSink for SpecCollector {
    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        match *record {
            Record::Grid { width, height } => {
                self.topology.grid_width = width;
                self.topology.grid_height = height;
            }
            Record::SpecialCount(n) => self.special_count = Some(n),
            Record::GeneralCount(n) => self.general_count = Some(n),
            Record::SpecialDevices(ids) => {
                let announced = self
                    .special_count
                    .ok_or_else(|| out_of_order("special devices without a count"))?;
                check_count("special devices", announced, ids.len())?;
                self.topology.special_devices = ids.to_vec();
            }
            Record::GeneralDevices(ids) => {
                let announced = self
                    .general_count
                    .ok_or_else(|| out_of_order("general devices without a count"))?;
                check_count("general devices", announced, ids.len())?;
                self.topology.general_devices = ids.to_vec();
            }
            Record::PhaseCount(n) => {
                self.phase_count = Some(n);
                self.phases.reserve(n);
            }
            Record::ThreadCount(n) => {
                let phase_count = self
                    .phase_count
                    .ok_or_else(|| out_of_order("phase before the header"))?;
                self.close_phase()?;
                if self.phases.len() >= phase_count {
                    return Err(too_many("phases", phase_count));
                }
                self.phases.push(Phase {
                    threads: Vec::with_capacity(n),
                });
                self.thread_count = n;
            }
            Record::DeviceCount(n) => {
                self.close_thread()?;
                let phase = self
                    .phases
                    .last()
                    .ok_or_else(|| out_of_order("thread outside of a phase"))?;
                if phase.threads.len() >= self.thread_count {
                    return Err(too_many("threads", self.thread_count));
                }
                self.pending_ndev = Some(n);
            }
            Record::BlockSize(size) => self.begin_thread(size)?,
            Record::Device(device) => {
                let ndev = self.ndev;
                let thread = self
                    .phases
                    .last_mut()
                    .and_then(|p| p.threads.last_mut())
                    .ok_or_else(|| out_of_order("device outside of a thread"))?;
                if thread.devices.len() >= ndev {
                    return Err(too_many("devices", ndev));
                }
                thread.devices.push(device);
            }
        }
        Ok(())
    }
}

fn out_of_order(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, format!("record out of order: {}", what))
}

fn too_many(what: &str, announced: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("more {} than the {} announced", what, announced),
    )
}

fn check_count(what: &str, announced: usize, actual: usize) -> io::Result<()> {
    if announced == actual {
        return Ok(());
    }
    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("{} announced {}, got {}", what, announced, actual),
    ))
}
