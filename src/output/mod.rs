//! Workload file output
//!
//! The generator streams [`Record`]s into a [`RecordSink`]. Each record is one
//! line of the workload file; [`TextSink`] renders them onto any
//! [`std::io::Write`]. The sink never owns the destination's lifecycle: the
//! caller opens it before generation and commits or discards it afterwards.

pub mod collect;
pub mod json;
pub mod text;

use crate::workload::tables::SizeLabel;
use crate::workload::DeviceAccess;
use std::fmt;
use std::io::{self, Write};

/// One line of the workload file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Record {
    /// `{grid_w} {grid_h}`
    Grid { width: u32, height: u32 },
    SpecialCount(usize),
    SpecialDevices(&'static [u32]),
    GeneralCount(usize),
    GeneralDevices(&'static [u32]),
    PhaseCount(usize),
    ThreadCount(usize),
    /// Devices driven by the next thread
    DeviceCount(usize),
    BlockSize(SizeLabel),
    Device(DeviceAccess),
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Grid { width, height } => write!(f, "{} {}", width, height),
            Record::SpecialCount(n)
            | Record::GeneralCount(n)
            | Record::PhaseCount(n)
            | Record::ThreadCount(n)
            | Record::DeviceCount(n) => write!(f, "{}", n),
            Record::SpecialDevices(ids) | Record::GeneralDevices(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", id)?;
                }
                Ok(())
            }
            Record::BlockSize(size) => write!(f, "{}", size),
            Record::Device(device) => write!(f, "{}", device),
        }
    }
}

/// Destination accepting workload records in order
pub trait RecordSink {
    /// Append one record as the next line
    fn write_record(&mut self, record: &Record) -> io::Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for &mut S {
    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        (**self).write_record(record)
    }
}

/// Renders records as newline-terminated text lines
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flush and hand back the writer
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> RecordSink for TextSink<W> {
    fn write_record(&mut self, record: &Record) -> io::Result<()> {
        writeln!(self.writer, "{}", record)
    }
}
