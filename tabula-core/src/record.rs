//! Types and traits for recording metrics of training and evaluation.
//!
//! # Core Components
//!
//! * [`Record`] - A container of key-value pairs of various data types
//! * [`RecordValue`] - The values that can be stored in a [`Record`]
//! * [`Recorder`] - The interface of destinations of records
//! * [`BufferedRecorder`] - A recorder keeping records in memory
//! * [`NullRecorder`] - A recorder that discards all records
//!
//! # Basic Usage
//!
//! ```rust
//! use tabula_core::record::{Record, RecordValue};
//!
//! let episode = 12;
//! let score = 3;
//!
//! let mut record = Record::empty();
//! record.insert("episode", RecordValue::Scalar(episode as f32));
//! record.insert("score", RecordValue::Scalar(score as f32));
//! assert_eq!(record.get_scalar("score").unwrap(), 3.0);
//! ```
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
