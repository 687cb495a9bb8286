//! Core Chiedza MIS library (config, logging, remote client, domain records).

pub mod config;
pub mod datasets;
pub mod fixtures;
pub mod logging;
pub mod records;
pub mod remote;
