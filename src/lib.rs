//! CPU scheduling simulator with a correlated request/reply front end.
//!
//! A front end collects an algorithm name and a process list, sends them
//! on the `runScheduler` channel, and renders whatever comes back on
//! `schedulerResult`. This crate implements both sides of that exchange
//! and the scheduler in between.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessOutcome`, `Timeline`,
//!   `ScheduleResult`
//! - **`parse`**: The `id,arrival,burst,priority;...` text format
//! - **`validation`**: Input integrity checks (duplicate IDs, bad times)
//! - **`dispatching`**: Dispatching rules (FCFS, SJF, SRTF, HRRN, priority)
//!   and a composable rule engine
//! - **`scheduler`**: Dispatchers, round robin, KPIs, the `run` entry point
//! - **`protocol`**: Channel names, payloads, envelopes, line codec
//! - **`service`**: Backend task, correlating client, stdio transport
//! - **`collector`** / **`render`**: The two front-end components
//! - **`workload`**: Random workload generation
//! - **`config`**: TOML-backed settings
//!
//! # Example
//!
//! ```
//! use cpu_schedule::config::SchedulerConfig;
//! use cpu_schedule::protocol::{Reply, SchedulingRequest};
//! use cpu_schedule::render::render;
//! use cpu_schedule::scheduler;
//!
//! let request = SchedulingRequest::new("FCFS", "1,0,5,2;2,1,3,1");
//! let reply = Reply::from_outcome(scheduler::run(&request, &SchedulerConfig::default()));
//! let state = render(&reply);
//! assert_eq!(state.average_tat_text, "Average Turnaround Time: 6");
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod collector;
pub mod config;
pub mod dispatching;
pub mod models;
pub mod parse;
pub mod protocol;
pub mod render;
pub mod scheduler;
pub mod service;
pub mod validation;
pub mod workload;
