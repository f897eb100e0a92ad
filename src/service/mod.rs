//! Request/reply plumbing between the front end and the scheduler.
//!
//! - [`SchedulerService`]: backend task answering `runScheduler` requests.
//! - [`SchedulerClient`]: front-end handle that correlates replies with
//!   requests through [`PendingRequests`].
//! - [`serve_lines`]: stdio transport for running the backend as a child
//!   process.

mod client;
mod server;
mod stdio;

pub use client::{ClientError, PendingReply, PendingRequests, SchedulerClient};
pub use server::{handle_request, serve, SchedulerService, ServiceChannels};
pub use stdio::serve_lines;
