// SPDX-License-Identifier: GPL-3.0-only

//! Message handlers organized by functional domain
//!
//! - `camera`: device enumeration, frames, facing switches
//! - `capture`: still-frame capture
//! - `submission`: submit, retake
//! - `ui`: navigation and settings

mod camera;
mod capture;
mod submission;
mod ui;
