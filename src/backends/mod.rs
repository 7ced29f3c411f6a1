// SPDX-License-Identifier: GPL-3.0-only

//! Backend abstractions for platform capabilities

pub mod camera;
