// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application services: scan orchestration, progress display, reports, and
// staged output files.

pub mod outputs;
pub mod report;
pub mod scan_service;
pub mod spinner;
